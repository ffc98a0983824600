// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pattern type for hit-pattern templates.
//!
//! A pattern is a tuple of non-negative bin indices, one per wire plane,
//! describing which bin of the hit pattern is occupied in each plane at a
//! given level of resolution.
//!
//! Patterns are stored in canonical form:
//! - `bins[0] == 0` (otherwise the pattern would be a right-shift of another
//!   pattern, which is represented by a shift tag on the link instead),
//! - the smallest bin value is 0, and the extreme bins sit at the two ends,
//!   so the signed width `bins[N-1] - bins[0]` equals the largest bin.
//!
//! During child enumeration a pattern may temporarily hold a *raw* (not yet
//! canonicalized) tuple; a negative [`width`](Pattern::width) then flags that
//! the tuple must be mirrored to reach canonical form.
//!
//! # Examples
//!
//! ```
//! use track_search::geometry::Pattern;
//!
//! let root = Pattern::zero(3);
//! assert_eq!(root.bins(), &[0, 0, 0]);
//! assert_eq!(root.width(), 0);
//!
//! let pat = Pattern::from_bins(vec![0, 1, 2]);
//! assert_eq!(pat.width(), 2);
//! assert_eq!(format!("{}", pat), "[0 1 2]");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A hit-pattern template: one bin index per wire plane.
///
/// Equality is structural (elementwise on the bin tuple) and
/// [`hash`](Pattern::hash) is consistent with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// Bin index per plane. u16 bins bound the tree to 17 levels.
    bins: Vec<u16>,
}

impl Pattern {
    /// Create the all-zero pattern of the given number of planes.
    ///
    /// This is the root of every pattern tree.
    ///
    /// # Panics
    ///
    /// Panics if `nplanes < 2`; a pattern needs at least two planes.
    pub fn zero(nplanes: usize) -> Self {
        assert!(nplanes >= 2, "Pattern needs >= 2 planes, got {}", nplanes);
        Self {
            bins: vec![0; nplanes],
        }
    }

    /// Create a pattern directly from a bin tuple.
    pub fn from_bins(bins: Vec<u16>) -> Self {
        assert!(bins.len() >= 2, "Pattern needs >= 2 planes, got {}", bins.len());
        Self { bins }
    }

    /// The bin tuple.
    #[inline]
    pub fn bins(&self) -> &[u16] {
        &self.bins
    }

    /// Number of planes (= number of bins).
    #[inline]
    pub fn nplanes(&self) -> usize {
        self.bins.len()
    }

    /// Bin index in plane `i`.
    #[inline]
    pub fn bin(&self, i: usize) -> u16 {
        self.bins[i]
    }

    /// Signed width of the pattern: last bin minus first bin.
    ///
    /// For a canonical pattern the extreme bins sit at the ends and the first
    /// bin is 0, so the width equals the largest bin and is non-negative.
    /// For a raw tuple produced during child enumeration, a negative width
    /// flags a pattern that must be mirrored to become canonical.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bins[self.bins.len() - 1] as i32 - self.bins[0] as i32
    }

    /// Hash of the bin tuple.
    ///
    /// A plain multiplier fold; consistent with `==` and cheap enough to
    /// recompute on every lookup. The bucket count of the pattern table is
    /// `2^(nlevels-1)`, which keeps collision chains around `2^(nplanes-2)`
    /// entries with this spread.
    pub fn hash(&self) -> u32 {
        self.bins
            .iter()
            .fold(0u32, |h, &b| h.wrapping_mul(31).wrapping_add(b as u32))
    }
}

impl fmt::Display for Pattern {
    /// Format a pattern as "[b0 b1 ... bN-1]".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, bin) in self.bins.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", bin)?;
        }
        write!(f, "]")
    }
}
