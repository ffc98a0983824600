// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Build statistics.
//!
//! Counts collected while the tree is built (cut rejections, wall-clock
//! time) plus the sizes computed once the tree is complete: averages and
//! memory requirements only make sense on the finished tree.

use std::fmt;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

/// Why a fresh candidate pattern was rejected.
#[derive(EnumCountMacro, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum RejectReason {
    /// Failed the slope cut.
    SlopeCut,
    /// Failed the line-band containment check.
    LineCut,
}

/// Statistics record for one generator run.
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    /// Number of unique patterns in the tree.
    pub n_patterns: u32,
    /// Total number of child links.
    pub n_links: u32,
    /// Estimated byte footprint of patterns, bins and links.
    pub n_bytes: usize,
    /// Estimated byte footprint of the hash table.
    pub n_hash_bytes: usize,
    /// Longest child list of any pattern.
    pub max_child_list_length: u32,
    /// Deepest hash-bucket collision chain.
    pub max_hash_depth: u32,
    /// Build wall-clock time in seconds.
    pub build_time: f64,

    rejects: [u64; RejectReason::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Record the rejection of a fresh candidate.
    pub(crate) fn count_reject(&mut self, reason: RejectReason) {
        self.rejects[reason as usize] += 1;
    }

    /// How many fresh candidates were rejected for the given reason.
    pub fn rejects(&self, reason: RejectReason) -> u64 {
        self.rejects[reason as usize]
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "patterns = {}, links = {}, bytes = {}",
            self.n_patterns, self.n_links, self.n_bytes
        )?;
        writeln!(
            f,
            "maxlinklen = {}, maxhash = {}, hashbytes = {}",
            self.max_child_list_length, self.max_hash_depth, self.n_hash_bytes
        )?;
        writeln!(
            f,
            "slope rejects = {}, line rejects = {}",
            self.rejects(RejectReason::SlopeCut),
            self.rejects(RejectReason::LineCut)
        )?;
        write!(f, "time = {} s", self.build_time)
    }
}
