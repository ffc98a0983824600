// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of the canonicalized children of a parent pattern.
//!
//! When the bin resolution doubles, each bin of the parent splits in two and
//! every child bin is either `2*bit` or `2*bit + 1` of the parent bit. A
//! selector word with one bit per plane picks the variant, giving
//! `2^nplanes` raw candidates per parent; the selector counts down from
//! `2^nplanes - 1` to 0.
//!
//! Candidates whose bins are not bounded by their end bins are dropped (a
//! straight track enters and leaves through the end planes). The survivors
//! are canonicalized and tagged:
//! - a candidate whose smallest bin is 1 is shifted down one bin
//!   ([`LinkKind::Shifted`]),
//! - a candidate running downhill (negative raw width) is mirrored about its
//!   width ([`LinkKind::Mirrored`]).
//!
//! Mirror first, then shift, to recover the concrete pattern. With the
//! self-referential tree structure, mirrored candidates only ever arise for
//! children of the all-zero root, and a candidate is never both shifted and
//! mirrored.
//!
//! The iterator does not deduplicate: the same canonical child can be
//! yielded several times with different tags, and the hash-cons step decides
//! what to do with each.

use crate::geometry::Pattern;
use crate::tree::LinkKind;

/// Iterator over the canonicalized children of a parent pattern at doubled
/// resolution.
pub(crate) struct ChildIter<'a> {
    parent: &'a Pattern,
    /// Selector countdown; doubles as the selector word. Negative = done.
    count: i64,
    /// Raw child bins under construction, reused across candidates.
    scratch: Vec<u16>,
}

impl<'a> ChildIter<'a> {
    pub(crate) fn new(parent: &'a Pattern) -> Self {
        let nbits = parent.nplanes();
        debug_assert!(nbits < 63, "Selector word overflow for {} planes", nbits);
        Self {
            parent,
            count: (1i64 << nbits) - 1,
            scratch: vec![0; nbits],
        }
    }
}

impl Iterator for ChildIter<'_> {
    type Item = (Pattern, LinkKind);

    fn next(&mut self) -> Option<Self::Item> {
        while self.count >= 0 {
            let sel = self.count as u64;
            self.count -= 1;

            let mut minbit = i32::MAX;
            let mut maxbit = i32::MIN;
            for (i, slot) in self.scratch.iter_mut().enumerate() {
                let mut bit = (self.parent.bin(i) as i32) << 1;
                if sel & (1 << i) != 0 {
                    bit += 1;
                }
                *slot = bit as u16;
                minbit = minbit.min(bit);
                maxbit = maxbit.max(bit);
            }

            // Signed raw width: end bin minus start bin. A candidate whose
            // extremes are not at the end planes cannot contain a straight
            // track and is dropped here.
            let width =
                self.scratch[self.scratch.len() - 1] as i32 - self.scratch[0] as i32;
            if maxbit - minbit > width.abs() {
                continue;
            }

            let mut kind = LinkKind::Direct;
            if minbit > 0 {
                for bit in self.scratch.iter_mut() {
                    *bit -= 1;
                }
                kind = LinkKind::Shifted;
            }
            if width < 0 {
                // Downhill candidates arise only from the all-zero parent,
                // whose smallest child bin is 0, so shift and mirror cannot
                // combine.
                debug_assert_eq!(kind, LinkKind::Direct);
                let w = (-width) as u16;
                for bit in self.scratch.iter_mut() {
                    *bit = w - *bit;
                }
                kind = LinkKind::Mirrored;
            }

            return Some((Pattern::from_bins(self.scratch.clone()), kind));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(parent: &Pattern) -> Vec<(Vec<u16>, LinkKind)> {
        ChildIter::new(parent)
            .map(|(pat, kind)| (pat.bins().to_vec(), kind))
            .collect()
    }

    #[test]
    fn test_root_children_two_planes() {
        // Selector counts down 3, 2, 1, 0:
        //   [1,1] shifts to [0,0]; [0,1] is direct; [1,0] mirrors to [0,1];
        //   [0,0] is direct.
        let root = Pattern::zero(2);
        assert_eq!(
            children(&root),
            vec![
                (vec![0, 0], LinkKind::Shifted),
                (vec![0, 1], LinkKind::Direct),
                (vec![0, 1], LinkKind::Mirrored),
                (vec![0, 0], LinkKind::Direct),
            ]
        );
    }

    #[test]
    fn test_direct_precedes_mirror_twin() {
        // The unmirrored route to a canonical child always has the larger
        // selector, so it is yielded first.
        for nplanes in 2..=4 {
            let root = Pattern::zero(nplanes);
            let mut seen = Vec::new();
            for (bins, kind) in children(&root) {
                if kind == LinkKind::Mirrored {
                    assert!(
                        seen.contains(&bins),
                        "Mirror candidate {:?} has no earlier direct twin",
                        bins
                    );
                }
                seen.push(bins);
            }
        }
    }

    #[test]
    fn test_steeper_parent() {
        let parent = Pattern::from_bins(vec![0, 1]);
        assert_eq!(
            children(&parent),
            vec![
                (vec![0, 2], LinkKind::Shifted),
                (vec![0, 3], LinkKind::Direct),
                (vec![0, 1], LinkKind::Shifted),
                (vec![0, 2], LinkKind::Direct),
            ]
        );
    }

    #[test]
    fn test_unbounded_candidate_rejected() {
        // Parent [0,1,1]: selector 0b010 builds [0,3,2], whose middle bin
        // pokes above the end bins; it must be dropped.
        let parent = Pattern::from_bins(vec![0, 1, 1]);
        let all = children(&parent);
        assert!(all.iter().all(|(bins, _)| bins != &vec![0, 3, 2]));
        assert!(all.len() < 8);
    }

    #[test]
    fn test_children_are_canonical() {
        for parent in [
            Pattern::zero(3),
            Pattern::from_bins(vec![0, 1, 2]),
            Pattern::from_bins(vec![0, 0, 1]),
        ] {
            for (pat, _) in ChildIter::new(&parent) {
                assert_eq!(*pat.bins().iter().min().unwrap(), 0, "{} not canonical", pat);
                assert!(pat.width() >= 0, "{} still mirrored", pat);
                assert_eq!(pat.width(), *pat.bins().iter().max().unwrap() as i32);
            }
        }
    }

    #[test]
    fn test_mirror_only_from_zero_parent() {
        for parent in [
            Pattern::from_bins(vec![0, 1]),
            Pattern::from_bins(vec![0, 1, 2]),
            Pattern::from_bins(vec![0, 0, 1]),
        ] {
            for (_, kind) in ChildIter::new(&parent) {
                assert_ne!(kind, LinkKind::Mirrored);
            }
        }
    }
}
