// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sorted hit sets with plane-occupancy similarity.
//!
//! A [`HitSet`] is the set of hits attached to one track candidate, sorted
//! by position, with a cached [`PlaneSet`] of the planes that contributed at
//! least one hit. The cache is an invariant of the set: it is computed on
//! construction and kept current by the mutating API.
//!
//! [`is_similar_to`](HitSet::is_similar_to) is the occupancy-weakened
//! inclusion test the road builder uses to drop subsumed candidates: like
//! the standard `includes` algorithm, but a candidate may carry extra hits
//! in a plane as long as at least one hit in that plane is shared.

use crate::geometry::PlaneSet;
use crate::hits::Hit;
use std::cmp::Ordering;

/// A sorted set of hits with its cached plane-occupancy pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct HitSet {
    hits: Vec<Hit>,
    plane_pattern: PlaneSet,
}

impl HitSet {
    /// Build a hit set; the hits are sorted by position and the plane
    /// pattern is computed once.
    pub fn new(mut hits: Vec<Hit>) -> Self {
        hits.sort_by(Hit::position_cmp);
        let plane_pattern = Self::match_value(&hits);
        Self {
            hits,
            plane_pattern,
        }
    }

    /// The plane occupancy pattern of an arbitrary hit slice: bit p is set
    /// iff some hit lies in plane p.
    pub fn match_value(hits: &[Hit]) -> PlaneSet {
        let mut pattern = PlaneSet::empty();
        for hit in hits {
            pattern.insert(hit.plane());
        }
        pattern
    }

    /// The hits, sorted by position.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Number of hits in the set.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The cached plane occupancy pattern.
    pub fn plane_pattern(&self) -> PlaneSet {
        self.plane_pattern
    }

    /// Insert a hit, keeping the sort order and the plane pattern current.
    pub fn insert(&mut self, hit: Hit) {
        let index = self
            .hits
            .partition_point(|h| h.position_cmp(&hit) == Ordering::Less);
        self.plane_pattern.insert(hit.plane());
        self.hits.insert(index, hit);
    }

    /// Occupancy-weakened inclusion of `tryset` in this set.
    ///
    /// Like the standard `includes` algorithm, but `tryset` may have extra
    /// hits in a wire plane if at least one hit of that plane is shared.
    ///
    /// Example: the following matches, despite the extra hit in plane 1
    /// ```text
    ///   this:  30/   32/40/50/51
    ///   try:   --/31 32/40/50/51
    /// ```
    ///
    /// Standard `includes` implies intersection == set2. This tests
    /// planepattern(intersection) == planepattern(set2).
    pub fn is_similar_to(&self, tryset: &HitSet) -> bool {
        let mut intersection = PlaneSet::empty();
        let mut i = 0;
        let mut j = 0;

        while i < self.hits.len() && j < tryset.hits.len() {
            match tryset.hits[j].position_cmp(&self.hits[i]) {
                Ordering::Less => j += 1,
                Ordering::Greater => i += 1,
                Ordering::Equal => {
                    intersection.insert(tryset.hits[j].plane());
                    i += 1;
                    j += 1;
                }
            }
        }
        tryset.plane_pattern == intersection
    }
}
