// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Event-time matching scenarios: pair iteration over two hit planes and
//! plane-occupancy similarity between candidate hit sets.

mod common;

use common::plane_hits;
use track_search::hits::{Hit, HitPairIter, HitSet};

fn positions(
    pairs: Vec<(Option<&Hit>, Option<&Hit>)>,
) -> Vec<(Option<f64>, Option<f64>)> {
    pairs
        .into_iter()
        .map(|(a, b)| (a.map(Hit::pos), b.map(Hit::pos)))
        .collect()
}

#[test]
fn test_pair_iteration_with_singletons() {
    let a = plane_hits(0, &[1.0, 5.0]);
    let b = plane_hits(1, &[1.2, 9.0]);

    let emitted = positions(HitPairIter::new(&a, &b, 0.5).collect());
    assert_eq!(
        emitted,
        vec![
            (Some(1.0), Some(1.2)),
            (Some(5.0), None),
            (None, Some(9.0)),
        ]
    );
}

#[test]
fn test_pair_iteration_scan() {
    let a = plane_hits(0, &[1.0]);
    let b = plane_hits(1, &[0.8, 1.1, 1.3]);

    let mut iter = HitPairIter::new(&a, &b, 0.5);
    let emitted = positions(iter.by_ref().collect());
    assert_eq!(
        emitted,
        vec![
            (Some(1.0), Some(0.8)),
            (Some(1.0), Some(1.1)),
            (Some(1.0), Some(1.3)),
        ]
    );
    // Terminal: the iterator stays exhausted.
    assert!(iter.next().is_none());
}

#[test]
fn test_similarity_weakened_inclusion() {
    let this = HitSet::new(vec![
        Hit::new(0, 30.0, 0.1),
        Hit::new(2, 32.0, 0.1),
        Hit::new(3, 40.0, 0.1),
        Hit::new(4, 50.0, 0.1),
    ]);

    // A candidate with a hit in a plane this set cannot cover at all does
    // not match.
    let with_uncovered_plane = HitSet::new(vec![
        Hit::new(1, 31.0, 0.1),
        Hit::new(2, 32.0, 0.1),
        Hit::new(3, 40.0, 0.1),
        Hit::new(4, 50.0, 0.1),
    ]);
    assert!(!this.is_similar_to(&with_uncovered_plane));

    // An extra unmatched hit in an already-covered plane is fine.
    let with_extra_hit = HitSet::new(vec![
        Hit::new(2, 32.0, 0.1),
        Hit::new(3, 40.0, 0.1),
        Hit::new(4, 50.0, 0.1),
        Hit::new(4, 51.0, 0.1),
    ]);
    assert!(this.is_similar_to(&with_extra_hit));
}

#[test]
fn test_match_value_is_plane_occupancy() {
    let hits = vec![
        Hit::new(0, 1.0, 0.1),
        Hit::new(2, 2.0, 0.1),
        Hit::new(2, 3.0, 0.1),
    ];
    let pattern = HitSet::match_value(&hits);
    assert!(pattern.contains(0));
    assert!(!pattern.contains(1));
    assert!(pattern.contains(2));
    assert_eq!(pattern.len(), 2);
}

#[test]
fn test_pairs_feed_similarity() {
    // Pair up two planes, collect the matched hits into sets, and check the
    // pair-derived set subsumes the single-plane set.
    let a = plane_hits(0, &[10.0, 20.0, 30.0]);
    let b = plane_hits(1, &[10.1, 19.9, 31.0]);

    let mut matched = Vec::new();
    for (hit_a, hit_b) in HitPairIter::new(&a, &b, 0.5) {
        if let (Some(hit_a), Some(hit_b)) = (hit_a, hit_b) {
            matched.push(hit_a.clone());
            matched.push(hit_b.clone());
        }
    }
    let both_planes = HitSet::new(matched);
    let one_plane = HitSet::new(vec![Hit::new(0, 10.0, 0.1), Hit::new(0, 20.0, 0.1)]);

    assert!(both_planes.is_similar_to(&one_plane));
    assert!(!one_plane.is_similar_to(&both_planes));
}
