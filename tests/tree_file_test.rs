// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Round-trip and layout checks for the binary tree file format.

mod common;

use common::tree_params;
use track_search::engine::PatternGenerator;
use track_search::tree::PatternTree;

fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("track_search_it_{}_{}", std::process::id(), name));
    path
}

#[test]
fn test_generated_tree_round_trips() {
    let mut generator = PatternGenerator::new();
    let tree = generator
        .generate(&tree_params(4, vec![0.0, 0.3, 0.7, 1.0], 0.5))
        .unwrap();

    let path = temp_path("roundtrip.tree");
    tree.save(&path).unwrap();
    let loaded = PatternTree::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(tree, loaded);
    assert_eq!(loaded.params().z_pos[0], 0.0);
    assert_eq!(*loaded.params().z_pos.last().unwrap(), 1.0);
}

#[test]
fn test_nodes_in_depth_first_discovery_order() {
    // The root is reference index 0, and every other node is first reached
    // from a node with a smaller reference index.
    let mut generator = PatternGenerator::new();
    let tree = generator
        .generate(&tree_params(3, vec![0.0, 0.5, 1.0], 0.6))
        .unwrap();

    assert_eq!(tree.root().index(), 0);
    let mut first_referenced_from = vec![usize::MAX; tree.len()];
    for (id, node) in tree.nodes() {
        for link in node.links() {
            let child = link.child.index();
            if id.index() < first_referenced_from[child] {
                first_referenced_from[child] = id.index();
            }
        }
    }
    for (index, &parent) in first_referenced_from.iter().enumerate().skip(1) {
        assert!(
            parent < index,
            "node {} is not referenced by any earlier node",
            index
        );
    }
}

#[test]
fn test_links_stay_in_range() {
    let mut generator = PatternGenerator::new();
    let tree = generator
        .generate(&tree_params(3, vec![0.0, 0.5, 1.0], 0.6))
        .unwrap();
    for (_, node) in tree.nodes() {
        for link in node.links() {
            assert!(link.child.index() < tree.len());
        }
    }
}
