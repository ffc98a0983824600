// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pattern tree generator.
//!
//! This module builds the pattern template database: every bit pattern of
//! hits across the plane stack that is consistent with a straight-line
//! trajectory, at every bin resolution up to the configured depth.
//!
//! # Architecture
//!
//! The generator expands the tree recursively from the all-zero root. At
//! each node, `ChildIter` proposes the canonicalized children at doubled
//! resolution; every proposed child is looked up in a content-addressed
//! hash table so that exactly one instance of each canonical pattern ever
//! exists, and fresh patterns must pass the slope cut and the line-band
//! containment check before insertion. Child links carry the shift/mirror
//! tag that relates the shared canonical child to this particular parent.
//!
//! Because patterns are shared, a node first created deep in the tree (where
//! the slope cut is loose) can be re-encountered closer to the root. Each
//! node records the shallowest depth at which it was ever used; when a
//! revisit lowers that depth, the node's subtree is extended further down.
//! This re-extension rule is the one subtlety of the build.
//!
//! The finished graph is frozen into a [`PatternTree`](crate::tree::PatternTree)
//! with nodes in depth-first discovery order.

mod child_iter;
pub mod cuts;
pub mod statistics;

pub use statistics::{RejectReason, Statistics};

use crate::engine::child_iter::ChildIter;
use crate::engine::cuts::{line_check, test_slope};
use crate::geometry::{ParamError, Pattern, TreeParam};
use crate::tree::{Link, NodeId, PatternTree, TreeNode};
use std::time::Instant;

/// Sentinel for "never used at any depth yet".
const DEPTH_UNSET: u32 = u32::MAX;

/// One pattern in the build arena.
#[derive(Debug)]
struct BuildNode {
    pattern: Pattern,
    /// Shallowest depth at which this pattern has been requested.
    min_depth: u32,
    /// Child links; empty also means "children not generated yet".
    links: Vec<Link>,
}

/// Generator for the pattern template database.
///
/// A generator owns the build arena and hash table for one tree at a time;
/// [`generate`](PatternGenerator::generate) can be called repeatedly and
/// resets the state for each run.
///
/// # Example
///
/// ```
/// use track_search::engine::PatternGenerator;
/// use track_search::geometry::TreeParam;
///
/// let params = TreeParam {
///     max_depth: 3,
///     width: 1.0,
///     z_pos: vec![0.0, 0.5, 1.0],
///     max_slope: 0.3,
/// };
/// let mut generator = PatternGenerator::new();
/// let tree = generator.generate(&params).unwrap();
/// assert_eq!(tree.len() as u32, generator.statistics().n_patterns);
/// ```
#[derive(Debug, Default)]
pub struct PatternGenerator {
    /// Number of levels of the tree (depths 0 to nlevels-1).
    nlevels: u32,
    /// Number of hit-pattern planes.
    nplanes: usize,
    /// Slope limit in normalized units.
    max_slope: f64,
    /// Plane z positions, normalized to [0, 1].
    z: Vec<f64>,

    /// Arena of all unique patterns, in insertion order (root first).
    nodes: Vec<BuildNode>,
    /// Hash buckets of arena indices, for content-addressed lookup.
    buckets: Vec<Vec<u32>>,

    stats: Statistics,
}

impl PatternGenerator {
    pub fn new() -> Self {
        PatternGenerator::default()
    }

    /// Build a pattern tree for the given parameters.
    ///
    /// The parameters are validated and normalized first; on failure no tree
    /// is built. The returned tree is frozen; build statistics stay on the
    /// generator and can be read with [`statistics`](PatternGenerator::statistics).
    pub fn generate(&mut self, parameters: &TreeParam) -> Result<PatternTree, ParamError> {
        let params = parameters.normalize()?;

        self.nlevels = params.max_depth + 1;
        self.z = params.z_pos.clone();
        self.nplanes = self.z.len();
        self.max_slope = params.max_slope;
        self.nodes.clear();
        self.buckets.clear();
        self.stats = Statistics::new();

        eprintln!(
            "[PatternGenerator] Generating {} levels over {} planes...",
            self.nlevels, self.nplanes
        );
        let start = Instant::now();

        // The trivial all-zero root at depth 0.
        let root = self.insert(Pattern::zero(self.nplanes));
        self.make_child_nodes(root, 1);

        self.stats.build_time = start.elapsed().as_secs_f64();
        self.calc_statistics();
        eprintln!(
            "[PatternGenerator] Done: {} patterns, {} links in {:.3} s",
            self.stats.n_patterns, self.stats.n_links, self.stats.build_time
        );

        Ok(self.freeze(params))
    }

    /// Statistics of the most recent build.
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Store a fresh pattern in the arena and hash table.
    fn insert(&mut self, pattern: Pattern) -> u32 {
        let index = self.nodes.len() as u32;
        self.nodes.push(BuildNode {
            pattern,
            min_depth: DEPTH_UNSET,
            links: Vec::new(),
        });
        self.add_hash(index);
        index
    }

    /// Link the pattern at the given arena index into its hash bucket.
    ///
    /// Callers must have checked with [`find`](PatternGenerator::find) that
    /// no equal pattern is stored yet.
    fn add_hash(&mut self, index: u32) {
        if self.buckets.is_empty() {
            // 2^(nlevels-1) * 2^(nplanes-2) is the upper limit for the
            // number of patterns, so 2^(nlevels-1) buckets keep the
            // collision chains around 2^(nplanes-2) entries. Anything
            // better would need a cleverer hash function.
            self.buckets = vec![Vec::new(); 1usize << (self.nlevels - 1)];
        }
        let hash = self.nodes[index as usize].pattern.hash() as usize % self.buckets.len();
        self.buckets[hash].push(index);
    }

    /// Look up the canonical instance of a pattern, if it is stored.
    fn find(&self, pattern: &Pattern) -> Option<u32> {
        debug_assert!(!self.buckets.is_empty());
        let hash = pattern.hash() as usize % self.buckets.len();
        self.buckets[hash]
            .iter()
            .copied()
            .find(|&index| self.nodes[index as usize].pattern == *pattern)
    }

    /// Generate child nodes for the given parent pattern.
    fn make_child_nodes(&mut self, parent: u32, depth: u32) {
        // Requesting children at this depth means the parent is in use at
        // the level above.
        if depth > 0 {
            let node = &mut self.nodes[parent as usize];
            if depth - 1 < node.min_depth {
                node.min_depth = depth - 1;
            }
        }

        // Base case: no children beyond the last level.
        if depth >= self.nlevels {
            return;
        }

        // If not already done, generate the child links of this parent.
        if self.nodes[parent as usize].links.is_empty() {
            let parent_pattern = self.nodes[parent as usize].pattern.clone();
            let mut links = Vec::new();
            for (child, kind) in ChildIter::new(&parent_pattern) {
                if let Some(existing) = self.find(&child) {
                    // The pattern exists. If it has only been tested at a
                    // deeper level, redo the slope test: the slope is larger
                    // closer to the root.
                    let node = &self.nodes[existing as usize];
                    if depth >= node.min_depth
                        || test_slope(node.pattern.width(), depth, self.max_slope)
                    {
                        links.push(Link {
                            child: NodeId(existing),
                            kind,
                        });
                    }
                } else if !test_slope(child.width(), depth, self.max_slope) {
                    self.stats.count_reject(RejectReason::SlopeCut);
                } else if !line_check(child.bins(), &self.z) {
                    self.stats.count_reject(RejectReason::LineCut);
                } else {
                    let index = self.insert(child);
                    links.push(Link {
                        child: NodeId(index),
                        kind,
                    });
                }
            }
            self.nodes[parent as usize].links = links;
        }

        // Recurse down the tree. A child needs a visit if it has no children
        // yet OR (important!) its children were generated from a deeper
        // location and its subtree must now be extended further down.
        for i in 0..self.nodes[parent as usize].links.len() {
            let child = self.nodes[parent as usize].links[i].child.0;
            let node = &self.nodes[child as usize];
            if node.links.is_empty() || node.min_depth > depth {
                self.make_child_nodes(child, depth + 1);
            }
        }
    }

    /// Collect statistics on the finished tree. This is done separately at
    /// the end of the build because averages and memory requirements only
    /// make sense once the tree is complete.
    fn calc_statistics(&mut self) {
        self.stats.n_patterns = 0;
        self.stats.n_links = 0;
        self.stats.max_child_list_length = 0;
        self.stats.max_hash_depth = 0;

        for bucket in &self.buckets {
            for &index in bucket {
                self.stats.n_patterns += 1;
                let list_length = self.nodes[index as usize].links.len() as u32;
                self.stats.n_links += list_length;
                if list_length > self.stats.max_child_list_length {
                    self.stats.max_child_list_length = list_length;
                }
            }
            if bucket.len() as u32 > self.stats.max_hash_depth {
                self.stats.max_hash_depth = bucket.len() as u32;
            }
        }
        debug_assert_eq!(self.stats.n_patterns as usize, self.nodes.len());

        self.stats.n_bytes = self.nodes.len() * std::mem::size_of::<BuildNode>()
            + self.nodes.len() * self.nplanes * std::mem::size_of::<u16>()
            + self.stats.n_links as usize * std::mem::size_of::<Link>();
        self.stats.n_hash_bytes = self.buckets.len() * std::mem::size_of::<Vec<u32>>()
            + self.nodes.len() * std::mem::size_of::<u32>();
    }

    /// Freeze the build arena into a PatternTree.
    ///
    /// Nodes are emitted in depth-first discovery order; a node's position
    /// in the emitted table is its reference index and links are rewritten
    /// to those indices.
    fn freeze(&self, params: TreeParam) -> PatternTree {
        let mut ref_index: Vec<Option<u32>> = vec![None; self.nodes.len()];
        let mut order: Vec<u32> = Vec::with_capacity(self.nodes.len());
        self.assign_ref_indices(0, &mut ref_index, &mut order);
        debug_assert_eq!(order.len(), self.nodes.len());

        let nodes = order
            .iter()
            .map(|&index| {
                let node = &self.nodes[index as usize];
                let links = node
                    .links
                    .iter()
                    .map(|link| Link {
                        child: NodeId(
                            ref_index[link.child.index()]
                                .expect("every stored pattern is reachable from the root"),
                        ),
                        kind: link.kind,
                    })
                    .collect();
                TreeNode::new(node.pattern.clone(), node.min_depth, links)
            })
            .collect();
        PatternTree::new(params, nodes)
    }

    /// Assign dense reference indices in depth-first preorder.
    fn assign_ref_indices(
        &self,
        index: u32,
        ref_index: &mut Vec<Option<u32>>,
        order: &mut Vec<u32>,
    ) {
        if ref_index[index as usize].is_some() {
            return;
        }
        ref_index[index as usize] = Some(order.len() as u32);
        order.push(index);
        for link in &self.nodes[index as usize].links {
            self.assign_ref_indices(link.child.0, ref_index, order);
        }
    }
}
