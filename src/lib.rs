// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tree-search track finding for wire-chamber particle tracking.
//!
//! This crate implements the core of a template-based track finder: every
//! hit pattern across a stack of parallel wire planes that is consistent
//! with a straight-line trajectory is enumerated once, up front, into a
//! shared pattern tree; reconstructed hits are then matched against those
//! templates event by event.
//!
//! # Architecture
//!
//! The implementation uses a two-tier model:
//!
//! ## Tier 1: Template database (immutable)
//!
//! Built once per detector configuration by [`engine::PatternGenerator`]:
//! - A hash-consed DAG of canonical bit patterns over all bin resolutions,
//!   pruned by a maximum-slope cut and a line-band containment cut
//! - Shift/mirror tags on the edges fold the symmetric patterns onto one
//!   canonical representative each
//! - Frozen into a [`tree::PatternTree`] that can be written to and read
//!   back from a binary file
//!
//! Construction cost grows with the number of admitted patterns, bounded by
//! `2^(nlevels-1) * 2^(nplanes-2)`; bound the depth, plane count or slope
//! limit to bound the runtime.
//!
//! ## Tier 2: Event matching (transient)
//!
//! Per-event helpers for the downstream road builder, independent of tree
//! construction:
//! - [`hits::HitPairIter`] merges two sorted hit collections into
//!   within-tolerance pairs and singletons
//! - [`hits::HitSet`] tests occupancy-weakened inclusion between candidate
//!   hit sets
//!
//! # Example
//!
//! ```
//! use track_search::engine::PatternGenerator;
//! use track_search::geometry::TreeParam;
//!
//! let params = TreeParam {
//!     max_depth: 2,
//!     width: 0.4,
//!     z_pos: vec![0.0, 0.2, 0.4],
//!     max_slope: 0.5,
//! };
//! let mut generator = PatternGenerator::new();
//! let tree = generator.generate(&params).unwrap();
//!
//! // The root is the all-zero pattern; everything else hangs below it.
//! assert_eq!(tree.node(tree.root()).pattern().bins(), &[0, 0, 0]);
//! assert!(tree.len() > 1);
//! ```

pub mod engine;
pub mod geometry;
pub mod hits;
pub mod tree;

// Re-export commonly used types
pub use engine::{PatternGenerator, Statistics};
pub use geometry::{ParamError, Pattern, PlaneSet, TreeParam};
pub use hits::{Hit, HitPairIter, HitSet};
pub use tree::{Link, LinkKind, NodeId, PatternTree};
