// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Binary file format for pattern trees.
//!
//! A tree file is a bincode stream: a format-version word followed by the
//! serialized [`PatternTree`]. Nodes are written in reference-index order
//! (depth-first discovery order), links address children by reference index,
//! so the on-disk layout matches the in-memory table and round-trips
//! exactly.

use crate::tree::PatternTree;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Version word written at the head of every tree file.
const FORMAT_VERSION: u32 = 1;

/// Errors from reading or writing tree files.
#[derive(Debug)]
pub enum TreeFileError {
    /// Underlying file I/O failed.
    Io(std::io::Error),

    /// The stream did not decode as a pattern tree of the current format.
    Codec(String),
}

impl fmt::Display for TreeFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeFileError::Io(err) => write!(f, "Tree file I/O error: {}", err),
            TreeFileError::Codec(msg) => write!(f, "Tree file format error: {}", msg),
        }
    }
}

impl std::error::Error for TreeFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeFileError::Io(err) => Some(err),
            TreeFileError::Codec(_) => None,
        }
    }
}

impl From<std::io::Error> for TreeFileError {
    fn from(err: std::io::Error) -> Self {
        TreeFileError::Io(err)
    }
}

impl From<bincode::Error> for TreeFileError {
    fn from(err: bincode::Error) -> Self {
        TreeFileError::Codec(err.to_string())
    }
}

impl PatternTree {
    /// Write the tree to a binary file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TreeFileError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &FORMAT_VERSION)?;
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a tree back from a binary file.
    ///
    /// Fails if the version word does not match or any link addresses a node
    /// outside the table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PatternTree, TreeFileError> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let version: u32 = bincode::deserialize_from(&mut reader)?;
        if version != FORMAT_VERSION {
            return Err(TreeFileError::Codec(format!(
                "Unsupported tree file version {} (expected {})",
                version, FORMAT_VERSION
            )));
        }
        let tree: PatternTree = bincode::deserialize_from(&mut reader)?;
        if tree.is_empty() {
            return Err(TreeFileError::Codec("Tree file holds no nodes".into()));
        }
        let len = tree.len();
        for (id, node) in tree.nodes() {
            for link in node.links() {
                if link.child.index() >= len {
                    return Err(TreeFileError::Codec(format!(
                        "Node {} links to out-of-range node {}",
                        id.0, link.child.0
                    )));
                }
            }
        }
        Ok(tree)
    }
}
