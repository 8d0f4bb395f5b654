//! Discovery layer: turns file and directory arguments into a work set.
//!
//! This module handles:
//! - Recursive directory traversal
//! - Deduplication of targets reachable through overlapping arguments
//! - Warnings for arguments that do not exist or have the wrong type

pub mod collector;
pub mod walker;
pub mod workset;

pub use collector::{FileCollector, collect};
pub use walker::{DirectoryWalker, WalkConfig};
pub use workset::WorkSet;
