//! Utilities for linkbio.
//!
//! Submodules:
//! - `ids`: random identifiers for new list entries.

pub mod ids;
