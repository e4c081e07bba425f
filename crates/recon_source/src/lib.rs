//! Source locations, content hashing, and line resolution for compiled sources.
//!
//! This crate provides [`SourceLocation`] for the `"start:length:unit"`
//! descriptors carried by every syntax-tree node, [`ContentHash`] for
//! comparing source texts, and [`SourceMap`] for turning a descriptor back
//! into a human-readable `path:line` position.

#![warn(missing_docs)]

pub mod error;
pub mod hash;
pub mod location;
pub mod resolved;
pub mod source_file;
pub mod source_map;

pub use error::LocationError;
pub use hash::ContentHash;
pub use location::{SourceLocation, SourceUnitId};
pub use resolved::ResolvedLocation;
pub use source_file::SourceFile;
pub use source_map::SourceMap;
