//! Loading of per-contract build artifacts.
//!
//! Each artifact file describes one compiled contract: its source text,
//! bytecode with unresolved library placeholders, and the syntax tree of the
//! file it was declared in. The [`ArtifactStore`] enumerates a build
//! directory and parses every file into a typed [`Artifact`], rejecting
//! malformed records at the boundary.

#![warn(missing_docs)]

pub mod artifact;
pub mod error;
pub mod store;

pub use artifact::{Artifact, SyntaxTree};
pub use error::{ArtifactError, SyntaxTreeError};
pub use store::{parse_artifact, ArtifactStore};
