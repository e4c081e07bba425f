//! Error types for artifact loading.

use std::path::PathBuf;

use recon_source::LocationError;

/// Errors that can occur while enumerating or reading artifact files.
///
/// None of these are recoverable locally: a bad file on disk aborts the
/// whole load.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// The artifact directory or one of its files could not be read.
    #[error("artifact I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a well-formed artifact record.
    #[error("malformed artifact {path}: {reason}")]
    Malformed {
        /// The artifact file path.
        path: PathBuf,
        /// Description of the parse or validation failure.
        reason: String,
    },

    /// The artifact parsed but carries no syntax tree.
    #[error("artifact {path} for contract '{contract}' does not contain an AST")]
    MissingSyntaxTree {
        /// The artifact file path.
        path: PathBuf,
        /// The contract the artifact describes.
        contract: String,
    },

    /// The worker pool for parallel reads could not be started.
    #[error("failed to start artifact reader pool: {reason}")]
    ThreadPool {
        /// Description of the pool construction failure.
        reason: String,
    },
}

/// Reasons a syntax tree is rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxTreeError {
    /// The root of the tree is not a JSON object.
    #[error("syntax tree root is not an object")]
    NotAnObject,

    /// The root node has no string `src` descriptor.
    #[error("syntax tree root has no `src` location")]
    MissingLocation,

    /// The root `src` descriptor could not be parsed.
    #[error("syntax tree root has an invalid location: {0}")]
    InvalidLocation(#[from] LocationError),
}
