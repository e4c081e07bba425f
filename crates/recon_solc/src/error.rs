//! Error types for reconstruction and the validation pipeline.

use recon_artifact::ArtifactError;
use recon_source::SourceUnitId;

/// Errors raised while merging artifacts or checking their consistency.
#[derive(Debug, thiserror::Error)]
pub enum ReconstructError {
    /// An artifact reached reconstruction without a syntax tree.
    #[error("artifact for contract '{contract}' ({source_path}) does not contain an AST")]
    MissingSyntaxTree {
        /// The contract the artifact describes.
        contract: String,
        /// The artifact's source path.
        source_path: String,
    },

    /// An import resolved to a different compilation unit than the one the
    /// imported file's artifact was compiled as.
    #[error(
        "artifacts are from different compiler runs: {importer} imports {import_path} \
         as source unit {expected}, but its artifact was compiled as unit {actual}\n    \
         run a full recompilation using `truffle compile --all`"
    )]
    InconsistentCompilation {
        /// The file containing the import.
        importer: String,
        /// The imported file.
        import_path: String,
        /// Unit id recorded in the import directive.
        expected: i64,
        /// Unit id of the imported file's own syntax tree.
        actual: SourceUnitId,
    },

    /// Two artifacts for the same source path carry different source text.
    #[error(
        "artifacts disagree on the source of {source_path}: {first} and {conflicting} \
         were compiled from different text\n    \
         run a full recompilation using `truffle compile --all`"
    )]
    SourceMismatch {
        /// The shared source path.
        source_path: String,
        /// The artifact whose text was recorded first.
        first: String,
        /// The artifact whose text differs.
        conflicting: String,
    },
}

/// Errors from a full validation run.
///
/// Loading and reconstruction failures are passed through untouched; the
/// validator's own failures are opaque.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Artifacts could not be loaded.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Artifacts could not be merged or are inconsistent.
    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),

    /// The downstream validator failed.
    #[error("validation failed: {0}")]
    Validator(#[source] Box<dyn std::error::Error + Send + Sync>),
}
