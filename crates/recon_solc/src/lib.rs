//! Reconstruction of compiler standard-JSON input/output from build artifacts.
//!
//! The pipeline loads per-contract artifacts, folds them into a single
//! [`CompilerInput`]/[`CompilerOutput`] pair (recovering library link
//! references from raw bytecode along the way), verifies that every import
//! resolves to the compilation unit it was compiled against, and finally
//! hands the output to an external [`Validator`].

#![warn(missing_docs)]

pub mod ast;
pub mod consistency;
pub mod decoder;
pub mod error;
pub mod link;
pub mod pipeline;
pub mod reconstruct;
pub mod types;

pub use consistency::check_imports;
pub use decoder::{source_decoder, SourceDecoder};
pub use error::{PipelineError, ReconstructError};
pub use link::{placeholders, scan, Placeholder, Placeholders};
pub use pipeline::{validate_artifacts, Pipeline, Validator};
pub use reconstruct::{reconstruct, ReconstructedIo, SourcePolicy};
pub use types::*;
