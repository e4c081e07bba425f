//! The artifact validation pipeline: load → reconstruct → check → validate.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use recon_artifact::{Artifact, ArtifactStore};

use crate::consistency::check_imports;
use crate::decoder::{source_decoder, SourceDecoder};
use crate::error::PipelineError;
use crate::reconstruct::{reconstruct, ReconstructedIo, SourcePolicy};
use crate::types::CompilerOutput;

/// A downstream consumer of the reconstructed compiler output.
///
/// Implementations check upgrade safety, storage layouts and the like; the
/// pipeline only prepares their input.
pub trait Validator {
    /// Per-contract result.
    type Report;
    /// Failure of the validator itself.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validates `output`, returning one report per contract name.
    fn validate(
        &self,
        output: &CompilerOutput,
        decoder: &SourceDecoder,
    ) -> Result<BTreeMap<String, Self::Report>, Self::Error>;
}

/// Configuration for one validation run over an artifact directory.
#[derive(Debug, Clone)]
pub struct Pipeline {
    artifacts_dir: PathBuf,
    sources_dir: PathBuf,
    extension: Option<String>,
    jobs: usize,
    policy: SourcePolicy,
}

impl Pipeline {
    /// Creates a pipeline over the given artifact and source directories.
    pub fn new(artifacts_dir: impl Into<PathBuf>, sources_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            sources_dir: sources_dir.into(),
            extension: None,
            jobs: 0,
            policy: SourcePolicy::default(),
        }
    }

    /// Sets the number of reader threads (`0` for the default).
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Sets the duplicate-source policy.
    pub fn policy(mut self, policy: SourcePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the artifact file extension.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Returns the artifact directory.
    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    /// Returns the source directory the decoder reports paths against.
    pub fn sources_dir(&self) -> &Path {
        &self.sources_dir
    }

    /// Loads every artifact in the artifact directory.
    pub fn load(&self) -> Result<Vec<Artifact>, PipelineError> {
        let mut store = ArtifactStore::new(&self.artifacts_dir);
        if let Some(ext) = &self.extension {
            store = store.with_extension(ext);
        }
        Ok(store.load_all(self.jobs)?)
    }

    /// Loads, merges and consistency-checks the artifacts.
    pub fn reconstruct(&self) -> Result<ReconstructedIo, PipelineError> {
        let artifacts = self.load()?;
        let io = reconstruct(&artifacts, self.policy)?;
        check_imports(&io.output)?;
        Ok(io)
    }

    /// Builds the source decoder for a reconstruction.
    pub fn decoder(&self, io: &ReconstructedIo) -> SourceDecoder {
        source_decoder(&io.input, &io.output, &self.sources_dir)
    }

    /// Runs the full pipeline and hands the output to `validator`.
    pub fn validate<V: Validator>(
        &self,
        validator: &V,
    ) -> Result<BTreeMap<String, V::Report>, PipelineError> {
        let io = self.reconstruct()?;
        let decoder = self.decoder(&io);
        validator
            .validate(&io.output, &decoder)
            .map_err(|e| PipelineError::Validator(Box::new(e)))
    }
}

/// Validates the artifacts in `artifacts_dir` with default settings.
pub fn validate_artifacts<V: Validator>(
    artifacts_dir: &Path,
    sources_dir: &Path,
    validator: &V,
) -> Result<BTreeMap<String, V::Report>, PipelineError> {
    Pipeline::new(artifacts_dir, sources_dir).validate(validator)
}
