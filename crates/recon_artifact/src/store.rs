//! Directory enumeration and parallel artifact reads.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::artifact::Artifact;
use crate::error::ArtifactError;

/// Default file extension of artifact files.
const DEFAULT_EXTENSION: &str = "json";

/// Reads the artifact files of one build directory.
///
/// Only regular files directly inside the directory with the configured
/// extension are considered. Enumeration is sorted by path, which fixes the
/// order later merge steps see duplicates in.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    extension: String,
}

impl ArtifactStore {
    /// Creates a store over the given artifact directory.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Overrides the artifact file extension (without the leading dot).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Lists the artifact files in the directory, sorted by path.
    pub fn list_artifacts(&self) -> Result<Vec<PathBuf>, ArtifactError> {
        let io_err = |e: std::io::Error| ArtifactError::Io {
            path: self.dir.clone(),
            source: e,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
            {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Reads and validates a single artifact file.
    pub fn read_artifact(&self, path: &Path) -> Result<Artifact, ArtifactError> {
        let content = std::fs::read(path).map_err(|e| ArtifactError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let artifact = parse_artifact(&content, path)?;
        tracing::debug!(
            path = %path.display(),
            contract = %artifact.contract_name,
            "read artifact"
        );
        Ok(artifact)
    }

    /// Reads every artifact in the directory on a pool of `jobs` threads.
    ///
    /// `jobs == 0` lets rayon pick the thread count. The result is in
    /// enumeration order regardless of which read finishes first. Any failed
    /// read fails the whole load.
    pub fn load_all(&self, jobs: usize) -> Result<Vec<Artifact>, ArtifactError> {
        let paths = self.list_artifacts()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| ArtifactError::ThreadPool {
                reason: e.to_string(),
            })?;

        let artifacts = pool.install(|| {
            paths
                .par_iter()
                .map(|path| self.read_artifact(path))
                .collect::<Result<Vec<_>, _>>()
        })?;

        tracing::info!(
            dir = %self.dir.display(),
            count = artifacts.len(),
            "loaded artifacts"
        );
        Ok(artifacts)
    }
}

/// Parses artifact JSON read from `path`.
///
/// Fails with [`ArtifactError::Malformed`] when the bytes are not a valid
/// UTF-8 artifact record and with [`ArtifactError::MissingSyntaxTree`] when
/// it has no `ast`.
pub fn parse_artifact(content: &[u8], path: &Path) -> Result<Artifact, ArtifactError> {
    let artifact: Artifact =
        serde_json::from_slice(content).map_err(|e| ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if artifact.ast.is_none() {
        return Err(ArtifactError::MissingSyntaxTree {
            path: path.to_path_buf(),
            contract: artifact.contract_name,
        });
    }

    Ok(artifact.with_origin(path))
}
