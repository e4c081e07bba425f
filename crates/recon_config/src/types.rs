//! Configuration types deserialized from `recon.toml`.

use std::path::PathBuf;

use serde::Deserialize;

/// The top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    /// Where build artifacts are read from.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    /// Where Solidity sources live and how duplicate sources are treated.
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// The `[artifacts]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Directory containing one artifact file per contract.
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,
    /// Artifact file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Reader threads; `0` lets the runtime decide.
    #[serde(default)]
    pub jobs: usize,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            extension: default_extension(),
            jobs: 0,
        }
    }
}

/// The `[sources]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Directory of the Solidity source files.
    #[serde(default = "default_sources_dir")]
    pub dir: PathBuf,
    /// Policy for artifacts sharing a source path.
    #[serde(default)]
    pub policy: SourcePolicy,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_sources_dir(),
            policy: SourcePolicy::default(),
        }
    }
}

/// Policy for artifacts that share a source path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePolicy {
    /// The first artifact's text is used; the rest are trusted to match.
    #[default]
    FirstWins,
    /// All artifacts for a path must carry identical text.
    RequireIdentical,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("build/contracts")
}

fn default_sources_dir() -> PathBuf {
    PathBuf::from("contracts")
}

fn default_extension() -> String {
    "json".to_string()
}
