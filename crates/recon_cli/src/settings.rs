//! Resolution of effective run settings from `recon.toml` and CLI flags.

use std::path::{Path, PathBuf};

use recon_config::{load_config, load_config_file, ReconConfig, CONFIG_FILE};
use recon_solc::{Pipeline, SourcePolicy};

use crate::{GlobalArgs, InputArgs};

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory of artifact files.
    pub artifacts_dir: PathBuf,
    /// Directory of Solidity sources.
    pub sources_dir: PathBuf,
    /// Artifact file extension.
    pub extension: String,
    /// Reader threads (`0` for the default).
    pub jobs: usize,
    /// Duplicate-source policy.
    pub policy: SourcePolicy,
}

impl Settings {
    /// Builds the pipeline these settings describe.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(&self.artifacts_dir, &self.sources_dir)
            .extension(self.extension.clone())
            .jobs(self.jobs)
            .policy(self.policy)
    }
}

/// Loads the project configuration.
///
/// Uses `--config` (a file, or a directory containing `recon.toml`) if
/// given, otherwise `./recon.toml` if present, otherwise defaults. Returns
/// the configuration together with the directory its relative paths are
/// resolved against.
pub fn load_project_config(
    global: &GlobalArgs,
) -> Result<(ReconConfig, PathBuf), Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) if path.is_dir() => Ok((load_config(path)?, path.clone())),
        Some(path) => {
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((load_config_file(path)?, root))
        }
        None => {
            let cwd = std::env::current_dir()?;
            if cwd.join(CONFIG_FILE).is_file() {
                Ok((load_config(&cwd)?, cwd))
            } else {
                tracing::debug!("no {CONFIG_FILE} found, using defaults");
                Ok((ReconConfig::default(), PathBuf::from(".")))
            }
        }
    }
}

/// Merges configuration values and CLI overrides.
///
/// Relative configuration paths are taken relative to `root`; CLI paths are
/// used as given.
pub fn resolve_settings(config: ReconConfig, root: &Path, args: &InputArgs) -> Settings {
    let from_config = |p: PathBuf| if p.is_relative() { root.join(p) } else { p };

    let policy = if args.strict_sources {
        SourcePolicy::RequireIdentical
    } else {
        match config.sources.policy {
            recon_config::SourcePolicy::FirstWins => SourcePolicy::FirstWins,
            recon_config::SourcePolicy::RequireIdentical => SourcePolicy::RequireIdentical,
        }
    };

    Settings {
        artifacts_dir: args
            .artifacts
            .clone()
            .unwrap_or_else(|| from_config(config.artifacts.dir)),
        sources_dir: args
            .sources
            .clone()
            .unwrap_or_else(|| from_config(config.sources.dir)),
        extension: config.artifacts.extension,
        jobs: args.jobs.unwrap_or(config.artifacts.jobs),
        policy,
    }
}

/// Loads the configuration and resolves settings in one step.
pub fn settings_for(
    global: &GlobalArgs,
    args: &InputArgs,
) -> Result<Settings, Box<dyn std::error::Error>> {
    let (config, root) = load_project_config(global)?;
    let settings = resolve_settings(config, &root, args);
    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}
