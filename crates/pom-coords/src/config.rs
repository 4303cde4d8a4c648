//! Configuration layering: command line, environment, JSON file, defaults.
//!
//! Environment variables are handled by clap and therefore already merged
//! into [`Cli`] by the time settings are resolved.

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::OutputFormat;
use pom_coords_core::{ExtractOptions, MavenConfig};
use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of a `--config` file.
///
/// ```json
/// {
///   "skipPom": true,
///   "format": "text",
///   "maven": { "localRepository": "/srv/m2", "timeoutSecs": 300 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    pub skip_pom: Option<bool>,
    pub inherit_parent: Option<bool>,
    pub format: Option<OutputFormat>,
    pub maven: MavenFileConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MavenFileConfig {
    pub executable: Option<PathBuf>,
    pub effective_pom: Option<PathBuf>,
    pub local_repository: Option<PathBuf>,
    pub args: Vec<String>,
    pub timeout_secs: Option<NonZeroU64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CliError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: ExtractOptions,
    pub maven: MavenConfig,
    pub format: OutputFormat,
}

impl Settings {
    /// Resolves settings from `cli`, reading its `--config` file if given.
    pub fn load(cli: &Cli) -> Result<Self, CliError> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };
        Ok(Self::resolve(cli, file))
    }

    /// Command-line values win over `file`, which wins over defaults.
    /// Maven arguments from both sources are kept, file ones first.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let defaults = MavenConfig::default();
        let FileConfig {
            skip_pom,
            inherit_parent,
            format,
            maven,
        } = file;

        let mut extra_args = maven.args;
        extra_args.extend(cli.maven_args.iter().cloned());

        Self {
            options: ExtractOptions {
                skip_pom: cli.skip_pom || skip_pom.unwrap_or(false),
                inherit_parent: cli.inherit_parent || inherit_parent.unwrap_or(false),
            },
            maven: MavenConfig {
                executable: cli
                    .mvn
                    .clone()
                    .or(maven.executable)
                    .unwrap_or(defaults.executable),
                output: cli
                    .effective_pom
                    .clone()
                    .or(maven.effective_pom)
                    .unwrap_or(defaults.output),
                local_repository: cli.local_repo.clone().or(maven.local_repository),
                extra_args,
                timeout: cli
                    .timeout
                    .or(maven.timeout_secs.map(NonZeroU64::get))
                    .map(Duration::from_secs),
            },
            format: cli.format.or(format).unwrap_or_default(),
        }
    }
}
