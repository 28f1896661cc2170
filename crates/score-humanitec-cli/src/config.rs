//! Run configuration
//!
//! Flags are turned into a `RunConfig` value once and passed down; nothing is
//! kept in globals. Overrides and extensions files are optional when left at
//! their default location and required when named explicitly.

use std::path::{Path, PathBuf};

use score_humanitec_workload::ConvertConfig;

use crate::commands::run::RunArgs;

/// Score file read when `--file` is not given
pub const DEFAULT_SCORE_FILE: &str = "./score.yaml";

/// Overrides file checked when `--overrides` is not given
pub const DEFAULT_OVERRIDES_FILE: &str = "./overrides.score.yaml";

/// Extensions file checked when `--extensions` is not given
pub const DEFAULT_EXTENSIONS_FILE: &str = "./humanitec.score.yaml";

/// Name given to generated deltas
pub const DEFAULT_DELTA_NAME: &str = "Auto-generated (SCORE)";

/// An input file and whether its absence is an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub required: bool,
}

impl InputFile {
    /// A file that must exist
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// A file that is skipped when missing
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    fn explicit_or_default(explicit: Option<PathBuf>, default: &str) -> Self {
        match explicit {
            Some(path) => Self::required(path),
            None => Self::optional(default),
        }
    }
}

/// Everything `run` needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub score_file: PathBuf,
    pub overrides_file: InputFile,
    pub extensions_file: InputFile,
    pub env_id: String,
    pub workload_source_url: Option<String>,
    /// `path=value` overrides applied after the overrides file
    pub properties: Vec<String>,
}

impl RunConfig {
    /// Config with default overrides and extensions locations
    pub fn new(score_file: impl Into<PathBuf>, env_id: impl Into<String>) -> Self {
        Self {
            score_file: score_file.into(),
            overrides_file: InputFile::optional(DEFAULT_OVERRIDES_FILE),
            extensions_file: InputFile::optional(DEFAULT_EXTENSIONS_FILE),
            env_id: env_id.into(),
            workload_source_url: None,
            properties: Vec::new(),
        }
    }

    /// Directory relative file mount sources are resolved against
    pub fn base_dir(&self) -> PathBuf {
        match self.score_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        }
    }

    /// Conversion settings derived from this run
    pub fn convert_config(&self) -> ConvertConfig {
        ConvertConfig::new(DEFAULT_DELTA_NAME, self.env_id.clone())
            .with_base_dir(self.base_dir())
            .with_workload_source_url(self.workload_source_url.clone())
    }
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            score_file: args.file,
            overrides_file: InputFile::explicit_or_default(args.overrides, DEFAULT_OVERRIDES_FILE),
            extensions_file: InputFile::explicit_or_default(
                args.extensions,
                DEFAULT_EXTENSIONS_FILE,
            ),
            env_id: args.env,
            workload_source_url: args.workload_source_url,
            properties: args.properties,
        }
    }
}
