//! Run command
//!
//! Loads the Score file, layers the overrides file and `--property` values on
//! top, loads the extensions and prints the resulting deployment delta as
//! indented JSON on stdout.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde_json::{Map, Value};
use tracing::debug;

use score_humanitec_common::merge::{deep_merge, set_path};
use score_humanitec_common::spec::{DeploymentDelta, ExtensionsSpec, WorkloadSpec};
use score_humanitec_common::yaml;
use score_humanitec_workload::SpecConverter;

use crate::config::{InputFile, RunConfig, DEFAULT_SCORE_FILE};
use crate::{Error, Result};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Source Score file
    #[arg(short = 'f', long, default_value = DEFAULT_SCORE_FILE)]
    pub file: PathBuf,

    /// Overrides file [default: ./overrides.score.yaml]
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Extensions file [default: ./humanitec.score.yaml]
    #[arg(long)]
    pub extensions: Option<PathBuf>,

    /// Environment ID
    #[arg(long)]
    pub env: String,

    /// URL of the file that is managing the Humanitec workload
    #[arg(long)]
    pub workload_source_url: Option<String>,

    /// Overrides a property value (e.g. containers.backend.image=nginx)
    #[arg(short = 'p', long = "property", value_name = "PATH=VALUE")]
    pub properties: Vec<String>,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = RunConfig::from(args);
    let delta = execute(&config)?;

    let output = serde_json::to_string_pretty(&delta)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

/// Load the inputs and convert them into a deployment delta
pub fn execute(config: &RunConfig) -> Result<DeploymentDelta> {
    let spec = load_workload(config)?;
    let extensions = load_extensions(&config.extensions_file)?;

    debug!("preparing a new deployment");
    let convert = config.convert_config();
    let delta = SpecConverter::new(&convert, &spec)
        .with_extensions(&extensions)
        .convert()?;
    Ok(delta)
}

/// Load the Score file with overrides and property values applied
pub fn load_workload(config: &RunConfig) -> Result<WorkloadSpec> {
    debug!(file = %config.score_file.display(), "reading score file");
    let source = std::fs::read_to_string(&config.score_file)
        .map_err(|e| Error::read(&config.score_file, e))?;
    let mut tree = document("score", &config.score_file, &source)?;

    if let Some(overrides) = read_optional(&config.overrides_file)? {
        debug!(file = %config.overrides_file.path.display(), "applying score overrides");
        let overrides = document("overrides", &config.overrides_file.path, &overrides)?;
        deep_merge(&mut tree, overrides)?;
    }

    for property in &config.properties {
        apply_property(&mut tree, property)?;
    }

    serde_json::from_value(Value::Object(tree))
        .map_err(|e| Error::parse("score", &config.score_file, e))
}

/// Load the extensions file, or empty extensions when it is skipped
pub fn load_extensions(file: &InputFile) -> Result<ExtensionsSpec> {
    let Some(source) = read_optional(file)? else {
        return Ok(ExtensionsSpec::default());
    };

    debug!(file = %file.path.display(), "loading score extensions");
    let tree = document("extensions", &file.path, &source)?;
    serde_json::from_value(Value::Object(tree)).map_err(|e| Error::parse("extensions", &file.path, e))
}

/// Set a single `path=value` property; the value is read as a YAML scalar
pub fn apply_property(tree: &mut Map<String, Value>, property: &str) -> Result<()> {
    let (path, value) = property.split_once('=').ok_or_else(|| {
        Error::validation(format!(
            "invalid property override '{}': expected PATH=VALUE",
            property
        ))
    })?;

    debug!(property = %path, "overriding property");
    set_path(tree, path, yaml::parse_scalar(value))?;
    Ok(())
}

fn read_optional(file: &InputFile) -> Result<Option<String>> {
    match std::fs::read_to_string(&file.path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !file.required => {
            debug!(file = %file.path.display(), "file not found, skipping");
            Ok(None)
        }
        Err(e) => Err(Error::read(&file.path, e)),
    }
}

fn document(kind: &'static str, path: &std::path::Path, source: &str) -> Result<Map<String, Value>> {
    match yaml::parse_document(source).map_err(|e| Error::parse(kind, path, e))? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::parse(
            kind,
            path,
            score_humanitec_common::Error::validation("expected a mapping at the top level"),
        )),
    }
}
