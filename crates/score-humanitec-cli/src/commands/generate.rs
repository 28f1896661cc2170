//! Generate command
//!
//! Writes a starter Score file that `score-humanitec run` converts as is.
//!
//! # Usage
//!
//! ```bash
//! score-humanitec generate -m orders -r api -e staging
//! score-humanitec generate -o deploy/score.yaml
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use crate::config::DEFAULT_SCORE_FILE;
use crate::{Error, Result};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Workload name
    #[arg(short = 'm', long, default_value = "hello-world")]
    pub metadata: String,

    /// Name of the application container
    #[arg(short = 'r', long, default_value = "application")]
    pub resource_name: String,

    /// Environment of the application, exposed to it as APP_ENV
    #[arg(short = 'e', long, default_value = "development")]
    pub environment: String,

    /// Target file, overwritten when present
    #[arg(short = 'o', long, default_value = DEFAULT_SCORE_FILE)]
    pub output: PathBuf,
}

impl GenerateArgs {
    /// Defaults of the command line, writing to `output`
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            metadata: "hello-world".to_string(),
            resource_name: "application".to_string(),
            environment: "development".to_string(),
            output: output.as_ref().to_path_buf(),
        }
    }
}

pub fn run(args: GenerateArgs) -> Result<()> {
    write(&args)?;
    println!("{} generated successfully!", args.output.display());
    Ok(())
}

/// Render the starter Score file and write it to the output path
pub fn write(args: &GenerateArgs) -> Result<()> {
    let content = render(args)?;
    debug!(file = %args.output.display(), "writing score file");
    std::fs::write(&args.output, content).map_err(|e| Error::write(&args.output, e))
}

/// Render the starter Score file
///
/// User values are emitted as JSON strings, which YAML reads as double-quoted
/// scalars, so any name survives unescaped.
pub fn render(args: &GenerateArgs) -> Result<String> {
    let name = serde_json::to_string(&args.metadata)?;
    let container = serde_json::to_string(&args.resource_name)?;
    let environment = serde_json::to_string(&args.environment)?;

    Ok(format!(
        r#"apiVersion: score.dev/v1b1

metadata:
  name: {name}

containers:
  {container}:
    image: busybox
    command: ["/bin/sh"]
    args: ["-c", "while true; do echo Hello from $${{APP_ENV}}!; sleep 5; done"]
    variables:
      APP_ENV: {environment}

service:
  ports:
    www:
      port: 8080
      targetPort: 80
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_humanitec_common::spec::WorkloadSpec;
    use score_humanitec_common::yaml;

    #[test]
    fn test_render_defaults() {
        let content = render(&GenerateArgs::new("score.yaml")).unwrap();
        let spec: WorkloadSpec = yaml::from_str(&content).unwrap();

        assert_eq!(spec.metadata.name, "hello-world");
        let app = &spec.containers["application"];
        assert_eq!(app.image.as_deref(), Some("busybox"));
        assert_eq!(app.variables["APP_ENV"].as_str(), "development");
    }

    #[test]
    fn test_render_quotes_user_values() {
        let mut args = GenerateArgs::new("score.yaml");
        args.metadata = "orders: v2".to_string();
        args.environment = "#prod".to_string();

        let spec: WorkloadSpec = yaml::from_str(&render(&args).unwrap()).unwrap();
        assert_eq!(spec.metadata.name, "orders: v2");
        assert_eq!(spec.containers["application"].variables["APP_ENV"].as_str(), "#prod");
    }
}
