//! File mount conversion
//!
//! Content comes either from a local file (relative to the Score file's
//! directory) or from the inline `content` field. It is then substituted, or
//! escaped when the mount sets `noExpand`.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use score_humanitec_common::merge::kind_of;
use score_humanitec_common::spec::{FileContent, FileDelta, FileMount};
use score_humanitec_common::template::{escape, ReferenceResolver, Substitutor};
use score_humanitec_common::{Error, Result};

/// Convert a file mount into its target path and delta entry
pub fn convert<R: ReferenceResolver + ?Sized>(
    file: &FileMount,
    subst: &Substitutor<'_, R>,
    base_dir: &Path,
) -> Result<(String, FileDelta)> {
    let content = match file.source.as_deref().filter(|s| !s.is_empty()) {
        Some(source) => read_source(base_dir, source)?,
        None => inline_content(file.content.as_ref(), &file.target)?,
    };

    let value = if file.no_expand {
        escape(&content)
    } else {
        subst.substitute(&content)
    };

    Ok((
        file.target.clone(),
        FileDelta {
            mode: file.mode.clone(),
            value,
        },
    ))
}

fn read_source(base_dir: &Path, source: &str) -> Result<String> {
    let path = Path::new(source);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };

    std::fs::read_to_string(&path).map_err(|e| Error::file_read(path, e))
}

fn inline_content(content: Option<&FileContent>, target: &str) -> Result<String> {
    match content {
        Some(FileContent::Text(text)) => Ok(text.clone()),
        Some(FileContent::Lines(lines)) => {
            warn!(
                file = %target,
                "file content is provided in a deprecated format, lines will be joined with '\\n'"
            );
            Ok(lines.iter().map(line_text).collect::<Vec<_>>().join("\n"))
        }
        Some(FileContent::Other(value)) => Err(unsupported(target, kind_of(value))),
        None => Err(unsupported(target, "null")),
    }
}

fn line_text(line: &Value) -> String {
    match line {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn unsupported(target: &str, kind: &str) -> Error {
    Error::UnsupportedContent {
        target: target.to_string(),
        kind: kind.to_string(),
    }
}
