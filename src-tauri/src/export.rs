use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::format::OutputFormat;

/// Errors from saving a displayed result to disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the displayed result to `path`.
///
/// Markdown is written byte for byte. JSON is parsed first and re-written
/// pretty-printed; invalid JSON fails the save before anything touches
/// the target. Both formats go through a temp file in the destination
/// directory plus an atomic rename, so a failed save never leaves a
/// partial or clobbered target behind.
pub fn save_converted(path: &Path, contents: &str, format: OutputFormat) -> Result<(), SaveError> {
    match format {
        OutputFormat::Markdown => write_atomic(path, contents.as_bytes()),
        OutputFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(contents)?;
            let pretty = serde_json::to_string_pretty(&value)?;
            write_atomic(path, pretty.as_bytes())
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| SaveError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn markdown_saves_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.md");
        let contents = "# Title\n\nno trailing newline";
        save_converted(&target, contents, OutputFormat::Markdown).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), contents);
    }

    #[test]
    fn json_is_revalidated_and_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");
        save_converted(&target, "{\"b\":1,\"a\":[1,2]}", OutputFormat::Json).unwrap();

        let saved = fs::read_to_string(&target).unwrap();
        assert!(saved.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(value["b"], 1);
        assert_eq!(value["a"][1], 2);
    }

    #[test]
    fn invalid_json_fails_without_touching_an_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");
        fs::write(&target, "{\"keep\": true}").unwrap();

        let err = save_converted(&target, "not json at all", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, SaveError::Json(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "{\"keep\": true}");
    }

    #[test]
    fn saving_replaces_an_existing_file_completely() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.md");
        fs::write(&target, "a much longer earlier version of the file").unwrap();
        save_converted(&target, "short", OutputFormat::Markdown).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "short");
    }
}
