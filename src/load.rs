//! Loading the old config and the new template.
//!
//! Each file is read once; the same text yields both the parsed mapping and
//! the raw lines later scanned for commented-out keys.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::MigrateError;
use crate::types::Format;

/// One loaded config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub path: PathBuf,
    pub document: Document,
    /// The file's text split into lines, line endings removed.
    pub lines: Vec<String>,
}

impl Source {
    /// Build from text already in memory. The format follows `path`'s extension.
    pub fn from_text(path: &Path, text: &str) -> Result<Self, MigrateError> {
        let document = Document::parse(Format::from_path(path), text, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
            lines: text.lines().map(str::to_string).collect(),
        })
    }

    pub fn format(&self) -> Format {
        self.document.format()
    }

    /// The original text, reassembled from the raw lines.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Read and parse one config file.
pub fn load_source(path: &Path) -> Result<Source, MigrateError> {
    let text = std::fs::read_to_string(path).map_err(|e| MigrateError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source = Source::from_text(path, &text)?;
    tracing::debug!(
        path = %path.display(),
        format = %source.format(),
        keys = source.document.len(),
        lines = source.lines.len(),
        "loaded config"
    );
    Ok(source)
}

/// Load the old config and the new template. Both must use the same format.
pub fn load_pair(old: &Path, new: &Path) -> Result<(Source, Source), MigrateError> {
    let old = load_source(old)?;
    let new = load_source(new)?;
    if old.format() != new.format() {
        return Err(MigrateError::FormatMismatch {
            old: old.format(),
            new: new.format(),
        });
    }
    Ok((old, new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_mapping_and_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cassandra.yaml");
        fs::write(&path, "cluster_name: Test\n# num_tokens: 16\nnum_tokens: 256\n").unwrap();

        let source = load_source(&path).unwrap();
        assert_eq!(source.format(), Format::Yaml);
        assert_eq!(source.document.keys(), vec!["cluster_name", "num_tokens"]);
        assert_eq!(source.lines.len(), 3);
        assert_eq!(source.lines[1], "# num_tokens: 16");
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let source = Source::from_text(Path::new("a.yaml"), "a: 1\r\nb: 2\r\n").unwrap();
        assert_eq!(source.lines, vec!["a: 1", "b: 2"]);
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        match load_source(&path).unwrap_err() {
            MigrateError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io, got: {other:?}"),
        }
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "a: b: c\n").unwrap();
        assert!(matches!(
            load_source(&path).unwrap_err(),
            MigrateError::Parse { .. }
        ));
    }

    #[test]
    fn pair_with_mixed_formats_rejected() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.yaml");
        let new = dir.path().join("new.toml");
        fs::write(&old, "a: 1\n").unwrap();
        fs::write(&new, "a = 1\n").unwrap();
        assert!(matches!(
            load_pair(&old, &new).unwrap_err(),
            MigrateError::FormatMismatch { .. }
        ));
    }

    #[test]
    fn pair_missing_new_fails_after_old_loads() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.yaml");
        fs::write(&old, "a: 1\n").unwrap();
        let err = load_pair(&old, &dir.path().join("new.yaml")).unwrap_err();
        assert!(err.to_string().contains("new.yaml"));
    }
}
