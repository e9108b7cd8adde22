//! Format-tagged top-level mapping.
//!
//! Only top-level keys matter for a migration, so keys are handled as text.
//! YAML keys that are not strings (`1: x`, `true: y`) are compared through
//! their textual form; their original YAML value is kept for writing.

use std::path::Path;

use serde_yaml::{Mapping, Value as YamlValue};
use toml::Table;

use crate::error::MigrateError;
use crate::types::Format;

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Yaml(Mapping),
    Toml(Table),
}

impl Document {
    /// Parse `content` as a mapping document of the given format.
    ///
    /// An empty (or comment-only) YAML document is an empty mapping. Any other
    /// non-mapping top level is rejected.
    pub fn parse(format: Format, content: &str, path: &Path) -> Result<Self, MigrateError> {
        match format {
            Format::Yaml => {
                if content.lines().all(|l| {
                    let l = l.trim();
                    l.is_empty() || l.starts_with('#')
                }) {
                    return Ok(Document::Yaml(Mapping::new()));
                }
                let value: YamlValue =
                    serde_yaml::from_str(content).map_err(|e| MigrateError::Parse {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })?;
                match value {
                    YamlValue::Mapping(map) => Ok(Document::Yaml(map)),
                    YamlValue::Null => Ok(Document::Yaml(Mapping::new())),
                    _ => Err(MigrateError::NotAMapping {
                        path: path.to_path_buf(),
                    }),
                }
            }
            Format::Toml => {
                let table: Table = toml::from_str(content).map_err(|e| MigrateError::Parse {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                Ok(Document::Toml(table))
            }
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Document::Yaml(_) => Format::Yaml,
            Document::Toml(_) => Format::Toml,
        }
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Document::Yaml(map) => map.keys().map(key_text).collect(),
            Document::Toml(table) => table.keys().cloned().collect(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Document::Yaml(map) => yaml_key(map, key).is_some(),
            Document::Toml(table) => table.contains_key(key),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Document::Yaml(map) => map.len(),
            Document::Toml(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a top-level key. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self {
            Document::Yaml(map) => {
                let Some(found) = yaml_key(map, key).cloned() else {
                    return false;
                };
                map.remove(&found).is_some()
            }
            Document::Toml(table) => table.remove(key).is_some(),
        }
    }

    /// Write every entry of `source` accepted by `keep` into `self`, replacing
    /// existing values in place and appending new keys at the end.
    ///
    /// Returns the keys written, in `source` order.
    pub fn overlay(
        &mut self,
        source: Document,
        keep: impl Fn(&str) -> bool,
    ) -> Result<Vec<String>, MigrateError> {
        let mut written = Vec::new();
        match (self, source) {
            (Document::Yaml(base), Document::Yaml(src)) => {
                for (key, value) in src {
                    let name = key_text(&key);
                    if keep(&name) {
                        // `1` and `'1'` are the same key as text; keep the base's spelling.
                        let target = yaml_key(base, &name).cloned().unwrap_or(key);
                        base.insert(target, value);
                        written.push(name);
                    }
                }
            }
            (Document::Toml(base), Document::Toml(src)) => {
                for (key, value) in src {
                    if keep(&key) {
                        written.push(key.clone());
                        base.insert(key, value);
                    }
                }
            }
            (base, src) => {
                return Err(MigrateError::FormatMismatch {
                    old: src.format(),
                    new: base.format(),
                });
            }
        }
        Ok(written)
    }

    /// Serialize the whole document in its own format.
    pub fn to_text(&self) -> Result<String, MigrateError> {
        match self {
            Document::Yaml(map) => serde_yaml::to_string(map).map_err(|e| MigrateError::Render {
                reason: e.to_string(),
            }),
            Document::Toml(table) => toml::to_string(table).map_err(|e| MigrateError::Render {
                reason: e.to_string(),
            }),
        }
    }
}

fn yaml_key<'a>(map: &'a Mapping, key: &str) -> Option<&'a YamlValue> {
    map.keys().find(|k| key_text(k) == key)
}

/// Textual form of a YAML mapping key.
pub(crate) fn key_text(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(content: &str) -> Document {
        Document::parse(Format::Yaml, content, Path::new("test.yaml")).unwrap()
    }

    fn toml_doc(content: &str) -> Document {
        Document::parse(Format::Toml, content, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn yaml_keys_in_document_order() {
        let doc = yaml("cluster_name: Test\nnum_tokens: 256\nseed_provider: []\n");
        assert_eq!(doc.keys(), vec!["cluster_name", "num_tokens", "seed_provider"]);
    }

    #[test]
    fn empty_yaml_is_empty_mapping() {
        assert!(yaml("").is_empty());
        assert!(yaml("# only a comment\n").is_empty());
    }

    #[test]
    fn yaml_sequence_is_not_a_mapping() {
        let err = Document::parse(Format::Yaml, "- a\n- b\n", Path::new("list.yaml")).unwrap_err();
        assert!(matches!(err, MigrateError::NotAMapping { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err =
            Document::parse(Format::Yaml, "a: [1, 2\n", Path::new("broken.yaml")).unwrap_err();
        match err {
            MigrateError::Parse { path, .. } => assert_eq!(path, Path::new("broken.yaml")),
            other => panic!("Expected Parse, got: {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Document::parse(Format::Toml, "a = \n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, MigrateError::Parse { .. }));
    }

    #[test]
    fn non_string_yaml_keys_compare_as_text() {
        let mut doc = yaml("1: one\ntrue: yes\nname: x\n");
        assert_eq!(doc.keys(), vec!["1", "true", "name"]);
        assert!(doc.contains_key("1"));
        assert!(doc.remove("true"));
        assert!(!doc.contains_key("true"));
    }

    #[test]
    fn remove_missing_key_is_false() {
        let mut doc = toml_doc("a = 1\n");
        assert!(!doc.remove("b"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn overlay_replaces_and_appends() {
        let mut base = yaml("b: 0\nc: 3\n");
        let src = yaml("b: 2\nd: 4\n");
        let written = base.overlay(src, |_| true).unwrap();
        assert_eq!(written, vec!["b", "d"]);
        assert_eq!(base, yaml("b: 2\nc: 3\nd: 4\n"));
        assert_eq!(base.keys(), vec!["b", "c", "d"]);
    }

    #[test]
    fn overlay_replaces_textually_equal_yaml_key() {
        let mut base = yaml("'1': template\nname: x\n");
        let written = base.overlay(yaml("1: old\n"), |_| true).unwrap();
        assert_eq!(written, vec!["1"]);
        assert_eq!(base.len(), 2);
        assert_eq!(base.keys(), vec!["1", "name"]);
        assert_eq!(base, yaml("'1': old\nname: x\n"));
    }

    #[test]
    fn overlay_respects_filter() {
        let mut base = toml_doc("b = 0\n");
        let src = toml_doc("b = 2\nd = 4\n");
        let written = base.overlay(src, |k| k == "b").unwrap();
        assert_eq!(written, vec!["b"]);
        assert_eq!(base, toml_doc("b = 2\n"));
    }

    #[test]
    fn overlay_across_formats_fails() {
        let mut base = toml_doc("b = 0\n");
        let err = base.overlay(yaml("b: 1\n"), |_| true).unwrap_err();
        assert!(matches!(
            err,
            MigrateError::FormatMismatch {
                old: Format::Yaml,
                new: Format::Toml
            }
        ));
    }

    #[test]
    fn nested_values_survive_text_round_trip() {
        let doc = yaml(
            "seed_provider:\n  - class_name: SimpleSeedProvider\n    parameters:\n      - seeds: \"127.0.0.1\"\nratio: 0.5\nenabled: false\n",
        );
        let text = doc.to_text().unwrap();
        assert_eq!(yaml(&text), doc);
    }

    #[test]
    fn toml_text_round_trip() {
        let doc = toml_doc("name = \"x\"\nport = 9042\n[cache]\nsize_mb = 64\nratio = 0.25\n");
        let text = doc.to_text().unwrap();
        assert_eq!(toml_doc(&text), doc);
    }
}
