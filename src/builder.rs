use std::path::PathBuf;

use crate::error::MigrateError;
use crate::resolve::{self, ResolveInput};
use crate::settings::Settings;

/// Builder for resolving [`Settings`].
///
/// Nothing is read implicitly: no environment variables and no searched
/// files. Settings come from compiled defaults, an optional file the operator
/// names, and per-run overrides.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    overrides: Vec<(String, toml::Value)>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from this file. It must exist when given.
    pub fn settings_file(mut self, path: Option<PathBuf>) -> Self {
        self.file = path;
        self
    }

    /// Add a per-run override. `None` values are ignored (useful for optional clap args).
    pub fn cli_override<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    /// Read the settings file (if any) and resolve.
    pub fn load(self) -> Result<Settings, MigrateError> {
        let file = match self.file {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| MigrateError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                tracing::info!(path = %path.display(), "using settings file");
                Some((path, content))
            }
            None => None,
        };
        resolve::resolve(ResolveInput {
            file,
            overrides: self.overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{KeyMatch, OnUnclear};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn nothing_given_means_defaults() {
        assert_eq!(SettingsLoader::new().load().unwrap(), Settings::default());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ops.toml");
        fs::write(&path, "on_unclear = \"reprompt\"\n").unwrap();
        let settings = SettingsLoader::new()
            .settings_file(Some(path))
            .load()
            .unwrap();
        assert_eq!(settings.on_unclear, OnUnclear::Reprompt);
    }

    #[test]
    fn missing_explicit_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = SettingsLoader::new()
            .settings_file(Some(dir.path().join("nope.toml")))
            .load()
            .unwrap_err();
        assert!(matches!(err, MigrateError::Io { .. }));
    }

    #[test]
    fn override_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ops.toml");
        fs::write(&path, "key_match = \"key\"\n").unwrap();
        let settings = SettingsLoader::new()
            .settings_file(Some(path))
            .cli_override("key_match", Some("substring"))
            .load()
            .unwrap();
        assert_eq!(settings.key_match, KeyMatch::Substring);
    }

    #[test]
    fn cli_override_none_skipped() {
        let settings = SettingsLoader::new()
            .cli_override::<String>("key_match", None)
            .cli_override("comment_marker", Some(";"))
            .load()
            .unwrap();
        assert_eq!(settings.key_match, KeyMatch::Substring);
        assert_eq!(settings.comment_marker, ";");
    }
}
