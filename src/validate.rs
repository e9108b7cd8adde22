//! Strict checking of settings files: every key must be a known setting.
//!
//! The file is deserialized into the all-optional settings layer through
//! `serde_ignored`, which reports every key the layer did not consume.

use std::path::Path;

use confique::Config;

use crate::error::MigrateError;
use crate::settings::Settings;

type SettingsLayer = <Settings as Config>::Layer;

/// Reject a settings file containing keys `Settings` does not define.
pub fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), MigrateError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: SettingsLayer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| MigrateError::SettingsParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors = unknown_keys
        .into_iter()
        .map(|key| MigrateError::UnknownSetting {
            line: find_key_line(content, &key),
            key,
            path: path.to_path_buf(),
        })
        .collect();

    Err(MigrateError::UnknownSettings(errors))
}

/// 1-indexed line of the first `key = ...` assignment, 0 when not found.
fn find_key_line(content: &str, key: &str) -> usize {
    content
        .lines()
        .position(|line| {
            line.trim()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map_or(0, |i| i + 1)
}
