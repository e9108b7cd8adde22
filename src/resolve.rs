//! Settings resolution over pre-loaded inputs. No I/O happens here.
//!
//! Compiled defaults, then the settings file named with `--settings` (if
//! any), then per-run flags. confique fills whatever neither layer sets.

use std::path::PathBuf;

use confique::Config;
use toml::{Table, Value};

use crate::error::MigrateError;
use crate::settings::Settings;
use crate::validate;

/// Everything settings are resolved from.
#[derive(Debug, Default)]
pub struct ResolveInput {
    /// Path and content of the explicit settings file.
    pub file: Option<(PathBuf, String)>,
    /// Per-run overrides as `(key, value)` pairs. Later entries win.
    pub overrides: Vec<(String, Value)>,
}

pub fn resolve(input: ResolveInput) -> Result<Settings, MigrateError> {
    let mut table = match &input.file {
        Some((path, content)) => {
            validate::validate_unknown_keys(content, path)?;
            let table: Table =
                toml::from_str(content).map_err(|e| MigrateError::SettingsParse {
                    path: path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %path.display(), keys = table.len(), "settings file layer");
            table
        }
        None => Table::new(),
    };
    for (key, value) in input.overrides {
        table.insert(key, value);
    }

    let layer: <Settings as Config>::Layer =
        Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| MigrateError::InvalidSetting {
                key: "<settings>".into(),
                reason: e.to_string(),
            })?;

    let settings = Settings::builder().preloaded(layer).load()?;
    check(&settings)?;
    Ok(settings)
}

/// Values the type system lets through but a migration cannot use.
fn check(settings: &Settings) -> Result<(), MigrateError> {
    if settings.comment_marker.trim().is_empty() {
        return Err(MigrateError::InvalidSetting {
            key: "comment_marker".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
