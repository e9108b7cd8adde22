//! Rendering and writing the merged config.
//!
//! YAML is re-serialized from the merged mapping. TOML is produced by editing
//! the new template with `toml_edit`, so the template's comments and layout
//! survive and only carried keys change.

use std::path::Path;

use crate::document::Document;
use crate::error::MigrateError;
use crate::load::Source;
use crate::reconcile::Migration;

/// Text of the merged config in the template's format.
pub fn render(migration: &Migration, template: &Source) -> Result<String, MigrateError> {
    match &migration.merged {
        Document::Yaml(_) => migration.merged.to_text(),
        Document::Toml(merged) => patch_template(&template.text(), merged, &migration.carried),
    }
}

/// Pure function: set every `carried` key of `merged` in the `template` TOML text.
pub fn patch_template(
    template: &str,
    merged: &toml::Table,
    carried: &[String],
) -> Result<String, MigrateError> {
    let mut doc: toml_edit::DocumentMut =
        template
            .parse()
            .map_err(|e: toml_edit::TomlError| MigrateError::Render {
                reason: e.to_string(),
            })?;

    for key in carried {
        if let Some(value) = merged.get(key) {
            doc[key.as_str()] = to_item(value)?;
        }
    }

    Ok(doc.to_string())
}

fn to_item(value: &toml::Value) -> Result<toml_edit::Item, MigrateError> {
    let parsed: toml_edit::Value =
        value
            .to_string()
            .parse()
            .map_err(|e: toml_edit::TomlError| MigrateError::Render {
                reason: e.to_string(),
            })?;
    Ok(match parsed {
        toml_edit::Value::InlineTable(table) => toml_edit::Item::Table(table.into_table()),
        other => toml_edit::Item::Value(other),
    })
}

/// Write `text` to `dest` in one call. Parent directories are not created.
pub fn write_config(dest: &Path, text: &str) -> Result<(), MigrateError> {
    std::fs::write(dest, text).map_err(|e| MigrateError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %dest.display(), bytes = text.len(), "wrote merged config");
    Ok(())
}
