//! Three-way key reconciliation between an old config and a new template.
//!
//! Old-only keys are deprecated unless the new template mentions them in a
//! commented-out line. Everything that survives is overlaid onto the new
//! template, so every template key keeps its place and takes the old value
//! when the operator had one.

use std::collections::HashSet;

use crate::document::Document;
use crate::error::MigrateError;
use crate::load::Source;
use crate::settings::{CommentedKeys, KeyMatch, Settings};
use crate::types::Format;

/// Result of reconciling an old config against a new template.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    /// Old-only keys with no commented-out counterpart in the template, in old order.
    pub deprecated: Vec<String>,
    /// Template keys the old config never had, in template order.
    pub added: Vec<String>,
    /// Keys whose old value was written into `merged`, in old order.
    pub carried: Vec<String>,
    /// The new template with the old values overlaid.
    pub merged: Document,
}

/// Decides which template lines count as commented-out settings and whether
/// a key is mentioned in one.
#[derive(Debug, Clone)]
pub struct CommentScan<'a> {
    marker: &'a str,
    separator: char,
    key_match: KeyMatch,
}

impl<'a> CommentScan<'a> {
    pub fn new(settings: &'a Settings, format: Format) -> Self {
        Self {
            marker: &settings.comment_marker,
            separator: format.separator(),
            key_match: settings.key_match,
        }
    }

    /// The text after the marker if `line` is a comment holding a separator.
    pub fn comment_body<'l>(&self, line: &'l str) -> Option<&'l str> {
        let body = line.trim_start().strip_prefix(self.marker)?;
        line.contains(self.separator).then_some(body)
    }

    /// Whether `key` is mentioned by the comment line `line`.
    pub fn mentions(&self, line: &str, key: &str) -> bool {
        let Some(body) = self.comment_body(line) else {
            return false;
        };
        match self.key_match {
            KeyMatch::Substring => line.contains(key),
            KeyMatch::Key => body
                .trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with(self.separator)),
        }
    }

    /// The subset of `keys` mentioned by some comment line of `lines`.
    pub fn commented<'k>(&self, lines: &[String], keys: &'k [String]) -> HashSet<&'k str> {
        let comments: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| self.comment_body(line).is_some())
            .collect();
        keys.iter()
            .filter(|key| comments.iter().any(|line| self.mentions(line, key)))
            .map(String::as_str)
            .collect()
    }
}

/// Reconcile `old` against the `new` template.
///
/// Both sources are consumed; the old mapping is pruned of deprecated keys
/// and overlaid onto the new one.
pub fn reconcile(old: Source, new: Source, settings: &Settings) -> Result<Migration, MigrateError> {
    let old_keys = old.document.keys();
    let new_keys = new.document.keys();
    let old_set: HashSet<&str> = old_keys.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new_keys.iter().map(String::as_str).collect();

    let added: Vec<String> = new_keys
        .iter()
        .filter(|k| !old_set.contains(k.as_str()))
        .cloned()
        .collect();
    let old_only: Vec<String> = old_keys
        .iter()
        .filter(|k| !new_set.contains(k.as_str()))
        .cloned()
        .collect();

    let scan = CommentScan::new(settings, new.format());
    let commented = scan.commented(&new.lines, &old_only);
    let deprecated: Vec<String> = old_only
        .iter()
        .filter(|k| !commented.contains(k.as_str()))
        .cloned()
        .collect();

    tracing::info!(
        added = added.len(),
        old_only = old_only.len(),
        commented = commented.len(),
        deprecated = deprecated.len(),
        "compared key sets"
    );

    let mut pruned = old.document;
    for key in &deprecated {
        pruned.remove(key);
    }

    let mut merged = new.document;
    let carried = match settings.commented_keys {
        CommentedKeys::Carry => merged.overlay(pruned, |_| true)?,
        CommentedKeys::Drop => merged.overlay(pruned, |k| new_set.contains(k))?,
    };
    tracing::debug!(carried = ?carried, "overlaid old values");

    Ok(Migration {
        deprecated,
        added,
        carried,
        merged,
    })
}
