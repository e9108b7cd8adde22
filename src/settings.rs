//! The migrator's own behaviour switches.
//!
//! Every field has a compiled default, so running with no settings file at all
//! reproduces the classic behaviour: `#` comments, plain substring matching,
//! commented keys carried forward, unclear answers abort.

use confique::Config;
use serde::{Deserialize, Serialize};

/// How an old-only key is searched for inside a commented line of the new template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum KeyMatch {
    /// The key's text appears anywhere in the comment line.
    Substring,
    /// The comment line reads `<marker> <key><separator>...`.
    Key,
}

/// What happens to an old-only key that the new template has commented out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CommentedKeys {
    /// Write the old value into the merged config.
    Carry,
    /// Keep it out of both the deprecated list and the merged config.
    Drop,
}

/// Reaction to a confirmation answer containing neither `y` nor `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OnUnclear {
    Abort,
    Reprompt,
}

impl KeyMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyMatch::Substring => "substring",
            KeyMatch::Key => "key",
        }
    }
}

impl CommentedKeys {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentedKeys::Carry => "carry",
            CommentedKeys::Drop => "drop",
        }
    }
}

impl OnUnclear {
    pub fn as_str(self) -> &'static str {
        match self {
            OnUnclear::Abort => "abort",
            OnUnclear::Reprompt => "reprompt",
        }
    }
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Prefix marking a commented-out line in the new template.
    #[config(default = "#")]
    pub comment_marker: String,

    /// How old-only keys are looked up in commented lines: "substring" or "key".
    #[config(default = "substring")]
    pub key_match: KeyMatch,

    /// Old-only keys found commented out in the new template: "carry" or "drop".
    #[config(default = "carry")]
    pub commented_keys: CommentedKeys,

    /// Answer to "is this ok?" with neither y nor n: "abort" or "reprompt".
    #[config(default = "abort")]
    pub on_unclear: OnUnclear,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            comment_marker: "#".to_string(),
            key_match: KeyMatch::Substring,
            commented_keys: CommentedKeys::Carry,
            on_unclear: OnUnclear::Abort,
        }
    }
}
