//! Command-line surface.
//!
//! Compiled only with the `clap` feature (on by default). [`Cli`] is parsed by
//! the binary and split into the [`Upgrade`] to run and the settings loader
//! carrying its per-run overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::builder::SettingsLoader;
use crate::ops::Upgrade;
use crate::settings::{CommentedKeys, KeyMatch, OnUnclear};

/// Carry customized settings from an old config file into a new version's template.
#[derive(Debug, Parser)]
#[command(name = "confmigrate", version)]
pub struct Cli {
    /// Source config file (your current, customized settings).
    #[arg(long, required_unless_present = "settings_template")]
    pub old: Option<PathBuf>,

    /// Template config file of the version you are upgrading to.
    #[arg(long, required_unless_present = "settings_template")]
    pub new: Option<PathBuf>,

    /// Destination config file.
    #[arg(long, required_unless_present = "settings_template")]
    pub dest: Option<PathBuf>,

    /// Write without asking for confirmation.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Settings file for the migrator itself. Flags override it.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// How old-only keys are matched against commented lines.
    #[arg(long, value_enum)]
    pub key_match: Option<KeyMatch>,

    /// What to do with old-only keys the template has commented out.
    #[arg(long, value_enum)]
    pub commented_keys: Option<CommentedKeys>,

    /// What to do when the confirmation answer holds neither y nor n.
    #[arg(long, value_enum)]
    pub on_unclear: Option<OnUnclear>,

    /// Print a commented settings template and exit.
    #[arg(long, conflicts_with_all = ["old", "new", "dest"])]
    pub settings_template: bool,
}

impl Cli {
    /// The migration to run, or `None` when only the settings template was asked for.
    pub fn upgrade(&self) -> Option<Upgrade> {
        Some(Upgrade {
            old: self.old.clone()?,
            new: self.new.clone()?,
            dest: self.dest.clone()?,
            assume_yes: self.yes,
        })
    }

    /// A settings loader with this run's file and overrides applied.
    pub fn settings_loader(&self) -> SettingsLoader {
        SettingsLoader::new()
            .settings_file(self.settings.clone())
            .cli_override("key_match", self.key_match.map(KeyMatch::as_str))
            .cli_override(
                "commented_keys",
                self.commented_keys.map(CommentedKeys::as_str),
            )
            .cli_override("on_unclear", self.on_unclear.map(OnUnclear::as_str))
    }
}
