//! Carry an operator's customized settings from an old data-store config file
//! (think `cassandra.yaml`) into the template shipped with a new version.
//!
//! ```ignore
//! let settings = SettingsLoader::new().load()?;
//! let upgrade = Upgrade {
//!     old: "cassandra.yaml.old".into(),
//!     new: "cassandra.yaml.dist".into(),
//!     dest: "cassandra.yaml".into(),
//!     assume_yes: false,
//! };
//! upgrade.run(&settings, &mut StdConsole::terminal())?;
//! ```
//!
//! # How keys are reconciled
//!
//! Only top-level keys are compared. For the old config `old` and the
//! template `new`:
//!
//! - keys only in `new` keep the template value;
//! - keys in both take the old value;
//! - keys only in `old` are **deprecated** and dropped, unless the template
//!   mentions them on a commented-out line (`# key: value`). Those are carried
//!   into the output by default.
//!
//! A commented-out line is one whose first non-blank characters are the
//! comment marker and which contains the key/value separator (`:` for YAML,
//! `=` for TOML). By default a key matches such a line when its text appears
//! anywhere in it, so short keys can match unrelated comments. Set
//! `key_match = "key"` to require `# key:` exactly.
//!
//! # Formats
//!
//! `.toml` files are TOML, everything else is YAML. Old and new must share a
//! format, and the output uses it too. YAML output is re-serialized, so
//! template comments are lost; TOML output is an edit of the template that
//! keeps its comments.
//!
//! # Dialogue
//!
//! [`Upgrade::run`] shows the deprecated keys, waits for enter, shows the
//! merged config and asks `is this ok? y/n`. An answer holding a `y` writes,
//! one holding an `n` cancels. Anything else aborts, or asks again with
//! `on_unclear = "reprompt"`. All of it goes through the [`Console`] trait, so
//! tests drive it with in-memory buffers.
//!
//! # Settings
//!
//! The migrator's own switches ([`Settings`]) come from compiled defaults,
//! then the file given with `--settings` (if any), then command-line flags.
//! No environment variables are read and no settings file is searched for.
//! Unknown keys in the settings file are rejected with their path and line.
//!
//! # Errors
//!
//! Everything fallible returns [`MigrateError`]. Nothing is written unless
//! both inputs load and the operator confirms; a failed write is reported
//! with the destination path.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod document;
mod load;
mod ops;
mod prompt;
mod reconcile;
mod resolve;
mod settings;
mod validate;
mod write;

#[cfg(test)]
mod fixtures;

pub use builder::SettingsLoader;
#[cfg(feature = "clap")]
pub use cli::Cli;
pub use document::Document;
pub use error::MigrateError;
pub use load::{Source, load_pair, load_source};
pub use ops::{Outcome, Upgrade, deprecated_report, generate_template};
pub use prompt::{Answer, Console, StdConsole};
pub use reconcile::{CommentScan, Migration, reconcile};
pub use settings::{CommentedKeys, KeyMatch, OnUnclear, Settings};
pub use types::Format;
pub use write::{render, write_config};
