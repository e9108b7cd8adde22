//! The migration run: load → reconcile → confirm → write.
//!
//! [`Upgrade::run`] drives the whole dialogue through a [`Console`] and
//! reports what happened as an [`Outcome`].

use std::fmt;
use std::path::PathBuf;

use crate::error::MigrateError;
use crate::load;
use crate::prompt::{self, Answer, Console};
use crate::reconcile::{self, Migration};
use crate::settings::Settings;
use crate::write;

/// The three files a migration touches.
#[derive(Debug, Clone, PartialEq)]
pub struct Upgrade {
    /// The operator's customized config.
    pub old: PathBuf,
    /// The clean template of the target version.
    pub new: PathBuf,
    /// Where the merged config goes.
    pub dest: PathBuf,
    /// Skip both prompts and write straight away.
    pub assume_yes: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The merged config was written.
    Written { dest: PathBuf, deprecated: Vec<String> },
    /// The operator answered no.
    Cancelled,
    /// The operator's answer held neither y nor n, or input closed.
    Unanswered,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Written { dest, .. } => write!(f, "wrote {}", dest.display()),
            Outcome::Cancelled => write!(f, "cancelled"),
            Outcome::Unanswered => write!(f, "no answer, nothing written"),
        }
    }
}

impl Upgrade {
    pub fn run(
        &self,
        settings: &Settings,
        console: &mut dyn Console,
    ) -> Result<Outcome, MigrateError> {
        let (old, new) = load::load_pair(&self.old, &self.new)?;
        let template = new.clone();
        let migration = reconcile::reconcile(old, new, settings)?;
        let rendered = write::render(&migration, &template)?;

        console.show(&deprecated_report(&migration))?;
        if !self.assume_yes {
            prompt::pause(
                console,
                "\nIf that looks ok, press enter to process the new config:\n",
            )?;
        }

        console.show("\nI'm going to write the new config file with these settings:\n\n")?;
        console.show(&rendered)?;

        let answer = if self.assume_yes {
            Answer::Yes
        } else {
            prompt::confirm(console, settings.on_unclear)?
        };

        match answer {
            Answer::Yes => {
                write::write_config(&self.dest, &rendered)?;
                console.show(&format!(
                    "\nDone, thanks! I copied your custom settings from {} into {} and wrote them to {}\n",
                    self.old.display(),
                    self.new.display(),
                    self.dest.display()
                ))?;
                Ok(Outcome::Written {
                    dest: self.dest.clone(),
                    deprecated: migration.deprecated,
                })
            }
            Answer::No => {
                console.show("ok, not upgrading\n")?;
                Ok(Outcome::Cancelled)
            }
            Answer::Unclear => {
                tracing::warn!("confirmation answer held neither y nor n");
                console.show("no clear answer, not upgrading\n")?;
                Ok(Outcome::Unanswered)
            }
        }
    }
}

/// The list shown before anything else, one key per line.
pub fn deprecated_report(migration: &Migration) -> String {
    let mut out = String::from(
        "The following keys appear to be deprecated in the current config, please verify:\n",
    );
    if migration.deprecated.is_empty() {
        out.push_str("  (none)\n");
    }
    for key in &migration.deprecated {
        out.push_str(&format!("  - {key}\n"));
    }
    if !migration.added.is_empty() {
        out.push_str("\nNew in this version (template values kept):\n");
        for key in &migration.added {
            out.push_str(&format!("  + {key}\n"));
        }
    }
    out
}

/// A commented TOML template of the migrator's own settings.
pub fn generate_template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}
