//! `confmigrate` binary: parse flags, resolve settings, run the migration.
//!
//! Diagnostics go to stderr through `tracing` (`RUST_LOG`, default `warn`);
//! the operator dialogue owns stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use confmigrate::{Cli, MigrateError, Outcome, StdConsole, generate_template};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let MigrateError::UnknownSettings(all) = &e {
                for each in all.iter().skip(1) {
                    eprintln!("error: {each}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), MigrateError> {
    if cli.settings_template {
        print!("{}", generate_template());
        return Ok(());
    }
    let Some(upgrade) = cli.upgrade() else {
        // clap enforces the paths unless --settings-template is given.
        return Ok(());
    };

    let settings = cli.settings_loader().load()?;
    tracing::debug!(?settings, "resolved settings");

    let outcome = upgrade.run(&settings, &mut StdConsole::terminal())?;
    if let Outcome::Written { deprecated, .. } = &outcome {
        tracing::info!(dropped = deprecated.len(), "{outcome}");
    }
    Ok(())
}
