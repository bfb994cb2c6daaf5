//! `phonebook` — menu-driven terminal front end for the contact directory.
//!
//! # Usage
//!
//! ```
//! phonebook
//! phonebook --import contacts.txt --export contacts.txt
//! phonebook --config ~/.config/phonebook.toml
//! ```

mod app;
mod menu;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use phonebook_core::{Directory, PhonebookStore};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Menu-driven contact directory")]
struct Cli {
  /// Path to a TOML config file. Missing files are ignored.
  #[arg(short, long, value_name = "FILE", default_value = "phonebook.toml")]
  config: PathBuf,

  /// Load contacts from FILE before showing the menu.
  #[arg(long, value_name = "FILE")]
  import: Option<PathBuf>,

  /// Write contacts to FILE after the menu exits.
  #[arg(long, value_name = "FILE")]
  export: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Diagnostics go to stderr so they never interleave with the menu.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  // CLI flags override the config file.
  let import = cli.import.or_else(|| settings.import_on_start.clone());
  let export = cli.export.or_else(|| settings.export_on_exit.clone());

  let mut directory = Directory::with_rule(settings.phone_rule());

  if let Some(path) = &import {
    let summary = directory
      .import_from(path)
      .with_context(|| format!("failed to import contacts from {}", path.display()))?;
    tracing::info!(?summary, "start-up import finished");
  }

  let mut app = App::new(directory, io::stdin().lock(), io::stdout().lock());
  app.run().context("terminal i/o failed")?;

  if let Some(path) = &export {
    let written = app
      .store()
      .export_to(path)
      .with_context(|| format!("failed to export contacts to {}", path.display()))?;
    tracing::info!(written, path = %path.display(), "exit export finished");
  }

  Ok(())
}
