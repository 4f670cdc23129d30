// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mindtree CLI entrypoint.
//!
//! Opens the outline stored in `<dir>/<slot>.json` (creating nothing until the first save) and
//! runs the interactive TUI. `--print` dumps the outline as indented text instead.

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mindtree::config::{Config, DEFAULT_LOG_FILTER, LOG_ENV};
use mindtree::model::IdSource;
use mindtree::ops::Outline;
use mindtree::store::{WriteDurability, DEFAULT_SLOT};

#[derive(Debug, Parser)]
#[command(name = "mindtree", about = "Keyboard-driven outliner for the terminal", version)]
struct Cli {
    /// Directory holding the outline slot (defaults to the current directory).
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Slot name; the outline is stored in `<DIR>/<SLOT>.json`.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SLOT)]
    slot: String,
    /// Opt into slower, best-effort durable persistence (fsync/sync where supported).
    #[arg(long)]
    durable_writes: bool,
    /// Append log records to this file. Filter with `MINDTREE_LOG` (default `info`).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Print the outline as indented text and exit.
    #[arg(long)]
    print: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            storage_dir: self.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            slot: self.slot.clone(),
            durability: if self.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            },
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::options().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.config();
    init_logging(&config)?;

    let store = config.file_store();
    let slot_path = store.slot_path()?;
    tracing::info!(path = %slot_path.display(), "opening outline");
    let outline = Outline::open(&store, IdSource::wall_clock());

    if cli.print {
        print!("{}", mindtree::tui::outline_text(outline.tree()));
        return Ok(());
    }

    mindtree::tui::run(outline, store, config.slot)
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("mindtree: {err}");
        std::process::exit(1);
    }
}
