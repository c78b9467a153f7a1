use std::io;
use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::{InventoryLedger, RetryPolicy};

mod shell;

pub use shell::Shell;

/// Estoque - Interactive Stock Ledger
#[derive(Parser, Debug)]
#[command(name = "estoque")]
#[command(about = "Record stock, import it from CSV and reconcile it against a physical count")]
#[command(version)]
pub struct Cli {
    /// CSV file to import before the menu is shown
    #[arg(short, long)]
    pub import: Option<String>,

    /// Give up on an item after this many invalid physical counts
    /// (keep asking when omitted)
    #[arg(long)]
    pub max_attempts: Option<NonZeroUsize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        self.init_logging();

        let mut ledger = InventoryLedger::new();
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut shell = Shell::new(&mut ledger, stdin.lock(), stdout.lock())
            .with_retry_policy(self.retry_policy());

        if let Some(path) = &self.import {
            shell
                .import_file(path)
                .with_context(|| format!("Failed to report import of {}", path))?;
        }

        shell.run().context("Interactive session failed")
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_max_attempts(self.max_attempts)
    }

    fn init_logging(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .init();
    }
}
