// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use estoque::application::{CountSource, InventoryLedger, RetryPolicy};
use estoque::domain::ParseQuantityError;
use tempfile::TempDir;

/// Canned physical counts, handed out in order regardless of the item.
/// Records every item it was asked about and every rejection.
#[derive(Debug, Default)]
pub struct ScriptedCounts {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
    pub rejected: Vec<String>,
}

impl ScriptedCounts {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl CountSource for ScriptedCounts {
    fn next_count(&mut self, item: &str) -> io::Result<Option<String>> {
        self.asked.push(item.to_string());
        Ok(self.answers.pop_front())
    }

    fn rejected(&mut self, item: &str, _error: &ParseQuantityError) -> io::Result<()> {
        self.rejected.push(item.to_string());
        Ok(())
    }
}

/// Helper to write a CSV file into a fresh temporary directory
pub fn write_csv(content: &str) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("stock.csv");
    std::fs::write(&path, content)?;
    Ok((path, temp_dir))
}

/// Test fixture: ledger with a known stock
pub fn ledger_with(items: &[(&str, f64)]) -> Result<InventoryLedger> {
    let mut ledger = InventoryLedger::new();
    for (name, quantity) in items {
        ledger.add_item(name, *quantity)?;
    }
    Ok(ledger)
}

/// Run a reconciliation with canned counts and no retry limit
pub fn reconcile(ledger: &mut InventoryLedger, answers: &[&str]) -> Result<String> {
    let mut counts = ScriptedCounts::new(answers);
    Ok(ledger.run_reconciliation(&mut counts, RetryPolicy::Unbounded)?)
}
