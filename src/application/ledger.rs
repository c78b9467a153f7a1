use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info, warn};

use crate::domain::{
    Quantity, Reconciliation, ReconciliationRecord, StockMap, format_quantity, parse_quantity,
};
use crate::io::import::OpenError;
use crate::io::{ImportError, ImportResult, StockRows, Table, write_balance_xlsx};

use super::{AppError, CountSource, RetryPolicy};

pub const BALANCE_UPDATED: &str = "Stock balance updated.";

/// In-memory stock ledger: on-hand quantities plus the latest balance.
/// This is the single owner of all inventory state for a session.
#[derive(Debug, Default)]
pub struct InventoryLedger {
    stock: StockMap,
    balance: Option<Reconciliation>,
}

/// Result of adding stock
#[derive(Debug, Clone, PartialEq)]
pub struct AddedItem {
    pub name: String,
    pub added: Quantity,
    pub total: Quantity,
}

impl fmt::Display for AddedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added {} of {} to the stock.",
            format_quantity(self.added),
            self.name
        )
    }
}

/// Result of exporting the balance
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Balance exported to {} ({} items)",
            self.path.display(),
            self.rows
        )
    }
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stock(&self) -> &StockMap {
        &self.stock
    }

    /// The latest completed reconciliation, if any.
    pub fn balance(&self) -> Option<&Reconciliation> {
        self.balance.as_ref()
    }

    // ========================
    // Stock operations
    // ========================

    /// Add `quantity` of `name` to the stock.
    pub fn add_item(&mut self, name: &str, quantity: Quantity) -> Result<AddedItem, AppError> {
        let total = self.stock.add(name, quantity)?;
        debug!("Stock of {} is now {}", name, total);

        Ok(AddedItem {
            name: name.to_string(),
            added: quantity,
            total,
        })
    }

    /// Render the stock as a table, in insertion order.
    pub fn list_items(&self) -> String {
        if self.stock.is_empty() {
            return AppError::EmptyStock.to_string();
        }

        let mut table = Table::new(&["Item", "Quantity"]).align_right(1);
        for entry in self.stock.iter() {
            table.push_row(vec![entry.name.clone(), format_quantity(entry.quantity)]);
        }
        table.to_string()
    }

    /// Import quantities from a CSV file with `item` and `quantidade` columns.
    ///
    /// Rows are applied one by one through [`InventoryLedger::add_item`]; a bad
    /// row is recorded in the result and does not stop the import. A missing
    /// column aborts before any row is applied. A read or parse failure aborts
    /// the import, keeping the rows already applied.
    pub fn import_from_csv(&mut self, path: impl AsRef<Path>) -> Result<ImportResult, AppError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }

        let rows = StockRows::open(path).map_err(|err| match err {
            OpenError::MissingColumns(missing) => AppError::MissingColumns { missing },
            OpenError::Csv(err) => AppError::Import {
                message: err.to_string(),
                applied: 0,
            },
        })?;

        let mut result = ImportResult::default();
        for row in rows {
            let row = row.map_err(|err| AppError::Import {
                message: err.to_string(),
                applied: result.imported,
            })?;

            let outcome = parse_quantity(&row.quantity)
                .map_err(|err| err.to_string())
                .and_then(|quantity| {
                    self.add_item(&row.item, quantity)
                        .map_err(|err| err.to_string())
                });

            match outcome {
                Ok(_) => result.imported += 1,
                Err(error) => {
                    warn!("Skipping row {} of {}: {}", row.row, path.display(), error);
                    result.errors.push(ImportError {
                        row: row.row,
                        error,
                    });
                }
            }
        }

        info!(
            "Imported {} rows from {} ({} errors)",
            result.imported,
            path.display(),
            result.errors.len()
        );
        Ok(result)
    }

    // ========================
    // Balance operations
    // ========================

    /// Ask `source` for a physical count of every item and replace the
    /// current balance with the result.
    ///
    /// The item list is a snapshot taken when the pass starts. If the pass
    /// fails part-way, the previous balance is kept.
    pub fn run_reconciliation<S: CountSource + ?Sized>(
        &mut self,
        source: &mut S,
        policy: RetryPolicy,
    ) -> Result<String, AppError> {
        if self.stock.is_empty() {
            return Err(AppError::EmptyStock);
        }

        let mut records = Vec::with_capacity(self.stock.len());
        for entry in self.stock.snapshot() {
            let physical = read_count(source, &entry.name, policy)?;
            records.push(ReconciliationRecord::new(
                entry.name,
                entry.quantity,
                physical,
            ));
        }

        info!("Stock balance completed for {} items", records.len());
        self.balance = Some(Reconciliation::new(records, Utc::now()));

        Ok(format!("{}\n{}", BALANCE_UPDATED, self.render_balance()))
    }

    /// Render the latest balance as a table.
    pub fn render_balance(&self) -> String {
        let Some(balance) = &self.balance else {
            return AppError::NoReconciliation.to_string();
        };

        let mut table = Table::new(&[
            "Item",
            "System Quantity",
            "Physical Quantity",
            "Difference",
            "Status",
        ])
        .align_right(1)
        .align_right(2)
        .align_right(3);

        for record in &balance.records {
            table.push_row(vec![
                record.name.clone(),
                format_quantity(record.system_quantity),
                format_quantity(record.physical_quantity),
                format_quantity(record.difference),
                record.status().to_string(),
            ]);
        }

        format!(
            "Balance as of {}\n{}",
            balance.performed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            table
        )
    }

    /// Write the latest balance to an Excel workbook at `path`.
    pub fn export_balance(&self, path: impl AsRef<Path>) -> Result<ExportSummary, AppError> {
        let balance = self.balance.as_ref().ok_or(AppError::NoReconciliation)?;
        let path = path.as_ref();

        let rows = write_balance_xlsx(balance, path)
            .map_err(|err| AppError::Export(format!("{:#}", err)))?;

        Ok(ExportSummary {
            path: path.to_path_buf(),
            rows,
        })
    }
}

/// Ask for a count until it parses or the retry policy gives up.
fn read_count<S: CountSource + ?Sized>(
    source: &mut S,
    item: &str,
    policy: RetryPolicy,
) -> Result<Quantity, AppError> {
    let mut attempts = 0;
    loop {
        let Some(answer) = source.next_count(item)? else {
            return Err(AppError::InputClosed(item.to_string()));
        };

        match parse_quantity(&answer) {
            Ok(quantity) => return Ok(quantity),
            Err(err) => {
                attempts += 1;
                debug!("Rejected count {:?} for {}: {}", answer, item, err);
                source.rejected(item, &err)?;
                if !policy.allows_retry(attempts) {
                    return Err(AppError::TooManyAttempts {
                        item: item.to_string(),
                        attempts,
                    });
                }
            }
        }
    }
}
