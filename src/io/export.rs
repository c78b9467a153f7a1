//! Write a stock balance to an Excel workbook

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::domain::{Reconciliation, ReconciliationRecord};

pub const BALANCE_SHEET: &str = "Balance";

pub const BALANCE_HEADERS: [&str; 5] = [
    "Item",
    "Quantidade no Sistema (System Quantity)",
    "Quantidade Física (Physical Quantity)",
    "Diferença (Difference)",
    "Status",
];

/// Write `balance` to a single-sheet workbook at `path`.
/// Returns the number of data rows written (the header is not counted).
pub fn write_balance_xlsx(balance: &Reconciliation, path: &Path) -> Result<usize> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(BALANCE_SHEET)?;

    let header_format = Format::new().set_bold();
    for (col, header) in BALANCE_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, record) in balance.records.iter().enumerate() {
        write_record(worksheet, (idx + 1) as u32, record)?;
    }

    worksheet.set_column_width(0, 24)?;
    for col in 1..BALANCE_HEADERS.len() {
        worksheet.set_column_width(col as u16, 18)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!(
        "Balance with {} rows exported to: {}",
        balance.len(),
        path.display()
    );
    Ok(balance.len())
}

fn write_record(ws: &mut Worksheet, row: u32, record: &ReconciliationRecord) -> Result<()> {
    ws.write_string(row, 0, &record.name)?;
    ws.write_number(row, 1, record.system_quantity)?;
    ws.write_number(row, 2, record.physical_quantity)?;
    ws.write_number(row, 3, record.difference)?;

    // An unlabeled status leaves the cell empty
    let status = record.status();
    if !status.as_str().is_empty() {
        ws.write_string(row, 4, status.as_str())?;
    }
    Ok(())
}
