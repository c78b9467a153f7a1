mod common;

use std::num::NonZeroUsize;

use anyhow::Result;
use common::{ScriptedCounts, ledger_with, reconcile};
use estoque::application::{AppError, InventoryLedger, RetryPolicy};
use estoque::domain::BalanceStatus;

#[test]
fn test_surplus() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    reconcile(&mut ledger, &["20"])?;

    let record = ledger.balance().unwrap().get("Bolt").unwrap();
    assert_eq!(record.system_quantity, 15.0);
    assert_eq!(record.physical_quantity, 20.0);
    assert_eq!(record.difference, 5.0);
    assert_eq!(record.status(), BalanceStatus::Surplus);

    Ok(())
}

#[test]
fn test_zero_count_is_ok() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    reconcile(&mut ledger, &["0"])?;

    let record = ledger.balance().unwrap().get("Bolt").unwrap();
    assert_eq!(record.difference, -15.0);
    assert_eq!(record.status(), BalanceStatus::Ok);

    Ok(())
}

#[test]
fn test_shortage() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    reconcile(&mut ledger, &["10"])?;

    let record = ledger.balance().unwrap().get("Bolt").unwrap();
    assert_eq!(record.difference, -5.0);
    assert_eq!(record.status(), BalanceStatus::Shortage);

    Ok(())
}

#[test]
fn test_every_item_is_counted_in_order() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0), ("Nut", 4.0), ("Washer", 9.0)])?;
    let mut counts = ScriptedCounts::new(&["15", "4.5", "1"]);

    ledger.run_reconciliation(&mut counts, RetryPolicy::Unbounded)?;

    assert_eq!(counts.asked, vec!["Bolt", "Nut", "Washer"]);
    let balance = ledger.balance().unwrap();
    let names: Vec<&str> = balance.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bolt", "Nut", "Washer"]);
    assert_eq!(balance.get("Bolt").unwrap().status(), BalanceStatus::Unlabeled);
    assert_eq!(balance.get("Nut").unwrap().status(), BalanceStatus::Surplus);
    assert_eq!(balance.get("Washer").unwrap().status(), BalanceStatus::Shortage);

    Ok(())
}

#[test]
fn test_invalid_counts_are_asked_again() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    let mut counts = ScriptedCounts::new(&["lots", "", "twelve", "12"]);

    ledger.run_reconciliation(&mut counts, RetryPolicy::Unbounded)?;

    assert_eq!(counts.rejected.len(), 3);
    assert_eq!(counts.asked.len(), 4);
    assert_eq!(
        ledger.balance().unwrap().get("Bolt").unwrap().physical_quantity,
        12.0
    );

    Ok(())
}

#[test]
fn test_bounded_retry_gives_up() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    let mut counts = ScriptedCounts::new(&["a", "b", "c", "12"]);
    let policy = RetryPolicy::Bounded(NonZeroUsize::new(3).unwrap());

    let err = ledger.run_reconciliation(&mut counts, policy).unwrap_err();

    assert!(matches!(
        err,
        AppError::TooManyAttempts { ref item, attempts: 3 } if item == "Bolt"
    ));
    assert!(ledger.balance().is_none());

    Ok(())
}

#[test]
fn test_rerun_replaces_previous_records() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;

    reconcile(&mut ledger, &["20"])?;
    reconcile(&mut ledger, &["10"])?;

    let balance = ledger.balance().unwrap();
    assert_eq!(balance.len(), 1);
    let record = balance.get("Bolt").unwrap();
    assert_eq!(record.physical_quantity, 10.0);
    assert_eq!(record.status(), BalanceStatus::Shortage);

    Ok(())
}

#[test]
fn test_rerun_uses_current_stock() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    reconcile(&mut ledger, &["15"])?;

    ledger.add_item("Bolt", 5.0)?;
    ledger.add_item("Nut", 2.0)?;
    reconcile(&mut ledger, &["18", "2"])?;

    let balance = ledger.balance().unwrap();
    assert_eq!(balance.len(), 2);
    assert_eq!(balance.get("Bolt").unwrap().system_quantity, 20.0);
    assert_eq!(balance.get("Bolt").unwrap().difference, -2.0);

    Ok(())
}

#[test]
fn test_empty_stock_is_not_reconciled() {
    let mut ledger = InventoryLedger::new();
    let mut counts = ScriptedCounts::new(&["1"]);

    let err = ledger
        .run_reconciliation(&mut counts, RetryPolicy::Unbounded)
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyStock));
    assert!(err.is_notice());
    assert!(counts.asked.is_empty());
    assert!(ledger.balance().is_none());
}

#[test]
fn test_reconciliation_returns_rendered_balance() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    let output = reconcile(&mut ledger, &["20"])?;

    assert!(output.starts_with("Stock balance updated.\n"));
    assert!(output.ends_with(&ledger.render_balance()));

    Ok(())
}

#[test]
fn test_render_balance_without_reconciliation() {
    let ledger = InventoryLedger::new();
    assert_eq!(
        ledger.render_balance(),
        "No stock balance has been performed yet."
    );
}

#[test]
fn test_render_balance_table() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0), ("Nut", 4.0), ("Pin", 2.0), ("Cap", 1.0)])?;
    reconcile(&mut ledger, &["20", "0", "1", "1"])?;

    let rendered = ledger.render_balance();
    let lines: Vec<&str> = rendered.lines().collect();

    assert!(lines[0].starts_with("Balance as of "));
    assert!(lines[0].ends_with(" UTC"));
    assert_eq!(
        &lines[1..],
        &[
            "+------+-----------------+-------------------+------------+----------+",
            "| Item | System Quantity | Physical Quantity | Difference | Status   |",
            "+======+=================+===================+============+==========+",
            "| Bolt |              15 |                20 |          5 | surplus  |",
            "+------+-----------------+-------------------+------------+----------+",
            "| Nut  |               4 |                 0 |         -4 | OK       |",
            "+------+-----------------+-------------------+------------+----------+",
            "| Pin  |               2 |                 1 |         -1 | shortage |",
            "+------+-----------------+-------------------+------------+----------+",
            "| Cap  |               1 |                 1 |          0 |          |",
            "+------+-----------------+-------------------+------------+----------+",
        ]
    );

    Ok(())
}

#[test]
fn test_render_balance_is_idempotent() -> Result<()> {
    let mut ledger = ledger_with(&[("Bolt", 15.0)])?;
    reconcile(&mut ledger, &["20"])?;

    assert_eq!(ledger.render_balance(), ledger.render_balance());
    Ok(())
}
