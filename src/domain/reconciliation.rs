use chrono::{DateTime, Utc};

use super::Quantity;

/// Label attached to a reconciled item when the balance is shown or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// Physical count of zero. Takes precedence over `Shortage`.
    Ok,
    /// Fewer items on the shelf than the system records.
    Shortage,
    /// More items on the shelf than the system records.
    Surplus,
    /// Physical and system quantities agree (and are non-zero).
    Unlabeled,
}

impl BalanceStatus {
    /// Classify a physical count against the system quantity.
    pub fn classify(system_quantity: Quantity, physical_quantity: Quantity) -> Self {
        if physical_quantity == 0.0 {
            BalanceStatus::Ok
        } else if physical_quantity < system_quantity {
            BalanceStatus::Shortage
        } else if physical_quantity > system_quantity {
            BalanceStatus::Surplus
        } else {
            BalanceStatus::Unlabeled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::Ok => "OK",
            BalanceStatus::Shortage => "shortage",
            BalanceStatus::Surplus => "surplus",
            BalanceStatus::Unlabeled => "",
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical-vs-system comparison for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationRecord {
    pub name: String,
    pub system_quantity: Quantity,
    pub physical_quantity: Quantity,
    pub difference: Quantity,
}

impl ReconciliationRecord {
    pub fn new(name: String, system_quantity: Quantity, physical_quantity: Quantity) -> Self {
        Self {
            name,
            system_quantity,
            physical_quantity,
            difference: physical_quantity - system_quantity,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::classify(self.system_quantity, self.physical_quantity)
    }
}

/// Result of one complete reconciliation pass over the stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub performed_at: DateTime<Utc>,
    pub records: Vec<ReconciliationRecord>,
}

impl Reconciliation {
    pub fn new(records: Vec<ReconciliationRecord>, performed_at: DateTime<Utc>) -> Self {
        Self {
            performed_at,
            records,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ReconciliationRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
