use std::collections::HashMap;

use super::Quantity;

/// A single stock line: item name and on-hand quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    pub name: String,
    pub quantity: Quantity,
}

/// On-hand quantities keyed by item name, kept in insertion order.
///
/// Every stored quantity is strictly positive: entries are only created or
/// grown through [`StockMap::add`], which rejects non-positive amounts.
#[derive(Debug, Clone, Default)]
pub struct StockMap {
    entries: Vec<StockEntry>,
    index: HashMap<String, usize>,
}

impl StockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to `name`, creating the entry if needed.
    /// Returns the new on-hand quantity for the item.
    pub fn add(&mut self, name: &str, quantity: Quantity) -> Result<Quantity, StockError> {
        validate_addition(name, quantity)?;

        match self.index.get(name) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                let total = entry.quantity + quantity;
                if !total.is_finite() {
                    return Err(StockError::TotalOverflow(name.to_string()));
                }
                entry.quantity = total;
                Ok(total)
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(StockEntry {
                    name: name.to_string(),
                    quantity,
                });
                Ok(quantity)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Quantity> {
        self.index.get(name).map(|&pos| self.entries[pos].quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StockEntry> {
        self.entries.iter()
    }

    /// Copy of the current entries, used as the item list of a reconciliation pass.
    pub fn snapshot(&self) -> Vec<StockEntry> {
        self.entries.clone()
    }
}

/// Check that an addition keeps the map's invariants.
pub fn validate_addition(name: &str, quantity: Quantity) -> Result<(), StockError> {
    if name.trim().is_empty() {
        return Err(StockError::EmptyName);
    }
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(StockError::NonPositiveQuantity(quantity));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockError {
    EmptyName,
    NonPositiveQuantity(Quantity),
    TotalOverflow(String),
}

impl std::fmt::Display for StockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockError::EmptyName => write!(f, "item name must not be empty"),
            StockError::NonPositiveQuantity(quantity) => write!(
                f,
                "quantity must be a positive number (got {})",
                super::format_quantity(*quantity)
            ),
            StockError::TotalOverflow(name) => {
                write!(f, "total quantity of {} would exceed the supported range", name)
            }
        }
    }
}

impl std::error::Error for StockError {}
