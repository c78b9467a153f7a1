use thiserror::Error;

use crate::domain::{Quantity, StockError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("quantity must be a positive number (got {0})")]
    InvalidQuantity(Quantity),

    #[error("item name must not be empty")]
    EmptyItemName,

    #[error("total quantity of {0} would exceed the supported range")]
    QuantityOverflow(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("The file does not contain the required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Error importing stock: {message} ({applied} rows applied before the failure)")]
    Import { message: String, applied: usize },

    #[error("The stock is empty.")]
    EmptyStock,

    #[error("No stock balance has been performed yet.")]
    NoReconciliation,

    #[error("Too many invalid counts for {item} ({attempts} attempts)")]
    TooManyAttempts { item: String, attempts: usize },

    #[error("Input closed while counting {0}")]
    InputClosed(String),

    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),

    #[error("Error exporting balance: {0}")]
    Export(String),
}

impl AppError {
    /// Informational outcomes, as opposed to failures.
    pub fn is_notice(&self) -> bool {
        matches!(self, AppError::EmptyStock | AppError::NoReconciliation)
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::EmptyName => AppError::EmptyItemName,
            StockError::NonPositiveQuantity(quantity) => AppError::InvalidQuantity(quantity),
            StockError::TotalOverflow(name) => AppError::QuantityOverflow(name),
        }
    }
}
