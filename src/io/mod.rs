pub mod export;
pub mod import;
pub mod table;

pub use export::write_balance_xlsx;
pub use import::{ImportError, ImportResult, StockRow, StockRows};
pub use table::Table;
