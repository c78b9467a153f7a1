mod quantity;
mod reconciliation;
mod stock;

pub use quantity::*;
pub use reconciliation::*;
pub use stock::*;
