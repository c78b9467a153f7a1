// Application layer - the inventory ledger and its collaborators.
// The CLI drives this layer; it never touches the domain maps directly.

pub mod counting;
pub mod error;
pub mod ledger;

pub use counting::*;
pub use error::*;
pub use ledger::*;
