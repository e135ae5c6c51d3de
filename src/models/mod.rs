mod errors;
mod items;
mod transaction;

pub use errors::LineError;
pub use items::parse_items;
pub use transaction::{LineItem, Transaction};
