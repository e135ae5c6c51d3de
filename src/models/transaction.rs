use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::types::{Hour, ProductId, Quantity, TransactionId, YearMonth};

/// One entry of a transaction's item list: `productId:quantity`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: Quantity
}

/// Represents a single line of a daily transaction log.
///
/// Values are never mutated after parsing; a dataset is a plain `Vec<Transaction>`
/// that is dropped once its statistics have been folded.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Identifier unique within one file. Also used as the staff key for monthly rankings.
    pub transaction_id: TransactionId,
    /// Local date and time of the sale, without timezone.
    pub timestamp: NaiveDateTime,
    /// Decoded `{productId:quantity|...}` entries, in file order.
    pub items: Vec<LineItem>,
    /// Exact sale amount. Non-negative by convention but not enforced.
    pub sale_amount: Decimal
}

impl Transaction {
    pub fn hour(&self) -> Hour {
        self.timestamp.hour()
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from(&self.timestamp)
    }
}
