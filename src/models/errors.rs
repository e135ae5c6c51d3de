use std::num::ParseIntError;

use thiserror::Error;

/// Reasons a single log line cannot be turned into a `Transaction`.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("Expected {expected} fields but found {found}")]
    FieldCount {
        expected: usize,
        found: usize
    },
    #[error("Invalid transaction id [{value}]: {source}")]
    InvalidTransactionId {
        value: String,
        source: ParseIntError
    },
    #[error("Invalid timestamp [{value}]: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError
    },
    #[error("Invalid sale amount [{value}]: {source}")]
    InvalidSaleAmount {
        value: String,
        source: rust_decimal::Error
    },
    #[error("Item list [{value}] is not enclosed in braces")]
    MissingItemBraces {
        value: String
    },
    #[error("Item entry [{entry}] is not of the form productId:quantity")]
    InvalidItemEntry {
        entry: String
    },
    #[error("Item entry [{entry}] has an invalid quantity: {source}")]
    InvalidQuantity {
        entry: String,
        source: ParseIntError
    },
    #[error("Line could not be read: {reason}")]
    Unreadable {
        reason: String
    }
}
