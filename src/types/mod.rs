mod year_month;

pub use year_month::YearMonth;

pub type TransactionId = i64;
/// Key of the monthly top-seller ranking. Filled from the transaction id, the log has no staff column.
pub type StaffId = TransactionId;
pub type ProductId = String;
pub type Quantity = i64;
pub type Hour = u32;
