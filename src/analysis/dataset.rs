use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::analysis::errors::StatisticsError;
use crate::models::Transaction;
use crate::types::{Hour, ProductId, Quantity, StaffId, YearMonth};

/// Fractional digits kept when averaging sale amounts per hour.
const AVERAGE_DECIMAL_PLACES: u32 = 2;

/// Running (sum, count) of sale amounts for one hour of the day.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct HourTally {
    pub sum: Decimal,
    pub count: u64
}

impl HourTally {
    /// Adds `other` to this tally. On overflow the tally is left unchanged and `None` is returned.
    pub fn checked_merge(&mut self, other: HourTally) -> Option<()> {
        let sum = self.sum.checked_add(other.sum)?;
        let count = self.count.checked_add(other.count)?;

        self.sum = sum;
        self.count = count;

        Some(())
    }

    /// Mean sale amount rounded half-up to two places, `None` for an empty tally.
    pub fn average(&self) -> Option<Decimal> {
        if self.count == 0 {
            return None;
        }

        let average = self.sum.checked_div(Decimal::from(self.count))?;

        Some(average.round_dp_with_strategy(AVERAGE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
    }
}

/// Every per-file statistic the folder metrics need, computed in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySummary {
    pub total_sales_volume: Decimal,
    pub max_sale_value: Decimal,
    pub product_quantities: HashMap<ProductId, Quantity>,
    pub hour_stats: HashMap<Hour, HourTally>,
    pub staff_sales: HashMap<YearMonth, HashMap<StaffId, Decimal>>
}

/// The transactions of one daily file.
///
/// Every statistic is computed from the owned transactions on demand; nothing is
/// cached or shared, so a dataset can be dropped as soon as it has been summarized.
/// Sums use checked arithmetic and report overflow as a `StatisticsError`.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    transactions: Vec<Transaction>
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, transactions: Vec<Transaction>) -> Self {
        Self {
            source: source.into(),
            transactions
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of every sale amount, zero for an empty dataset.
    pub fn total_sales_volume(&self) -> Result<Decimal, StatisticsError> {
        self.transactions.iter().try_fold(Decimal::ZERO, |total, transaction| {
            total.checked_add(transaction.sale_amount).ok_or(StatisticsError::SalesVolumeOverflow)
        })
    }

    /// Largest single sale amount, zero for an empty dataset.
    pub fn max_sale_value(&self) -> Decimal {
        self.transactions.iter()
            .map(|transaction| transaction.sale_amount)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Total quantity per product across every item entry of every transaction.
    pub fn product_quantities(&self) -> Result<HashMap<ProductId, Quantity>, StatisticsError> {
        let mut quantities: HashMap<ProductId, Quantity> = HashMap::new();

        for item in self.transactions.iter().flat_map(|transaction| &transaction.items) {
            let total = quantities.entry(item.product_id.clone()).or_insert(0);

            *total = total.checked_add(item.quantity)
                .ok_or_else(|| StatisticsError::QuantityOverflow { product_id: item.product_id.clone() })?;
        }

        Ok(quantities)
    }

    /// Sale amount sum and transaction count per hour of the day (0-23).
    pub fn hour_stats(&self) -> Result<HashMap<Hour, HourTally>, StatisticsError> {
        let mut tallies: HashMap<Hour, HourTally> = HashMap::new();

        for transaction in &self.transactions {
            let hour = transaction.hour();

            tallies.entry(hour).or_default()
                .checked_merge(HourTally { sum: transaction.sale_amount, count: 1 })
                .ok_or(StatisticsError::HourOverflow { hour })?;
        }

        Ok(tallies)
    }

    /// Sale amounts summed per month and staff id (the transaction id).
    pub fn staff_sales(&self) -> Result<HashMap<YearMonth, HashMap<StaffId, Decimal>>, StatisticsError> {
        let mut sales: HashMap<YearMonth, HashMap<StaffId, Decimal>> = HashMap::new();

        for transaction in &self.transactions {
            let month = transaction.month();
            let total = sales.entry(month).or_default()
                .entry(transaction.transaction_id)
                .or_insert(Decimal::ZERO);

            *total = total.checked_add(transaction.sale_amount)
                .ok_or_else(|| StatisticsError::StaffSalesOverflow {
                    staff_id: transaction.transaction_id,
                    month
                })?;
        }

        Ok(sales)
    }

    /// All statistics of this file, or the first overflow that invalidates it.
    pub fn summarize(&self) -> Result<DaySummary, StatisticsError> {
        Ok(DaySummary {
            total_sales_volume: self.total_sales_volume()?,
            max_sale_value: self.max_sale_value(),
            product_quantities: self.product_quantities()?,
            hour_stats: self.hour_stats()?,
            staff_sales: self.staff_sales()?
        })
    }
}
