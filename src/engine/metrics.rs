use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::analysis::{DaySummary, HourTally};
use crate::types::{Hour, ProductId, Quantity, StaffId, YearMonth};

/// A folder-wide statistic built by folding one daily summary at a time.
///
/// A freshly defaulted accumulator that never absorbed anything finishes to the
/// metric's "no data" value, which is what callers get for a missing or empty folder.
pub trait MetricFold: Default {
    type Output;

    fn absorb(&mut self, summary: &DaySummary);

    /// Called for a file that could not be loaded. Most metrics simply skip it.
    fn absorb_failure(&mut self) {}

    fn finish(self) -> Self::Output;
}

/// Highest total sales volume of any single day.
#[derive(Debug, Default)]
pub struct PeakDailyVolume {
    peak: Option<Decimal>
}

impl MetricFold for PeakDailyVolume {
    type Output = Decimal;

    fn absorb(&mut self, summary: &DaySummary) {
        raise_peak(&mut self.peak, summary.total_sales_volume);
    }

    fn absorb_failure(&mut self) {
        raise_peak(&mut self.peak, Decimal::ZERO);
    }

    fn finish(self) -> Decimal {
        let peak = self.peak.unwrap_or(Decimal::ZERO);
        info!("Highest sales volume in a day: {peak}");
        peak
    }
}

/// Highest single sale amount of any day.
#[derive(Debug, Default)]
pub struct PeakDailyValue {
    peak: Option<Decimal>
}

impl MetricFold for PeakDailyValue {
    type Output = Decimal;

    fn absorb(&mut self, summary: &DaySummary) {
        raise_peak(&mut self.peak, summary.max_sale_value);
    }

    fn absorb_failure(&mut self) {
        raise_peak(&mut self.peak, Decimal::ZERO);
    }

    fn finish(self) -> Decimal {
        let peak = self.peak.unwrap_or(Decimal::ZERO);
        info!("Highest sales value across all days: {peak}");
        peak
    }
}

/// Product with the largest quantity sold across all days.
///
/// A total that would overflow keeps its previous value and logs a warning.
/// Ties resolve to whichever tied product the map yields first; that order is unspecified.
#[derive(Debug, Default)]
pub struct TopProduct {
    quantities: HashMap<ProductId, Quantity>
}

impl MetricFold for TopProduct {
    type Output = Option<ProductId>;

    fn absorb(&mut self, summary: &DaySummary) {
        for (product_id, quantity) in &summary.product_quantities {
            let total = self.quantities.entry(product_id.clone()).or_insert(0);

            match total.checked_add(*quantity) {
                Some(sum) => *total = sum,
                None => warn!("Quantity of product [{product_id}] overflowed, keeping {total}")
            }
        }
    }

    fn finish(self) -> Option<ProductId> {
        let (product_id, quantity) = first_max(self.quantities)?;
        info!("Most sold product ID: {product_id}, Total quantity sold: {quantity}");
        Some(product_id)
    }
}

/// Top-grossing staff id for every calendar month present in the data.
///
/// The log format carries no staff field, so transactions are keyed by their own
/// transaction id. Ids are only unique per file, which means this ranks ids that
/// recur across days rather than people; treat the result accordingly.
#[derive(Debug, Default)]
pub struct TopStaffByMonth {
    sales: HashMap<YearMonth, HashMap<StaffId, Decimal>>
}

impl MetricFold for TopStaffByMonth {
    type Output = BTreeMap<YearMonth, StaffId>;

    fn absorb(&mut self, summary: &DaySummary) {
        for (month, staff_sales) in &summary.staff_sales {
            let month_sales = self.sales.entry(*month).or_default();

            for (staff_id, amount) in staff_sales {
                let total = month_sales.entry(*staff_id).or_insert(Decimal::ZERO);

                match total.checked_add(*amount) {
                    Some(sum) => *total = sum,
                    None => warn!("Sales for staff [{staff_id}] in [{month}] overflowed, keeping {total}")
                }
            }
        }
    }

    fn finish(self) -> BTreeMap<YearMonth, StaffId> {
        let mut leaders = BTreeMap::new();

        for (month, staff_sales) in self.sales {
            if let Some((staff_id, total)) = first_max(staff_sales) {
                info!("Highest sales staff for {month}: {staff_id}, Total sales: {total}");
                leaders.insert(month, staff_id);
            }
        }

        leaders
    }
}

/// Hour of the day (0-23) with the highest average sale amount across all days.
#[derive(Debug, Default)]
pub struct PeakHour {
    tallies: HashMap<Hour, HourTally>
}

impl MetricFold for PeakHour {
    type Output = Option<Hour>;

    fn absorb(&mut self, summary: &DaySummary) {
        for (hour, tally) in &summary.hour_stats {
            if self.tallies.entry(*hour).or_default().checked_merge(*tally).is_none() {
                warn!("Sales for hour [{hour}] overflowed, skipping this day's contribution");
            }
        }
    }

    fn finish(self) -> Option<Hour> {
        let averages = self.tallies.into_iter()
            .filter_map(|(hour, tally)| tally.average().map(|average| (hour, average)));

        let (hour, average) = first_max(averages)?;
        info!("Highest hour by average transaction volume: {hour}:00, Average volume: {average}");
        Some(hour)
    }
}

fn raise_peak(peak: &mut Option<Decimal>, candidate: Decimal) {
    *peak = Some(peak.map_or(candidate, |current| current.max(candidate)));
}

/// Entry with the greatest value; on ties the first one yielded wins.
fn first_max<K, V: Ord>(entries: impl IntoIterator<Item = (K, V)>) -> Option<(K, V)> {
    entries.into_iter().reduce(|best, candidate| {
        if candidate.1 > best.1 { candidate } else { best }
    })
}
