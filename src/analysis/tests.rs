use super::{Dataset, HourTally, StatisticsError};
use crate::parser::parse_line;

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

fn create_dataset(lines: &[&str]) -> Result<Dataset> {
    let transactions = lines.iter()
        .map(|line| parse_line(line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new("day.txt", transactions))
}

fn decimal(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

#[test]
fn test_empty_dataset_yields_zero_and_empty_statistics() -> Result<()> {
    let dataset = Dataset::new("empty.txt", Vec::new());

    assert!(dataset.transactions().is_empty());
    assert_eq!(dataset.total_sales_volume()?, Decimal::ZERO);
    assert_eq!(dataset.max_sale_value(), Decimal::ZERO);
    assert!(dataset.product_quantities()?.is_empty());
    assert!(dataset.hour_stats()?.is_empty());
    assert!(dataset.staff_sales()?.is_empty());

    Ok(())
}

#[test]
fn test_total_sales_volume_sums_every_amount() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:1},20.10",
        "2,2024-03-01T10:00:00,{B:1},30.45",
        "3,2024-03-01T11:00:00,{C:1},49.45"
    ])?;

    assert_eq!(dataset.total_sales_volume()?, decimal("100.00")?);

    Ok(())
}

#[test]
fn test_total_sales_volume_is_order_independent() -> Result<()> {
    let forward = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:1},0.1",
        "2,2024-03-01T10:00:00,{B:1},0.2",
        "3,2024-03-01T11:00:00,{C:1},1234567.891"
    ])?;
    let backward = create_dataset(&[
        "3,2024-03-01T11:00:00,{C:1},1234567.891",
        "2,2024-03-01T10:00:00,{B:1},0.2",
        "1,2024-03-01T09:00:00,{A:1},0.1"
    ])?;

    assert_eq!(forward.total_sales_volume()?, backward.total_sales_volume()?);
    assert_eq!(forward.total_sales_volume()?, decimal("1234568.191")?);

    Ok(())
}

#[test]
fn test_max_sale_value_is_one_of_the_amounts_and_bounds_all() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:1},20.10",
        "2,2024-03-01T10:00:00,{B:1},75.5",
        "3,2024-03-01T11:00:00,{C:1},75.50",
        "4,2024-03-01T12:00:00,{C:1},3"
    ])?;

    let max = dataset.max_sale_value();

    assert_eq!(max, decimal("75.50")?);
    assert!(dataset.transactions().iter().all(|transaction| transaction.sale_amount <= max));
    assert!(dataset.transactions().iter().any(|transaction| transaction.sale_amount == max));

    Ok(())
}

#[test]
fn test_product_quantities_accumulate_within_and_across_transactions() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:1|B:2|A:4},10.00",
        "2,2024-03-01T10:00:00,{B:3},10.00",
        "3,2024-03-01T11:00:00,{},10.00"
    ])?;

    let quantities = dataset.product_quantities()?;

    assert_eq!(quantities.len(), 2);
    assert_eq!(quantities.get("A"), Some(&5));
    assert_eq!(quantities.get("B"), Some(&5));

    Ok(())
}

#[test]
fn test_product_quantities_are_additive_across_datasets() -> Result<()> {
    let day_1 = ["1,2024-03-01T09:00:00,{A:1|B:2},10.00", "2,2024-03-01T10:00:00,{C:7},1.00"];
    let day_2 = ["1,2024-03-02T09:00:00,{A:4},10.00", "2,2024-03-02T10:00:00,{B:1|D:2},1.00"];

    let mut merged: HashMap<String, i64> = HashMap::new();

    for quantities in [create_dataset(&day_1)?.product_quantities()?, create_dataset(&day_2)?.product_quantities()?] {
        for (product, quantity) in quantities {
            *merged.entry(product).or_insert(0) += quantity;
        }
    }

    let concatenated: Vec<&str> = day_1.iter().chain(day_2.iter()).copied().collect();

    assert_eq!(merged, create_dataset(&concatenated)?.product_quantities()?);

    Ok(())
}

#[test]
fn test_hour_stats_track_sum_and_count_per_hour() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:05:00,{A:1},10.00",
        "2,2024-03-01T09:55:00,{A:1},5.50",
        "3,2024-03-01T23:59:59,{A:1},1.25",
        "4,2024-03-01T00:00:00,{A:1},2"
    ])?;

    let stats = dataset.hour_stats()?;

    assert_eq!(stats.len(), 3);
    assert_eq!(stats.get(&9), Some(&HourTally { sum: decimal("15.50")?, count: 2 }));
    assert_eq!(stats.get(&23), Some(&HourTally { sum: decimal("1.25")?, count: 1 }));
    assert_eq!(stats.get(&0), Some(&HourTally { sum: decimal("2")?, count: 1 }));

    Ok(())
}

#[test]
fn test_hour_average_rounds_half_up_to_two_places() -> Result<()> {
    let single = HourTally { sum: decimal("10.125")?, count: 1 };
    let pair = HourTally { sum: decimal("20.25")?, count: 2 };
    let below_midpoint = HourTally { sum: decimal("10.124")?, count: 1 };
    let thirds = HourTally { sum: decimal("10")?, count: 3 };

    assert_eq!(single.average(), Some(decimal("10.13")?));
    assert_eq!(pair.average(), Some(decimal("10.13")?));
    assert_eq!(below_midpoint.average(), Some(decimal("10.12")?));
    assert_eq!(thirds.average(), Some(decimal("3.33")?));
    assert_eq!(HourTally::default().average(), None);

    Ok(())
}

#[test]
fn test_hour_tallies_merge_sums_and_counts() -> Result<()> {
    let mut tally = HourTally { sum: decimal("10.00")?, count: 1 };

    assert!(tally.checked_merge(HourTally { sum: decimal("20.50")?, count: 3 }).is_some());

    assert_eq!(tally, HourTally { sum: decimal("30.50")?, count: 4 });
    assert_eq!(tally.average(), Some(decimal("7.63")?));

    Ok(())
}

#[test]
fn test_hour_tally_merge_overflow_leaves_tally_unchanged() -> Result<()> {
    let mut tally = HourTally { sum: Decimal::MAX, count: 1 };

    assert!(tally.checked_merge(HourTally { sum: decimal("1")?, count: 1 }).is_none());
    assert_eq!(tally, HourTally { sum: Decimal::MAX, count: 1 });

    Ok(())
}

#[test]
fn test_staff_sales_sum_per_month_and_transaction_id() -> Result<()> {
    let dataset = create_dataset(&[
        "7,2024-02-29T09:00:00,{A:1},10.00",
        "7,2024-02-29T10:00:00,{A:1},2.50",
        "8,2024-03-01T00:00:00,{A:1},4.00"
    ])?;

    let sales = dataset.staff_sales()?;
    let february = sales.iter()
        .find(|(month, _)| month.to_string() == "2024-02")
        .map(|(_, staff)| staff.clone())
        .unwrap_or_default();

    assert_eq!(sales.len(), 2);
    assert_eq!(february.get(&7), Some(&decimal("12.50")?));

    Ok(())
}

#[test]
fn test_sales_volume_overflow_is_reported_not_panicked() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:1},50000000000000000000000000000",
        "2,2024-03-01T10:00:00,{A:1},50000000000000000000000000000"
    ])?;

    assert!(matches!(dataset.total_sales_volume(), Err(StatisticsError::SalesVolumeOverflow)));
    assert!(matches!(dataset.summarize(), Err(StatisticsError::SalesVolumeOverflow)));
    assert_eq!(dataset.max_sale_value(), decimal("50000000000000000000000000000")?);

    Ok(())
}

#[test]
fn test_hour_and_staff_overflow_are_reported() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:1},50000000000000000000000000000",
        "1,2024-03-01T09:30:00,{A:1},50000000000000000000000000000"
    ])?;

    assert!(matches!(dataset.hour_stats(), Err(StatisticsError::HourOverflow { hour: 9 })));
    assert!(matches!(dataset.staff_sales(), Err(StatisticsError::StaffSalesOverflow { staff_id: 1, .. })));

    Ok(())
}

#[test]
fn test_quantity_overflow_is_reported() -> Result<()> {
    let dataset = create_dataset(&["1,2024-03-01T09:00:00,{A:9223372036854775807|A:1},1.00"])?;

    assert!(matches!(dataset.product_quantities(), Err(StatisticsError::QuantityOverflow { .. })));
    assert!(dataset.summarize().is_err());

    Ok(())
}

#[test]
fn test_summary_collects_every_statistic() -> Result<()> {
    let dataset = create_dataset(&[
        "1,2024-03-01T09:00:00,{A:2},10.00",
        "2,2024-03-01T09:30:00,{B:1},30.00"
    ])?;

    let summary = dataset.summarize()?;

    assert_eq!(summary.total_sales_volume, decimal("40.00")?);
    assert_eq!(summary.max_sale_value, decimal("30.00")?);
    assert_eq!(summary.product_quantities, dataset.product_quantities()?);
    assert_eq!(summary.hour_stats, dataset.hour_stats()?);
    assert_eq!(summary.staff_sales, dataset.staff_sales()?);

    Ok(())
}
