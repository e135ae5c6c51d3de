use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use crate::analysis::{Dataset, DaySummary};
use crate::engine::errors::AnalyticsError;
use crate::engine::metrics::{MetricFold, PeakDailyValue, PeakDailyVolume, PeakHour, TopProduct, TopStaffByMonth};
use crate::parser::{parse_file, DatasetError};
use crate::types::{Hour, ProductId, StaffId, YearMonth};

/// Hour reported when no transaction exists in any hour.
pub const NO_PEAK_HOUR: i32 = -1;

/// Lists the regular files directly inside `folder`, sorted by path.
///
/// Subdirectories are ignored; symbolic links count when they point at a regular file.
///
/// # Errors
/// Returns `AnalyticsError::NotFound` if the folder is missing, is not a directory or
/// holds no regular files, and `AnalyticsError::Io` if it cannot be listed.
pub fn list_regular_files(folder: &Path) -> Result<Vec<PathBuf>, AnalyticsError> {
    let entries = fs::read_dir(folder).map_err(|source| match source.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => AnalyticsError::NotFound { path: folder.to_path_buf() },
        _ => AnalyticsError::Io { path: folder.to_path_buf(), source }
    })?;

    let mut files = Vec::new();

    for entry in entries {
        let path = entry.map_err(|source| AnalyticsError::Io { path: folder.to_path_buf(), source })?.path();

        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        warn!("No files found in the folder: {}", folder.display());
        return Err(AnalyticsError::NotFound { path: folder.to_path_buf() });
    }

    files.sort();

    Ok(files)
}

/// Folds every file of an already captured listing into `M`.
///
/// Each file is parsed into its own dataset and summarized; the dataset is dropped
/// before the next file is read. Files that fail to load or summarize are logged and
/// count as a failure contribution.
pub fn fold_files<M: MetricFold>(files: &[PathBuf]) -> M::Output {
    let mut metric = M::default();

    for path in files {
        match load_summary(path) {
            Ok(summary) => metric.absorb(&summary),
            Err(error) => {
                error!("Error processing file: {error}");
                metric.absorb_failure();
            }
        }
    }

    metric.finish()
}

/// Highest total sales volume of any single day, zero if the folder is missing or empty.
pub fn peak_daily_volume(folder: &Path) -> Decimal {
    fold_folder::<PeakDailyVolume>(folder)
}

/// Highest single sale of any day, zero if the folder is missing or empty.
pub fn peak_daily_value(folder: &Path) -> Decimal {
    fold_folder::<PeakDailyValue>(folder)
}

/// Product with the largest total quantity, `None` if the folder is missing or empty.
pub fn top_product_by_volume(folder: &Path) -> Option<ProductId> {
    fold_folder::<TopProduct>(folder)
}

/// Top-grossing staff id per month, empty if the folder is missing or empty.
pub fn top_staff_by_month(folder: &Path) -> BTreeMap<YearMonth, StaffId> {
    fold_folder::<TopStaffByMonth>(folder)
}

/// Hour with the highest average sale, `NO_PEAK_HOUR` if there is nothing to rank.
pub fn peak_hour_by_average_volume(folder: &Path) -> i32 {
    hour_or_sentinel(fold_folder::<PeakHour>(folder))
}

pub(crate) fn hour_or_sentinel(hour: Option<Hour>) -> i32 {
    hour.and_then(|hour| i32::try_from(hour).ok()).unwrap_or(NO_PEAK_HOUR)
}

fn fold_folder<M: MetricFold>(folder: &Path) -> M::Output {
    match list_regular_files(folder) {
        Ok(files) => fold_files::<M>(&files),
        Err(error) => {
            warn!("{error}");
            M::default().finish()
        }
    }
}

fn load_summary(path: &Path) -> Result<DaySummary, DatasetError> {
    let dataset = Dataset::new(path, parse_file(path)?);

    let summary = dataset.summarize().map_err(|source| DatasetError::Statistics {
        path: path.to_path_buf(),
        source
    })?;

    debug!(
        "File {} | volume: {} | max sale: {} | transactions: {}",
        dataset.source().display(),
        summary.total_sales_volume,
        summary.max_sale_value,
        dataset.transactions().len()
    );

    Ok(summary)
}
