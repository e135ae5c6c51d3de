use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::analysis::DaySummary;
use crate::engine::errors::AnalyticsError;
use crate::engine::folder::{fold_files, hour_or_sentinel, list_regular_files};
use crate::engine::metrics::{MetricFold, PeakDailyValue, PeakDailyVolume, PeakHour, TopProduct, TopStaffByMonth};
use crate::types::{ProductId, StaffId, YearMonth};

/// All five folder-wide statistics of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderReport {
    pub peak_daily_volume: Decimal,
    pub peak_daily_value: Decimal,
    pub top_product: Option<ProductId>,
    pub top_staff_by_month: BTreeMap<YearMonth, StaffId>,
    /// Hour of day, or `-1` when no hour has any transaction.
    pub peak_hour: i32
}

/// Runs every metric side by side so each file is parsed once per report.
#[derive(Debug, Default)]
struct ReportFold {
    volume: PeakDailyVolume,
    value: PeakDailyValue,
    product: TopProduct,
    staff: TopStaffByMonth,
    hour: PeakHour
}

impl MetricFold for ReportFold {
    type Output = FolderReport;

    fn absorb(&mut self, summary: &DaySummary) {
        self.volume.absorb(summary);
        self.value.absorb(summary);
        self.product.absorb(summary);
        self.staff.absorb(summary);
        self.hour.absorb(summary);
    }

    fn absorb_failure(&mut self) {
        self.volume.absorb_failure();
        self.value.absorb_failure();
        self.product.absorb_failure();
        self.staff.absorb_failure();
        self.hour.absorb_failure();
    }

    fn finish(self) -> FolderReport {
        FolderReport {
            peak_daily_volume: self.volume.finish(),
            peak_daily_value: self.value.finish(),
            top_product: self.product.finish(),
            top_staff_by_month: self.staff.finish(),
            peak_hour: hour_or_sentinel(self.hour.finish())
        }
    }
}

/// Builds the composite report for a folder of daily files.
///
/// The folder is listed exactly once and every metric runs against that listing.
/// Files that fail to load are logged and skipped as zero contributions.
///
/// # Errors
/// Returns `AnalyticsError::NotFound` if the folder is missing or holds no regular
/// files, and `AnalyticsError::Io` if it cannot be listed.
pub fn analyze_folder(folder: &Path) -> Result<FolderReport, AnalyticsError> {
    let files = list_regular_files(folder)?;

    info!("Analyzing {} files in folder: {}", files.len(), folder.display());

    Ok(fold_files::<ReportFold>(&files))
}
