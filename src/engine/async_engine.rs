use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tokio::task::spawn_blocking;
use tracing::error;

use crate::engine::errors::AnalyticsError;
use crate::engine::folder::{self, NO_PEAK_HOUR};
use crate::engine::report::{self, FolderReport};
use crate::types::{ProductId, StaffId, YearMonth};

/// Async front for analysing one folder of daily transaction files.
///
/// The folder walk and file parsing are blocking, so every call runs on the blocking
/// pool with its own listing and accumulators. Engines for different folders can be
/// awaited concurrently.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    folder: PathBuf
}

impl AnalyticsEngine {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into()
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Composite report. The only operation that reports a missing or empty folder as an error.
    pub async fn analyze(&self) -> Result<FolderReport, AnalyticsError> {
        let folder = self.folder.clone();
        spawn_blocking(move || report::analyze_folder(&folder)).await?
    }

    pub async fn peak_daily_volume(&self) -> Decimal {
        self.run_metric(folder::peak_daily_volume, Decimal::ZERO).await
    }

    pub async fn peak_daily_value(&self) -> Decimal {
        self.run_metric(folder::peak_daily_value, Decimal::ZERO).await
    }

    pub async fn top_product_by_volume(&self) -> Option<ProductId> {
        self.run_metric(folder::top_product_by_volume, None).await
    }

    pub async fn top_staff_by_month(&self) -> BTreeMap<YearMonth, StaffId> {
        self.run_metric(folder::top_staff_by_month, BTreeMap::new()).await
    }

    pub async fn peak_hour_by_average_volume(&self) -> i32 {
        self.run_metric(folder::peak_hour_by_average_volume, NO_PEAK_HOUR).await
    }

    async fn run_metric<T, F>(&self, metric: F, sentinel: T) -> T
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> T + Send + 'static,
    {
        let folder = self.folder.clone();

        match spawn_blocking(move || metric(&folder)).await {
            Ok(value) => value,
            Err(error) => {
                error!("Metric task for folder {} did not complete: {error}", self.folder.display());
                sentinel
            }
        }
    }
}
