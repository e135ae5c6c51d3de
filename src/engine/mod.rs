mod async_engine;
mod errors;
mod folder;
mod metrics;
mod report;

pub use async_engine::AnalyticsEngine;
pub use errors::AnalyticsError;
pub use report::FolderReport;
