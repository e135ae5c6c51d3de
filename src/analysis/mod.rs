mod dataset;
mod errors;
#[cfg(test)]
mod tests;

pub use dataset::{Dataset, DaySummary, HourTally};
pub use errors::StatisticsError;
