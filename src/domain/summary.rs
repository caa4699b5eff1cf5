// Summary statistics domain model
use serde::Serialize;

/// Descriptive statistics over a value sequence, rounded to 2 decimals.
///
/// `std` is absent for a single value, matching a sample standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

/// Statistics for one (metric, cell) pair. `stats` is `None` when the
/// resampled series had no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub title: String,
    pub metric: String,
    pub cell: String,
    pub stats: Option<DescriptiveStats>,
}

impl SummaryTable {
    pub fn new(metric: String, cell: String, stats: Option<DescriptiveStats>) -> Self {
        let title = format!("Statistical Summary for {} in {}", metric, cell);
        Self {
            title,
            metric,
            cell,
            stats,
        }
    }
}
