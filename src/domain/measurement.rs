// Measurement domain model
use chrono::NaiveDateTime;
use serde::Serialize;

/// A single KPI sample as read from the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub timestamp: NaiveDateTime,
    pub cell_id: String,
    pub pi: String,
    pub kpi_category: Option<String>,
    pub value: f64,
}

impl Measurement {
    pub fn new(timestamp: NaiveDateTime, cell_id: String, pi: String, value: f64) -> Self {
        Self {
            timestamp,
            cell_id,
            pi,
            kpi_category: None,
            value,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.kpi_category = category;
        self
    }
}

/// Earliest and latest timestamp observed in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DateBounds {
    pub fn from_timestamps<I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        timestamps.into_iter().fold(None, |bounds, ts| match bounds {
            None => Some(Self { min: ts, max: ts }),
            Some(b) => Some(Self {
                min: b.min.min(ts),
                max: b.max.max(ts),
            }),
        })
    }
}
