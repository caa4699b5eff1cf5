// Query domain model - What the operator selected, normalized
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::str::FromStr;

use super::telemetry::ChartKind;

/// A selection token that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown resampling frequency: {0}")]
    Frequency(String),

    #[error("unknown chart kind: {0}")]
    ChartKind(String),

    #[error("invalid {field} date: {value}")]
    Date { field: &'static str, value: String },
}

/// Resampling granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Hourly, Frequency::Daily, Frequency::Weekly];

    /// Start label of the bucket a timestamp falls into.
    ///
    /// Weeks run Monday to Sunday and are labelled by their closing Sunday.
    pub fn bucket(&self, ts: NaiveDateTime) -> NaiveDateTime {
        match self {
            Frequency::Hourly => ts.date().and_hms_opt(ts.hour(), 0, 0).unwrap_or(ts),
            Frequency::Daily => ts.date().and_time(NaiveTime::MIN),
            Frequency::Weekly => {
                let to_sunday = 6 - i64::from(ts.weekday().num_days_from_monday());
                ts.date()
                    .checked_add_signed(Duration::days(to_sunday))
                    .unwrap_or(ts.date())
                    .and_time(NaiveTime::MIN)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Hourly => "Hourly",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
        }
    }
}

impl FromStr for Frequency {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hour" | "hourly" => Ok(Frequency::Hourly),
            "d" | "day" | "daily" => Ok(Frequency::Daily),
            "w" | "week" | "weekly" => Ok(Frequency::Weekly),
            _ => Err(SelectionError::Frequency(s.to_string())),
        }
    }
}

/// Inclusive time window. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Ordered, de-duplicated list of identifiers.
///
/// Widgets hand over either a single value or a list; both end up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for item in items {
            let item = item.into().trim().to_string();
            if !item.is_empty() && !out.contains(&item) {
                out.push(item);
            }
        }
        Self(out)
    }

    /// Split a comma-separated widget value.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Input to the resampling function: one cell, many metrics.
#[derive(Debug, Clone)]
pub struct SeriesQuery {
    pub cell: String,
    pub metrics: Selection,
    pub range: DateRange,
    pub frequency: Frequency,
}

impl SeriesQuery {
    pub fn new(cell: String, metrics: Selection, range: DateRange, frequency: Frequency) -> Self {
        Self {
            cell,
            metrics,
            range,
            frequency,
        }
    }
}

/// A complete dashboard selection. Only built when every control has a value.
#[derive(Debug, Clone)]
pub struct DashboardQuery {
    pub cells: Selection,
    pub metrics: Selection,
    pub range: DateRange,
    pub frequency: Frequency,
    pub chart: ChartKind,
}

impl DashboardQuery {
    /// Returns `None` for the "no data" state: no cell, no metric or an
    /// unset date.
    pub fn from_selection(
        cells: Selection,
        metrics: Selection,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        frequency: Frequency,
        chart: ChartKind,
    ) -> Option<Self> {
        if cells.is_empty() || metrics.is_empty() {
            return None;
        }
        Some(Self {
            cells,
            metrics,
            range: DateRange::new(start?, end?),
            frequency,
            chart,
        })
    }

    pub fn series_query(&self, cell: &str) -> SeriesQuery {
        SeriesQuery::new(cell.to_string(), self.metrics.clone(), self.range, self.frequency)
    }
}
