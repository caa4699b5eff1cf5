// Dashboard domain model
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use super::measurement::DateBounds;
use super::query::Frequency;
use super::summary::SummaryTable;
use super::telemetry::{ChartData, ChartKind};

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub charts: Vec<ChartData>,
    pub summaries: Vec<SummaryTable>,
}

impl Dashboard {
    pub fn new(charts: Vec<ChartData>, summaries: Vec<SummaryTable>) -> Self {
        Self { charts, summaries }
    }
}

/// Everything a client needs to populate its selectors.
#[derive(Debug, Clone, Serialize)]
pub struct Controls {
    pub cells: Vec<String>,
    pub metrics: Vec<String>,
    pub kpi_categories: Vec<String>,
    pub date_bounds: Option<DateBounds>,
    pub frequencies: Vec<ChoiceItem<Frequency>>,
    pub chart_kinds: Vec<ChoiceItem<ChartKind>>,
    /// Day offset from the range start to a `YYYY-MM-DD` label.
    pub date_marks: BTreeMap<i64, String>,
    pub defaults: Option<DefaultSelection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceItem<T> {
    pub label: &'static str,
    pub value: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultSelection {
    pub cell: String,
    pub metric: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub frequency: Frequency,
    pub chart: ChartKind,
}
