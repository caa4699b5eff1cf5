// Query-string selection parameters, normalized before they reach the services
use serde::Deserialize;

use crate::domain::query::{DashboardQuery, Frequency, Selection, SelectionError};
use crate::domain::telemetry::ChartKind;
use crate::domain::time::{parse_range_edge, RangeEdge};

/// Raw selector values. Every field may be absent; `cell` and `metrics`
/// take a single value or a comma-separated list.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    #[serde(alias = "cells")]
    pub cell: Option<String>,
    #[serde(alias = "metric", alias = "pis")]
    pub metrics: Option<String>,
    #[serde(alias = "start_date")]
    pub start: Option<String>,
    #[serde(alias = "end_date")]
    pub end: Option<String>,
    #[serde(alias = "frequency")]
    pub freq: Option<String>,
    #[serde(alias = "tab")]
    pub chart: Option<String>,
}

impl SelectionParams {
    /// Chart kind, `Line` when unset
    pub fn chart_kind(&self) -> Result<ChartKind, SelectionError> {
        match non_blank(&self.chart) {
            Some(raw) => raw.parse(),
            None => Ok(ChartKind::Line),
        }
    }

    /// Resampling frequency, `Daily` when unset
    pub fn frequency(&self) -> Result<Frequency, SelectionError> {
        match non_blank(&self.freq) {
            Some(raw) => raw.parse(),
            None => Ok(Frequency::Daily),
        }
    }

    /// `Ok(None)` is the "no data" state; `Err` means a value was present but
    /// unreadable.
    pub fn to_query(&self) -> Result<Option<DashboardQuery>, SelectionError> {
        let start = parse_edge(&self.start, RangeEdge::Start, "start")?;
        let end = parse_edge(&self.end, RangeEdge::End, "end")?;

        Ok(DashboardQuery::from_selection(
            self.cell.as_deref().map(Selection::parse).unwrap_or_default(),
            self.metrics.as_deref().map(Selection::parse).unwrap_or_default(),
            start,
            end,
            self.frequency()?,
            self.chart_kind()?,
        ))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_edge(
    value: &Option<String>,
    edge: RangeEdge,
    field: &'static str,
) -> Result<Option<chrono::NaiveDateTime>, SelectionError> {
    non_blank(value)
        .map(|raw| {
            parse_range_edge(raw, edge).ok_or_else(|| SelectionError::Date {
                field,
                value: raw.to_string(),
            })
        })
        .transpose()
}
