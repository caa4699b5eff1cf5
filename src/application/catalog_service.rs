// Catalog service - Use case for listing selectable cells, metrics and ranges
use crate::application::statistics::describe_dataset;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::dashboard::{ChoiceItem, Controls, DefaultSelection};
use crate::domain::query::Frequency;
use crate::domain::summary::DescriptiveStats;
use crate::domain::telemetry::ChartKind;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn TelemetryRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self { repository }
    }

    pub fn controls(&self) -> Controls {
        let repo = self.repository.as_ref();
        let bounds = repo.date_bounds();

        let defaults = match (repo.cell_ids().first(), repo.metric_ids().first(), bounds) {
            (Some(cell), Some(metric), Some(b)) => Some(DefaultSelection {
                cell: cell.clone(),
                metric: metric.clone(),
                start: b.min,
                end: b.max,
                frequency: Frequency::Daily,
                chart: ChartKind::Line,
            }),
            _ => None,
        };

        Controls {
            cells: repo.cell_ids().to_vec(),
            metrics: repo.metric_ids().to_vec(),
            kpi_categories: repo.kpi_categories().to_vec(),
            date_bounds: bounds,
            frequencies: Frequency::ALL
                .iter()
                .map(|f| ChoiceItem { label: f.label(), value: *f })
                .collect(),
            chart_kinds: ChartKind::ALL
                .iter()
                .map(|k| ChoiceItem { label: k.label(), value: *k })
                .collect(),
            date_marks: bounds.map(|b| date_marks(b.min, b.max)).unwrap_or_default(),
            defaults,
        }
    }

    /// Statistics over every value in the dataset
    pub fn dataset_summary(&self) -> Option<DescriptiveStats> {
        describe_dataset(self.repository.as_ref())
    }
}

/// Range-slider marks: each month start inside `[start, end]` keyed by its
/// day offset from `start`, plus the end date itself.
pub fn date_marks(start: NaiveDateTime, end: NaiveDateTime) -> BTreeMap<i64, String> {
    let mut marks = BTreeMap::new();
    if start > end {
        return marks;
    }

    let mut month = first_of_month(start.date());
    if month.and_time(NaiveTime::MIN) < start {
        month = next_month(month);
    }

    while month.and_time(NaiveTime::MIN) <= end {
        let offset = (month.and_time(NaiveTime::MIN) - start).num_days();
        marks.insert(offset, month.format("%Y-%m-%d").to_string());
        month = next_month(month);
    }

    marks.insert((end - start).num_days(), end.date().format("%Y-%m-%d").to_string());
    marks
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::Measurement;
    use crate::infrastructure::csv_repository::CsvRepository;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_date_marks() {
        let marks = date_marks(ts("2023-01-15 06:00:00"), ts("2023-03-10 00:00:00"));
        let expected: BTreeMap<i64, String> = [
            (16, "2023-02-01".to_string()),
            (44, "2023-03-01".to_string()),
            (53, "2023-03-10".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(marks, expected);
    }

    #[test]
    fn test_date_marks_include_start_on_month_boundary() {
        let marks = date_marks(ts("2023-12-01 00:00:00"), ts("2024-01-05 00:00:00"));
        assert_eq!(marks.get(&0).map(String::as_str), Some("2023-12-01"));
        assert_eq!(marks.get(&31).map(String::as_str), Some("2024-01-01"));
        assert_eq!(marks.get(&35).map(String::as_str), Some("2024-01-05"));
    }

    #[test]
    fn test_controls_lists_catalog() {
        let rows = vec![
            Measurement::new(ts("2023-01-01 00:00:00"), "Cell_A".to_string(), "RSRP".to_string(), 1.0),
            Measurement::new(ts("2023-01-02 00:00:00"), "Cell_B".to_string(), "SINR".to_string(), 2.0),
        ];
        let service = CatalogService::new(Arc::new(CsvRepository::from_measurements(rows)));
        let controls = service.controls();

        assert_eq!(controls.cells, vec!["Cell_A", "Cell_B"]);
        assert_eq!(controls.metrics, vec!["RSRP", "SINR"]);
        assert_eq!(controls.frequencies.len(), 3);
        assert_eq!(controls.chart_kinds.len(), 6);

        let defaults = controls.defaults.unwrap();
        assert_eq!(defaults.cell, "Cell_A");
        assert_eq!(defaults.metric, "RSRP");
        assert_eq!(defaults.frequency, Frequency::Daily);
        assert_eq!(defaults.end, ts("2023-01-02 00:00:00"));

        let overall = service.dataset_summary().unwrap();
        assert_eq!(overall.count, 2);
        assert_eq!(overall.mean, 1.5);
    }

    #[test]
    fn test_controls_on_empty_dataset() {
        let service = CatalogService::new(Arc::new(CsvRepository::from_measurements(Vec::new())));
        let controls = service.controls();
        assert!(controls.cells.is_empty());
        assert!(controls.date_bounds.is_none());
        assert!(controls.defaults.is_none());
        assert!(controls.date_marks.is_empty());
        assert!(service.dataset_summary().is_none());
    }
}
