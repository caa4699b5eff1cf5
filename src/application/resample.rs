// Resampling - Filter the store and mean-aggregate into time buckets
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};

use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::measurement::Measurement;
use crate::domain::query::SeriesQuery;
use crate::domain::telemetry::{ResampledSeries, SeriesData, TimeSeriesPoint};

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    sum: f64,
    count: usize,
}

impl Bucket {
    fn push(&mut self, value: f64) {
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Rows matching the query's cell, metrics and inclusive date range.
pub fn select<'a>(
    repository: &'a dyn TelemetryRepository,
    query: &'a SeriesQuery,
) -> impl Iterator<Item = &'a Measurement> + 'a {
    let rows: &[Measurement] = if query.range.is_empty() {
        &[]
    } else {
        repository.measurements()
    };
    rows.iter().filter(move |m| {
        m.cell_id == query.cell && query.metrics.contains(&m.pi) && query.range.contains(m.timestamp)
    })
}

/// Resample the selected rows of each metric to `query.frequency`.
///
/// Every requested metric gets a series, in request order. Buckets without
/// a finite reading are left out rather than filled. Unknown cells or metrics and an
/// inverted range all produce empty series.
pub fn resample(repository: &dyn TelemetryRepository, query: &SeriesQuery) -> ResampledSeries {
    let mut groups: HashMap<&str, BTreeMap<NaiveDateTime, Bucket>> = HashMap::new();

    for m in select(repository, query) {
        groups
            .entry(m.pi.as_str())
            .or_default()
            .entry(query.frequency.bucket(m.timestamp))
            .or_default()
            .push(m.value);
    }

    let series: Vec<SeriesData> = query
        .metrics
        .iter()
        .map(|metric| match groups.remove(metric) {
            Some(buckets) => SeriesData::new(
                metric.to_string(),
                buckets
                    .into_iter()
                    .filter_map(|(time, bucket)| {
                        bucket.mean().map(|mean| TimeSeriesPoint::new(time, mean))
                    })
                    .collect(),
            ),
            None => SeriesData::empty(metric.to_string()),
        })
        .collect();

    tracing::debug!(
        cell = %query.cell,
        frequency = ?query.frequency,
        points = series.iter().map(|s| s.points.len()).sum::<usize>(),
        "Resampled {} series",
        series.len()
    );

    ResampledSeries::new(query.cell.clone(), series)
}
