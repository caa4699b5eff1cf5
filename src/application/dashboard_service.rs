// Dashboard service - Use case for building charts and summary tables
use crate::application::charts;
use crate::application::resample::resample;
use crate::application::statistics::describe;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::dashboard::Dashboard;
use crate::domain::query::{DashboardQuery, Selection};
use crate::domain::summary::SummaryTable;
use crate::domain::telemetry::{ChartData, ChartKind, ResampledSeries};
use crate::infrastructure::config::ChartsConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn TelemetryRepository>,
    charts_config: ChartsConfig,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, charts_config: ChartsConfig) -> Self {
        Self {
            repository,
            charts_config,
        }
    }

    /// One chart per selected cell
    pub fn charts(&self, query: &DashboardQuery) -> Vec<ChartData> {
        self.render_charts(query.chart, &self.resample_cells(query))
    }

    /// One table per (metric, cell), metric-major
    pub fn summaries(&self, query: &DashboardQuery) -> Vec<SummaryTable> {
        summary_tables(&query.metrics, &self.resample_cells(query))
    }

    pub fn dashboard(&self, query: &DashboardQuery) -> Dashboard {
        let per_cell = self.resample_cells(query);
        Dashboard::new(
            self.render_charts(query.chart, &per_cell),
            summary_tables(&query.metrics, &per_cell),
        )
    }

    /// The "no data" state: a blank chart and no tables.
    pub fn empty(kind: ChartKind) -> Dashboard {
        Dashboard::new(vec![ChartData::placeholder(kind, "")], Vec::new())
    }

    fn resample_cells(&self, query: &DashboardQuery) -> Vec<ResampledSeries> {
        tracing::debug!(
            cells = query.cells.len(),
            metrics = query.metrics.len(),
            empty_range = query.range.is_empty(),
            "Resampling selection"
        );
        query
            .cells
            .iter()
            .map(|cell| resample(self.repository.as_ref(), &query.series_query(cell)))
            .collect()
    }

    fn render_charts(&self, kind: ChartKind, per_cell: &[ResampledSeries]) -> Vec<ChartData> {
        per_cell
            .iter()
            .map(|data| charts::render(kind, data, &self.charts_config))
            .collect()
    }
}

fn summary_tables(metrics: &Selection, per_cell: &[ResampledSeries]) -> Vec<SummaryTable> {
    metrics
        .iter()
        .flat_map(|metric| {
            per_cell.iter().map(move |data| {
                let values = data.get(metric).map(|s| s.values()).unwrap_or_default();
                SummaryTable::new(metric.to_string(), data.cell.clone(), describe(&values))
            })
        })
        .collect()
}
