// Chart renderers - Map resampled series onto chart descriptions
use std::collections::BTreeMap;

use crate::domain::telemetry::{CategoryTrace, ChartData, ChartKind, ResampledSeries, SeriesData, Trace};
use crate::infrastructure::config::ChartsConfig;

const HOUR_LABEL: &str = "%Y-%m-%d %H";
const MINUTE_LABEL: &str = "%Y-%m-%d %H:%M";
const SCATTER_MAX_MARKER: f64 = 20.0;
const SCATTER_FLAT_MARKER: f64 = 10.0;

/// Render one cell's resampled data as the requested chart kind.
pub fn render(kind: ChartKind, data: &ResampledSeries, config: &ChartsConfig) -> ChartData {
    match kind {
        ChartKind::Line => line_chart(data, config),
        ChartKind::Bar => bar_chart(data, config),
        ChartKind::Scatter => scatter_chart(data),
        ChartKind::Heatmap => heatmap(data, config),
        ChartKind::Box => box_plot(data, config),
        ChartKind::Histogram => histogram(data, config),
    }
}

fn category_trace(index: usize, series: &SeriesData, config: &ChartsConfig) -> CategoryTrace {
    let mut points = series.points.clone();
    points.sort_by_key(|p| p.time);

    CategoryTrace {
        name: series.metric.clone(),
        color: config.color(index),
        x: points.iter().map(|p| p.time.format(HOUR_LABEL).to_string()).collect(),
        y: points.iter().map(|p| p.value).collect(),
        text: points.iter().map(|p| format!("{:.2}", p.value)).collect(),
    }
}

pub fn line_chart(data: &ResampledSeries, config: &ChartsConfig) -> ChartData {
    let traces = data
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| Trace::Line(category_trace(i, s, config)))
        .collect();

    ChartData::new(ChartKind::Line, format!("Time Series Line Chart for {}", data.cell))
        .with_axes("Time", "Value")
        .with_traces(traces)
}

pub fn bar_chart(data: &ResampledSeries, config: &ChartsConfig) -> ChartData {
    let traces = data
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| Trace::Bar(category_trace(i, s, config)))
        .collect();

    ChartData::new(ChartKind::Bar, format!("Time Series Bar Chart for {}", data.cell))
        .with_axes("Time", "Value")
        .with_traces(traces)
}

/// First metric against the second, paired on buckets both have a value for.
/// Fewer than two metrics yields an empty placeholder.
pub fn scatter_chart(data: &ResampledSeries) -> ChartData {
    let (x_series, y_series) = match data.series.as_slice() {
        [x, y, ..] => (x, y),
        _ => return ChartData::placeholder(ChartKind::Scatter, "Scatter Plot"),
    };

    let y_by_time: BTreeMap<_, _> = y_series.points.iter().map(|p| (p.time, p.value)).collect();
    let (x, y): (Vec<f64>, Vec<f64>) = x_series
        .points
        .iter()
        .filter_map(|p| y_by_time.get(&p.time).map(|&y| (p.value, y)))
        .unzip();

    let trace = Trace::Scatter {
        name: format!("{} vs {}", x_series.metric, y_series.metric),
        marker_size: marker_sizes(&y),
        marker_color: x.clone(),
        colorscale: "Viridis".to_string(),
        x,
        y,
    };

    ChartData::new(
        ChartKind::Scatter,
        format!(
            "Scatter Plot for {} between {} and {}",
            data.cell, x_series.metric, y_series.metric
        ),
    )
    .with_axes(x_series.metric.clone(), y_series.metric.clone())
    .with_traces(vec![trace])
}

fn marker_sizes(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|v| {
            if span > 0.0 {
                (v - min) / span * SCATTER_MAX_MARKER
            } else {
                SCATTER_FLAT_MARKER
            }
        })
        .collect()
}

/// One row per metric. Height grows with the row count up to
/// `max_chart_height`.
pub fn heatmap(data: &ResampledSeries, config: &ChartsConfig) -> ChartData {
    let traces = data
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| Trace::Heatmap {
            name: s.metric.clone(),
            row: i + 1,
            x: s.points.iter().map(|p| p.time.format(MINUTE_LABEL).to_string()).collect(),
            z: s.values(),
            colorscale: "YlOrRd".to_string(),
        })
        .collect();

    let rows = data.series.len().max(1) as u32;
    let mut chart = ChartData::new(ChartKind::Heatmap, format!("Heatmap for {}", data.cell))
        .with_traces(traces);
    chart.height = Some(
        config
            .heatmap_row_height
            .saturating_mul(rows)
            .min(config.max_chart_height),
    );
    chart
}

pub fn box_plot(data: &ResampledSeries, config: &ChartsConfig) -> ChartData {
    let traces = data
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| Trace::Box {
            name: s.metric.clone(),
            color: config.color(i),
            y: s.values(),
        })
        .collect();

    ChartData::new(ChartKind::Box, format!("Box Plot for {}", data.cell))
        .with_axes("Performance Indicator", "Value")
        .with_traces(traces)
}

pub fn histogram(data: &ResampledSeries, config: &ChartsConfig) -> ChartData {
    let traces = data
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| Trace::Histogram {
            name: s.metric.clone(),
            color: config.color(i),
            column: i + 1,
            x: s.values(),
            bins: config.histogram_bins,
        })
        .collect();

    ChartData::new(
        ChartKind::Histogram,
        format!("{} Histogram for each PI", data.cell),
    )
    .with_axes("Value", "Count")
    .with_traces(traces)
}
