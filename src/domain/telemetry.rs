// Telemetry data domain models
use chrono::NaiveDateTime;
use serde::Serialize;
use std::str::FromStr;

use super::query::SelectionError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub time: NaiveDateTime,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

/// Resampled values of one metric for one cell, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub metric: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(metric: String, points: Vec<TimeSeriesPoint>) -> Self {
        Self { metric, points }
    }

    pub fn empty(metric: String) -> Self {
        Self::new(metric, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Output of a resample: one series per requested metric, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResampledSeries {
    pub cell: String,
    pub series: Vec<SeriesData>,
}

impl ResampledSeries {
    pub fn new(cell: String, series: Vec<SeriesData>) -> Self {
        Self { cell, series }
    }

    pub fn get(&self, metric: &str) -> Option<&SeriesData> {
        self.series.iter().find(|s| s.metric == metric)
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(SeriesData::is_empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Heatmap,
    Box,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Heatmap,
        ChartKind::Box,
        ChartKind::Histogram,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Chart",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Box => "Box Plot",
            ChartKind::Histogram => "Histogram",
        }
    }
}

impl FromStr for ChartKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.strip_prefix("tab-").unwrap_or(&token) {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            "heatmap" => Ok(ChartKind::Heatmap),
            "box" => Ok(ChartKind::Box),
            "hist" | "histogram" => Ok(ChartKind::Histogram),
            _ => Err(SelectionError::ChartKind(s.to_string())),
        }
    }
}

/// Per-point labelled trace shared by line and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTrace {
    pub name: String,
    pub color: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
}

/// One drawable element of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Line(CategoryTrace),
    Bar(CategoryTrace),
    Scatter {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
        marker_size: Vec<f64>,
        marker_color: Vec<f64>,
        colorscale: String,
    },
    Heatmap {
        name: String,
        row: usize,
        x: Vec<String>,
        z: Vec<f64>,
        colorscale: String,
    },
    Box {
        name: String,
        color: String,
        y: Vec<f64>,
    },
    Histogram {
        name: String,
        color: String,
        column: usize,
        x: Vec<f64>,
        bins: usize,
    },
}

/// Renderer-neutral chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub template: String,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub height: Option<u32>,
    pub traces: Vec<Trace>,
}

impl ChartData {
    pub const TEMPLATE: &'static str = "plotly_dark";

    pub fn new(kind: ChartKind, title: String) -> Self {
        Self {
            kind,
            title,
            template: Self::TEMPLATE.to_string(),
            x_axis_title: None,
            y_axis_title: None,
            height: None,
            traces: Vec::new(),
        }
    }

    /// Chart shown when there is nothing to plot.
    pub fn placeholder(kind: ChartKind, title: impl Into<String>) -> Self {
        Self::new(kind, title.into())
    }

    pub fn with_axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_title = Some(x.into());
        self.y_axis_title = Some(y.into());
        self
    }

    pub fn with_traces(mut self, traces: Vec<Trace>) -> Self {
        self.traces = traces;
        self
    }
}
