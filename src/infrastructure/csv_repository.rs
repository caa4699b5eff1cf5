// CSV-backed in-memory repository implementation
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::measurement::{DateBounds, Measurement};
use crate::domain::time::parse_timestamp;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const TIMESTAMP_COLUMN: &str = "date_time";
const CELL_COLUMN: &str = "cell_id";
const PI_COLUMN: &str = "pi";
const VALUE_COLUMN: &str = "value";
const CATEGORY_COLUMN: &str = "kpi_category";

/// Tokens exporters write for a missing reading, compared case-insensitively.
const MISSING_TOKENS: [&str; 8] = ["", "na", "n/a", "nan", "null", "none", "#n/a", "<na>"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid timestamp `{value}`")]
    InvalidTimestamp { line: u64, value: String },

    #[error("line {line}: invalid numeric value `{value}`")]
    InvalidValue { line: u64, value: String },
}

/// The dataset store. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    measurements: Vec<Measurement>,
    cell_ids: Vec<String>,
    metric_ids: Vec<String>,
    kpi_categories: Vec<String>,
    date_bounds: Option<DateBounds>,
}

struct Columns {
    timestamp: usize,
    cell: usize,
    pi: usize,
    value: usize,
    category: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| headers.iter().position(|h| h == name);
        let require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn(name));

        Ok(Self {
            timestamp: require(TIMESTAMP_COLUMN)?,
            cell: require(CELL_COLUMN)?,
            pi: require(PI_COLUMN)?,
            value: require(VALUE_COLUMN)?,
            category: find(CATEGORY_COLUMN),
        })
    }
}

impl CsvRepository {
    /// Load the dataset from a CSV file. Any error aborts the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let repository = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = repository.measurements.len(),
            cells = repository.cell_ids.len(),
            metrics = repository.metric_ids.len(),
            "Loaded KPI dataset"
        );
        Ok(repository)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns = Columns::locate(rdr.headers()?)?;

        let mut measurements = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let field = |idx: usize| record.get(idx).unwrap_or_default();

            let raw_value = field(columns.value);
            if is_missing(raw_value) {
                skipped += 1;
                continue;
            }
            let value: f64 = raw_value.parse().map_err(|_| LoadError::InvalidValue {
                line,
                value: raw_value.to_string(),
            })?;
            // inf/-inf parse fine but are gaps, never readings
            if !value.is_finite() {
                skipped += 1;
                continue;
            }

            let raw_ts = field(columns.timestamp);
            let timestamp = parse_timestamp(raw_ts).ok_or_else(|| LoadError::InvalidTimestamp {
                line,
                value: raw_ts.to_string(),
            })?;

            let category = columns
                .category
                .map(field)
                .filter(|c| !c.is_empty())
                .map(str::to_string);

            measurements.push(
                Measurement::new(
                    timestamp,
                    field(columns.cell).to_string(),
                    field(columns.pi).to_string(),
                    value,
                )
                .with_category(category),
            );
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} rows with a missing value", skipped);
        }

        Ok(Self::from_measurements(measurements))
    }

    /// Build the store from rows already in memory, deriving the distinct
    /// cells, metrics, categories and the date bounds.
    pub fn from_measurements(measurements: Vec<Measurement>) -> Self {
        let cell_ids = distinct(measurements.iter().map(|m| m.cell_id.as_str()));
        let metric_ids = distinct(measurements.iter().map(|m| m.pi.as_str()));
        let kpi_categories = distinct(measurements.iter().filter_map(|m| m.kpi_category.as_deref()));
        let date_bounds = DateBounds::from_timestamps(measurements.iter().map(|m| m.timestamp));

        Self {
            measurements,
            cell_ids,
            metric_ids,
            kpi_categories,
            date_bounds,
        }
    }
}

fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.iter().any(|token| raw.eq_ignore_ascii_case(token))
}

fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

impl TelemetryRepository for CsvRepository {
    fn cell_ids(&self) -> &[String] {
        &self.cell_ids
    }

    fn metric_ids(&self) -> &[String] {
        &self.metric_ids
    }

    fn kpi_categories(&self) -> &[String] {
        &self.kpi_categories
    }

    fn date_bounds(&self) -> Option<DateBounds> {
        self.date_bounds
    }

    fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_load_derives_facts() {
        let csv = "\
date_time,cell_id,kpi_category,pi,value
2023-01-02 10:00:00,Cell_B,Coverage,RSRP,-90.5
2023-01-01 08:00:00,Cell_A,Coverage,RSRP,-100
2023-01-03 12:30:00,Cell_A,Quality,SINR,12
";
        let repo = CsvRepository::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(repo.measurements().len(), 3);
        assert_eq!(repo.cell_ids(), &["Cell_B".to_string(), "Cell_A".to_string()]);
        assert_eq!(repo.metric_ids(), &["RSRP".to_string(), "SINR".to_string()]);
        assert_eq!(repo.kpi_categories(), &["Coverage".to_string(), "Quality".to_string()]);

        let bounds = repo.date_bounds().unwrap();
        assert_eq!(bounds.min, ts("2023-01-01 08:00:00"));
        assert_eq!(bounds.max, ts("2023-01-03 12:30:00"));
    }

    #[test]
    fn test_columns_in_any_order_and_extra_columns() {
        let csv = "value,site,pi,cell_id,date_time\n3.5,north,CQI,Cell_A,2023-01-01\n";
        let repo = CsvRepository::from_reader(csv.as_bytes()).unwrap();

        let m = &repo.measurements()[0];
        assert_eq!(m.value, 3.5);
        assert_eq!(m.pi, "CQI");
        assert_eq!(m.timestamp, ts("2023-01-01 00:00:00"));
        assert!(repo.kpi_categories().is_empty());
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "date_time,cell_id,value\n2023-01-01,Cell_A,1\n";
        let err = CsvRepository::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("pi")));
    }

    #[test]
    fn test_bad_timestamp_fails_with_line() {
        let csv = "date_time,cell_id,pi,value\n2023-01-01,Cell_A,RSRP,1\nnot-a-date,Cell_A,RSRP,2\n";
        let err = CsvRepository::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidTimestamp { line: 3, .. }));
    }

    #[test]
    fn test_bad_value_fails() {
        let csv = "date_time,cell_id,pi,value\n2023-01-01,Cell_A,RSRP,strong\n";
        let err = CsvRepository::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_empty_value_is_skipped() {
        let csv = "date_time,cell_id,pi,value\n2023-01-01,Cell_A,RSRP,\n2023-01-02,Cell_A,RSRP,-99\n";
        let repo = CsvRepository::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(repo.measurements().len(), 1);
        assert_eq!(repo.measurements()[0].value, -99.0);
    }

    #[test]
    fn test_missing_value_tokens_are_skipped() {
        let csv = "\
date_time,cell_id,pi,value
2023-01-01 00:00:00,Cell_A,RSRP,NA
2023-01-01 01:00:00,Cell_A,RSRP,NaN
2023-01-01 02:00:00,Cell_A,RSRP,n/a
2023-01-01 03:00:00,Cell_A,RSRP,null
2023-01-01 04:00:00,Cell_A,RSRP,inf
2023-01-01 05:00:00,Cell_A,RSRP,-Infinity
2023-01-01 06:00:00,Cell_A,RSRP,-100
";
        let repo = CsvRepository::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(repo.measurements().len(), 1);
        assert_eq!(repo.measurements()[0].value, -100.0);
        assert!(repo.measurements().iter().all(|m| m.value.is_finite()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvRepository::load("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
