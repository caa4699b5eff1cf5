// Repository trait for telemetry data access
use crate::domain::measurement::{DateBounds, Measurement};

/// Read-only view over the loaded measurements and the facts derived from
/// them at load time.
pub trait TelemetryRepository: Send + Sync {
    /// Distinct cell ids, in order of first appearance
    fn cell_ids(&self) -> &[String];

    /// Distinct performance indicator ids, in order of first appearance
    fn metric_ids(&self) -> &[String];

    /// Distinct KPI categories, empty if the source has none
    fn kpi_categories(&self) -> &[String];

    /// Earliest and latest timestamp, `None` for an empty dataset
    fn date_bounds(&self) -> Option<DateBounds>;

    /// Every row in source order
    fn measurements(&self) -> &[Measurement];
}
