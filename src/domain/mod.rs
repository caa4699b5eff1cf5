// Domain layer - Pure data types for KPI telemetry, queries and charts
pub mod dashboard;
pub mod measurement;
pub mod query;
pub mod summary;
pub mod telemetry;
pub mod time;
