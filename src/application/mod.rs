// Application layer - Use cases over the loaded telemetry
pub mod catalog_service;
pub mod charts;
pub mod dashboard_service;
pub mod resample;
pub mod statistics;
pub mod telemetry_repository;
