pub mod config;
pub mod error;
pub mod policy;
pub mod report;
pub mod scoring;
pub mod telemetry;
