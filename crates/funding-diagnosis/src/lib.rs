pub mod balance_import;
pub mod config;
pub mod diagnosis;
pub mod error;
mod labels;
pub mod telemetry;
