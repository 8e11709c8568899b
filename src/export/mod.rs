//! Batch export of configured locations to CSV files.

pub mod config;
pub mod csv_export;
pub mod error;
pub mod runner;
