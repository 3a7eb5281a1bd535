//! Parking eligibility lookups backed by spreadsheet reference tables.

pub mod config;
pub mod error;
pub mod parking;
pub mod telemetry;
