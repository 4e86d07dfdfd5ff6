//! Core data model and ingestion boundary for tftex.
//!
//! This crate provides the fundamental records for thin-film-transistor
//! sweep analysis: measurement sweeps, device geometry, decoded column
//! tables, and the filename-keyword classifier that maps raw tables onto
//! normalized [`MeasurementSweep`] records.

pub mod classify;
pub mod error;
pub mod geometry;
pub mod physics;
pub mod sweep;
pub mod table;
pub mod units;

pub use classify::{classify_sweep, sample_key, sweep_kind_from_name};
pub use error::{Error, Result};
pub use geometry::DeviceGeometry;
pub use sweep::{
    MeasurementSweep, OutputPoint, SweepData, SweepKind, TransferPoint, detect_turnaround,
};
pub use table::DataTable;
