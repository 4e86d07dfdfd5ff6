//! Error types for tftex-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column length mismatch: {name} has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("unrecognized measurement tag in file name: {0}")]
    UnknownMeasurementKind(String),

    #[error("hysteresis sweep has no gate-voltage turnaround")]
    NoTurnaround,

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, Error>;
