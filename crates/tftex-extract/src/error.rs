//! Error types for tftex-extract.
//!
//! Degenerate numerics inside the analyzers never surface as errors; they
//! yield zeros or unset values per the failure model. This enum covers
//! misuse of the API surface itself, such as handing an output sweep to a
//! transfer-sweep analyzer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("sweep kind mismatch: expected {expected} sweep, got {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
