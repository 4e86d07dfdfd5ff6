//! Error types for tftex-aggregate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
