//! Error types for span-engine operations.
//!
//! Exhausted iterators are not an error: every sequence type in this crate
//! follows the standard `Iterator` contract and signals exhaustion by
//! returning `None` from `next()`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpanError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed interval text: {0}")]
    MalformedIntervalText(String),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),
}

pub type Result<T> = std::result::Result<T, SpanError>;
