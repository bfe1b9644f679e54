//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid sequence configuration and sample counts the generators cannot represent.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("sample count {requested} exceeds the supported maximum of {max}")]
    SampleCountTooLarge { requested: usize, max: usize },

    #[error("invalid sample count: {0}")]
    InvalidSampleCount(String),
}
