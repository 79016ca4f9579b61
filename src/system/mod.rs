pub mod collector;
pub mod process;

use thiserror::Error;

/// Structural failures while turning collector text into typed records.
/// Any of these skips the tick; the sampler stays on schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("column {0:?} missing from header")]
    MissingColumn(&'static str),
    #[error("row is missing the {0:?} field")]
    MissingField(&'static str),
    #[error("no key matching {0:?} in collector output")]
    MissingKey(&'static str),
    #[error("{field} has non-numeric value {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
