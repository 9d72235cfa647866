//! Errors raised by the survey library.
//!
//! Everything here is a local validation failure: either the survey document itself is broken
//! or the caller gave us bad parameters.  Nothing is ever partially computed.
//!

use thiserror::Error;

/// Broad category of a `Status`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    /// The survey document can not be used as is
    MalformedInput,
    /// Bad parameter given by the caller
    Configuration,
}

#[derive(Debug, Error)]
pub enum Status {
    #[error("No datum in survey")]
    MissingDatum,
    #[error("Datum has no {0}")]
    IncompleteDatum(&'static str),
    #[error("No points in survey")]
    MissingPoints,
    #[error("Point #{index} has no {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("Can not parse survey: {0}")]
    BadDocument(#[from] serde_json::Error),
    #[error("Can not read survey: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid {name} speed {speed}, must be strictly positive")]
    InvalidSpeed { name: &'static str, speed: f64 },
    #[error("Invalid capture threshold {0}, must be strictly positive")]
    InvalidThreshold(f64),
}

impl Status {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Status::InvalidSpeed { .. } | Status::InvalidThreshold(_) => ErrorKind::Configuration,
            _ => ErrorKind::MalformedInput,
        }
    }
}
