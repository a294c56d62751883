use thiserror::Error;

/// Errors raised by commands given to the animation engine.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("Unknown map style: {0}")]
    UnknownStyle(String),
    #[error("No flights loaded")]
    NoFlights,
}

/// Errors that prevent the flight file from being read at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read flight data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed flight data: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row of the flight file that was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid flight record at row {row}: {reason}")]
pub struct RecordError {
    pub row: usize,
    pub reason: String,
}

impl RecordError {
    pub fn new(row: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            reason: reason.into(),
        }
    }
}
