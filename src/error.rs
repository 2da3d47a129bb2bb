//! Error types for input validation and file loading

use thiserror::Error;

/// A committed input that lies outside the domain the engine accepts.
///
/// These are precondition violations: the engine refuses to run rather than
/// clamping silently. Running out of money is never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl InputError {
    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            InputError::NotFinite { field, .. }
            | InputError::NotPositive { field, .. }
            | InputError::OutOfRange { field, .. } => field,
        }
    }
}

/// Failure while reading households or limits from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid number '{value}' for {field}")]
    InvalidNumber { field: String, value: String },

    #[error("Unknown episode structure: {0}")]
    UnknownEpisodeStructure(String),

    #[error("Missing column '{column}' on line {line}")]
    MissingColumn { column: &'static str, line: u64 },

    #[error("Unknown limit field: {0}")]
    UnknownLimitField(String),

    #[error("Limit {field} has min {min} above max {max}")]
    InvertedLimit { field: String, min: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = InputError::OutOfRange {
            field: "buffer_rate",
            value: 0.7,
            min: 0.0,
            max: 0.5,
        };
        assert_eq!(err.field(), "buffer_rate");
        assert_eq!(
            err.to_string(),
            "buffer_rate = 0.7 is outside the allowed range [0, 0.5]"
        );
    }
}
