use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

/// Input rejected before (or instead of) computing an indicator.
///
/// Every indicator validates its whole input up front. When any check fails
/// the error is returned and no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// An observation lacks a required field (a numeric input or `date_time`).
    #[error("missing field '{field}' at observation {index}")]
    MissingField { field: &'static str, index: usize },

    /// A required field is present but does not hold a number.
    #[error("non-numeric value for '{field}' at observation {index}: {value}")]
    NonNumericValue {
        field: &'static str,
        index: usize,
        value: String,
    },

    /// Fewer observations than the indicator needs for a single output.
    #[error("insufficient data: {required} observations required, {actual} given")]
    InsufficientData { required: usize, actual: usize },

    /// An option key outside the indicator's allow-list.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A known option with an unusable value.
    #[error("invalid value for '{option}' option: {reason}")]
    InvalidOptionValue {
        option: &'static str,
        reason: String,
    },

    /// No registered indicator has this symbol.
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),
}
