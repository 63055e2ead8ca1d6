//! Error types for Sift

use crate::constants;
use serde_json::Value;
use thiserror::Error;

/// Status code families attached to every error.
///
/// The first three digits match the HTTP status a service would answer with,
/// the remaining digits are reserved for application-specific detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StatusCode {
    /// The caller supplied a bad parameter
    BadRequest = constants::E_400000,
    /// The library was misused or an internal operation failed
    Internal = constants::E_500000,
}

impl StatusCode {
    /// Numeric status code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// HTTP status derived from the leading three digits
    pub fn http_status(self) -> u16 {
        (self.code() / 1000) as u16
    }
}

/// Sift error types
#[derive(Debug, Error)]
pub enum SiftError {
    /// Key is absent or empty while the caller required it.
    #[error("parameter key[{key}] must not be empty")]
    RequiredParameterMissing {
        /// Requested key
        key: String,
    },
    /// Value could not be interpreted as the requested type.
    #[error("`{key}` must be of {expected} type")]
    TypeMismatch {
        /// Requested key
        key: String,
        /// Name of the requested type
        expected: &'static str,
        /// Rejected value
        value: Value,
    },
    /// String does not follow the expected date or datetime layout.
    #[error("`{key}` must be a valid {kind}, e.g. {example}")]
    FormatInvalid {
        /// Requested key
        key: String,
        /// Kind of string expected ("date" or "datetime")
        kind: &'static str,
        /// Example of a valid value
        example: &'static str,
        /// Rejected value
        value: Value,
    },
    /// Integer falls outside the accepted range.
    #[error("`{key}` must be a valid timestamp between {min} and {max}, got {value}")]
    RangeInvalid {
        /// Requested key
        key: String,
        /// Rejected value
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },
    /// Value failed the comparison rule supplied by the caller.
    #[error("key[{key}] failed comparison {rule}")]
    ComparisonFailed {
        /// Requested key
        key: String,
        /// Rendered rule, e.g. `[">", 10]`
        rule: String,
        /// Rejected value
        value: Value,
    },
    /// Comparison rule is not well formed.
    #[error("malformed rule: {reason}; expected e.g. [\"==\", 1]")]
    MalformedRule {
        /// Explanation of what is wrong with the rule
        reason: String,
    },
    /// Cast name is not recognized.
    #[error("unknown cast type: {0}")]
    UnknownCast(String),
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON document nests deeper than the configured limit.
    #[error("maximum JSON depth exceeded: {depth} (max: {max_depth})")]
    DepthExceeded {
        /// Depth of the offending document
        depth: usize,
        /// Configured limit
        max_depth: usize,
    },
    /// JSON depth limit must be positive.
    #[error("JSON depth limit must be greater than 0")]
    InvalidDepth,
    /// Mutation attempted on a read-only collection.
    #[error("cannot {operation} key[{key}]: the collection is read only")]
    ReadOnlyViolation {
        /// Key targeted by the mutation (empty for `clear`)
        key: String,
        /// Rejected operation
        operation: &'static str,
    },
}

impl SiftError {
    /// Status code family for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiftError::RequiredParameterMissing { .. }
            | SiftError::TypeMismatch { .. }
            | SiftError::FormatInvalid { .. }
            | SiftError::RangeInvalid { .. }
            | SiftError::ComparisonFailed { .. } => StatusCode::BadRequest,
            SiftError::MalformedRule { .. }
            | SiftError::UnknownCast(_)
            | SiftError::Json(_)
            | SiftError::DepthExceeded { .. }
            | SiftError::InvalidDepth
            | SiftError::ReadOnlyViolation { .. } => StatusCode::Internal,
        }
    }

    /// Whether the error points at a defect in calling code rather than bad input
    pub fn is_programming_error(&self) -> bool {
        self.status_code() == StatusCode::Internal
    }

    /// Key the error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            SiftError::RequiredParameterMissing { key }
            | SiftError::TypeMismatch { key, .. }
            | SiftError::FormatInvalid { key, .. }
            | SiftError::RangeInvalid { key, .. }
            | SiftError::ComparisonFailed { key, .. }
            | SiftError::ReadOnlyViolation { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Rejected value carried by the error, if any
    pub fn value(&self) -> Option<Value> {
        match self {
            SiftError::TypeMismatch { value, .. }
            | SiftError::FormatInvalid { value, .. }
            | SiftError::ComparisonFailed { value, .. } => Some(value.clone()),
            SiftError::RangeInvalid { value, .. } => Some(Value::from(*value)),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SiftError>;
