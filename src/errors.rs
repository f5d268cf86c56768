//! Error types for BAI2 parsing, validation, and emission.
//!
//! Mirrors the error taxonomy of the format: scanner, field, record, structural,
//! and aggregate errors, each carrying enough context (record type, field name,
//! byte offset) that a caller never has to re-derive where a failure happened.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Bai2Error>;

/// Main error type for BAI2 parsing, validation, and emission.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum Bai2Error {
    /// Cursor ran out of input, or no delimiter could be found to close a field.
    #[error("scanner error at byte {offset}: {message}")]
    Scanner { offset: usize, message: String },

    /// A field's content did not match its expected type or charset.
    #[error("field error in {record_type} field '{field}' at byte {offset}: {message}")]
    Field {
        record_type: String,
        field: String,
        offset: usize,
        message: String,
    },

    /// A record's grammar could not be satisfied: unknown leading code, malformed
    /// shape, or a continuation with no open parent.
    #[error("record error in {record_type} at byte {offset}: {message}")]
    Record {
        record_type: String,
        offset: usize,
        message: String,
    },

    /// The hierarchy assembler saw a record out of the order the format requires.
    #[error("structural error at byte {offset}: {message}")]
    Structural { offset: usize, message: String },

    /// A trailer's reported aggregate disagreed with the recomputed value.
    #[error(
        "aggregate error in {scope} at byte {offset}: expected {expected}, found {observed}"
    )]
    Aggregate {
        scope: String,
        expected: String,
        observed: String,
        offset: usize,
    },
}

impl Bai2Error {
    pub fn scanner(offset: usize, message: impl Into<String>) -> Self {
        Bai2Error::Scanner {
            offset,
            message: message.into(),
        }
    }

    pub fn field(
        record_type: impl Into<String>,
        field: impl Into<String>,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        Bai2Error::Field {
            record_type: record_type.into(),
            field: field.into(),
            offset,
            message: message.into(),
        }
    }

    pub fn record(
        record_type: impl Into<String>,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        Bai2Error::Record {
            record_type: record_type.into(),
            offset,
            message: message.into(),
        }
    }

    pub fn structural(offset: usize, message: impl Into<String>) -> Self {
        Bai2Error::Structural {
            offset,
            message: message.into(),
        }
    }

    pub fn aggregate(
        scope: impl Into<String>,
        expected: impl std::fmt::Display,
        observed: impl std::fmt::Display,
        offset: usize,
    ) -> Self {
        Bai2Error::Aggregate {
            scope: scope.into(),
            expected: expected.to_string(),
            observed: observed.to_string(),
            offset,
        }
    }

    /// Exit code this error maps onto when a caller packages the core as a CLI,
    /// per the documented convention (0 success, 1 parse, 2 validation, 3 I/O).
    pub fn exit_code(&self) -> i32 {
        match self {
            Bai2Error::Aggregate { .. } => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_error_display() {
        let err = Bai2Error::scanner(42, "no valid delimiter");
        assert_eq!(
            err.to_string(),
            "scanner error at byte 42: no valid delimiter"
        );
    }

    #[test]
    fn test_field_error_display() {
        let err = Bai2Error::field("16", "amount", 10, "non-numeric in integer field");
        assert_eq!(
            err.to_string(),
            "field error in 16 field 'amount' at byte 10: non-numeric in integer field"
        );
    }

    #[test]
    fn test_aggregate_error_display() {
        let err = Bai2Error::aggregate("group", "+500", "+400", 120);
        assert_eq!(
            err.to_string(),
            "aggregate error in group at byte 120: expected +500, found +400"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Bai2Error::structural(0, "x").exit_code(), 1);
        assert_eq!(Bai2Error::aggregate("file", "1", "2", 0).exit_code(), 2);
    }
}
