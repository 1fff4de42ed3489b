//! Error types shared by the parsers, the transcoder and the emitters.

use thiserror::Error;

/// Errors raised while reading a syntax file, transcoding raw data, or
/// writing metadata outputs.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Wrong arguments for the requested operation.
    #[error("usage error: {message}")]
    Usage { message: String },

    /// A syntax file line did not match the grammar of the current phase.
    #[error("malformed syntax at line {line} ({construct}): {text:?}")]
    MalformedSyntax {
        line: usize,
        construct: &'static str,
        text: String,
    },

    /// A raw data record could not be sliced or reformatted.
    #[error("data format error in record {record}, variable {variable}: {message}")]
    DataFormat {
        record: u64,
        variable: String,
        message: String,
    },

    /// A hierarchical record carries a record type the layout never declared.
    #[error("record {record} has undeclared record type {record_type:?}")]
    UnknownRecordType { record: u64, record_type: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for extract operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Create a Usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a MalformedSyntax error for a 1-based line number.
    pub fn malformed_syntax(line: usize, construct: &'static str, text: impl Into<String>) -> Self {
        Self::MalformedSyntax {
            line,
            construct,
            text: text.into(),
        }
    }

    /// Create a DataFormat error for a 1-based record number.
    pub fn data_format(
        record: u64,
        variable: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::DataFormat {
            record,
            variable: variable.into(),
            message: message.into(),
        }
    }
}
