//! Error types for the ABA generator.

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, AbaError>;

/// Errors that can occur while building an ABA file.
///
/// Malformed field values are never an error: the field codecs coerce or
/// truncate them. Only caller configuration mistakes and empty input abort a
/// `generate` call.
#[derive(Error, Debug)]
pub enum AbaError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// `generate` was called without any detail record
    #[error("Please pass in at least one transaction")]
    EmptyInput,

    /// A schema field starts before the end of the previous field
    #[error(
        "Schema field '{field}' starts at {start} but the line is already written up to {cursor}; \
         field boundaries must be supplied in growing order"
    )]
    SchemaOrder {
        field: String,
        start: usize,
        cursor: usize,
    },

    /// A schema field ends before it starts
    #[error("Schema field '{field}' has inverted boundaries [{start}, {end}]")]
    InvalidBoundaries {
        field: String,
        start: usize,
        end: usize,
    },

    /// No schema is registered for the record type code
    #[error("No schema registered for record type '{0}'")]
    UnknownRecordType(char),

    /// Invalid transaction row in CSV input
    #[error("Invalid transaction at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing command-line arguments
    #[error("Missing arguments. Usage: aba-generator <config.json> <transactions.csv>")]
    MissingArgument,
}
