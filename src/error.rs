//! Error handling for reader and filter operations.
//!
//! Provides the error taxonomy shared by the record model, the filter
//! framework and the reader contract: configuration errors raised while
//! building filters and registries, data-integrity errors raised by the
//! record model, and access errors raised by readers.

use std::path::Path;

/// Result type alias for the timeseries framework
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for timeseries reading and filtering
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Delimited text parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    Csv {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON (de)serialisation error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Polars conversion error
    #[error("DataFrame error: {message}")]
    Polars {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A filter name was registered twice
    #[error("Filter '{name}' is already registered")]
    DuplicateFilter { name: String },

    /// A filter name is not known to the registry
    #[error("Unknown filter '{name}'")]
    UnknownFilter { name: String },

    /// Keyword arguments do not match the filter's parameters
    #[error("Invalid arguments for filter '{filter}': {source}")]
    InvalidFilterArguments {
        filter: String,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed bounding box
    #[error("Bounding box error: {message}")]
    BoundingBox { message: String },

    /// Malformed time range
    #[error("Time bounds error: {message}")]
    TimeBounds { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error for '{value}': {source}")]
    DateTimeParsing {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Station identifier exceeds the column limit
    #[error("Station name too long, max {max} characters: '{station}'")]
    StationIdTooLong { station: String, max: usize },

    /// A column disagrees in length with the values column
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A required column is absent from a declared table
    #[error("Required column '{column}' not found")]
    MissingColumn { column: String },

    /// A row position is outside the table
    #[error("Row index {index} out of bounds for {len} rows")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A backend changed units within one variable
    #[error("Unit change for '{variable}' from '{expected}' to '{found}'")]
    UnitMismatch {
        variable: String,
        expected: String,
        found: String,
    },

    /// Generic data integrity error
    #[error("Data integrity error: {message}")]
    DataIntegrity { message: String },

    /// Variable not offered by a reader
    #[error("Variable not found: {variable}")]
    VariableNotFound { variable: String },

    /// Reader used after close
    #[error("Reader has been closed")]
    ReaderClosed,

    /// An engine name was registered twice
    #[error("Engine '{name}' is already registered")]
    DuplicateEngine { name: String },

    /// An engine name is not known to the registry
    #[error("Unknown engine '{name}'")]
    UnknownEngine { name: String },

    /// An engine does not know the requested source
    #[error("Engine '{engine}' has no source '{source_id}'")]
    UnknownSource { engine: String, source_id: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::Csv {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a polars error with context
    pub fn polars(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Polars {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a duplicate filter registration error
    pub fn duplicate_filter(name: impl Into<String>) -> Self {
        Self::DuplicateFilter { name: name.into() }
    }

    /// Create an unknown filter error
    pub fn unknown_filter(name: impl Into<String>) -> Self {
        Self::UnknownFilter { name: name.into() }
    }

    /// Create an invalid filter arguments error
    pub fn invalid_filter_arguments(filter: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidFilterArguments {
            filter: filter.into(),
            source,
        }
    }

    /// Create a bounding box error
    pub fn bounding_box(message: impl Into<String>) -> Self {
        Self::BoundingBox {
            message: message.into(),
        }
    }

    /// Create a time bounds error
    pub fn time_bounds(message: impl Into<String>) -> Self {
        Self::TimeBounds {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            value: value.into(),
            source,
        }
    }

    /// Create a station id length error
    pub fn station_id_too_long(station: impl Into<String>, max: usize) -> Self {
        Self::StationIdTooLong {
            station: station.into(),
            max,
        }
    }

    /// Create a column length mismatch error
    pub fn column_length_mismatch(
        column: impl Into<String>,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::ColumnLengthMismatch {
            column: column.into(),
            expected,
            found,
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a row index error
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create a unit mismatch error
    pub fn unit_mismatch(
        variable: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnitMismatch {
            variable: variable.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a data integrity error
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            message: message.into(),
        }
    }

    /// Create a variable not found error
    pub fn variable_not_found(variable: impl Into<String>) -> Self {
        Self::VariableNotFound {
            variable: variable.into(),
        }
    }

    /// Create a duplicate engine registration error
    pub fn duplicate_engine(name: impl Into<String>) -> Self {
        Self::DuplicateEngine { name: name.into() }
    }

    /// Create an unknown engine error
    pub fn unknown_engine(name: impl Into<String>) -> Self {
        Self::UnknownEngine { name: name.into() }
    }

    /// Create an unknown source error
    pub fn unknown_source(engine: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self::UnknownSource {
            engine: engine.into(),
            source_id: source_id.into(),
        }
    }

    /// Create an I/O error for a file that could not be opened
    pub fn file_open(path: &Path, source: std::io::Error) -> Self {
        Self::io(format!("failed to open '{}'", path.display()), source)
    }

    /// True for errors raised while configuring filters, engines or pipelines
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::DuplicateFilter { .. }
                | Self::UnknownFilter { .. }
                | Self::InvalidFilterArguments { .. }
                | Self::BoundingBox { .. }
                | Self::TimeBounds { .. }
                | Self::DateTimeParsing { .. }
                | Self::DuplicateEngine { .. }
                | Self::UnknownEngine { .. }
                | Self::UnknownSource { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Polars {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}
