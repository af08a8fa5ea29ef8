//! Error types for Data Studio operations

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Data Studio operations
#[derive(Error, Debug)]
pub enum DataStudioError {
    /// Frame construction or access error
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Statistical test error
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Underlying filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path the operation touched
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// File extension with no registered handler
    #[error("unsupported file format: {extension:?}")]
    UnsupportedFormat {
        /// The offending extension
        extension: String,
    },

    /// Write, move or rename attempted on a locked file or dataset
    #[error("{name} is locked; refusing to {operation}")]
    Locked {
        /// Name of the locked object
        name: String,
        /// The rejected operation
        operation: String,
    },

    /// Content type does not match what the file format expects
    #[error("content error: expected {expected}, got {got}")]
    ContentType {
        /// Expected content kind
        expected: String,
        /// Actual content kind
        got: String,
    },

    /// A metadata attribute key was used incorrectly
    #[error("metadata key error: {0}")]
    MetadataKey(String),

    /// Collection member key already present or missing
    #[error("collection key error: {0}")]
    CollectionKey(String),

    /// Dataset operation requires a source or store that was never attached
    #[error("{entity} has no {role} designated")]
    MissingBackend {
        /// The dataset name
        entity: String,
        /// "source" or "store"
        role: String,
    },

    /// Serialization failure (project files, JSON content)
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors raised while building or manipulating data frames
#[derive(Error, Debug)]
pub enum FrameError {
    /// Column length differs from the frame's row count
    #[error("column {name} has length {got}, frame has {expected} rows")]
    LengthMismatch {
        /// Column being inserted
        name: String,
        /// Rows already in the frame
        expected: usize,
        /// Rows in the offending column
        got: usize,
    },

    /// Column name not present in the frame
    #[error("no column named {0}")]
    UnknownColumn(String),

    /// Column name already present in the frame
    #[error("column {0} already exists")]
    DuplicateColumn(String),

    /// Frames being concatenated do not share a schema
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Data row carrying more fields than the header
    #[error("row {row} has {got} fields, the header has {expected}")]
    RaggedRow {
        /// Zero-based data row
        row: usize,
        /// Header field count
        expected: usize,
        /// Fields found in the row
        got: usize,
    },
}

/// Errors raised by the statistical test suite
#[derive(Error, Debug)]
pub enum StatsError {
    /// Sample too small for the requested test
    #[error("{test} requires at least {min} observations, got {got}")]
    SampleTooSmall {
        /// Test name
        test: String,
        /// Minimum observations
        min: usize,
        /// Observations provided
        got: usize,
    },

    /// Samples that must be paired have different lengths
    #[error("paired samples have different lengths")]
    UnpairedSamples,

    /// Input shape is wrong (a ragged table, mismatched vectors)
    #[error("bad input shape: {0}")]
    BadShape(String),

    /// Input values are outside the test's domain
    #[error("bad input: {0}")]
    BadInput(String),

    /// The statistic is undefined for this input (zero variance, all ties)
    #[error("statistic undefined: {0}")]
    Degenerate(String),
}

/// Result type alias for Data Studio operations
pub type Result<T> = std::result::Result<T, DataStudioError>;

impl DataStudioError {
    /// Wrap a filesystem error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataStudioError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a lock violation error.
    pub fn locked(name: impl Into<String>, operation: impl Into<String>) -> Self {
        DataStudioError::Locked {
            name: name.into(),
            operation: operation.into(),
        }
    }
}
