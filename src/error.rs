//! Error types for the data pipeline.
//!
//! One crate-wide enum with structured variants so callers can match on the
//! exact failure instead of parsing messages.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or batching data
#[derive(Debug, Error)]
pub enum Error {
    /// Validation ratio outside the half-open unit interval
    #[error("validation ratio {ratio} outside [0, 1)")]
    InvalidRatio { ratio: f64 },

    /// Vocabulary budget cannot fit the reserved tokens
    #[error("vocabulary size {requested} cannot fit {reserved} reserved tokens")]
    VocabTooSmall { requested: usize, reserved: usize },

    /// Batch size of zero produces no batches
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// Required index outside the contiguous range of the map
    #[error("required position {position} out of range for {len} labels")]
    PositionOutOfRange { position: usize, len: usize },

    /// Two distinct labels pinned to the same index
    #[error("labels '{first}' and '{second}' both require position {position}")]
    ConflictingRequirement {
        first: String,
        second: String,
        position: usize,
    },

    /// Required label absent from the label set
    #[error("required label '{label}' not present in label set")]
    UnknownRequiredLabel { label: String },

    /// One label pinned to two different indices
    #[error("label '{label}' required at both position {first} and {second}")]
    DuplicateRequiredLabel {
        label: String,
        first: usize,
        second: usize,
    },

    /// Label lookup without fallback on a label the map does not contain
    #[error("label not found in map: '{label}'")]
    KeyNotFound { label: String },

    /// Vocabulary file line that is not `label<TAB>index`
    #[error("{path}:{line}: malformed vocabulary entry '{content}'")]
    MalformedVocabLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Loaded vocabulary lacks a reserved token at its fixed slot
    #[error("reserved token '{token}' not at index {index} in loaded vocabulary")]
    MissingReservedToken { token: String, index: usize },

    /// Corpus record with too few columns
    #[error("corpus record {record} has {found} fields, need text plus {expected} label columns")]
    MalformedRecord {
        record: usize,
        expected: usize,
        found: usize,
    },

    /// Corpus label field that does not parse as a float
    #[error("corpus record {record}: label field '{value}' is not a number")]
    InvalidLabelValue { record: usize, value: String },

    /// Collation input where examples disagree on the number of groups
    #[error("example {index} has {actual} tensor groups, expected {expected}")]
    GroupCountMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Variable-length group whose lengths do not track group 0
    #[error(
        "group {group} length {actual} at example {index} does not match group 0 length {expected}"
    )]
    LengthProfileMismatch {
        group: usize,
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Label vectors of unequal width inside one batch
    #[error("example {index} has {actual} labels, expected {expected}")]
    LabelWidthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Config file did not parse
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// CSV layer error (missing file, bad quoting, unreadable record)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
