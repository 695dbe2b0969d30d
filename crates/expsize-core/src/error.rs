use std::path::PathBuf;
use thiserror::Error;

/// Why a single dump line could not be turned into an observation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Fewer than the four whitespace-separated fields the dump format needs.
    #[error("expected at least 4 fields, found {found}")]
    TooFewFields { found: usize },

    /// The path field is shorter than the configured key prefix.
    #[error("path has {len} characters, shorter than the {prefix_len}-character prefix")]
    PathTooShort { len: usize, prefix_len: usize },

    /// Stripping the prefix left nothing behind.
    #[error("path is exactly the {prefix_len}-character prefix, no key remains")]
    EmptyKey { prefix_len: usize },

    /// Field 0 is not a `YYYY/MM/DD` date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Field 2 is not a non-negative base-10 integer.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// The raw line bytes are not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

impl LineError {
    /// Short stable label used when tallying skipped lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LineError::TooFewFields { .. } => "too_few_fields",
            LineError::PathTooShort { .. } => "path_too_short",
            LineError::EmptyKey { .. } => "empty_key",
            LineError::InvalidDate(_) => "invalid_date",
            LineError::InvalidSize(_) => "invalid_size",
            LineError::InvalidUtf8 => "invalid_utf8",
        }
    }
}

/// All errors produced by expsize.
#[derive(Error, Debug)]
pub enum ExpsizeError {
    /// A flag or boundary value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The source dump could not be opened.
    #[error("Failed to open source {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compressed stream failed its integrity check or ended early.
    #[error("Corrupt compressed input near line {line}: {source}")]
    CorruptInput {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    /// A line was rejected while running with the strict line policy.
    #[error("Malformed line {line}: {source}")]
    MalformedLine {
        line: u64,
        #[source]
        source: LineError,
    },

    /// The structured encoder refused the report.
    #[error("Failed to encode report: {0}")]
    Encode(String),

    /// Pass-through for any raw I/O error that is not a decoding failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the expsize crates.
pub type Result<T> = std::result::Result<T, ExpsizeError>;
