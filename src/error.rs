use std::io;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Template errors
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unmatched '{brace}' at byte {offset}")]
    UnmatchedBrace { brace: char, offset: usize },

    #[error("replacement field opened at byte {offset} is never closed")]
    UnclosedPlaceholder { offset: usize },

    #[error("invalid argument id '{id}' at byte {offset}")]
    InvalidArgId { id: String, offset: usize },

    #[error("cannot mix automatic and manual argument indexing (byte {offset})")]
    MixedIndexing { offset: usize },

    #[error("argument index {index} is out of range ({count} positional arguments supplied)")]
    MissingArgument { index: usize, count: usize },

    #[error("no argument named '{name}'")]
    UnknownName { name: String },

    #[error("invalid format spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("format type '{ty}' is not supported for {kind} values")]
    IncompatibleType { ty: char, kind: &'static str },

    #[error("dynamic {what} must come from a non-negative integer argument")]
    InvalidDynamicCount { what: &'static str },
}

impl TemplateError {
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// View errors
// =============================================================================

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanError {
    #[error("range of {count} elements at offset {offset} exceeds view of length {len}")]
    OutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error("expected exactly {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

// =============================================================================
// Configuration errors
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Demo errors
// =============================================================================

/// Anything that can stop a lesson half way through.
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Span(#[from] SpanError),
}
