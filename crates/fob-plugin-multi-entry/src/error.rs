//! Error types for multi-entry resolution and configuration

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring the plugin or resolving entries
#[derive(Error, Debug, Diagnostic)]
pub enum MultiEntryError {
    /// An include pattern matched no files
    #[error("No files matched entry pattern '{pattern}'")]
    #[diagnostic(
        code(fob::multi_entry::no_matches),
        help("Check the pattern against the working directory, or set `onEmptyMatch: \"ignore\"`")
    )]
    NoMatches { pattern: String },

    /// Glob syntax could not be compiled
    #[error("Invalid glob pattern '{pattern}': {source}")]
    #[diagnostic(code(fob::multi_entry::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Filesystem access failed while expanding a pattern
    #[error("Failed to read {}: {source}", .path.display())]
    #[diagnostic(code(fob::multi_entry::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A matched file name cannot be written as an import specifier
    #[error("Matched path is not valid UTF-8: {}", .path.display())]
    #[diagnostic(
        code(fob::multi_entry::non_utf8_path),
        help("Rename the file or exclude it from the entry patterns")
    )]
    NonUtf8Path { path: PathBuf },

    /// Legacy mode was selected but the bundler has no `input`
    #[error("Bundler input is missing; legacy multi-entry mode reads its patterns from it")]
    #[diagnostic(
        code(fob::multi_entry::missing_input),
        help("Set `input` on the bundler options, or pass the entry patterns to the plugin directly")
    )]
    MissingInput,

    /// A bundler input item cannot be used as an entry pattern
    #[error("Bundler input '{import}' cannot be used as a multi-entry pattern")]
    #[diagnostic(code(fob::multi_entry::malformed_input))]
    MalformedInput { import: String },

    /// Plugin configuration has an unusable shape
    #[error("Invalid multi-entry configuration: {0}")]
    #[diagnostic(code(fob::multi_entry::invalid_config))]
    InvalidConfig(String),
}

impl MultiEntryError {
    pub fn no_matches(pattern: impl Into<String>) -> Self {
        Self::NoMatches {
            pattern: pattern.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn non_utf8_path(path: impl Into<PathBuf>) -> Self {
        Self::NonUtf8Path { path: path.into() }
    }

    pub fn malformed_input(import: impl Into<String>) -> Self {
        Self::MalformedInput {
            import: import.into(),
        }
    }
}

/// Result type alias for multi-entry operations
pub type Result<T> = std::result::Result<T, MultiEntryError>;
