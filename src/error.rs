//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

/// Usage hint printed when no keywords are supplied.
pub const USAGE: &str = "Usage: setup-guide <KEYWORDS>  (e.g. setup-guide python,conda,pytest)";

/// Application-level errors for setup-guide.
///
/// Every variant is terminal for a generation run except [`AppError::SourceLoad`],
/// which rule sources collect per item and keep going.
#[derive(Error, Debug)]
pub enum AppError {
    // Invocation errors
    #[error("No keywords supplied. {}", USAGE)]
    Usage,

    // Catalog errors
    #[error("No rules found in {origin}")]
    EmptyCatalog { origin: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error(transparent)]
    SourceLoad(#[from] SourceLoadError),

    #[error("Error reading rules directory {}: {source}", path.display())]
    RulesDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Resolution errors
    #[error("No matching rules found for keywords: {}", keywords.join(", "))]
    NoMatch { keywords: Vec<String> },

    // Output errors
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// A single rule entry that could not be read or validated.
///
/// Loading isolates these: the entry is skipped and logged, the rest of the
/// source is still loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error loading rule from {origin}: {reason}")]
pub struct SourceLoadError {
    /// Where the entry came from (file path or builtin name).
    pub origin: String,
    /// What was wrong with it.
    pub reason: String,
}

impl SourceLoadError {
    pub fn new(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}
