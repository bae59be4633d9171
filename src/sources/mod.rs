//! Rule sources: where catalog entries come from.
//!
//! - [`DirectorySource`] - rule data files in a directory
//! - [`BuiltinSource`] - the rule set compiled into the binary
//!
//! Both parse entries through [`parse_rule`], so an entry is validated the
//! same way regardless of where it came from. Bad entries are collected in
//! the [`LoadReport`] rather than aborting the load.

mod builtin;
mod directory;

pub use builtin::BuiltinSource;
pub use directory::DirectorySource;

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;

use crate::error::{AppError, SourceLoadError};
use crate::models::{RawRule, Rule};

/// Supplies rule records to the catalog.
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Human-readable name used in logs and diagnostics.
    fn describe(&self) -> String;

    /// Load every entry this source knows about.
    ///
    /// Per-entry failures go into [`LoadReport::failures`]. An `Err` means the
    /// source could not be read at all.
    async fn load(&self) -> Result<LoadReport, AppError>;
}

/// Serialization format of a rule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Yaml,
    Json,
}

impl RuleFormat {
    /// Format for a file path, by extension. `None` for files that aren't rules.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(RuleFormat::Yaml),
            "json" => Some(RuleFormat::Json),
            _ => None,
        }
    }
}

/// Parse and validate one rule entry.
pub fn parse_rule(text: &str, format: RuleFormat, origin: &str) -> Result<Rule, SourceLoadError> {
    let raw: RawRule = match format {
        RuleFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| SourceLoadError::new(origin, e.to_string()))?
        }
        RuleFormat::Json => {
            serde_json::from_str(text).map_err(|e| SourceLoadError::new(origin, e.to_string()))?
        }
    };
    raw.validate(origin)
}

/// Outcome of loading a source: accepted rules plus isolated failures.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub rules: Vec<Rule>,
    pub failures: Vec<SourceLoadError>,
    ids: HashSet<String>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of loading one entry.
    ///
    /// A rule whose id was already accepted is recorded as a failure; the
    /// first occurrence wins.
    pub fn record(&mut self, origin: &str, result: Result<Rule, SourceLoadError>) {
        match result {
            Ok(rule) if self.ids.contains(&rule.id) => {
                self.failures.push(SourceLoadError::new(
                    origin,
                    format!("duplicate rule id `{}`", rule.id),
                ));
            }
            Ok(rule) => {
                self.ids.insert(rule.id.clone());
                self.rules.push(rule);
            }
            Err(e) => self.failures.push(e),
        }
    }
}
