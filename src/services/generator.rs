//! The generation pipeline: load -> resolve -> compose -> write.
//!
//! Each stage runs only after the previous one has fully completed. Any
//! fatal error stops the run before the output file is touched.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::AppError;
use crate::services::composer::{compose, order_rules};
use crate::services::resolver::resolve;
use crate::sources::RuleSource;

/// A rendered guide that has not been written yet.
#[derive(Debug, Clone)]
pub struct RenderedGuide {
    pub markdown: String,
    /// Ids of the included rules, in document order.
    pub rule_ids: Vec<String>,
    /// Titles of the included rules, in document order.
    pub titles: Vec<String>,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub rule_ids: Vec<String>,
    pub titles: Vec<String>,
}

/// Runs the pipeline against one rule source and output path.
pub struct Generator {
    source: Box<dyn RuleSource>,
    output_path: PathBuf,
}

impl Generator {
    pub fn new(source: Box<dyn RuleSource>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_path: output_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rules.source(), config.output.path.clone())
    }

    /// Load the catalog, logging isolated entry failures.
    ///
    /// Fails with [`AppError::EmptyCatalog`] when no usable rule remains.
    pub async fn load_catalog(&self) -> Result<Catalog, AppError> {
        let origin = self.source.describe();
        tracing::info!("Loading rules from {}", origin);

        let report = self.source.load().await?;
        for failure in &report.failures {
            tracing::warn!(origin = %failure.origin, "{}", failure);
        }

        if report.rules.is_empty() {
            tracing::error!("No rules found in {}", origin);
            return Err(AppError::EmptyCatalog { origin });
        }

        let catalog = Catalog::new(report.rules)?;
        for (rule, missing) in catalog.dangling_requirements() {
            tracing::debug!(rule = %rule, missing = %missing, "Ignoring unknown required rule");
        }
        tracing::info!("Loaded {} rules", catalog.len());
        Ok(catalog)
    }

    /// Resolve keywords and render the guide without writing it.
    pub fn render(&self, catalog: &Catalog, keywords: &[String]) -> Result<RenderedGuide, AppError> {
        tracing::info!("Processing keywords: {:?}", keywords);

        let selection = resolve(catalog, keywords);
        if selection.is_empty() {
            tracing::error!("No matching rules found");
            return Err(AppError::NoMatch {
                keywords: keywords.iter().filter(|k| !k.is_empty()).cloned().collect(),
            });
        }

        let ordered = order_rules(selection.rules());
        Ok(RenderedGuide {
            markdown: compose(&selection),
            rule_ids: ordered.iter().map(|r| r.id.clone()).collect(),
            titles: ordered.iter().map(|r| r.title.clone()).collect(),
        })
    }

    /// Run the whole pipeline and write the guide.
    pub async fn generate(&self, keywords: &[String]) -> Result<GenerationReport, AppError> {
        let catalog = self.load_catalog().await?;
        let guide = self.render(&catalog, keywords)?;

        write_guide(&self.output_path, &guide.markdown).await?;
        tracing::info!("Generated {}", self.output_path.display());

        Ok(GenerationReport {
            output_path: self.output_path.clone(),
            rule_ids: guide.rule_ids,
            titles: guide.titles,
        })
    }
}

/// Write `content` to `path`, replacing any existing file.
///
/// Writes a sibling temporary file first and renames it into place, so the
/// target is either the old file or the complete new one.
pub async fn write_guide(path: &Path, content: &str) -> Result<(), AppError> {
    let write_error = |source| AppError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, content).await.map_err(write_error)?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(write_error(e));
    }
    Ok(())
}
