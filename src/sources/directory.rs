//! Rule data files in a directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{parse_rule, LoadReport, RuleFormat, RuleSource};
use crate::error::{AppError, SourceLoadError};

/// Loads every `.yaml`, `.yml` and `.json` file at the top level of a directory.
///
/// Files are read in file-name order. Subdirectories and other files are
/// ignored.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Rule file paths, sorted.
    async fn rule_files(&self) -> Result<Vec<PathBuf>, AppError> {
        let dir_error = |source| AppError::RulesDir {
            path: self.dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(dir_error)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
            let path = entry.path();
            // follows symlinks; broken links are skipped
            let is_file = fs::metadata(&path).await.is_ok_and(|m| m.is_file());
            if is_file && RuleFormat::from_path(&path).is_some() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl RuleSource for DirectorySource {
    fn describe(&self) -> String {
        format!("rules directory {}", self.dir.display())
    }

    async fn load(&self) -> Result<LoadReport, AppError> {
        let mut report = LoadReport::new();

        for path in self.rule_files().await? {
            let origin = path.display().to_string();
            let Some(format) = RuleFormat::from_path(&path) else {
                continue;
            };

            let result = match fs::read_to_string(&path).await {
                Ok(text) => parse_rule(&text, format, &origin),
                Err(e) => Err(SourceLoadError::new(&origin, e.to_string())),
            };
            report.record(&origin, result);
        }

        Ok(report)
    }
}
