//! Rule set compiled into the binary.

use async_trait::async_trait;

use super::{parse_rule, LoadReport, RuleFormat, RuleSource};
use crate::error::AppError;

/// Builtin rule files, in catalog order.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("base-python.yaml", include_str!("../../rules/base-python.yaml")),
    ("python-conda.yaml", include_str!("../../rules/python-conda.yaml")),
    ("python-fastapi.yaml", include_str!("../../rules/python-fastapi.yaml")),
];

/// The default rule source, used when no rules directory is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

#[async_trait]
impl RuleSource for BuiltinSource {
    fn describe(&self) -> String {
        "builtin rules".to_string()
    }

    async fn load(&self) -> Result<LoadReport, AppError> {
        let mut report = LoadReport::new();
        for (name, text) in BUILTIN_RULES {
            let origin = format!("builtin:{}", name);
            report.record(&origin, parse_rule(text, RuleFormat::Yaml, &origin));
        }
        Ok(report)
    }
}
