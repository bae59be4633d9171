//! Rule model: a named markdown fragment selected by keyword.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::SourceLoadError;

/// Role a rule plays in the composed guide.
///
/// Only [`RuleKind::Base`] affects ordering: base rules always come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Base,
    Module,
    Composite,
}

impl RuleKind {
    pub fn is_base(&self) -> bool {
        matches!(self, RuleKind::Base)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Base => "base",
            RuleKind::Module => "module",
            RuleKind::Composite => "composite",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "base" | "Base" => Ok(RuleKind::Base),
            "module" | "Module" => Ok(RuleKind::Module),
            "composite" | "Composite" => Ok(RuleKind::Composite),
            other => Err(format!(
                "Invalid kind '{}'. Valid values: base, module, composite",
                other
            )),
        }
    }
}

/// A named, reusable documentation fragment.
///
/// Ids follow `<category>-<module>-<sequence>` (e.g. `python-conda-001`);
/// the second segment is what keywords match against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Unique identifier within a catalog.
    pub id: String,
    pub kind: RuleKind,
    /// Display name, listed in the guide's table of contents.
    pub title: String,
    /// Markdown inserted verbatim.
    pub body: String,
    /// Ids of rules that must accompany this one.
    pub requires: Vec<String>,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        kind: RuleKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            body: body.into(),
            requires: Vec::new(),
        }
    }

    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }

    /// The module segment of the id: `python-conda-001` -> `conda`.
    ///
    /// Returns `None` when the id has no second segment or it is empty.
    pub fn module_name(&self) -> Option<&str> {
        self.id.split('-').nth(1).filter(|m| !m.is_empty())
    }

    /// Whether this rule's module segment equals `keyword`, ignoring case.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.module_name()
            .is_some_and(|m| m.to_lowercase() == keyword.to_lowercase())
    }
}

/// A rule record as read from an untyped source, before validation.
///
/// Accepts both the current field names and the older `type`/`name`/`content`
/// spellings.
#[derive(Debug, Default, Deserialize)]
pub struct RawRule {
    pub id: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    #[serde(alias = "name")]
    pub title: Option<String>,
    #[serde(alias = "content")]
    pub body: Option<String>,
    #[serde(default)]
    pub requires: Option<Vec<String>>,
}

impl RawRule {
    /// Check required fields and build a [`Rule`].
    ///
    /// `origin` names the entry in the returned error.
    pub fn validate(self, origin: &str) -> Result<Rule, SourceLoadError> {
        let missing = |field: &str| SourceLoadError::new(origin, format!("missing field `{}`", field));

        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("id"))?;
        let kind = self
            .kind
            .ok_or_else(|| missing("kind"))?
            .parse::<RuleKind>()
            .map_err(|e| SourceLoadError::new(origin, e))?;
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| missing("title"))?;
        let body = self.body.ok_or_else(|| missing("body"))?;

        Ok(Rule {
            id,
            kind,
            title,
            body,
            requires: self.requires.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name() {
        let rule = Rule::new("python-conda-001", RuleKind::Module, "Conda", "");
        assert_eq!(rule.module_name(), Some("conda"));

        let base = Rule::new("base-python-001", RuleKind::Base, "Python", "");
        assert_eq!(base.module_name(), Some("python"));
    }

    #[test]
    fn test_module_name_missing_segment() {
        assert_eq!(Rule::new("standalone", RuleKind::Module, "t", "").module_name(), None);
        assert_eq!(Rule::new("a--001", RuleKind::Module, "t", "").module_name(), None);
    }

    #[test]
    fn test_matches_keyword_is_exact_and_case_insensitive() {
        let rule = Rule::new("python-FastAPI-001", RuleKind::Module, "FastAPI", "");
        assert!(rule.matches_keyword("fastapi"));
        assert!(rule.matches_keyword("FASTAPI"));
        assert!(!rule.matches_keyword("fast"));
        assert!(!rule.matches_keyword("python"));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("base".parse::<RuleKind>(), Ok(RuleKind::Base));
        assert_eq!("Composite".parse::<RuleKind>(), Ok(RuleKind::Composite));
        assert!("plugin".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_raw_rule_accepts_legacy_field_names() {
        let raw: RawRule = serde_yaml::from_str(
            "id: python-conda-001\ntype: module\nname: Conda Environment Setup\ncontent: body\nrequires: [base-python-001]\n",
        )
        .unwrap();
        let rule = raw.validate("conda.yaml").unwrap();

        assert_eq!(rule.kind, RuleKind::Module);
        assert_eq!(rule.title, "Conda Environment Setup");
        assert_eq!(rule.requires, vec!["base-python-001".to_string()]);
    }

    #[test]
    fn test_raw_rule_missing_field() {
        let raw: RawRule =
            serde_yaml::from_str("id: base-python-001\nkind: base\nbody: text\n").unwrap();
        let err = raw.validate("base.yaml").unwrap_err();

        assert_eq!(err.origin, "base.yaml");
        assert_eq!(err.reason, "missing field `title`");
    }

    #[test]
    fn test_raw_rule_invalid_kind() {
        let raw: RawRule =
            serde_yaml::from_str("id: x-y-001\nkind: plugin\ntitle: X\nbody: text\n").unwrap();
        let err = raw.validate("x.yaml").unwrap_err();
        assert!(err.reason.contains("Invalid kind 'plugin'"));
    }

    #[test]
    fn test_raw_rule_blank_id() {
        let raw: RawRule = serde_yaml::from_str("id: '  '\nkind: base\ntitle: X\nbody: b\n").unwrap();
        assert_eq!(raw.validate("x.yaml").unwrap_err().reason, "missing field `id`");
    }
}
