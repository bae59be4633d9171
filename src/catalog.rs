//! Read-only registry of the rules available to one generation run.

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::Rule;

/// Immutable collection of rules keyed by id.
///
/// Built once from whatever a [`RuleSource`](crate::sources::RuleSource)
/// produced. Iteration follows the order the rules were supplied in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(rules: Vec<Rule>) -> Result<Self, AppError> {
        let mut index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            if index.insert(rule.id.clone(), i).is_some() {
                return Err(AppError::DuplicateRule(rule.id.clone()));
            }
        }
        Ok(Self { rules, index })
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `(rule id, missing id)` for every `requires` entry with no catalog rule.
    pub fn dangling_requirements(&self) -> Vec<(&str, &str)> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.requires
                    .iter()
                    .filter(|req| !self.contains(req))
                    .map(move |req| (rule.id.as_str(), req.as_str()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;

    fn rule(id: &str) -> Rule {
        Rule::new(id, RuleKind::Module, id, "")
    }

    #[test]
    fn test_get_and_order() {
        let catalog = Catalog::new(vec![rule("b-two-001"), rule("a-one-001")]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a-one-001").map(|r| r.id.as_str()), Some("a-one-001"));
        assert!(catalog.get("missing").is_none());

        let ids: Vec<_> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b-two-001", "a-one-001"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::new(vec![rule("x-y-001"), rule("x-y-001")]).unwrap_err();
        assert!(matches!(err, AppError::DuplicateRule(id) if id == "x-y-001"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(vec![]).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_dangling_requirements() {
        let catalog = Catalog::new(vec![
            rule("base-python-001"),
            rule("python-conda-001").with_requires(["base-python-001", "base-missing-001"]),
        ])
        .unwrap();

        assert_eq!(
            catalog.dangling_requirements(),
            vec![("python-conda-001", "base-missing-001")]
        );
    }
}
