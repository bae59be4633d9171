//! Keyword resolution: which rules a keyword list selects.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::Rule;

/// Id of the rule returned when `python` is the only keyword.
pub const BASE_PYTHON_ID: &str = "base-python-001";

const PYTHON_KEYWORD: &str = "python";

/// Deduplicated rules selected for one keyword list.
///
/// Keeps first-seen order, which the composer relies on as its tie-break
/// between rules of the same kind.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    rules: Vec<&'a Rule>,
    seen: HashSet<&'a str>,
}

impl<'a> Selection<'a> {
    /// Add a rule unless one with the same id is already present.
    fn insert(&mut self, rule: &'a Rule) -> bool {
        if self.seen.insert(rule.id.as_str()) {
            self.rules.push(rule);
            true
        } else {
            false
        }
    }

    pub fn rules(&self) -> &[&'a Rule] {
        &self.rules
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Selected ids, sorted, for membership comparisons.
    pub fn ids(&self) -> Vec<&'a str> {
        let mut ids: Vec<_> = self.seen.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> FromIterator<&'a Rule> for Selection<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Rule>>(iter: I) -> Self {
        let mut selection = Selection::default();
        for rule in iter {
            selection.insert(rule);
        }
        selection
    }
}

/// Split a comma-separated argument into normalized keywords.
///
/// `" Python, conda,"` -> `["python", "conda", ""]`. Blank entries are kept
/// so the entry count matches the argument.
pub fn parse_keywords(arg: &str) -> Vec<String> {
    normalize_keywords(arg.split(','))
}

/// Trim and lower-case keywords.
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .collect()
}

/// Resolve keywords against the catalog.
///
/// A lone `python` entry selects only [`BASE_PYTHON_ID`]; blank entries count
/// towards "lone" but never match a rule. Otherwise every
/// rule whose module segment equals a keyword is selected together with the
/// rules named in its `requires` list. Requirements are expanded one level
/// and unknown ids are skipped.
pub fn resolve<'a, S: AsRef<str>>(catalog: &'a Catalog, keywords: &[S]) -> Selection<'a> {
    let keywords = normalize_keywords(keywords);
    let mut selection = Selection::default();

    if let [only] = keywords.as_slice() {
        if only == PYTHON_KEYWORD {
            if let Some(base) = catalog.get(BASE_PYTHON_ID) {
                tracing::debug!(rule = %base.id, "Lone 'python' keyword, selecting base rule");
                selection.insert(base);
            }
            return selection;
        }
    }

    for keyword in keywords.iter().filter(|k| !k.is_empty()) {
        let mut matched = 0usize;
        for rule in catalog.iter().filter(|r| r.matches_keyword(keyword)) {
            matched += 1;
            tracing::debug!(keyword = %keyword, rule = %rule.id, "Matched rule");
            selection.insert(rule);

            for required in rule.requires.iter().filter_map(|id| catalog.get(id)) {
                if selection.insert(required) {
                    tracing::debug!(rule = %rule.id, required = %required.id, "Added required rule");
                }
            }
        }
        if matched == 0 {
            tracing::debug!(keyword = %keyword, "No rules matched keyword");
        }
    }

    selection
}
