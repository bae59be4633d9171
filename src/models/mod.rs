//! Domain models for rule selection.

mod rule;

pub use rule::{RawRule, Rule, RuleKind};
