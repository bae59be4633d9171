//! Renders a selection into the final markdown guide.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::Rule;
use crate::services::resolver::Selection;

/// Top-level heading of every guide.
pub const GUIDE_TITLE: &str = "Project Setup Guide";

/// Base rules first; otherwise the selection's own order.
pub fn order_rules<'a>(rules: &[&'a Rule]) -> Vec<&'a Rule> {
    let mut sorted = rules.to_vec();
    // sort_by_key is stable, so same-kind rules keep their relative order
    sorted.sort_by_key(|rule| !rule.kind.is_base());
    sorted
}

/// Render the guide stamped with the current time.
pub fn compose(selection: &Selection<'_>) -> String {
    compose_at(selection, Utc::now())
}

/// Render the guide with an explicit generation timestamp.
pub fn compose_at(selection: &Selection<'_>, generated_at: DateTime<Utc>) -> String {
    let sorted = order_rules(selection.rules());

    let mut markdown = format!("# {}\n\n", GUIDE_TITLE);
    markdown.push_str(&format!(
        "Generated on: {}\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));

    for rule in &sorted {
        markdown.push_str("- ");
        markdown.push_str(&rule.title);
        markdown.push('\n');
    }
    markdown.push('\n');

    for rule in &sorted {
        markdown.push_str(&rule.body);
        markdown.push('\n');
    }

    markdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_base_rules_first() {
        let conda = Rule::new("python-conda-001", RuleKind::Module, "Conda", "c");
        let base = Rule::new("base-python-001", RuleKind::Base, "Python", "p");
        let combo = Rule::new("python-stack-001", RuleKind::Composite, "Stack", "s");

        let sorted = order_rules(&[&conda, &combo, &base]);
        let ids: Vec<_> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["base-python-001", "python-conda-001", "python-stack-001"]);
    }

    #[test]
    fn test_same_kind_keeps_input_order() {
        let z = Rule::new("python-zeta-001", RuleKind::Module, "Zeta", "");
        let a = Rule::new("python-alpha-001", RuleKind::Module, "Alpha", "");
        let b2 = Rule::new("base-node-001", RuleKind::Base, "Node", "");
        let b1 = Rule::new("base-deno-001", RuleKind::Base, "Deno", "");

        let sorted = order_rules(&[&z, &b2, &a, &b1]);
        let titles: Vec<_> = sorted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Node", "Deno", "Zeta", "Alpha"]);
    }

    #[test]
    fn test_document_layout() {
        let conda = Rule::new(
            "python-conda-001",
            RuleKind::Module,
            "Conda Environment Setup",
            "## Conda\nconda env create",
        );
        let base = Rule::new(
            "base-python-001",
            RuleKind::Base,
            "Python Base Setup",
            "## Python\n",
        );
        let selection: Selection<'_> = [&conda, &base].into_iter().collect();

        let markdown = compose_at(&selection, fixed_time());
        assert_eq!(
            markdown,
            "# Project Setup Guide\n\n\
             Generated on: 2024-05-01T12:00:00.000Z\n\n\
             - Python Base Setup\n\
             - Conda Environment Setup\n\n\
             ## Python\n\n\
             ## Conda\nconda env create\n"
        );
    }

    #[test]
    fn test_compose_uses_current_time() {
        let base = Rule::new("base-python-001", RuleKind::Base, "Python Base Setup", "body");
        let selection: Selection<'_> = [&base].into_iter().collect();

        let before = Utc::now();
        let markdown = compose(&selection);

        let stamp = markdown
            .lines()
            .find_map(|l| l.strip_prefix("Generated on: "))
            .expect("timestamp line");
        let parsed = DateTime::parse_from_rfc3339(stamp).expect("rfc3339 timestamp");
        assert!(parsed.with_timezone(&Utc) >= before - chrono::Duration::seconds(1));
        assert!(markdown.starts_with("# Project Setup Guide\n"));
    }
}
