use super::TagMask;
use crate::Rule;

/// Placement decided by the rules table for a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    /// OR of the tags of every matching rule, unmasked.
    pub tags: TagMask,
    pub floating: bool,
    pub centered: bool,
    pub monitor: Option<usize>,
}

impl Default for RuleOutcome {
    fn default() -> Self {
        Self {
            tags: 0,
            floating: false,
            centered: true,
            monitor: None,
        }
    }
}

impl Rule {
    /// Absent patterns match anything, present ones are substring matches.
    pub fn matches(&self, class: &str, instance: &str, title: &str) -> bool {
        let field_matches = |pattern: &Option<String>, value: &str| {
            pattern.as_deref().is_none_or(|pattern| value.contains(pattern))
        };

        field_matches(&self.title, title)
            && field_matches(&self.class, class)
            && field_matches(&self.instance, instance)
    }
}

/// Tags accumulate across all matching rules; floating, centered and the
/// monitor come from the last match.
pub fn apply_rules(rules: &[Rule], class: &str, instance: &str, title: &str) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for rule in rules
        .iter()
        .filter(|rule| rule.matches(class, instance, title))
    {
        outcome.floating = rule.floating;
        outcome.centered = rule.centered;
        outcome.tags |= rule.tags;
        if rule.monitor.is_some() {
            outcome.monitor = rule.monitor;
        }
    }

    outcome
}

/// Windows excluded from tab bar and focus rotation.
pub fn is_rotation_excluded(excluded_classes: &[String], class: &str) -> bool {
    excluded_classes
        .iter()
        .any(|excluded| !excluded.is_empty() && class.contains(excluded.as_str()))
}
