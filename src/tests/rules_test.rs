use super::{bare_config, single_head, window_info};
use crate::Rule;
use crate::client::rules::{RuleOutcome, apply_rules, is_rotation_excluded};

fn rule(class: &str) -> Rule {
    Rule {
        class: Some(class.to_string()),
        centered: true,
        ..Rule::default()
    }
}

#[test]
fn should_or_tags_but_take_placement_from_the_last_match() {
    let rules = vec![
        Rule {
            tags: 1,
            floating: true,
            monitor: Some(1),
            ..rule("Foo")
        },
        Rule {
            instance: Some("foo".to_string()),
            tags: 1 << 2,
            floating: false,
            centered: false,
            ..Rule::default()
        },
    ];

    let outcome = apply_rules(&rules, "Foo", "foo", "some title");

    assert_eq!(outcome.tags, 0b101);
    assert!(!outcome.floating);
    assert!(!outcome.centered);
    // A later match without a monitor keeps the earlier one.
    assert_eq!(outcome.monitor, Some(1));
}

#[test]
fn should_match_by_substring() {
    let rules = vec![Rule {
        title: Some("Picture".to_string()),
        floating: true,
        ..Rule::default()
    }];

    assert!(apply_rules(&rules, "Firefox", "Navigator", "Picture-in-Picture").floating);
    assert!(!apply_rules(&rules, "Firefox", "Navigator", "Mozilla Firefox").floating);
}

#[test]
fn should_require_every_present_pattern() {
    let rules = vec![Rule {
        instance: Some("gimp".to_string()),
        floating: true,
        ..rule("Gimp")
    }];

    assert!(apply_rules(&rules, "Gimp", "gimp", "").floating);
    assert!(!apply_rules(&rules, "Gimp", "other", "").floating);
}

#[test]
fn should_default_when_nothing_matches() {
    let outcome = apply_rules(&[rule("Foo")], "Bar", "bar", "bar");

    assert_eq!(outcome, RuleOutcome::default());
    assert!(outcome.centered);
}

#[test]
fn should_place_matching_windows_on_the_rule_tags() {
    let mut config = bare_config();
    config.rules = vec![Rule {
        tags: 1 << 2,
        floating: false,
        ..rule("Foo")
    }];
    let mut state = single_head(config);

    state.manage(window_info(1, "Foo"));

    let client = state.client(1).expect("managed");
    assert_eq!(client.tags, 0b100);
    assert!(!client.is_floating);
    assert!(!state.is_visible(1));
}

#[test]
fn should_keep_the_current_view_for_rules_without_tags() {
    let mut config = bare_config();
    config.rules = vec![Rule {
        floating: true,
        ..rule("Gimp")
    }];
    let mut state = single_head(config);
    state.view(1 << 3);

    state.manage(window_info(1, "Gimp"));

    let client = state.client(1).expect("managed");
    assert_eq!(client.tags, 1 << 3);
    assert!(client.is_floating);
}

#[test]
fn should_ignore_rules_pointing_at_missing_monitors() {
    let mut config = bare_config();
    config.rules = vec![Rule {
        monitor: Some(4),
        ..rule("Foo")
    }];
    let mut state = single_head(config);

    state.manage(window_info(1, "Foo"));

    assert_eq!(state.client(1).map(|c| c.monitor), Some(0));
}

#[test]
fn should_exclude_classes_by_substring() {
    let excluded = vec!["tray".to_string(), String::new()];

    assert!(is_rotation_excluded(&excluded, "stalonetray"));
    assert!(!is_rotation_excluded(&excluded, "Firefox"));
    assert!(!is_rotation_excluded(&[], "stalonetray"));
}
