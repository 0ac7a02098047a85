use crate::config::{TEMPLATE, parse_color, parse_config, preprocess_variables};
use crate::errors::ConfigError;
use crate::prelude::*;

fn binding<'a>(config: &'a Config, keysym: u32, action: KeyAction) -> Option<&'a KeyBinding> {
    config
        .keybindings
        .iter()
        .find(|binding| binding.keysym == keysym && binding.action == action)
}

#[test]
fn should_parse_hex_colors() {
    assert_eq!(parse_color("#ff0000").ok(), Some(0xff0000));
    assert_eq!(parse_color("#1A1b26").ok(), Some(0x1a1b26));
    assert!(matches!(parse_color("ff0000"), Err(ConfigError::InvalidColor(_))));
    assert!(matches!(parse_color("#ff00"), Err(ConfigError::InvalidColor(_))));
    assert!(matches!(parse_color("#gg0000"), Err(ConfigError::InvalidColor(_))));
}

#[test]
fn should_substitute_the_longest_variable_first() {
    let input = "#DEFINE $a = 1\n#DEFINE $ab = 2\n(x: $ab, y: $a)";

    let output = preprocess_variables(input).expect("valid defines");

    assert!(output.contains("(x: 2, y: 1)"));
    assert!(!output.contains("#DEFINE"));
}

#[test]
fn should_let_a_later_define_win() {
    let input = "#DEFINE $a = 1\n#DEFINE $a = 3\n(x: $a)";

    let output = preprocess_variables(input).expect("valid defines");

    assert!(output.contains("(x: 3)"));
}

#[test]
fn should_reject_broken_defines() {
    assert!(matches!(
        preprocess_variables("#DEFINE $a 1"),
        Err(ConfigError::InvalidDefine(_))
    ));
    assert!(matches!(
        preprocess_variables("#DEFINE a = 1"),
        Err(ConfigError::InvalidVariableName(name)) if name == "a"
    ));
}

#[test]
fn should_report_undefined_variables() {
    let result = preprocess_variables("(font: $nope)");

    assert!(matches!(result, Err(ConfigError::UndefinedVariable(name)) if name == "$nope"));
}

#[test]
fn should_ignore_variables_in_comments() {
    assert!(preprocess_variables("// uses $nothing\n()").is_ok());
}

#[test]
fn should_parse_the_shipped_template() {
    let config = parse_config(TEMPLATE).expect("template parses");

    assert_eq!(config.tags.len(), 9);
    assert_eq!(config.tags[0].name, "1");
    assert_eq!(config.border_width, 1);
    assert_eq!(config.border_selected, 0x005577);
    assert_eq!(config.snap, 32);
    assert_eq!(config.tab_mode, TabMode::Auto);
    assert_eq!(config.status_colors.len(), 4);
    assert_eq!(config.modkey, KeyButMask::MOD4);
    assert_eq!(config.buttons.len(), 12);
    assert_eq!(config.scratchpad.name, "scratchpad");

    assert_eq!(config.rules.len(), 2);
    assert!(config.rules[0].floating);
    assert!(config.rules[0].centered);
    assert_eq!(config.rules[1].tags, 256);
}

#[test]
fn should_convert_template_arguments_by_action() {
    let config = parse_config(TEMPLATE).expect("template parses");

    let view = binding(&config, keysyms::XK_3, KeyAction::View).expect("bound");
    assert_eq!(view.arg, Arg::UInt(4));
    assert_eq!(view.modifiers, vec![KeyButMask::MOD4]);

    let all = binding(&config, keysyms::XK_0, KeyAction::View).expect("bound");
    assert_eq!(all.arg, Arg::UInt(u32::MAX));

    let monocle = binding(&config, keysyms::XK_M, KeyAction::SetLayout).expect("bound");
    assert_eq!(monocle.arg, Arg::Layout(LayoutKind::Monocle));

    let shrink = binding(&config, keysyms::XK_H, KeyAction::SetMasterFactor).expect("bound");
    assert_eq!(shrink.arg, Arg::Float(-0.05));

    let terminal = binding(&config, keysyms::XK_RETURN, KeyAction::Spawn).expect("bound");
    assert_eq!(terminal.arg, Arg::Array(vec!["st".to_string()]));

    let focus = binding(&config, keysyms::XK_K, KeyAction::FocusStack).expect("bound");
    assert_eq!(focus.arg, Arg::Int(-1));
}

#[test]
fn should_fall_back_to_defaults_for_missing_fields() {
    let config = parse_config("()").expect("empty config parses");
    let defaults = Config::default();

    assert_eq!(config.tags, defaults.tags);
    assert_eq!(config.keybindings, defaults.keybindings);
    assert_eq!(config.buttons, defaults.buttons);
    assert_eq!(config.master_fraction, defaults.master_fraction);
}

#[test]
fn should_apply_the_configured_modkey() {
    let config = parse_config(
        "(modkey: Mod1, keybindings: [(modifiers: [Mod, Shift], key: Q, action: Quit)])",
    )
    .expect("parses");

    assert_eq!(config.keybindings.len(), 1);
    assert_eq!(
        config.keybindings[0].modifiers,
        vec![KeyButMask::MOD1, KeyButMask::SHIFT]
    );
    assert_eq!(config.keybindings[0].keysym, keysyms::XK_Q);
}

#[test]
fn should_reject_an_empty_tag_list() {
    assert!(matches!(parse_config("(tags: [])"), Err(ConfigError::NoTags)));
}

#[test]
fn should_reject_more_tags_than_the_mask_holds() {
    let names: Vec<String> = (0..32).map(|n| format!("\"{}\"", n)).collect();
    let input = format!("(tags: [{}])", names.join(", "));

    assert!(matches!(parse_config(&input), Err(ConfigError::TooManyTags(32))));
}

#[test]
fn should_reject_an_out_of_range_master_fraction() {
    let result = parse_config("(mfact: 0.99)");

    assert!(matches!(result, Err(ConfigError::InvalidValue { field: "mfact", .. })));
}

#[test]
fn should_reject_unknown_layout_names() {
    let input = "(keybindings: [(modifiers: [Mod], key: T, action: SetLayout, arg: \"spiral\")])";

    assert!(matches!(
        parse_config(input),
        Err(ConfigError::InvalidValue { field: "layout", .. })
    ));
}

#[test]
fn should_reject_bad_colors_and_syntax() {
    assert!(matches!(
        parse_config("(border_normal: \"red\")"),
        Err(ConfigError::InvalidColor(_))
    ));
    assert!(matches!(
        parse_config("(border_width: \"wide\")"),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn should_bind_every_tag_in_the_defaults() {
    let config = Config::default();

    let views = config
        .keybindings
        .iter()
        .filter(|binding| binding.action == KeyAction::View)
        .count();
    assert_eq!(views, config.tags.len() + 1);
    assert!(config.buttons.iter().any(|b| b.click == Click::TabBar));
}

#[test]
fn should_accept_tags_with_their_own_master_settings() {
    let config = parse_config("(tags: [\"1\", (name: \"web\", mfact: 0.7, nmaster: 2)])")
        .expect("parses");

    assert_eq!(config.tags.len(), 2);
    assert_eq!(config.tags[0], TagConfig::named("1"));
    assert_eq!(config.tags[1].name, "web");
    assert_eq!(config.tags[1].master_fraction, Some(0.7));
    assert_eq!(config.tags[1].master_count, Some(2));
    assert_eq!(config.tags[1].layout, None);
}
