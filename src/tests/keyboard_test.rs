use crate::keyboard::keysyms::{XK_F1, XK_F12, XK_J, XK_K, format_keysym};
use crate::keyboard::{
    Arg, ButtonBinding, Click, KeyAction, KeyBinding, KeyboardMapping, clean_mask,
    matching_buttons, matching_keys,
};
use crate::layout::LayoutKind;
use x11rb::protocol::xproto::KeyButMask;

const SHIFT: u16 = 1;
const LOCK: u16 = 1 << 1;
const NUMLOCK: u16 = 1 << 4;
const MOD4: u16 = 1 << 6;
const BUTTON1: u16 = 1 << 8;

/// Keycode 8 is J, keycode 9 is K, with NumLock on Mod2.
fn mapping() -> KeyboardMapping {
    KeyboardMapping::from_parts(8, 2, vec![XK_J, 0x4a, XK_K, 0x4b], NUMLOCK)
}

fn bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new(vec![KeyButMask::MOD4], XK_J, KeyAction::FocusStack, Arg::Int(1)),
        KeyBinding::new(
            vec![KeyButMask::MOD4, KeyButMask::SHIFT],
            XK_J,
            KeyAction::PushDown,
            Arg::None,
        ),
        KeyBinding::new(vec![KeyButMask::MOD4], XK_K, KeyAction::FocusStack, Arg::Int(-1)),
    ]
}

fn buttons() -> Vec<ButtonBinding> {
    vec![
        ButtonBinding::new(Click::TagBar, vec![], 1, KeyAction::View, Arg::None),
        ButtonBinding::new(Click::TagBar, vec![KeyButMask::MOD4], 1, KeyAction::Tag, Arg::None),
        ButtonBinding::new(
            Click::LayoutSymbol,
            vec![],
            3,
            KeyAction::SetLayout,
            Arg::Layout(LayoutKind::Monocle),
        ),
        ButtonBinding::new(Click::TabBar, vec![], 1, KeyAction::FocusTab, Arg::None),
    ]
}

#[test]
fn should_look_up_keysyms_by_keycode() {
    let mapping = mapping();

    assert_eq!(mapping.keysym_for(8), XK_J);
    assert_eq!(mapping.keysym_for(9), XK_K);
    assert_eq!(mapping.keysym_for(7), 0);
    assert_eq!(mapping.keysym_for(20), 0);
    assert_eq!(mapping.keycodes_for(XK_K), vec![9]);
    assert!(mapping.keycodes_for(0xffff).is_empty());
}

#[test]
fn should_strip_lock_modifiers_and_buttons() {
    assert_eq!(clean_mask(MOD4 | LOCK | NUMLOCK, NUMLOCK), MOD4);
    assert_eq!(clean_mask(SHIFT | BUTTON1, 0), SHIFT);
    assert_eq!(clean_mask(MOD4 | NUMLOCK, 0), MOD4 | NUMLOCK);
}

#[test]
fn should_match_keys_regardless_of_lock_state() {
    let bindings = bindings();
    let mapping = mapping();

    assert_eq!(
        matching_keys(&bindings, &mapping, 8, MOD4 | LOCK | NUMLOCK),
        vec![(KeyAction::FocusStack, Arg::Int(1))]
    );
    assert_eq!(
        matching_keys(&bindings, &mapping, 8, MOD4 | SHIFT),
        vec![(KeyAction::PushDown, Arg::None)]
    );
    assert_eq!(
        matching_keys(&bindings, &mapping, 9, MOD4),
        vec![(KeyAction::FocusStack, Arg::Int(-1))]
    );
    assert!(matching_keys(&bindings, &mapping, 9, SHIFT).is_empty());
    assert!(matching_keys(&bindings, &mapping, 30, MOD4).is_empty());
}

#[test]
fn should_hand_the_clicked_tag_to_bindings_without_an_argument() {
    let buttons = buttons();
    let clicked = Arg::UInt(1 << 2);

    assert_eq!(
        matching_buttons(&buttons, Click::TagBar, 1, LOCK, 0, &clicked),
        vec![(KeyAction::View, clicked.clone())]
    );
    assert_eq!(
        matching_buttons(&buttons, Click::TagBar, 1, MOD4, 0, &clicked),
        vec![(KeyAction::Tag, clicked.clone())]
    );
    assert_eq!(
        matching_buttons(&buttons, Click::TabBar, 1, 0, 0, &Arg::Int(2)),
        vec![(KeyAction::FocusTab, Arg::Int(2))]
    );
}

#[test]
fn should_keep_configured_button_arguments() {
    let buttons = buttons();

    assert_eq!(
        matching_buttons(&buttons, Click::LayoutSymbol, 3, 0, 0, &Arg::UInt(1)),
        vec![(KeyAction::SetLayout, Arg::Layout(LayoutKind::Monocle))]
    );
    assert!(matching_buttons(&buttons, Click::StatusText, 1, 0, 0, &Arg::None).is_empty());
}

#[test]
fn should_read_tag_masks_from_arguments() {
    assert_eq!(Arg::UInt(4).tag_mask(), Some(4));
    assert_eq!(Arg::Int(2).tag_mask(), Some(2));
    assert_eq!(Arg::Int(-1).tag_mask(), Some(u32::MAX));
    assert_eq!(Arg::Str("1".to_string()).tag_mask(), None);
}

#[test]
fn should_convert_numeric_arguments() {
    assert_eq!(Arg::Int(1).float(), Some(1.0));
    assert_eq!(Arg::UInt(u32::MAX).int(), None);
    assert_eq!(Arg::UInt(3).int(), Some(3));
    assert_eq!(Arg::None.int(), None);
}

#[test]
fn should_run_plain_strings_through_the_shell() {
    assert_eq!(
        Arg::Str("firefox --new-window".to_string()).command(),
        Some(vec![
            "sh".to_string(),
            "-c".to_string(),
            "firefox --new-window".to_string()
        ])
    );
    assert_eq!(
        Arg::Array(vec!["st".to_string()]).command(),
        Some(vec!["st".to_string()])
    );
    assert_eq!(Arg::Array(Vec::new()).command(), None);
}

#[test]
fn should_name_keysyms_for_logging() {
    assert_eq!(format_keysym(XK_J), "J");
    assert_eq!(format_keysym(0x002c), ",");
    assert_eq!(format_keysym(XK_F1), "F1");
    assert_eq!(format_keysym(XK_F12), "F12");
    assert_eq!(format_keysym(0xff0d), "Return");
    assert_eq!(format_keysym(0xfe03), "0xfe03");
}
