pub mod bar;
pub mod client;
pub mod config;
pub mod drag;
pub mod errors;
pub mod geometry;
pub mod history;
pub mod keyboard;
pub mod layout;
pub mod logging;
pub mod monitor;
pub mod size_hints;
pub mod state;
pub mod window_manager;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::ColorScheme;
    pub use crate::geometry::Rect;
    pub use crate::keyboard::{Arg, ButtonBinding, Click, KeyAction, KeyBinding, keysyms};
    pub use crate::layout::LayoutKind;
    pub use crate::monitor::TabMode;
    pub use crate::{Config, Rule, Scratchpad, TagConfig};
    pub use x11rb::protocol::xproto::KeyButMask;
}

use crate::client::TagMask;
use crate::keyboard::{Arg, ButtonBinding, Click, KeyAction, KeyBinding, keysyms};
use crate::layout::LayoutKind;
use crate::monitor::TabMode;
use x11rb::protocol::xproto::KeyButMask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub foreground: u32,
    pub background: u32,
    pub underline: u32,
}

/// A named tag with optional per-tag layout defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TagConfig {
    pub name: String,
    pub layout: Option<LayoutKind>,
    pub master_fraction: Option<f32>,
    pub master_count: Option<usize>,
}

impl TagConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layout: None,
            master_fraction: None,
            master_count: None,
        }
    }
}

/// Placement rule, matched by substring against class, instance and title.
/// Absent patterns match anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
    pub tags: TagMask,
    pub floating: bool,
    pub centered: bool,
    pub monitor: Option<usize>,
}

/// Window recognised by its title and the command that starts it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scratchpad {
    pub name: String,
    pub command: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Appearance
    pub border_width: u32,
    pub border_normal: u32,
    pub border_selected: u32,
    pub border_urgent: u32,
    pub border_floating_normal: u32,
    pub border_floating_selected: u32,
    pub font: String,

    // Bar color schemes
    pub scheme_normal: ColorScheme,
    pub scheme_selected: ColorScheme,
    pub scheme_occupied: ColorScheme,
    pub scheme_urgent: ColorScheme,
    /// Colors picked by the bytes 1..=N in the status text.
    pub status_colors: Vec<u32>,

    // Tab bar color schemes
    pub scheme_tab_normal: ColorScheme,
    pub scheme_tab_selected: ColorScheme,
    pub scheme_tab_master: ColorScheme,
    pub scheme_tab_master_selected: ColorScheme,

    // Behaviour
    pub snap: u32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub tab_mode: TabMode,
    pub top_tab: bool,
    pub tab_width: u32,
    pub respect_size_hints: bool,
    pub save_floating_geometry: bool,
    pub focus_follows_mouse: bool,
    pub mouse_follows_focus: bool,
    pub transfer_pointer: bool,

    // Master defaults
    pub default_layout: LayoutKind,
    pub master_fraction: f32,
    pub master_count: usize,

    pub tags: Vec<TagConfig>,
    pub rules: Vec<Rule>,
    pub rotation_excluded_classes: Vec<String>,
    pub scratchpad: Scratchpad,

    // Input
    pub modkey: KeyButMask,
    pub keybindings: Vec<KeyBinding>,
    pub buttons: Vec<ButtonBinding>,
}

impl Default for Config {
    fn default() -> Self {
        const MODKEY: KeyButMask = KeyButMask::MOD4;
        const SHIFT: KeyButMask = KeyButMask::SHIFT;
        const CONTROL: KeyButMask = KeyButMask::CONTROL;

        const TERMINAL: &str = "st";

        let spawn = |command: &[&str]| Arg::Array(command.iter().map(|s| s.to_string()).collect());

        let mut keybindings = vec![
            KeyBinding::new(vec![MODKEY], keysyms::XK_RETURN, KeyAction::Spawn, spawn(&[TERMINAL])),
            KeyBinding::new(
                vec![MODKEY],
                keysyms::XK_P,
                KeyAction::Spawn,
                spawn(&["dmenu_run"]),
            ),
            KeyBinding::new(vec![MODKEY], keysyms::XK_GRAVE, KeyAction::ToggleScratchpad, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_B, KeyAction::ToggleBar, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_W, KeyAction::CycleTabMode, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_J, KeyAction::FocusStack, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_K, KeyAction::FocusStack, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY, CONTROL], keysyms::XK_J, KeyAction::FocusStackNoRaise, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY, CONTROL], keysyms::XK_K, KeyAction::FocusStackNoRaise, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_J, KeyAction::PushDown, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_K, KeyAction::PushUp, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_I, KeyAction::IncMaster, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_D, KeyAction::IncMaster, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_H, KeyAction::SetMasterFactor, Arg::Float(-0.05)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_L, KeyAction::SetMasterFactor, Arg::Float(0.05)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_H, KeyAction::SetClientFactor, Arg::Float(0.25)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_L, KeyAction::SetClientFactor, Arg::Float(-0.25)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_O, KeyAction::SetClientFactor, Arg::Float(0.0)),
            KeyBinding::new(vec![MODKEY, CONTROL, SHIFT], keysyms::XK_O, KeyAction::ResetClientFactors, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_RETURN, KeyAction::Zoom, Arg::None),
            KeyBinding::new(vec![KeyButMask::MOD1], keysyms::XK_TAB, KeyAction::AltTab, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_TAB, KeyAction::ViewPrevious, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_C, KeyAction::KillClient, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_T, KeyAction::SetLayout, Arg::Layout(LayoutKind::Tile)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_F, KeyAction::SetLayout, Arg::Layout(LayoutKind::Floating)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_M, KeyAction::SetLayout, Arg::Layout(LayoutKind::Monocle)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_U, KeyAction::SetLayout, Arg::Layout(LayoutKind::Bstack)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_G, KeyAction::SetLayout, Arg::Layout(LayoutKind::Grid)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_C, KeyAction::SetLayout, Arg::Layout(LayoutKind::Deck)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_SPACE, KeyAction::SetLayout, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_N, KeyAction::CycleLayout, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_SPACE, KeyAction::ToggleFloating, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_F, KeyAction::ToggleFullScreen, Arg::None),
            KeyBinding::new(vec![MODKEY], keysyms::XK_0, KeyAction::View, Arg::UInt(!0)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_0, KeyAction::Tag, Arg::UInt(!0)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_COMMA, KeyAction::FocusMonitor, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_PERIOD, KeyAction::FocusMonitor, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_COMMA, KeyAction::TagMonitor, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_PERIOD, KeyAction::TagMonitor, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_LEFT, KeyAction::CycleView, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY], keysyms::XK_RIGHT, KeyAction::CycleView, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_LEFT, KeyAction::CycleTag, Arg::Int(-1)),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_RIGHT, KeyAction::CycleTag, Arg::Int(1)),
            KeyBinding::new(vec![MODKEY, CONTROL], keysyms::XK_F, KeyAction::ToggleFocusFollowsMouse, Arg::None),
            KeyBinding::new(vec![MODKEY, CONTROL], keysyms::XK_M, KeyAction::ToggleMouseFollowsFocus, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_R, KeyAction::Restart, Arg::None),
            KeyBinding::new(vec![MODKEY, SHIFT], keysyms::XK_Q, KeyAction::Quit, Arg::None),
        ];

        let tag_keys = [
            keysyms::XK_1,
            keysyms::XK_2,
            keysyms::XK_3,
            keysyms::XK_4,
            keysyms::XK_5,
            keysyms::XK_6,
            keysyms::XK_7,
            keysyms::XK_8,
            keysyms::XK_9,
        ];
        for (index, &key) in tag_keys.iter().enumerate() {
            let mask = Arg::UInt(1 << index);
            keybindings.push(KeyBinding::new(vec![MODKEY], key, KeyAction::View, mask.clone()));
            keybindings.push(KeyBinding::new(vec![MODKEY, CONTROL], key, KeyAction::ToggleView, mask.clone()));
            keybindings.push(KeyBinding::new(vec![MODKEY, SHIFT], key, KeyAction::Tag, mask.clone()));
            keybindings.push(KeyBinding::new(vec![MODKEY, CONTROL, SHIFT], key, KeyAction::ToggleTag, mask));
        }

        let buttons = vec![
            ButtonBinding::new(Click::LayoutSymbol, vec![], 1, KeyAction::SetLayout, Arg::None),
            ButtonBinding::new(Click::LayoutSymbol, vec![], 3, KeyAction::SetLayout, Arg::Layout(LayoutKind::Monocle)),
            ButtonBinding::new(Click::WindowTitle, vec![], 2, KeyAction::Zoom, Arg::None),
            ButtonBinding::new(Click::StatusText, vec![], 2, KeyAction::Spawn, spawn(&[TERMINAL])),
            ButtonBinding::new(Click::ClientWindow, vec![MODKEY], 1, KeyAction::MoveMouse, Arg::None),
            ButtonBinding::new(Click::ClientWindow, vec![MODKEY], 2, KeyAction::ToggleFloating, Arg::None),
            ButtonBinding::new(Click::ClientWindow, vec![MODKEY], 3, KeyAction::ResizeMouse, Arg::None),
            ButtonBinding::new(Click::TagBar, vec![], 1, KeyAction::View, Arg::None),
            ButtonBinding::new(Click::TagBar, vec![], 3, KeyAction::ToggleView, Arg::None),
            ButtonBinding::new(Click::TagBar, vec![MODKEY], 1, KeyAction::Tag, Arg::None),
            ButtonBinding::new(Click::TagBar, vec![MODKEY], 3, KeyAction::ToggleTag, Arg::None),
            ButtonBinding::new(Click::TabBar, vec![], 1, KeyAction::FocusTab, Arg::None),
        ];

        let mut tags: Vec<TagConfig> = ["1", "2", "3", "4", "5", "6", "7", "8", "9"]
            .into_iter()
            .map(TagConfig::named)
            .collect();
        tags[1].layout = Some(LayoutKind::Bstack);
        tags[1].master_fraction = Some(0.63);

        Self {
            border_width: 1,
            border_normal: 0x444444,
            border_selected: 0x6dade3,
            border_urgent: 0xff0000,
            border_floating_normal: 0x1a1b26,
            border_floating_selected: 0xad8ee6,
            font: "monospace:size=10".to_string(),
            scheme_normal: ColorScheme {
                foreground: 0xbbbbbb,
                background: 0x1a1b26,
                underline: 0x444444,
            },
            scheme_selected: ColorScheme {
                foreground: 0x0db9d7,
                background: 0x1a1b26,
                underline: 0xad8ee6,
            },
            scheme_occupied: ColorScheme {
                foreground: 0x0db9d7,
                background: 0x1a1b26,
                underline: 0x0db9d7,
            },
            scheme_urgent: ColorScheme {
                foreground: 0x1a1b26,
                background: 0xf7768e,
                underline: 0xf7768e,
            },
            status_colors: vec![0xbbbbbb, 0x0db9d7, 0xf7768e, 0x9ece6a, 0xe0af68],
            scheme_tab_normal: ColorScheme {
                foreground: 0xbbbbbb,
                background: 0x1a1b26,
                underline: 0x444444,
            },
            scheme_tab_selected: ColorScheme {
                foreground: 0x1a1b26,
                background: 0x0db9d7,
                underline: 0x0db9d7,
            },
            scheme_tab_master: ColorScheme {
                foreground: 0xad8ee6,
                background: 0x1a1b26,
                underline: 0xad8ee6,
            },
            scheme_tab_master_selected: ColorScheme {
                foreground: 0x1a1b26,
                background: 0xad8ee6,
                underline: 0xad8ee6,
            },
            snap: 25,
            show_bar: true,
            top_bar: true,
            tab_mode: TabMode::Auto,
            top_tab: true,
            tab_width: 200,
            respect_size_hints: false,
            save_floating_geometry: true,
            focus_follows_mouse: true,
            mouse_follows_focus: false,
            transfer_pointer: true,
            default_layout: LayoutKind::Tile,
            master_fraction: 0.55,
            master_count: 1,
            tags,
            rules: vec![
                Rule {
                    class: Some("Gimp".to_string()),
                    floating: true,
                    centered: true,
                    ..Rule::default()
                },
                Rule {
                    class: Some("Firefox".to_string()),
                    tags: 1 << 8,
                    centered: true,
                    ..Rule::default()
                },
            ],
            rotation_excluded_classes: vec!["trayer".to_string(), "stalonetray".to_string()],
            scratchpad: Scratchpad {
                name: "scratchpad".to_string(),
                command: vec![
                    TERMINAL.to_string(),
                    "-t".to_string(),
                    "scratchpad".to_string(),
                    "-g".to_string(),
                    "120x34".to_string(),
                ],
            },
            modkey: MODKEY,
            keybindings,
            buttons,
        }
    }
}
