pub mod handlers;
pub mod keysyms;

pub use handlers::{
    KeyboardMapping, clean_mask, grab_buttons, grab_keys, matching_buttons, matching_keys,
};
pub use keysyms::Keysym;

use crate::client::TagMask;
use crate::layout::LayoutKind;
use serde::Deserialize;
use x11rb::protocol::xproto::KeyButMask;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum KeyAction {
    Spawn,
    KillClient,
    Quit,
    Restart,
    FocusStack,
    FocusStackNoRaise,
    FocusMonitor,
    FocusTab,
    AltTab,
    ToggleFocusFollowsMouse,
    ToggleMouseFollowsFocus,
    PushUp,
    PushDown,
    IncMaster,
    SetMasterFactor,
    SetClientFactor,
    ResetClientFactors,
    Zoom,
    SetLayout,
    CycleLayout,
    ToggleBar,
    CycleTabMode,
    ToggleFloating,
    ToggleFullScreen,
    TagMonitor,
    ToggleScratchpad,
    View,
    ToggleView,
    Tag,
    ToggleTag,
    ViewPrevious,
    CycleView,
    CycleTag,
    MoveMouse,
    ResizeMouse,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    None,
    Int(i32),
    UInt(u32),
    Float(f32),
    Str(String),
    Array(Vec<String>),
    Layout(LayoutKind),
}

impl Arg {
    pub const fn none() -> Self {
        Arg::None
    }

    /// Tag mask carried by the argument. Integers count as masks so that
    /// configs can write `1` for the first tag.
    pub fn tag_mask(&self) -> Option<TagMask> {
        match self {
            Arg::UInt(mask) => Some(*mask),
            Arg::Int(mask) if *mask >= 0 => Some(*mask as TagMask),
            Arg::Int(_) => Some(TagMask::MAX),
            _ => None,
        }
    }

    pub fn int(&self) -> Option<i32> {
        match self {
            Arg::Int(value) => Some(*value),
            Arg::UInt(value) => i32::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn float(&self) -> Option<f32> {
        match self {
            Arg::Float(value) => Some(*value),
            Arg::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    /// argv for spawning. A plain string runs through `sh -c`.
    pub fn command(&self) -> Option<Vec<String>> {
        match self {
            Arg::Array(argv) if !argv.is_empty() => Some(argv.clone()),
            Arg::Str(line) if !line.is_empty() => Some(vec![
                "sh".to_string(),
                "-c".to_string(),
                line.clone(),
            ]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub modifiers: Vec<KeyButMask>,
    pub keysym: Keysym,
    pub action: KeyAction,
    pub arg: Arg,
}

impl KeyBinding {
    pub fn new(modifiers: Vec<KeyButMask>, keysym: Keysym, action: KeyAction, arg: Arg) -> Self {
        Self {
            modifiers,
            keysym,
            action,
            arg,
        }
    }

    pub fn mask(&self) -> u16 {
        modifiers_to_mask(&self.modifiers)
    }
}

/// Where a button press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Click {
    TagBar,
    LayoutSymbol,
    StatusText,
    WindowTitle,
    TabBar,
    ClientWindow,
    RootWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonBinding {
    pub click: Click,
    pub modifiers: Vec<KeyButMask>,
    pub button: u8,
    pub action: KeyAction,
    pub arg: Arg,
}

impl ButtonBinding {
    pub fn new(
        click: Click,
        modifiers: Vec<KeyButMask>,
        button: u8,
        action: KeyAction,
        arg: Arg,
    ) -> Self {
        Self {
            click,
            modifiers,
            button,
            action,
            arg,
        }
    }

    pub fn mask(&self) -> u16 {
        modifiers_to_mask(&self.modifiers)
    }
}

pub fn modifiers_to_mask(modifiers: &[KeyButMask]) -> u16 {
    modifiers
        .iter()
        .fold(0u16, |acc, &modifier| acc | u16::from(modifier))
}
