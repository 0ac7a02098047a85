use crate::errors::{ConfigError, WmResult};
use crate::keyboard::keysyms::{self, Keysym};
use crate::keyboard::{Arg, ButtonBinding, Click, KeyAction, KeyBinding};
use crate::layout::LayoutKind;
use crate::monitor::TabMode;
use crate::{ColorScheme, Config, Rule, Scratchpad, TagConfig};
use log::{info, warn};
use ron::extensions::Extensions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use x11rb::protocol::xproto::KeyButMask;

/// Config written by `--init`.
pub const TEMPLATE: &str = include_str!("../../templates/config.ron");

/// Highest tag count that leaves a bit for the scratchpad in a `u32` mask.
pub const MAX_TAGS: usize = 31;

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ModKey {
    Mod,
    Mod1,
    Mod2,
    Mod3,
    Mod4,
    Mod5,
    Shift,
    Control,
}

impl ModKey {
    fn to_keybut_mask(self, modkey: KeyButMask) -> KeyButMask {
        match self {
            ModKey::Mod => modkey,
            ModKey::Mod1 => KeyButMask::MOD1,
            ModKey::Mod2 => KeyButMask::MOD2,
            ModKey::Mod3 => KeyButMask::MOD3,
            ModKey::Mod4 => KeyButMask::MOD4,
            ModKey::Mod5 => KeyButMask::MOD5,
            ModKey::Shift => KeyButMask::SHIFT,
            ModKey::Control => KeyButMask::CONTROL,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum KeyData {
    Return, Escape, Space, Tab, Backspace, Delete,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,
    Left, Right, Up, Down, Home, End, PageUp, PageDown, Insert,
    Minus, Equal, BracketLeft, BracketRight, Semicolon, Apostrophe, Grave, Backslash,
    Comma, Period, Slash, Print,
    AudioRaiseVolume, AudioLowerVolume, AudioMute, MonBrightnessUp, MonBrightnessDown,
}

impl KeyData {
    #[rustfmt::skip]
    fn to_keysym(self) -> Keysym {
        use keysyms::*;
        match self {
            KeyData::Return => XK_RETURN,
            KeyData::Escape => XK_ESCAPE,
            KeyData::Space => XK_SPACE,
            KeyData::Tab => XK_TAB,
            KeyData::Backspace => XK_BACKSPACE,
            KeyData::Delete => XK_DELETE,
            KeyData::F1 => XK_F1, KeyData::F2 => XK_F2, KeyData::F3 => XK_F3,
            KeyData::F4 => XK_F4, KeyData::F5 => XK_F5, KeyData::F6 => XK_F6,
            KeyData::F7 => XK_F7, KeyData::F8 => XK_F8, KeyData::F9 => XK_F9,
            KeyData::F10 => XK_F10, KeyData::F11 => XK_F11, KeyData::F12 => XK_F12,
            KeyData::A => XK_A, KeyData::B => XK_B, KeyData::C => XK_C, KeyData::D => XK_D,
            KeyData::E => XK_E, KeyData::F => XK_F, KeyData::G => XK_G, KeyData::H => XK_H,
            KeyData::I => XK_I, KeyData::J => XK_J, KeyData::K => XK_K, KeyData::L => XK_L,
            KeyData::M => XK_M, KeyData::N => XK_N, KeyData::O => XK_O, KeyData::P => XK_P,
            KeyData::Q => XK_Q, KeyData::R => XK_R, KeyData::S => XK_S, KeyData::T => XK_T,
            KeyData::U => XK_U, KeyData::V => XK_V, KeyData::W => XK_W, KeyData::X => XK_X,
            KeyData::Y => XK_Y, KeyData::Z => XK_Z,
            KeyData::Key0 => XK_0, KeyData::Key1 => XK_1, KeyData::Key2 => XK_2,
            KeyData::Key3 => XK_3, KeyData::Key4 => XK_4, KeyData::Key5 => XK_5,
            KeyData::Key6 => XK_6, KeyData::Key7 => XK_7, KeyData::Key8 => XK_8,
            KeyData::Key9 => XK_9,
            KeyData::Left => XK_LEFT,
            KeyData::Right => XK_RIGHT,
            KeyData::Up => XK_UP,
            KeyData::Down => XK_DOWN,
            KeyData::Home => XK_HOME,
            KeyData::End => XK_END,
            KeyData::PageUp => XK_PAGE_UP,
            KeyData::PageDown => XK_PAGE_DOWN,
            KeyData::Insert => XK_INSERT,
            KeyData::Minus => XK_MINUS,
            KeyData::Equal => XK_EQUAL,
            KeyData::BracketLeft => XK_LEFT_BRACKET,
            KeyData::BracketRight => XK_RIGHT_BRACKET,
            KeyData::Semicolon => XK_SEMICOLON,
            KeyData::Apostrophe => XK_APOSTROPHE,
            KeyData::Grave => XK_GRAVE,
            KeyData::Backslash => XK_BACKSLASH,
            KeyData::Comma => XK_COMMA,
            KeyData::Period => XK_PERIOD,
            KeyData::Slash => XK_SLASH,
            KeyData::Print => XK_PRINT,
            KeyData::AudioRaiseVolume => XF86_AUDIO_RAISE_VOLUME,
            KeyData::AudioLowerVolume => XF86_AUDIO_LOWER_VOLUME,
            KeyData::AudioMute => XF86_AUDIO_MUTE,
            KeyData::MonBrightnessUp => XF86_MON_BRIGHTNESS_UP,
            KeyData::MonBrightnessDown => XF86_MON_BRIGHTNESS_DOWN,
        }
    }
}

/// Replace `#DEFINE $name = value` variables, then reject leftovers.
pub fn preprocess_variables(input: &str) -> Result<String, ConfigError> {
    let mut variables: Vec<(String, String)> = Vec::new();
    let mut result = String::new();

    for line in input.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("#DEFINE") {
            let Some((name, value)) = rest.split_once('=') else {
                return Err(ConfigError::InvalidDefine(trimmed.to_string()));
            };
            let name = name.trim();
            let value = value.trim().trim_end_matches(',');

            if !name.starts_with('$') || name.len() < 2 {
                return Err(ConfigError::InvalidVariableName(name.to_string()));
            }

            variables.retain(|(existing, _)| existing != name);
            variables.push((name.to_string(), value.to_string()));
            // Longest names first so `$mod` never eats into `$modkey`.
            variables.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

            result.push('\n');
            continue;
        }

        let mut processed = line.to_string();
        for (name, value) in &variables {
            processed = processed.replace(name.as_str(), value);
        }
        result.push_str(&processed);
        result.push('\n');
    }

    for line in result.lines() {
        if line.trim_start().starts_with("//") {
            continue;
        }
        if let Some(start) = line.find('$') {
            let rest = &line[start..];
            let end = rest[1..]
                .find(|c: char| !c.is_alphanumeric() && c != '_')
                .map_or(rest.len(), |position| position + 1);
            return Err(ConfigError::UndefinedVariable(rest[..end].to_string()));
        }
    }

    Ok(result)
}

/// `"#rrggbb"` into a pixel value.
pub fn parse_color(value: &str) -> Result<u32, ConfigError> {
    let hex = value
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6)
        .ok_or_else(|| ConfigError::InvalidColor(value.to_string()))?;
    u32::from_str_radix(hex, 16).map_err(|_| ConfigError::InvalidColor(value.to_string()))
}

#[derive(Debug, Deserialize)]
struct ColorSchemeData {
    foreground: String,
    background: String,
    underline: String,
}

impl ColorSchemeData {
    fn to_scheme(&self) -> Result<ColorScheme, ConfigError> {
        Ok(ColorScheme {
            foreground: parse_color(&self.foreground)?,
            background: parse_color(&self.background)?,
            underline: parse_color(&self.underline)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagData {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        layout: Option<LayoutKind>,
        #[serde(default)]
        mfact: Option<f32>,
        #[serde(default)]
        nmaster: Option<usize>,
    },
}

#[derive(Debug, Deserialize)]
struct RuleData {
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    instance: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: u32,
    #[serde(default)]
    floating: bool,
    #[serde(default = "default_true")]
    centered: bool,
    #[serde(default)]
    monitor: Option<usize>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ScratchpadData {
    name: String,
    command: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KeybindingData {
    modifiers: Vec<ModKey>,
    key: KeyData,
    action: KeyAction,
    #[serde(default)]
    arg: ArgData,
}

#[derive(Debug, Deserialize)]
struct ButtonData {
    click: Click,
    #[serde(default)]
    modifiers: Vec<ModKey>,
    button: u8,
    action: KeyAction,
    #[serde(default)]
    arg: ArgData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ArgData {
    #[default]
    None,
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigData {
    border_width: Option<u32>,
    border_normal: Option<String>,
    border_selected: Option<String>,
    border_urgent: Option<String>,
    border_floating_normal: Option<String>,
    border_floating_selected: Option<String>,
    font: Option<String>,

    scheme_normal: Option<ColorSchemeData>,
    scheme_selected: Option<ColorSchemeData>,
    scheme_occupied: Option<ColorSchemeData>,
    scheme_urgent: Option<ColorSchemeData>,
    status_colors: Option<Vec<String>>,
    scheme_tab_normal: Option<ColorSchemeData>,
    scheme_tab_selected: Option<ColorSchemeData>,
    scheme_tab_master: Option<ColorSchemeData>,
    scheme_tab_master_selected: Option<ColorSchemeData>,

    snap: Option<u32>,
    show_bar: Option<bool>,
    top_bar: Option<bool>,
    tab_mode: Option<TabMode>,
    top_tab: Option<bool>,
    tab_width: Option<u32>,
    respect_size_hints: Option<bool>,
    save_floating_geometry: Option<bool>,
    focus_follows_mouse: Option<bool>,
    mouse_follows_focus: Option<bool>,
    transfer_pointer: Option<bool>,

    default_layout: Option<LayoutKind>,
    mfact: Option<f32>,
    nmaster: Option<usize>,

    tags: Option<Vec<TagData>>,
    rules: Option<Vec<RuleData>>,
    rotation_excluded_classes: Option<Vec<String>>,
    scratchpad: Option<ScratchpadData>,

    modkey: Option<ModKey>,
    keybindings: Option<Vec<KeybindingData>>,
    buttons: Option<Vec<ButtonData>>,
}

pub fn parse_config(input: &str) -> Result<Config, ConfigError> {
    let preprocessed = preprocess_variables(input)?;
    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    let data: ConfigData = options.from_str(&preprocessed)?;
    config_data_to_config(data)
}

/// `$XDG_CONFIG_HOME/oxtile/config.ron`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("oxtile").join("config.ron"))
}

/// Load the config at `path`, or the default location. A missing file
/// yields the built-in defaults.
pub fn load_config(path: Option<&Path>) -> WmResult<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                warn!("no config directory, using built-in defaults");
                return Ok(Config::default());
            }
        },
    };

    if !path.exists() {
        info!("{} not found, using built-in defaults", path.display());
        return Ok(Config::default());
    }

    let input = std::fs::read_to_string(&path)?;
    let config = parse_config(&input)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Write the template config unless one exists. Returns the path written.
pub fn write_template(path: Option<&Path>) -> WmResult<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()
            .ok_or_else(|| anyhow::anyhow!("could not determine the config directory"))?,
    };

    if path.exists() {
        return Err(anyhow::anyhow!("{} already exists", path.display()).into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, TEMPLATE)?;
    Ok(path)
}

fn arg_data_to_arg(action: KeyAction, data: ArgData) -> Result<Arg, ConfigError> {
    let arg = match (action, data) {
        (_, ArgData::None) => Arg::None,
        (KeyAction::SetLayout, ArgData::String(name)) => {
            let layout = LayoutKind::from_str(&name).map_err(|_| ConfigError::InvalidValue {
                field: "layout",
                value: name.clone(),
            })?;
            Arg::Layout(layout)
        }
        (
            KeyAction::View | KeyAction::ToggleView | KeyAction::Tag | KeyAction::ToggleTag,
            ArgData::Int(mask),
        ) => {
            let mask = if mask < 0 { u32::MAX } else { mask as u32 };
            Arg::UInt(mask)
        }
        (KeyAction::SetMasterFactor | KeyAction::SetClientFactor, ArgData::Int(value)) => {
            Arg::Float(value as f32)
        }
        (_, ArgData::Int(value)) => Arg::Int(value as i32),
        (_, ArgData::Float(value)) => Arg::Float(value as f32),
        (_, ArgData::String(value)) => Arg::Str(value),
        (_, ArgData::Array(values)) => Arg::Array(values),
    };
    Ok(arg)
}

fn scheme_or(data: Option<ColorSchemeData>, fallback: ColorScheme) -> Result<ColorScheme, ConfigError> {
    data.map_or(Ok(fallback), |data| data.to_scheme())
}

fn color_or(data: Option<String>, fallback: u32) -> Result<u32, ConfigError> {
    data.map_or(Ok(fallback), |value| parse_color(&value))
}

fn config_data_to_config(data: ConfigData) -> Result<Config, ConfigError> {
    let defaults = Config::default();
    let modkey = data
        .modkey
        .map_or(defaults.modkey, |m| m.to_keybut_mask(KeyButMask::MOD4));
    let to_masks = |modifiers: &[ModKey]| -> Vec<KeyButMask> {
        modifiers.iter().map(|m| m.to_keybut_mask(modkey)).collect()
    };

    let tags = match data.tags {
        Some(tags) => tags
            .into_iter()
            .map(|tag| match tag {
                TagData::Name(name) => TagConfig::named(&name),
                TagData::Full {
                    name,
                    layout,
                    mfact,
                    nmaster,
                } => TagConfig {
                    name,
                    layout,
                    master_fraction: mfact,
                    master_count: nmaster,
                },
            })
            .collect(),
        None => defaults.tags.clone(),
    };
    if tags.is_empty() {
        return Err(ConfigError::NoTags);
    }
    if tags.len() > MAX_TAGS {
        return Err(ConfigError::TooManyTags(tags.len()));
    }

    let master_fraction = data.mfact.unwrap_or(defaults.master_fraction);
    let fractions = std::iter::once(master_fraction).chain(tags.iter().filter_map(|t| t.master_fraction));
    for fraction in fractions {
        if !(0.05..=0.95).contains(&fraction) {
            return Err(ConfigError::InvalidValue {
                field: "mfact",
                value: fraction.to_string(),
            });
        }
    }

    let keybindings = match data.keybindings {
        Some(bindings) => bindings
            .into_iter()
            .map(|binding| {
                Ok(KeyBinding::new(
                    to_masks(&binding.modifiers),
                    binding.key.to_keysym(),
                    binding.action,
                    arg_data_to_arg(binding.action, binding.arg)?,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?,
        None => defaults.keybindings.clone(),
    };

    let buttons = match data.buttons {
        Some(buttons) => buttons
            .into_iter()
            .map(|binding| {
                Ok(ButtonBinding::new(
                    binding.click,
                    to_masks(&binding.modifiers),
                    binding.button,
                    binding.action,
                    arg_data_to_arg(binding.action, binding.arg)?,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?,
        None => defaults.buttons.clone(),
    };

    let rules = match data.rules {
        Some(rules) => rules
            .into_iter()
            .map(|rule| Rule {
                class: rule.class,
                instance: rule.instance,
                title: rule.title,
                tags: rule.tags,
                floating: rule.floating,
                centered: rule.centered,
                monitor: rule.monitor,
            })
            .collect(),
        None => defaults.rules.clone(),
    };

    let status_colors = match data.status_colors {
        Some(colors) => colors
            .iter()
            .map(|color| parse_color(color))
            .collect::<Result<Vec<_>, _>>()?,
        None => defaults.status_colors.clone(),
    };

    let scratchpad = data.scratchpad.map_or(defaults.scratchpad.clone(), |pad| Scratchpad {
        name: pad.name,
        command: pad.command,
    });

    Ok(Config {
        border_width: data.border_width.unwrap_or(defaults.border_width),
        border_normal: color_or(data.border_normal, defaults.border_normal)?,
        border_selected: color_or(data.border_selected, defaults.border_selected)?,
        border_urgent: color_or(data.border_urgent, defaults.border_urgent)?,
        border_floating_normal: color_or(data.border_floating_normal, defaults.border_floating_normal)?,
        border_floating_selected: color_or(
            data.border_floating_selected,
            defaults.border_floating_selected,
        )?,
        font: data.font.unwrap_or_else(|| defaults.font.clone()),
        scheme_normal: scheme_or(data.scheme_normal, defaults.scheme_normal)?,
        scheme_selected: scheme_or(data.scheme_selected, defaults.scheme_selected)?,
        scheme_occupied: scheme_or(data.scheme_occupied, defaults.scheme_occupied)?,
        scheme_urgent: scheme_or(data.scheme_urgent, defaults.scheme_urgent)?,
        status_colors,
        scheme_tab_normal: scheme_or(data.scheme_tab_normal, defaults.scheme_tab_normal)?,
        scheme_tab_selected: scheme_or(data.scheme_tab_selected, defaults.scheme_tab_selected)?,
        scheme_tab_master: scheme_or(data.scheme_tab_master, defaults.scheme_tab_master)?,
        scheme_tab_master_selected: scheme_or(
            data.scheme_tab_master_selected,
            defaults.scheme_tab_master_selected,
        )?,
        snap: data.snap.unwrap_or(defaults.snap),
        show_bar: data.show_bar.unwrap_or(defaults.show_bar),
        top_bar: data.top_bar.unwrap_or(defaults.top_bar),
        tab_mode: data.tab_mode.unwrap_or(defaults.tab_mode),
        top_tab: data.top_tab.unwrap_or(defaults.top_tab),
        tab_width: data.tab_width.unwrap_or(defaults.tab_width),
        respect_size_hints: data.respect_size_hints.unwrap_or(defaults.respect_size_hints),
        save_floating_geometry: data
            .save_floating_geometry
            .unwrap_or(defaults.save_floating_geometry),
        focus_follows_mouse: data.focus_follows_mouse.unwrap_or(defaults.focus_follows_mouse),
        mouse_follows_focus: data.mouse_follows_focus.unwrap_or(defaults.mouse_follows_focus),
        transfer_pointer: data.transfer_pointer.unwrap_or(defaults.transfer_pointer),
        default_layout: data.default_layout.unwrap_or(defaults.default_layout),
        master_fraction,
        master_count: data.nmaster.unwrap_or(defaults.master_count),
        tags,
        rules,
        rotation_excluded_classes: data
            .rotation_excluded_classes
            .unwrap_or_else(|| defaults.rotation_excluded_classes.clone()),
        scratchpad,
        modkey,
        keybindings,
        buttons,
    })
}

