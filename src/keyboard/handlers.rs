use super::keysyms::{self, Keysym};
use super::{Arg, ButtonBinding, Click, KeyAction, KeyBinding};
use crate::errors::WmResult;
use log::{debug, trace};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;

/// Keysym table of the server, fetched once and again on MappingNotify.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMapping {
    min_keycode: Keycode,
    keysyms_per_keycode: usize,
    keysyms: Vec<Keysym>,
    /// Modifier bit the NumLock key is mapped to, 0 when unmapped.
    pub numlock_mask: u16,
}

impl KeyboardMapping {
    pub fn from_parts(
        min_keycode: Keycode,
        keysyms_per_keycode: usize,
        keysyms: Vec<Keysym>,
        numlock_mask: u16,
    ) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
            numlock_mask,
        }
    }

    pub fn query(connection: &impl Connection) -> WmResult<Self> {
        let setup = connection.setup();
        let min_keycode = setup.min_keycode;
        let count = setup.max_keycode - min_keycode + 1;

        let reply = connection.get_keyboard_mapping(min_keycode, count)?.reply()?;
        let mut mapping = Self::from_parts(
            min_keycode,
            reply.keysyms_per_keycode as usize,
            reply.keysyms,
            0,
        );

        let modifiers = connection.get_modifier_mapping()?.reply()?;
        let per_modifier = modifiers.keycodes_per_modifier() as usize;
        let numlock_codes = mapping.keycodes_for(keysyms::XK_NUM_LOCK);
        if per_modifier > 0 {
            for (index, keycodes) in modifiers.keycodes.chunks(per_modifier).enumerate() {
                if keycodes.iter().any(|code| numlock_codes.contains(code)) {
                    mapping.numlock_mask = 1 << index;
                }
            }
        }

        debug!("numlock modifier mask {:#x}", mapping.numlock_mask);
        Ok(mapping)
    }

    /// First keysym of a keycode, unshifted.
    pub fn keysym_for(&self, keycode: Keycode) -> Keysym {
        if self.keysyms_per_keycode == 0 || keycode < self.min_keycode {
            return 0;
        }
        let index = (keycode - self.min_keycode) as usize * self.keysyms_per_keycode;
        self.keysyms.get(index).copied().unwrap_or(0)
    }

    pub fn keycodes_for(&self, keysym: Keysym) -> Vec<Keycode> {
        if self.keysyms_per_keycode == 0 {
            return Vec::new();
        }
        self.keysyms
            .chunks(self.keysyms_per_keycode)
            .enumerate()
            .filter(|(_, syms)| syms.contains(&keysym))
            .map(|(index, _)| self.min_keycode + index as Keycode)
            .collect()
    }
}

fn relevant_modifiers() -> u16 {
    [
        ModMask::SHIFT,
        ModMask::CONTROL,
        ModMask::M1,
        ModMask::M2,
        ModMask::M3,
        ModMask::M4,
        ModMask::M5,
    ]
    .into_iter()
    .fold(0, |acc, modifier| acc | u16::from(modifier))
}

/// Strip lock modifiers and pointer buttons from a state mask.
pub fn clean_mask(mask: u16, numlock_mask: u16) -> u16 {
    mask & !(numlock_mask | u16::from(ModMask::LOCK)) & relevant_modifiers()
}

fn lock_combinations(numlock_mask: u16) -> [u16; 4] {
    let lock = u16::from(ModMask::LOCK);
    [0, lock, numlock_mask, numlock_mask | lock]
}

/// Grab every binding on the root window under all lock combinations.
pub fn grab_keys(
    connection: &impl Connection,
    root: Window,
    keybindings: &[KeyBinding],
    mapping: &KeyboardMapping,
) -> WmResult<()> {
    connection.ungrab_key(Grab::ANY, root, ModMask::ANY)?;

    for keybinding in keybindings {
        for keycode in mapping.keycodes_for(keybinding.keysym) {
            for lock in lock_combinations(mapping.numlock_mask) {
                connection.grab_key(
                    true,
                    root,
                    ModMask::from(keybinding.mask() | lock),
                    keycode,
                    GrabMode::ASYNC,
                    GrabMode::ASYNC,
                )?;
            }
        }
    }

    trace!("grabbed {} keybindings", keybindings.len());
    Ok(())
}

/// Button grabs of a client window. Unfocused clients grab every button so
/// a click focuses them, focused ones only the configured client bindings.
pub fn grab_buttons(
    connection: &impl Connection,
    window: Window,
    focused: bool,
    buttons: &[ButtonBinding],
    numlock_mask: u16,
) -> WmResult<()> {
    let event_mask = EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE;
    connection.ungrab_button(ButtonIndex::ANY, window, ModMask::ANY)?;

    if !focused {
        connection.grab_button(
            false,
            window,
            event_mask,
            GrabMode::SYNC,
            GrabMode::SYNC,
            x11rb::NONE,
            x11rb::NONE,
            ButtonIndex::ANY,
            ModMask::ANY,
        )?;
    }

    for binding in buttons.iter().filter(|b| b.click == Click::ClientWindow) {
        for lock in lock_combinations(numlock_mask) {
            connection.grab_button(
                false,
                window,
                event_mask,
                GrabMode::ASYNC,
                GrabMode::SYNC,
                x11rb::NONE,
                x11rb::NONE,
                ButtonIndex::from(binding.button),
                ModMask::from(binding.mask() | lock),
            )?;
        }
    }

    Ok(())
}

/// Actions bound to a pressed key, in configuration order.
pub fn matching_keys(
    keybindings: &[KeyBinding],
    mapping: &KeyboardMapping,
    keycode: Keycode,
    state: u16,
) -> Vec<(KeyAction, Arg)> {
    let keysym = mapping.keysym_for(keycode);
    let state = clean_mask(state, mapping.numlock_mask);
    trace!("key {} with state {:#x}", keysyms::format_keysym(keysym), state);

    keybindings
        .iter()
        .filter(|binding| {
            binding.keysym == keysym && clean_mask(binding.mask(), mapping.numlock_mask) == state
        })
        .map(|binding| (binding.action, binding.arg.clone()))
        .collect()
}

/// Actions bound to a button press on `click`. Tag bar and tab bar bindings
/// without an argument receive `clicked`.
pub fn matching_buttons(
    buttons: &[ButtonBinding],
    click: Click,
    button: u8,
    state: u16,
    numlock_mask: u16,
    clicked: &Arg,
) -> Vec<(KeyAction, Arg)> {
    let state = clean_mask(state, numlock_mask);

    buttons
        .iter()
        .filter(|binding| {
            binding.click == click
                && binding.button == button
                && clean_mask(binding.mask(), numlock_mask) == state
        })
        .map(|binding| {
            let takes_clicked = matches!(click, Click::TagBar | Click::TabBar)
                && binding.arg == Arg::None;
            let arg = if takes_clicked {
                clicked.clone()
            } else {
                binding.arg.clone()
            };
            (binding.action, arg)
        })
        .collect()
}
