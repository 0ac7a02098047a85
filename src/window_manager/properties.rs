use super::WindowManager;
use crate::errors::WmResult;
use crate::geometry::Rect;
use crate::size_hints::{SizeHints, WM_SIZE_HINTS_LENGTH};
use crate::state::WindowInfo;
use x11rb::protocol::xproto::*;
use x11rb::wrapper::ConnectionExt as _;

/// ICCCM WM_STATE values.
pub const WITHDRAWN_STATE: u32 = 0;
pub const NORMAL_STATE: u32 = 1;
pub const ICONIC_STATE: u32 = 3;

const URGENCY_HINT: u32 = 1 << 8;
const INPUT_HINT: u32 = 1;

/// Parsed WM_HINTS fields the window manager cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WmHints {
    pub urgent: bool,
    pub never_focus: bool,
}

impl WindowManager {
    fn property32(&self, window: Window, property: Atom, kind: impl Into<Atom>, length: u32) -> Vec<u32> {
        let Ok(cookie) = self
            .connection
            .get_property(false, window, property, kind.into(), 0, length)
        else {
            return Vec::new();
        };
        cookie
            .reply()
            .ok()
            .and_then(|reply| reply.value32().map(|values| values.collect()))
            .unwrap_or_default()
    }

    fn property_text(&self, window: Window, property: Atom, kind: impl Into<Atom>) -> Option<String> {
        let reply = self
            .connection
            .get_property(false, window, property, kind.into(), 0, 256)
            .ok()?
            .reply()
            .ok()?;
        if reply.value.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(&reply.value);
        Some(text.trim_end_matches('\0').to_string())
    }

    /// `_NET_WM_NAME`, falling back to `WM_NAME`.
    pub(crate) fn window_title(&self, window: Window) -> String {
        self.property_text(window, self.atoms.net_wm_name, self.atoms.utf8_string)
            .or_else(|| self.property_text(window, self.atoms.wm_name, AtomEnum::ANY))
            .unwrap_or_default()
    }

    /// Root window name, used as the status text.
    pub(crate) fn root_name(&self) -> Option<String> {
        self.property_text(self.root, self.atoms.wm_name, AtomEnum::ANY)
    }

    /// `(instance, class)` from WM_CLASS.
    pub(crate) fn window_class(&self, window: Window) -> (String, String) {
        let Some(raw) = self.property_text(window, AtomEnum::WM_CLASS.into(), AtomEnum::STRING) else {
            return (String::new(), String::new());
        };
        let mut parts = raw.split('\0');
        let instance = parts.next().unwrap_or_default().to_string();
        let class = parts.next().unwrap_or_default().to_string();
        (instance, class)
    }

    pub(crate) fn transient_for(&self, window: Window) -> Option<Window> {
        self.property32(window, AtomEnum::WM_TRANSIENT_FOR.into(), AtomEnum::WINDOW, 1)
            .first()
            .copied()
            .filter(|&parent| parent != x11rb::NONE)
    }

    pub(crate) fn size_hints(&self, window: Window) -> SizeHints {
        let values = self.property32(
            window,
            AtomEnum::WM_NORMAL_HINTS.into(),
            AtomEnum::WM_SIZE_HINTS,
            WM_SIZE_HINTS_LENGTH as u32,
        );
        SizeHints::from_wm_normal_hints(&values)
    }

    pub(crate) fn wm_hints(&self, window: Window) -> WmHints {
        let values = self.property32(window, AtomEnum::WM_HINTS.into(), AtomEnum::WM_HINTS, 9);
        let Some(&flags) = values.first() else {
            return WmHints::default();
        };
        let input = values.get(1).copied();

        WmHints {
            urgent: flags & URGENCY_HINT != 0,
            never_focus: flags & INPUT_HINT != 0 && input == Some(0),
        }
    }

    /// Drop the urgency flag from WM_HINTS.
    pub(crate) fn clear_urgency_hint(&self, window: Window) -> WmResult<()> {
        let mut values = self.property32(window, AtomEnum::WM_HINTS.into(), AtomEnum::WM_HINTS, 9);
        let Some(flags) = values.first_mut() else {
            return Ok(());
        };
        if *flags & URGENCY_HINT == 0 {
            return Ok(());
        }
        *flags &= !URGENCY_HINT;

        self.connection.change_property32(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_HINTS,
            AtomEnum::WM_HINTS,
            &values,
        )?;
        Ok(())
    }

    fn atom_list(&self, window: Window, property: Atom) -> Vec<Atom> {
        self.property32(window, property, AtomEnum::ATOM, 32)
    }

    pub(crate) fn is_dialog(&self, window: Window) -> bool {
        self.atom_list(window, self.atoms.net_wm_window_type)
            .contains(&self.atoms.net_wm_window_type_dialog)
    }

    pub(crate) fn requests_fullscreen(&self, window: Window) -> bool {
        self.atom_list(window, self.atoms.net_wm_state)
            .contains(&self.atoms.net_wm_state_fullscreen)
    }

    pub(crate) fn supports_protocol(&self, window: Window, protocol: Atom) -> bool {
        self.atom_list(window, self.atoms.wm_protocols).contains(&protocol)
    }

    /// Send a WM_PROTOCOLS client message if the window takes part in the
    /// protocol. Returns whether it was sent.
    pub(crate) fn send_protocol(&self, window: Window, protocol: Atom) -> WmResult<bool> {
        if !self.supports_protocol(window, protocol) {
            return Ok(false);
        }

        let event = ClientMessageEvent::new(
            32,
            window,
            self.atoms.wm_protocols,
            [protocol, x11rb::CURRENT_TIME, 0, 0, 0],
        );
        self.connection
            .send_event(false, window, EventMask::NO_EVENT, event)?;
        Ok(true)
    }

    pub(crate) fn wm_state(&self, window: Window) -> Option<u32> {
        self.property32(window, self.atoms.wm_state, self.atoms.wm_state, 2)
            .first()
            .copied()
    }

    pub(crate) fn set_wm_state(&self, window: Window, state: u32) -> WmResult<()> {
        self.connection.change_property32(
            PropMode::REPLACE,
            window,
            self.atoms.wm_state,
            self.atoms.wm_state,
            &[state, x11rb::NONE],
        )?;
        Ok(())
    }

    pub(crate) fn set_fullscreen_property(&self, window: Window, enabled: bool) -> WmResult<()> {
        let atoms: &[Atom] = if enabled {
            &[self.atoms.net_wm_state_fullscreen]
        } else {
            &[]
        };
        self.connection.change_property32(
            PropMode::REPLACE,
            window,
            self.atoms.net_wm_state,
            AtomEnum::ATOM,
            atoms,
        )?;
        Ok(())
    }

    /// Rewrite `_NET_CLIENT_LIST` from the managed clients.
    pub(crate) fn update_client_list(&self) -> WmResult<()> {
        let windows: Vec<Window> = self
            .state
            .monitors
            .iter()
            .flat_map(|monitor| monitor.clients.iter().copied())
            .collect();

        self.connection.change_property32(
            PropMode::REPLACE,
            self.root,
            self.atoms.net_client_list,
            AtomEnum::WINDOW,
            &windows,
        )?;
        Ok(())
    }

    /// Collect everything needed to manage `window`.
    pub(crate) fn window_info(&self, window: Window, attributes: &GetGeometryReply) -> WindowInfo {
        let mut info = WindowInfo::new(
            window,
            Rect::new(
                attributes.x as i32,
                attributes.y as i32,
                attributes.width as i32,
                attributes.height as i32,
            ),
        );
        let (instance, class) = self.window_class(window);
        let hints = self.wm_hints(window);

        info.border_width = attributes.border_width as i32;
        info.name = self.window_title(window);
        info.instance = instance;
        info.class = class;
        info.transient_for = self.transient_for(window);
        info.hints = self.size_hints(window);
        info.urgent = hints.urgent;
        info.never_focus = hints.never_focus;
        info.is_dialog = self.is_dialog(window);
        info.fullscreen = self.requests_fullscreen(window);
        info
    }
}
