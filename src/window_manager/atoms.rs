use crate::errors::WmResult;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt};

/// Interned atoms used by the window manager.
#[derive(Debug, Clone, Copy)]
pub struct AtomCache {
    pub wm_protocols: Atom,
    pub wm_delete_window: Atom,
    pub wm_state: Atom,
    pub wm_take_focus: Atom,
    pub wm_name: Atom,
    pub net_supported: Atom,
    pub net_supporting_wm_check: Atom,
    pub net_active_window: Atom,
    pub net_client_list: Atom,
    pub net_wm_name: Atom,
    pub net_wm_state: Atom,
    pub net_wm_state_fullscreen: Atom,
    pub net_wm_state_demands_attention: Atom,
    pub net_wm_window_type: Atom,
    pub net_wm_window_type_dialog: Atom,
    pub utf8_string: Atom,
}

fn intern(connection: &impl Connection, name: &[u8]) -> WmResult<Atom> {
    Ok(connection.intern_atom(false, name)?.reply()?.atom)
}

impl AtomCache {
    pub fn new(connection: &impl Connection) -> WmResult<Self> {
        Ok(Self {
            wm_protocols: intern(connection, b"WM_PROTOCOLS")?,
            wm_delete_window: intern(connection, b"WM_DELETE_WINDOW")?,
            wm_state: intern(connection, b"WM_STATE")?,
            wm_take_focus: intern(connection, b"WM_TAKE_FOCUS")?,
            wm_name: AtomEnum::WM_NAME.into(),
            net_supported: intern(connection, b"_NET_SUPPORTED")?,
            net_supporting_wm_check: intern(connection, b"_NET_SUPPORTING_WM_CHECK")?,
            net_active_window: intern(connection, b"_NET_ACTIVE_WINDOW")?,
            net_client_list: intern(connection, b"_NET_CLIENT_LIST")?,
            net_wm_name: intern(connection, b"_NET_WM_NAME")?,
            net_wm_state: intern(connection, b"_NET_WM_STATE")?,
            net_wm_state_fullscreen: intern(connection, b"_NET_WM_STATE_FULLSCREEN")?,
            net_wm_state_demands_attention: intern(
                connection,
                b"_NET_WM_STATE_DEMANDS_ATTENTION",
            )?,
            net_wm_window_type: intern(connection, b"_NET_WM_WINDOW_TYPE")?,
            net_wm_window_type_dialog: intern(connection, b"_NET_WM_WINDOW_TYPE_DIALOG")?,
            utf8_string: intern(connection, b"UTF8_STRING")?,
        })
    }

    /// Atoms advertised in `_NET_SUPPORTED`.
    pub fn supported(&self) -> Vec<Atom> {
        vec![
            self.net_supported,
            self.net_supporting_wm_check,
            self.net_active_window,
            self.net_client_list,
            self.net_wm_name,
            self.net_wm_state,
            self.net_wm_state_fullscreen,
            self.net_wm_state_demands_attention,
            self.net_wm_window_type,
            self.net_wm_window_type_dialog,
        ]
    }
}
