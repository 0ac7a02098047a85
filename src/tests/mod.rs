mod config_test;
mod drag_test;
mod keyboard_test;
mod layout_test;
mod rules_test;
mod size_hints_test;
mod state_test;

use crate::prelude::*;
use crate::state::{WindowInfo, WmState};
use x11rb::protocol::xproto::Window;

pub(crate) const BAR_HEIGHT: i32 = 20;
pub(crate) const SCREEN: Rect = Rect::new(0, 0, 1200, 800);

/// No bar and no tab bar, so the window area is the whole screen.
pub(crate) fn bare_config() -> Config {
    Config {
        show_bar: false,
        tab_mode: TabMode::Never,
        border_width: 2,
        master_fraction: 0.55,
        master_count: 1,
        default_layout: LayoutKind::Tile,
        focus_follows_mouse: false,
        mouse_follows_focus: false,
        rules: Vec::new(),
        tags: (1..=9).map(|n| TagConfig::named(&n.to_string())).collect(),
        ..Config::default()
    }
}

pub(crate) fn single_head(config: Config) -> WmState {
    WmState::new(config, SCREEN, &[SCREEN], BAR_HEIGHT, BAR_HEIGHT)
}

/// Two 1200x800 heads side by side.
pub(crate) fn dual_head(config: Config) -> WmState {
    let left = SCREEN;
    let right = Rect::new(1200, 0, 1200, 800);
    WmState::new(config, Rect::new(0, 0, 2400, 800), &[left, right], BAR_HEIGHT, BAR_HEIGHT)
}

pub(crate) fn window_info(window: Window, class: &str) -> WindowInfo {
    let mut info = WindowInfo::new(window, Rect::new(10, 10, 300, 200));
    info.class = class.to_string();
    info.instance = class.to_lowercase();
    info.name = format!("window {}", window);
    info
}

pub(crate) fn map(state: &mut WmState, window: Window) {
    state.manage(window_info(window, "Term"));
}

/// Geometry including the border, as the layouts hand it out.
pub(crate) fn outer(state: &WmState, window: Window) -> Rect {
    let client = state.client(window).expect("managed");
    Rect::new(
        client.geometry.x,
        client.geometry.y,
        client.outer_width(),
        client.outer_height(),
    )
}
