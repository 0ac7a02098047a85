//! What the bars show, computed from the model alone. The renderers in
//! [`super::Bar`] and [`super::TabBar`] only turn this into pixels.

use crate::state::WmState;
use x11rb::protocol::xproto::Window;

/// Tabs beyond this many are not shown.
pub const MAX_TABS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCell {
    pub name: String,
    pub selected: bool,
    pub occupied: bool,
    pub urgent: bool,
    /// The focused client of the selected monitor carries this tag.
    pub has_focused_client: bool,
    pub is_current: bool,
    pub is_previous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarModel {
    pub tags: Vec<TagCell>,
    pub layout_symbol: String,
    /// Only the selected monitor shows the status text.
    pub status: Option<String>,
    pub title: Option<String>,
    pub is_selected_monitor: bool,
}

pub fn bar_model(state: &WmState, monitor: usize) -> BarModel {
    let m = &state.monitors[monitor];
    let tagset = m.tagset();
    let is_selected_monitor = monitor == state.selected_monitor;

    let mut occupied = 0;
    let mut urgent = 0;
    for client in m.clients.iter().filter_map(|&w| state.client(w)) {
        occupied |= client.tags;
        if client.is_urgent {
            urgent |= client.tags;
        }
    }

    let focused_tags = if is_selected_monitor {
        m.selected
            .and_then(|window| state.client(window))
            .map_or(0, |client| client.tags)
    } else {
        0
    };

    let tags = state
        .config
        .tags
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            let bit = 1 << index;
            TagCell {
                name: tag.name.clone(),
                selected: tagset & bit != 0,
                occupied: occupied & bit != 0,
                urgent: urgent & bit != 0,
                has_focused_client: focused_tags & bit != 0,
                is_current: m.current_tag == index + 1,
                is_previous: m.previous_tag == index + 1,
            }
        })
        .collect();

    BarModel {
        tags,
        layout_symbol: m.layout_symbol.clone(),
        status: is_selected_monitor.then(|| state.status_text.clone()),
        title: m
            .selected
            .and_then(|window| state.client(window))
            .map(|client| client.name.clone()),
        is_selected_monitor,
    }
}

/// Region of the bar under a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarClick {
    Tag(usize),
    LayoutSymbol,
    StatusText,
    WindowTitle,
}

/// Pixel extents of the bar sections as last drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarRegions {
    pub tag_widths: Vec<i32>,
    pub layout_width: i32,
    /// Zero on monitors that do not show the status.
    pub status_width: i32,
    pub width: i32,
}

impl BarRegions {
    pub fn click(&self, x: i32) -> BarClick {
        let mut right = 0;
        for (index, width) in self.tag_widths.iter().enumerate() {
            right += width;
            if x < right {
                return BarClick::Tag(index);
            }
        }

        if x < right + self.layout_width {
            BarClick::LayoutSymbol
        } else if x > self.width - self.status_width {
            BarClick::StatusText
        } else {
            BarClick::WindowTitle
        }
    }
}

/// Piece of status text drawn in one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSegment {
    /// Index into the configured status colors.
    pub color: usize,
    pub text: String,
}

/// Split status text on the color escapes: a byte `n` in `1..=color_count`
/// switches to color `n - 1` for the text that follows.
pub fn status_segments(status: &str, color_count: usize) -> Vec<StatusSegment> {
    let mut segments = Vec::new();
    let mut current = StatusSegment {
        color: 0,
        text: String::new(),
    };

    for ch in status.chars() {
        let code = ch as usize;
        if (1..=color_count).contains(&code) {
            if !current.text.is_empty() {
                segments.push(current.clone());
            }
            current = StatusSegment {
                color: code - 1,
                text: String::new(),
            };
        } else {
            current.text.push(ch);
        }
    }

    if !current.text.is_empty() {
        segments.push(current);
    }
    segments
}

/// Status text with the color escapes removed.
pub fn plain_status(status: &str, color_count: usize) -> String {
    status_segments(status, color_count)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub window: Window,
    pub title: String,
    pub width: i32,
    pub selected: bool,
    /// Only set when more than one client shares the master area.
    pub master: bool,
}

/// Tabs of a monitor: its visible clients outside the rotation exclusions,
/// in tiling order.
pub fn tab_model(state: &WmState, monitor: usize) -> Vec<Tab> {
    let m = &state.monitors[monitor];
    let master_count = m.master_count();
    let windows: Vec<Window> = state
        .rotation_clients(monitor)
        .into_iter()
        .take(MAX_TABS)
        .collect();

    let widths = vec![state.config.tab_width as i32; windows.len()];
    let widths = cap_widths(&widths, m.window_area.width);

    windows
        .into_iter()
        .zip(widths)
        .enumerate()
        .filter_map(|(index, (window, width))| {
            let client = state.client(window)?;
            Some(Tab {
                window,
                title: client.name.clone(),
                width,
                selected: m.selected == Some(window),
                master: master_count > 1 && index < master_count,
            })
        })
        .collect()
}

/// Shrink widths that do not fit into `available`. Narrow entries keep
/// their width while the rest share what remains equally.
pub fn cap_widths(widths: &[i32], available: i32) -> Vec<i32> {
    let total: i32 = widths.iter().sum();
    if widths.is_empty() || total <= available {
        return widths.to_vec();
    }

    let mut sorted = widths.to_vec();
    sorted.sort_unstable();

    let count = sorted.len();
    let mut used = 0;
    let mut fitting = 0;
    while fitting < count {
        let remaining = (count - fitting) as i32;
        if used + remaining * sorted[fitting] > available {
            break;
        }
        used += sorted[fitting];
        fitting += 1;
    }

    let share = (available - used) / (count - fitting).max(1) as i32;
    widths.iter().map(|&width| width.min(share)).collect()
}

/// Index of the tab under `x`.
pub fn tab_at(tabs: &[Tab], x: i32) -> Option<usize> {
    let mut right = 0;
    tabs.iter().position(|tab| {
        right += tab.width;
        x < right
    })
}
