use crate::Config;
use crate::client::TagMask;
use crate::errors::WmResult;
use crate::geometry::Rect;
use crate::layout::{LayoutKind, LayoutParams};
use serde::Deserialize;
use x11rb::protocol::xinerama::ConnectionExt as _;
use x11rb::protocol::xproto::{Screen, Window};
use x11rb::rust_connection::RustConnection;

/// When the tab bar is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TabMode {
    Never,
    #[default]
    Auto,
    Always,
}

impl TabMode {
    /// `Always` can only be picked in the config, cycling toggles between the
    /// other two.
    pub fn next(&self) -> Self {
        match self {
            Self::Never => Self::Auto,
            Self::Auto | Self::Always => Self::Never,
        }
    }
}

/// Layout parameters remembered per tag. Slot 0 belongs to the all-tags view,
/// slot `i` to tag `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pertag {
    pub layouts: Vec<LayoutKind>,
    pub master_fractions: Vec<f32>,
    pub master_counts: Vec<usize>,
}

impl Pertag {
    pub fn new(config: &Config) -> Self {
        let slots = config.tags.len() + 1;
        let mut pertag = Self {
            layouts: vec![config.default_layout; slots],
            master_fractions: vec![config.master_fraction; slots],
            master_counts: vec![config.master_count; slots],
        };

        for (index, tag) in config.tags.iter().enumerate() {
            let slot = index + 1;
            if let Some(layout) = tag.layout {
                pertag.layouts[slot] = layout;
            }
            if let Some(fraction) = tag.master_fraction {
                pertag.master_fractions[slot] = fraction;
            }
            if let Some(count) = tag.master_count {
                pertag.master_counts[slot] = count;
            }
        }

        pertag
    }
}

#[derive(Debug, Clone)]
pub struct Monitor {
    pub num: usize,
    pub screen: Rect,
    /// Screen minus the bar and tab bar.
    pub window_area: Rect,
    pub bar_y: i32,
    pub tab_y: i32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub tab_mode: TabMode,
    pub top_tab: bool,

    pub tagset: [TagMask; 2],
    pub selected_tags: usize,
    pub layouts: [LayoutKind; 2],
    pub selected_layout: usize,
    pub layout_symbol: String,
    /// 0 for the all-tags view, otherwise the 1-based tag index.
    pub current_tag: usize,
    pub previous_tag: usize,
    pub pertag: Pertag,

    /// Tiling order.
    pub clients: Vec<Window>,
    /// Focus recency, most recent first.
    pub stack: Vec<Window>,
    pub selected: Option<Window>,
}

impl Monitor {
    pub fn new(num: usize, screen: Rect, config: &Config) -> Self {
        let pertag = Pertag::new(config);
        let initial_layout = pertag.layouts[1];

        Self {
            num,
            screen,
            window_area: screen,
            bar_y: 0,
            tab_y: 0,
            show_bar: config.show_bar,
            top_bar: config.top_bar,
            tab_mode: config.tab_mode,
            top_tab: config.top_tab,
            tagset: [1, 1],
            selected_tags: 0,
            layouts: [initial_layout, LayoutKind::Floating],
            selected_layout: 0,
            layout_symbol: initial_layout.new().symbol().to_string(),
            current_tag: 1,
            previous_tag: 1,
            pertag,
            clients: Vec::new(),
            stack: Vec::new(),
            selected: None,
        }
    }

    pub fn tagset(&self) -> TagMask {
        self.tagset[self.selected_tags]
    }

    pub fn set_tagset(&mut self, mask: TagMask) {
        self.tagset[self.selected_tags] = mask;
    }

    pub fn layout(&self) -> LayoutKind {
        self.layouts[self.selected_layout]
    }

    pub fn set_layout(&mut self, layout: LayoutKind) {
        self.layouts[self.selected_layout] = layout;
    }

    pub fn master_count(&self) -> usize {
        self.pertag.master_counts[self.current_tag]
    }

    pub fn master_fraction(&self) -> f32 {
        self.pertag.master_fractions[self.current_tag]
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            master_count: self.master_count(),
            master_fraction: self.master_fraction(),
        }
    }

    /// Reinstall the layout remembered for the current tag.
    pub fn load_tag_layout(&mut self) {
        let layout = self.pertag.layouts[self.current_tag];
        self.set_layout(layout);
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
        self.window_area = screen;
    }

    pub fn shows_tabs(&self, visible_tab_count: usize) -> bool {
        match self.tab_mode {
            TabMode::Always => true,
            TabMode::Never => false,
            TabMode::Auto => match self.layout() {
                LayoutKind::Monocle => visible_tab_count > 1,
                LayoutKind::Deck => visible_tab_count > 2,
                LayoutKind::Floating => true,
                _ => false,
            },
        }
    }

    /// Carve the bar and the tab bar out of the screen and place both.
    /// Hidden bars sit just above the screen.
    pub fn update_bar_position(&mut self, bar_height: i32, tab_height: i32, visible_tab_count: usize) {
        let mut area = Rect::new(
            self.window_area.x,
            self.screen.y,
            self.window_area.width,
            self.screen.height,
        );

        if self.show_bar {
            area.height -= bar_height;
            self.bar_y = if self.top_bar { area.y } else { area.y + area.height };
            if self.top_bar {
                area.y += bar_height;
            }
        } else {
            self.bar_y = -bar_height;
        }

        if self.shows_tabs(visible_tab_count) {
            area.height -= tab_height;
            self.tab_y = if self.top_tab { area.y } else { area.y + area.height };
            if self.top_tab {
                area.y += tab_height;
            }
        } else {
            self.tab_y = -tab_height;
        }

        self.window_area = area;
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.screen.contains(x, y)
    }
}

/// Screen rectangles of the attached outputs, top to bottom then left to
/// right. Identical Xinerama heads collapse into one.
pub fn detect_monitors(connection: &RustConnection, screen: &Screen) -> WmResult<Vec<Rect>> {
    let fallback_monitors = || {
        vec![Rect::new(
            0,
            0,
            screen.width_in_pixels as i32,
            screen.height_in_pixels as i32,
        )]
    };

    let mut monitors = Vec::<Rect>::new();

    let xinerama_active = connection
        .xinerama_is_active()
        .ok()
        .and_then(|cookie| cookie.reply().ok())
        .is_some_and(|reply| reply.state != 0);

    if xinerama_active {
        let Ok(xinerama_cookie) = connection.xinerama_query_screens() else {
            return Ok(fallback_monitors());
        };
        let Ok(xinerama_reply) = xinerama_cookie.reply() else {
            return Ok(fallback_monitors());
        };

        for screen_info in &xinerama_reply.screen_info {
            if screen_info.width == 0 || screen_info.height == 0 {
                continue;
            }

            let head = Rect::new(
                screen_info.x_org as i32,
                screen_info.y_org as i32,
                screen_info.width as i32,
                screen_info.height as i32,
            );

            if !monitors.contains(&head) {
                monitors.push(head);
            }
        }
    }

    if monitors.is_empty() {
        monitors = fallback_monitors();
    }

    monitors.sort_by(|a, b| match a.y.cmp(&b.y) {
        std::cmp::Ordering::Equal => a.x.cmp(&b.x),
        other => other,
    });

    Ok(monitors)
}
