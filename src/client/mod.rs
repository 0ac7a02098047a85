pub mod rules;

use crate::geometry::Rect;
use crate::size_hints::SizeHints;
use x11rb::protocol::xproto::Window;

pub type TagMask = u32;

/// Placeholder for missing titles and class hints.
pub const BROKEN: &str = "broken";

pub const MIN_WEIGHT: f32 = 0.25;
pub const MAX_WEIGHT: f32 = 4.0;
pub const DEFAULT_WEIGHT: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Client {
    pub window: Window,
    pub name: String,
    pub class: String,
    pub instance: String,

    /// Outer origin, inner size.
    pub geometry: Rect,
    pub old_geometry: Rect,
    /// Restored when the client or its monitor goes back to floating.
    pub floating_geometry: Rect,
    pub border_width: i32,
    pub old_border_width: i32,
    /// Border the window had before it was managed.
    pub original_border_width: i32,
    pub hints: SizeHints,

    /// Share of the master or stack extent.
    pub weight: f32,
    pub tags: TagMask,
    pub monitor: usize,

    pub is_fixed: bool,
    pub is_floating: bool,
    pub is_urgent: bool,
    pub never_focus: bool,
    pub is_fullscreen: bool,
    /// Floating state saved while fullscreen.
    pub old_state: bool,
    pub is_centered: bool,
    pub rotation_excluded: bool,
}

impl Client {
    pub fn new(window: Window, monitor: usize) -> Self {
        Self {
            window,
            name: BROKEN.to_string(),
            class: BROKEN.to_string(),
            instance: BROKEN.to_string(),
            geometry: Rect::default(),
            old_geometry: Rect::default(),
            floating_geometry: Rect::default(),
            border_width: 0,
            old_border_width: 0,
            original_border_width: 0,
            hints: SizeHints::default(),
            weight: DEFAULT_WEIGHT,
            tags: 0,
            monitor,
            is_fixed: false,
            is_floating: false,
            is_urgent: false,
            never_focus: false,
            is_fullscreen: false,
            old_state: false,
            is_centered: false,
            rotation_excluded: false,
        }
    }

    pub fn outer_width(&self) -> i32 {
        self.geometry.width + 2 * self.border_width
    }

    pub fn outer_height(&self) -> i32 {
        self.geometry.height + 2 * self.border_width
    }

    pub fn is_visible_on(&self, tagset: TagMask) -> bool {
        self.tags & tagset != 0
    }

    /// Record new size hints and recompute whether the client is fixed size.
    pub fn set_hints(&mut self, hints: SizeHints) {
        self.hints = hints;
        self.is_fixed = hints.is_fixed();
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = if name.is_empty() {
            BROKEN.to_string()
        } else {
            name.to_string()
        };
    }

    pub fn set_class(&mut self, instance: &str, class: &str) {
        self.instance = if instance.is_empty() {
            BROKEN.to_string()
        } else {
            instance.to_string()
        };
        self.class = if class.is_empty() {
            BROKEN.to_string()
        } else {
            class.to_string()
        };
    }

    pub fn save_floating_geometry(&mut self) {
        self.floating_geometry = self.geometry;
    }

    /// Put back a border that a single-client layout removed.
    pub fn restore_border(&mut self) -> bool {
        if self.border_width == 0 && self.old_border_width != 0 {
            self.border_width = self.old_border_width;
            self.old_border_width = 0;
            return true;
        }
        false
    }

    pub fn strip_border(&mut self) -> bool {
        if self.border_width != 0 {
            self.old_border_width = self.border_width;
            self.border_width = 0;
            return true;
        }
        false
    }
}
