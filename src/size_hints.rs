use crate::client::Client;
use crate::geometry::Rect;

pub mod flags {
    pub const P_MIN_SIZE: u32 = 1 << 4;
    pub const P_MAX_SIZE: u32 = 1 << 5;
    pub const P_RESIZE_INC: u32 = 1 << 6;
    pub const P_ASPECT: u32 = 1 << 7;
    pub const P_BASE_SIZE: u32 = 1 << 8;
}

pub mod offset {
    pub const FLAGS: usize = 0;
    pub const MIN_WIDTH: usize = 5;
    pub const MIN_HEIGHT: usize = 6;
    pub const MAX_WIDTH: usize = 7;
    pub const MAX_HEIGHT: usize = 8;
    pub const WIDTH_INC: usize = 9;
    pub const HEIGHT_INC: usize = 10;
    pub const MIN_ASPECT_X: usize = 11;
    pub const MIN_ASPECT_Y: usize = 12;
    pub const MAX_ASPECT_X: usize = 13;
    pub const MAX_ASPECT_Y: usize = 14;
    pub const BASE_WIDTH: usize = 15;
    pub const BASE_HEIGHT: usize = 16;
}

/// Length of a WM_NORMAL_HINTS property in 32 bit words.
pub const WM_SIZE_HINTS_LENGTH: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHints {
    pub base_width: i32,
    pub base_height: i32,
    pub increment_width: i32,
    pub increment_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl SizeHints {
    /// Decode a WM_NORMAL_HINTS property. Missing or short properties yield
    /// empty hints.
    pub fn from_wm_normal_hints(values: &[u32]) -> Self {
        use flags::*;
        use offset::*;

        if values.len() < WM_SIZE_HINTS_LENGTH {
            return Self::default();
        }

        let read = |index: usize| values[index] as i32;
        let hint_flags = values[FLAGS];
        let mut hints = Self::default();

        if hint_flags & P_BASE_SIZE != 0 {
            hints.base_width = read(BASE_WIDTH);
            hints.base_height = read(BASE_HEIGHT);
        } else if hint_flags & P_MIN_SIZE != 0 {
            hints.base_width = read(MIN_WIDTH);
            hints.base_height = read(MIN_HEIGHT);
        }

        if hint_flags & P_RESIZE_INC != 0 {
            hints.increment_width = read(WIDTH_INC);
            hints.increment_height = read(HEIGHT_INC);
        }

        if hint_flags & P_MAX_SIZE != 0 {
            hints.max_width = read(MAX_WIDTH);
            hints.max_height = read(MAX_HEIGHT);
        }

        if hint_flags & P_MIN_SIZE != 0 {
            hints.min_width = read(MIN_WIDTH);
            hints.min_height = read(MIN_HEIGHT);
        } else if hint_flags & P_BASE_SIZE != 0 {
            hints.min_width = read(BASE_WIDTH);
            hints.min_height = read(BASE_HEIGHT);
        }

        if hint_flags & P_ASPECT != 0 {
            let min_x = read(MIN_ASPECT_X);
            let max_y = read(MAX_ASPECT_Y);
            if min_x > 0 && max_y > 0 {
                hints.min_aspect = read(MIN_ASPECT_Y) as f32 / min_x as f32;
                hints.max_aspect = read(MAX_ASPECT_X) as f32 / max_y as f32;
            }
        }

        hints
    }

    pub fn is_fixed(&self) -> bool {
        self.max_width > 0
            && self.max_height > 0
            && self.max_width == self.min_width
            && self.max_height == self.min_height
    }
}

/// Everything outside the client that bounds a geometry request.
#[derive(Debug, Clone, Copy)]
pub struct Constraints {
    pub screen_width: i32,
    pub screen_height: i32,
    pub window_area: Rect,
    pub bar_height: i32,
    /// Increment, aspect and min/max hints are only applied when set.
    pub honor_hints: bool,
}

/// Correct `proposed` (inner size, outer origin) for `client`.
///
/// Returns the corrected rectangle and whether it differs from the client's
/// current geometry.
pub fn apply_size_hints(
    client: &Client,
    proposed: Rect,
    interactive: bool,
    constraints: &Constraints,
) -> (Rect, bool) {
    let Rect {
        mut x,
        mut y,
        mut width,
        mut height,
    } = proposed;
    let border = client.border_width;
    let current = client.geometry;

    width = width.max(1);
    height = height.max(1);

    if interactive {
        if x > constraints.screen_width {
            x = constraints.screen_width - client.outer_width();
        }
        if y > constraints.screen_height {
            y = constraints.screen_height - client.outer_height();
        }
        if x + width + 2 * border < 0 {
            x = 0;
        }
        if y + height + 2 * border < 0 {
            y = 0;
        }
    } else {
        let area = constraints.window_area;
        if x >= area.right() {
            x = area.right() - client.outer_width();
        }
        if y >= area.bottom() {
            y = area.bottom() - client.outer_height();
        }
        if x + width + 2 * border <= area.x {
            x = area.x;
        }
        if y + height + 2 * border <= area.y {
            y = area.y;
        }
    }

    height = height.max(constraints.bar_height);
    width = width.max(constraints.bar_height);

    if constraints.honor_hints {
        let hints = &client.hints;
        let base_is_min =
            hints.base_width == hints.min_width && hints.base_height == hints.min_height;

        if !base_is_min {
            width -= hints.base_width;
            height -= hints.base_height;
        }

        if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 && width > 0 && height > 0 {
            if hints.max_aspect < width as f32 / height as f32 {
                width = (height as f32 * hints.max_aspect + 0.5) as i32;
            } else if hints.min_aspect < height as f32 / width as f32 {
                height = (width as f32 * hints.min_aspect + 0.5) as i32;
            }
        }

        if base_is_min {
            width -= hints.base_width;
            height -= hints.base_height;
        }

        if hints.increment_width > 0 {
            width -= width % hints.increment_width;
        }
        if hints.increment_height > 0 {
            height -= height % hints.increment_height;
        }

        width = (width + hints.base_width).max(hints.min_width);
        height = (height + hints.base_height).max(hints.min_height);

        if hints.max_width > 0 {
            width = width.min(hints.max_width);
        }
        if hints.max_height > 0 {
            height = height.min(hints.max_height);
        }
    }

    let corrected = Rect::new(x, y, width, height);
    (corrected, corrected != current)
}
