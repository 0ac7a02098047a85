//! Pointer driven move and resize.
//!
//! A drag is a small state machine: it starts on a button press, advances
//! once per pointer motion and ends on release. The window manager keeps
//! dispatching configure requests, exposes and map requests while a drag is
//! active.

use crate::geometry::Rect;
use x11rb::protocol::xproto::Window;

/// Part of a window grabbed for resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Sector {
    fn moves_left_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    fn moves_right_edge(&self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    fn moves_top_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    fn moves_bottom_edge(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// Where the pointer is warped when the resize starts, relative to the
    /// window's inside origin.
    pub fn warp_offset(&self, width: i32, height: i32, border: i32) -> (i32, i32) {
        let x = if self.moves_left_edge() {
            -border
        } else if self.moves_right_edge() {
            width + border - 1
        } else {
            width / 2
        };
        let y = if self.moves_top_edge() {
            -border
        } else if self.moves_bottom_edge() {
            height + border - 1
        } else {
            height / 2
        };
        (x, y)
    }
}

/// Find the sector under a pointer at (`x`, `y`) relative to the window
/// origin. The window is split in thirds; the centre cell is cut into four
/// triangles pointing at the nearest edge. Pointers on the border count as
/// inside.
pub fn find_sector(x: i32, y: i32, width: i32, height: i32, border: i32) -> Option<Sector> {
    if width <= 0 || height <= 0 {
        return None;
    }
    if x < -border || y < -border || x >= width + border || y >= height + border {
        return None;
    }

    let x = x.clamp(0, width - 1);
    let y = y.clamp(0, height - 1);

    let third = |position: i32, extent: i32| {
        let cell = (extent / 3).max(1);
        if position < cell {
            0
        } else if position < 2 * cell {
            1
        } else {
            2
        }
    };

    let sector = match (third(x, width), third(y, height)) {
        (0, 0) => Sector::TopLeft,
        (1, 0) => Sector::Top,
        (2, 0) => Sector::TopRight,
        (0, 1) => Sector::Left,
        (2, 1) => Sector::Right,
        (0, 2) => Sector::BottomLeft,
        (1, 2) => Sector::Bottom,
        (2, 2) => Sector::BottomRight,
        _ => {
            let dx = (x - width / 2) as f32 / width as f32;
            let dy = (y - height / 2) as f32 / height as f32;
            if dx.abs() > dy.abs() {
                if dx < 0.0 { Sector::Left } else { Sector::Right }
            } else if dy < 0.0 {
                Sector::Top
            } else {
                Sector::Bottom
            }
        }
    };

    Some(sector)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDrag {
    pub window: Window,
    /// Client origin when the drag started.
    pub origin_x: i32,
    pub origin_y: i32,
    /// Pointer position when the drag started.
    pub pointer_x: i32,
    pub pointer_y: i32,
}

impl MoveDrag {
    /// Unsnapped position for a pointer at (`x`, `y`).
    pub fn target(&self, x: i32, y: i32) -> (i32, i32) {
        (
            self.origin_x + (x - self.pointer_x),
            self.origin_y + (y - self.pointer_y),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub window: Window,
    pub sector: Sector,
    /// Client geometry when the drag started.
    pub origin: Rect,
    /// Size before the last step, `None` until the first motion.
    pub previous_size: Option<(i32, i32)>,
}

impl ResizeDrag {
    /// Proposed geometry for a pointer at (`x`, `y`). Right and bottom edges
    /// grow away from the origin, left and top edges keep the far edge in
    /// place. An edge whose last step was refused by the client stays put.
    pub fn step(&self, x: i32, y: i32, current: Rect, border: i32) -> Rect {
        let origin = self.origin;
        let width_stuck = self.previous_size.is_some_and(|(width, _)| width == current.width);
        let height_stuck = self
            .previous_size
            .is_some_and(|(_, height)| height == current.height);

        let (mut new_x, mut new_width) = (current.x, current.width);
        if self.sector.moves_right_edge() {
            new_width = (x - origin.x - 2 * border + 1).max(1);
        } else if self.sector.moves_left_edge() {
            if !width_stuck {
                new_x = x.min(origin.x + origin.width);
            }
            new_width = (origin.x - x + origin.width).max(1);
        }

        let (mut new_y, mut new_height) = (current.y, current.height);
        if self.sector.moves_bottom_edge() {
            new_height = (y - origin.y - 2 * border + 1).max(1);
        } else if self.sector.moves_top_edge() {
            if !height_stuck {
                new_y = y.min(origin.y + origin.height);
            }
            new_height = (origin.y - y + origin.height).max(1);
        }

        Rect::new(new_x, new_y, new_width, new_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Moving(MoveDrag),
    Resizing(ResizeDrag),
}

impl DragState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn window(&self) -> Option<Window> {
        match self {
            Self::Idle => None,
            Self::Moving(drag) => Some(drag.window),
            Self::Resizing(drag) => Some(drag.window),
        }
    }
}

fn spans_touch(start: i32, length: i32, other_start: i32, other_length: i32, border: i32) -> bool {
    start - border <= other_start + other_length + border
        && other_start - border <= start + length + border
}

/// Snap a moved window to the edges of its neighbours and of the window area.
///
/// `moving` is the client's current geometry (outer origin, inner size),
/// `others` the geometries of the other visible clients on its monitor.
/// Area snapping only applies while (`x`, `y`) lies inside `area`.
pub fn snap_position(
    moving: Rect,
    border: i32,
    (mut x, mut y): (i32, i32),
    others: &[Rect],
    area: Rect,
    snap: i32,
) -> (i32, i32) {
    for other in others {
        if spans_touch(moving.y, moving.height, other.y, other.height, border) {
            if (other.right() - x).abs() < snap {
                x = other.right() + 2 * border;
            } else if (x + moving.width - other.x).abs() < snap {
                x = other.x - moving.width - 2 * border;
            }
        }
        if spans_touch(moving.x, moving.width, other.x, other.width, border) {
            if (other.bottom() - y).abs() < snap {
                y = other.bottom() + 2 * border;
            } else if (y + moving.height - other.y).abs() < snap {
                y = other.y - moving.height - 2 * border;
            }
        }
    }

    let outer_width = moving.width + 2 * border;
    let outer_height = moving.height + 2 * border;
    if x >= area.x && x <= area.right() && y >= area.y && y <= area.bottom() {
        if (area.x - x).abs() < snap {
            x = area.x;
        } else if (area.right() - (x + outer_width)).abs() < snap {
            x = area.right() - outer_width;
        }

        if (area.y - y).abs() < snap {
            y = area.y;
        } else if (area.bottom() - (y + outer_height)).abs() < snap {
            y = area.bottom() - outer_height;
        }
    }

    (x, y)
}
