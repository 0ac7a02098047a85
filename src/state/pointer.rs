use super::{Effect, WmState};
use crate::drag::{DragState, MoveDrag, ResizeDrag, find_sector, snap_position};
use crate::geometry::Rect;
use log::{debug, trace};
use x11rb::protocol::xproto::Window;

impl WmState {
    /// Start moving the selection with the pointer at (`x`, `y`). Returns the
    /// window to grab the pointer for.
    pub fn begin_move(&mut self, x: i32, y: i32) -> Option<Window> {
        let window = self.selected_client()?;
        let geometry = self.clients.get(&window)?.geometry;
        self.restack(self.selected_monitor);

        self.drag = DragState::Moving(MoveDrag {
            window,
            origin_x: geometry.x,
            origin_y: geometry.y,
            pointer_x: x,
            pointer_y: y,
        });
        debug!("moving window {}", window);
        Some(window)
    }

    /// Start resizing the selection from the edge or corner under the
    /// pointer, then warp the pointer onto that edge.
    pub fn begin_resize(&mut self, x: i32, y: i32) -> Option<Window> {
        let window = self.selected_client()?;
        let client = self.clients.get(&window)?;
        let border = client.border_width;
        let origin = client.geometry;

        let sector = find_sector(
            x - origin.x - border,
            y - origin.y - border,
            origin.width,
            origin.height,
            border,
        )?;
        self.restack(self.selected_monitor);

        let (warp_x, warp_y) = sector.warp_offset(origin.width, origin.height, border);
        self.push(Effect::WarpToWindow {
            window,
            x: warp_x,
            y: warp_y,
        });
        self.drag = DragState::Resizing(ResizeDrag {
            window,
            sector,
            origin,
            previous_size: None,
        });
        debug!("resizing window {} from {:?}", window, sector);
        Some(window)
    }

    /// Advance the active drag to a pointer at (`x`, `y`).
    pub fn drag_motion(&mut self, x: i32, y: i32) {
        match self.drag {
            DragState::Idle => {}
            DragState::Moving(drag) => self.move_step(drag, x, y),
            DragState::Resizing(drag) => self.resize_step(drag, x, y),
        }
    }

    fn move_step(&mut self, drag: MoveDrag, x: i32, y: i32) {
        let Some(client) = self.clients.get(&drag.window) else {
            self.drag = DragState::Idle;
            return;
        };
        let monitor = client.monitor;
        let geometry = client.geometry;
        let border = client.border_width;
        let snap = self.config.snap as i32;
        let area = self.monitors[self.selected_monitor].window_area;

        let others: Vec<Rect> = self.monitors[monitor]
            .clients
            .iter()
            .filter(|&&w| w != drag.window && self.is_visible(w))
            .filter_map(|w| self.clients.get(w).map(|c| c.geometry))
            .collect();

        let (nx, ny) = snap_position(geometry, border, drag.target(x, y), &others, area, snap);

        let inside_area = nx >= area.x && nx <= area.right() && ny >= area.y && ny <= area.bottom();
        let arranges = self.monitors[self.selected_monitor].layout().arranges();
        let floating = self.clients.get(&drag.window).is_some_and(|c| c.is_floating);
        if inside_area
            && !floating
            && arranges
            && ((nx - geometry.x).abs() > snap || (ny - geometry.y).abs() > snap)
        {
            trace!("window {} dragged out of the tiling", drag.window);
            self.toggle_floating();
        }

        let floating = self.clients.get(&drag.window).is_some_and(|c| c.is_floating);
        if !arranges || floating {
            let Some(current) = self.clients.get(&drag.window).map(|c| c.geometry) else {
                return;
            };
            self.resize(
                drag.window,
                Rect::new(nx, ny, current.width, current.height),
                true,
            );
        }
    }

    fn resize_step(&mut self, drag: ResizeDrag, x: i32, y: i32) {
        let Some(client) = self.clients.get(&drag.window) else {
            self.drag = DragState::Idle;
            return;
        };
        let current = client.geometry;
        let border = client.border_width;
        let floating = client.is_floating;
        let snap = self.config.snap as i32;
        let arranges = self.monitors[self.selected_monitor].layout().arranges();

        let proposed = drag.step(x, y, current, border);
        if !floating
            && arranges
            && ((proposed.width - current.width).abs() > snap
                || (proposed.height - current.height).abs() > snap)
        {
            trace!("window {} resized out of the tiling", drag.window);
            self.toggle_floating();
        }

        self.drag = DragState::Resizing(ResizeDrag {
            previous_size: Some((current.width, current.height)),
            ..drag
        });

        let floating = self.clients.get(&drag.window).is_some_and(|c| c.is_floating);
        if !arranges || floating {
            self.resize(drag.window, proposed, true);
        }
    }

    /// Finish the drag. A client that now lies mostly on another monitor is
    /// sent there and that monitor becomes selected.
    pub fn end_drag(&mut self) {
        let drag = std::mem::take(&mut self.drag);
        let Some(window) = drag.window() else {
            return;
        };
        let Some(client) = self.clients.get(&window) else {
            return;
        };
        let geometry = client.geometry;

        if let DragState::Resizing(resize) = drag {
            let (x, y) = resize
                .sector
                .warp_offset(geometry.width, geometry.height, client.border_width);
            self.push(Effect::WarpToWindow { window, x, y });
        }

        let monitor = self.rect_to_monitor(geometry);
        if monitor != self.selected_monitor {
            self.send_to_monitor(window, monitor);
            self.selected_monitor = monitor;
            self.focus(None);
        }
    }
}
