use super::{Effect, WmState};
use crate::geometry::Rect;
use log::{debug, trace};
use x11rb::protocol::xproto::Window;

impl WmState {
    /// Select `candidate`, falling back to the most recent visible client of
    /// the selected monitor.
    pub fn focus(&mut self, candidate: Option<Window>) {
        let previous = self.selected_client();
        self.focus_from(candidate, previous);
    }

    /// Like [`focus`](Self::focus), with an explicit previous selection for
    /// the alt-tab history.
    /// A requested client that got replaced by the fallback is not recorded.
    pub(crate) fn focus_from(&mut self, candidate: Option<Window>, previous: Option<Window>) {
        let requested = candidate;
        let candidate = candidate.filter(|&window| self.is_visible(window)).or_else(|| {
            self.monitors[self.selected_monitor]
                .stack
                .iter()
                .copied()
                .find(|&window| self.is_visible(window))
        });

        if let Some(selected) = self.selected_client().filter(|&s| Some(s) != candidate) {
            self.push(Effect::Unfocus {
                window: selected,
                reset_input: false,
            });
        }

        match candidate {
            Some(window) => {
                let Some(client) = self.clients.get_mut(&window) else {
                    return;
                };
                let monitor = client.monitor;
                let urgent = std::mem::replace(&mut client.is_urgent, false);
                let center = client.geometry.center();

                self.selected_monitor = monitor;
                if urgent {
                    self.push(Effect::ClearUrgency(window));
                }
                self.detach_stack(window);
                self.attach_stack(window);
                self.push(Effect::Focus(window));
                if requested.is_none_or(|requested| requested == window) {
                    self.alt_tab.record(previous, window);
                }

                if self.mouse_follows_focus {
                    self.pointer_transfer = Some(center);
                    self.push(Effect::WarpPointer {
                        x: center.0,
                        y: center.1,
                    });
                }
            }
            None => self.push(Effect::FocusRoot),
        }

        self.monitors[self.selected_monitor].selected = candidate;
        self.push(Effect::DrawBars);
    }

    /// Another client grabbed the input focus; give it back to the selection.
    pub fn focus_in(&mut self, window: Window) {
        if let Some(selected) = self.selected_client().filter(|&s| s != window) {
            trace!("window {} stole the focus from {}", window, selected);
            self.push(Effect::Focus(selected));
        }
    }

    /// Neighbour of the selection among the visible clients that take part
    /// in rotation, wrapping at both ends.
    fn stack_neighbour(&self, direction: i32) -> Option<Window> {
        let selected = self.selected_client()?;
        let candidates = self.rotation_clients(self.selected_monitor);
        if candidates.is_empty() {
            return None;
        }

        let count = candidates.len() as i32;
        let index = match candidates.iter().position(|&w| w == selected) {
            Some(index) => (index as i32 + direction.signum()).rem_euclid(count),
            None if direction > 0 => 0,
            None => count - 1,
        };
        Some(candidates[index as usize])
    }

    pub fn focus_stack(&mut self, direction: i32) -> bool {
        let Some(target) = self.stack_neighbour(direction) else {
            return false;
        };
        self.focus(Some(target));
        self.restack(self.selected_monitor);
        true
    }

    /// Move the selection without raising the new one.
    pub fn focus_stack_no_raise(&mut self, direction: i32) -> bool {
        let Some(target) = self.stack_neighbour(direction) else {
            return false;
        };
        self.focus(Some(target));
        true
    }

    /// Focus the `index`-th tab of the selected monitor.
    pub fn focus_tab(&mut self, index: usize) -> bool {
        let Some(&target) = self.rotation_clients(self.selected_monitor).get(index) else {
            return false;
        };
        self.focus(Some(target));
        self.restack(self.selected_monitor);
        true
    }

    /// Neighbouring monitor in `direction`, cyclic.
    pub fn monitor_in_direction(&self, direction: i32) -> usize {
        let count = self.monitors.len() as i32;
        (self.selected_monitor as i32 + direction.signum()).rem_euclid(count.max(1)) as usize
    }

    pub fn monitor_at(&self, x: i32, y: i32) -> usize {
        self.rect_to_monitor(Rect::new(x, y, 1, 1))
    }

    /// Map a pointer position on monitor `from` to the same relative spot on
    /// monitor `to`.
    pub fn transfer_position(&self, from: usize, to: usize, (x, y): (i32, i32)) -> (i32, i32) {
        let source = self.monitors[from].screen;
        let target = self.monitors[to].screen;
        let relative_x = (x - source.x) as f32 / source.width.max(1) as f32;
        let relative_y = (y - source.y) as f32 / source.height.max(1) as f32;
        (
            target.x + (target.width as f32 * relative_x) as i32,
            target.y + (target.height as f32 * relative_y) as i32,
        )
    }

    /// Warp the pointer from monitor `from` into the selected monitor, unless
    /// the pointer already follows the focus.
    fn transfer_pointer(&mut self, from: usize, pointer: Option<(i32, i32)>) {
        if self.mouse_follows_focus || !self.config.transfer_pointer {
            return;
        }
        let Some(pointer) = pointer else {
            return;
        };

        let (x, y) = self.transfer_position(from, self.selected_monitor, pointer);
        self.pointer_transfer = Some((x, y));
        self.push(Effect::WarpPointer { x, y });
    }

    /// Select the neighbouring monitor. `pointer` is the current pointer
    /// position, used to carry the pointer along.
    pub fn focus_monitor(&mut self, direction: i32, pointer: Option<(i32, i32)>) -> bool {
        if self.monitors.len() < 2 {
            return false;
        }
        let target = self.monitor_in_direction(direction);
        if target == self.selected_monitor {
            return false;
        }

        let previous_monitor = self.selected_monitor;
        let previous = self.selected_client();
        if let Some(selected) = previous {
            self.push(Effect::Unfocus {
                window: selected,
                reset_input: true,
            });
        }
        self.selected_monitor = target;
        self.focus_from(None, previous);

        debug!("selected monitor {}", target);
        self.transfer_pointer(previous_monitor, pointer);
        true
    }

    /// Jump back to the previously selected client.
    pub fn alt_tab(&mut self, pointer: Option<(i32, i32)>) -> bool {
        let previous_monitor = self.selected_monitor;
        let Some(target) = self.alt_tab.swap() else {
            return false;
        };
        if !self.is_visible(target) {
            trace!("alt-tab target {} is not visible", target);
            self.alt_tab.swap();
            return false;
        }

        self.focus(Some(target));
        let monitor = self.clients.get(&target).map_or(self.selected_monitor, |c| c.monitor);
        self.restack(monitor);

        if monitor != previous_monitor {
            self.transfer_pointer(previous_monitor, pointer);
        }
        true
    }

    /// The pointer entered `client`, or a non-client window on `monitor`.
    pub fn pointer_entered(&mut self, client: Option<Window>, monitor: usize, x: i32, y: i32) {
        if !self.focus_follows_mouse {
            return;
        }
        if self.config.transfer_pointer && self.pointer_transfer == Some((x, y)) {
            trace!("ignoring the enter caused by a pointer transfer");
            return;
        }

        let client = client.filter(|&window| self.is_managed(window));
        let monitor = client
            .and_then(|window| self.clients.get(&window))
            .map_or(monitor, |c| c.monitor);

        if monitor != self.selected_monitor {
            if let Some(selected) = self.selected_client() {
                self.push(Effect::Unfocus {
                    window: selected,
                    reset_input: true,
                });
            }
            self.selected_monitor = monitor;
        } else if client.is_none() || client == self.selected_client() {
            return;
        }

        self.focus(client);
    }

    /// Pointer motion on the root window selects the monitor under it.
    pub fn pointer_motion_root(&mut self, x: i32, y: i32) {
        let monitor = self.monitor_at(x, y);
        self.select_monitor(monitor);
    }

    /// Make `monitor` the selected one, as a click on its bar does.
    pub fn select_monitor(&mut self, monitor: usize) {
        if monitor == self.selected_monitor || monitor >= self.monitors.len() {
            return;
        }

        if let Some(selected) = self.selected_client() {
            self.push(Effect::Unfocus {
                window: selected,
                reset_input: true,
            });
        }
        self.selected_monitor = monitor;
        self.focus(None);
    }

    pub fn toggle_focus_follows_mouse(&mut self) {
        self.focus_follows_mouse = !self.focus_follows_mouse;
        if self.focus_follows_mouse {
            self.mouse_follows_focus = false;
        }
        debug!(
            "focus follows mouse: {}, mouse follows focus: {}",
            self.focus_follows_mouse, self.mouse_follows_focus
        );
    }

    pub fn toggle_mouse_follows_focus(&mut self) {
        self.mouse_follows_focus = !self.mouse_follows_focus;
        if self.mouse_follows_focus {
            self.focus_follows_mouse = false;
        }
        debug!(
            "focus follows mouse: {}, mouse follows focus: {}",
            self.focus_follows_mouse, self.mouse_follows_focus
        );
    }

    /// Move a client to another monitor, keeping its tags.
    pub fn send_to_monitor(&mut self, window: Window, monitor: usize) -> bool {
        let Some(current) = self.clients.get(&window).map(|c| c.monitor) else {
            return false;
        };
        if current == monitor || monitor >= self.monitors.len() {
            return false;
        }

        self.push(Effect::Unfocus {
            window,
            reset_input: true,
        });
        self.detach(window);
        self.detach_stack(window);
        if let Some(client) = self.clients.get_mut(&window) {
            client.monitor = monitor;
        }
        self.attach(window);
        self.attach_stack(window);

        debug!("sent window {} to monitor {}", window, monitor);
        self.focus(None);
        self.arrange(None);
        true
    }

    /// Send the selection to the neighbouring monitor.
    pub fn tag_monitor(&mut self, direction: i32) -> bool {
        if self.monitors.len() < 2 {
            return false;
        }
        let Some(selected) = self.selected_client() else {
            return false;
        };
        let target = self.monitor_in_direction(direction);
        self.send_to_monitor(selected, target)
    }
}
