use super::{Effect, WmState};
use crate::client::{DEFAULT_WEIGHT, MAX_WEIGHT, MIN_WEIGHT, TagMask};
use crate::layout::LayoutKind;
use log::{debug, trace};
use x11rb::protocol::xproto::Window;

const MIN_MASTER_FRACTION: f32 = 0.1;
const MAX_MASTER_FRACTION: f32 = 0.9;

impl WmState {
    /// Show the tags in `mask`. An empty mask goes back to the previous view.
    pub fn view(&mut self, mask: TagMask) -> bool {
        let all = self.tag_mask();
        let masked = mask & all;
        let index = self.selected_monitor;
        let monitor = &mut self.monitors[index];

        if masked == monitor.tagset() {
            trace!("view {:#b} is already active", masked);
            return false;
        }

        monitor.selected_tags ^= 1;
        if masked != 0 {
            monitor.set_tagset(masked);
            monitor.previous_tag = monitor.current_tag;
            monitor.current_tag = if masked == all {
                0
            } else {
                masked.trailing_zeros() as usize + 1
            };
        } else {
            std::mem::swap(&mut monitor.current_tag, &mut monitor.previous_tag);
        }
        monitor.load_tag_layout();

        self.focus(None);
        self.arrange(Some(index));
        true
    }

    pub fn view_previous(&mut self) -> bool {
        self.view(0)
    }

    /// Add or remove tags from the view, never leaving it empty.
    pub fn toggle_view(&mut self, mask: TagMask) -> bool {
        let index = self.selected_monitor;
        let tagset = self.monitors[index].tagset() ^ (mask & self.tag_mask());
        if tagset == 0 {
            return false;
        }

        self.monitors[index].set_tagset(tagset);
        self.focus(None);
        self.arrange(Some(index));
        true
    }

    /// Replace the tags of the selection.
    pub fn tag(&mut self, mask: TagMask) -> bool {
        let masked = mask & self.tag_mask();
        let Some(selected) = self.selected_client() else {
            return false;
        };
        if masked == 0 {
            return false;
        }

        if let Some(client) = self.clients.get_mut(&selected) {
            client.tags = masked;
        }
        self.focus(None);
        self.arrange(Some(self.selected_monitor));
        true
    }

    /// Add or remove tags of the selection. The current tag index follows
    /// the client when it leaves the current tag.
    pub fn toggle_tag(&mut self, mask: TagMask) -> bool {
        let all = self.tag_mask();
        let Some(selected) = self.selected_client() else {
            return false;
        };
        let Some(client) = self.clients.get_mut(&selected) else {
            return false;
        };
        let tags = client.tags ^ (mask & all);
        if tags == 0 {
            return false;
        }
        client.tags = tags;

        let index = self.selected_monitor;
        let monitor = &mut self.monitors[index];
        let keeps_current =
            monitor.current_tag > 0 && tags & (1 << (monitor.current_tag - 1)) != 0;
        if tags == all {
            monitor.previous_tag = monitor.current_tag;
            monitor.current_tag = 0;
        } else if !keeps_current {
            monitor.previous_tag = monitor.current_tag;
            monitor.current_tag = tags.trailing_zeros() as usize + 1;
        }
        monitor.load_tag_layout();

        self.focus(None);
        self.arrange(Some(index));
        true
    }

    /// Tag `delta` steps away from the lowest selected one, wrapping.
    fn cycled_tag(&self, delta: i32) -> TagMask {
        let count = self.config.tags.len() as i32;
        let visible = self.monitors[self.selected_monitor].tagset() & self.tag_mask();
        let lowest = if visible == 0 {
            0
        } else {
            visible.trailing_zeros() as i32
        };
        1 << (lowest + delta).rem_euclid(count.max(1))
    }

    pub fn cycle_view(&mut self, delta: i32) -> bool {
        let mask = self.cycled_tag(delta);
        self.view(mask)
    }

    /// Move the selection to the neighbouring tag and follow it.
    pub fn cycle_tag(&mut self, delta: i32) -> bool {
        let mask = self.cycled_tag(delta);
        let tagged = self.tag(mask);
        self.view(mask) || tagged
    }

    /// Change the master count of the current tag by `delta`.
    pub fn set_master_count(&mut self, delta: i32) -> bool {
        let index = self.selected_monitor;
        if matches!(
            self.monitors[index].layout(),
            LayoutKind::Monocle | LayoutKind::Floating | LayoutKind::Grid
        ) {
            return false;
        }

        let tiled = self.tiled_clients(index).len();
        let monitor = &mut self.monitors[index];
        let current = monitor.master_count();
        if delta > 0 && current >= tiled {
            trace!("master count already covers all {} tiled clients", tiled);
            return false;
        }

        let mut count = (current as i32 + delta).max(0) as usize;
        if delta > 0 {
            count = count.min(tiled);
        }
        let tag = monitor.current_tag;
        monitor.pertag.master_counts[tag] = count;
        debug!("master count on tag {} is now {}", tag, count);

        self.arrange(Some(index));
        true
    }

    /// Values below 1.0 change the master fraction of the current tag by
    /// that amount, larger values set it to `value - 1.0`.
    pub fn set_master_fraction(&mut self, value: f32) -> bool {
        let index = self.selected_monitor;
        let monitor = &self.monitors[index];
        let tiled = self.tiled_clients(index).len();
        let master_count = monitor.master_count();

        if tiled < 2
            || !monitor.layout().has_master_area()
            || master_count < 1
            || tiled <= master_count
        {
            trace!("master fraction change would not be visible");
            return false;
        }

        let fraction = if value < 1.0 {
            value + monitor.master_fraction()
        } else {
            value - 1.0
        };
        if !(MIN_MASTER_FRACTION..=MAX_MASTER_FRACTION).contains(&fraction) {
            return false;
        }

        let monitor = &mut self.monitors[index];
        let tag = monitor.current_tag;
        monitor.pertag.master_fractions[tag] = fraction;
        self.arrange(Some(index));
        true
    }

    /// Change the weight of the selection by `delta`, or reset it with 0.0.
    /// Refused when no other client shares the selection's partition.
    pub fn set_client_weight(&mut self, delta: f32) -> bool {
        let index = self.selected_monitor;
        let Some(selected) = self.selected_client() else {
            return false;
        };
        let layout = self.monitors[index].layout();
        let tiled = self.tiled_clients(index);
        if tiled.len() < 2 || !layout.arranges() {
            return false;
        }
        if matches!(layout, LayoutKind::Monocle | LayoutKind::Grid) {
            return false;
        }

        let Some(position) = tiled.iter().position(|&w| w == selected) else {
            return false;
        };
        let master_count = self.monitors[index].master_count() as i32;
        let position = position as i32;
        let stack_count = tiled.len() as i32 - master_count;
        let lone_master = position < master_count && master_count < 2;
        let lone_stack =
            position >= master_count && (stack_count < 2 || layout == LayoutKind::Deck);
        if lone_master || lone_stack {
            return false;
        }

        let Some(client) = self.clients.get_mut(&selected) else {
            return false;
        };
        let weight = if delta == 0.0 {
            DEFAULT_WEIGHT
        } else {
            client.weight + delta
        };
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            return false;
        }
        client.weight = weight;

        self.arrange(Some(index));
        true
    }

    /// Every client of the selected monitor back to the default weight.
    pub fn reset_weights(&mut self) -> bool {
        let index = self.selected_monitor;
        if !self.monitors[index].layout().arranges() {
            return false;
        }

        for window in self.monitors[index].stack.clone() {
            if let Some(client) = self.clients.get_mut(&window) {
                client.weight = DEFAULT_WEIGHT;
            }
        }
        self.arrange(Some(index));
        true
    }

    /// Swap to the previous layout, installing `layout` when it is given
    /// and differs from the one just left.
    pub fn set_layout(&mut self, layout: Option<LayoutKind>) {
        let index = self.selected_monitor;
        let monitor = &mut self.monitors[index];

        monitor.selected_layout ^= 1;
        let left = monitor.layouts[monitor.selected_layout ^ 1];
        if let Some(layout) = layout.filter(|&layout| layout != left) {
            monitor.set_layout(layout);
            let tag = monitor.current_tag;
            monitor.pertag.layouts[tag] = layout;
        }
        let entered = monitor.layout();
        debug!("layout {} -> {}", left.as_str(), entered.as_str());

        if self.config.save_floating_geometry {
            let stack = self.monitors[index].stack.clone();
            if !left.arranges() {
                for &window in &stack {
                    if let Some(client) = self.clients.get_mut(&window) {
                        client.save_floating_geometry();
                    }
                }
            } else if !entered.arranges() {
                for window in self.monitors[index].clients.clone() {
                    if let Some(client) = self.clients.get_mut(&window) {
                        client.restore_border();
                    }
                }
                for &window in &stack {
                    if let Some(geometry) = self.clients.get(&window).map(|c| c.floating_geometry) {
                        self.resize(window, geometry, false);
                    }
                }
            }
        }

        if self.monitors[index].selected.is_some() {
            self.arrange(Some(index));
        } else {
            self.update_layout_symbol(index);
            self.push(Effect::DrawBars);
        }
    }

    pub fn cycle_layout(&mut self) {
        let next = self.monitors[self.selected_monitor].layout().next();
        self.set_layout(Some(next));
    }

    pub fn toggle_floating(&mut self) -> bool {
        let Some(selected) = self.selected_client() else {
            return false;
        };
        let Some(client) = self.clients.get_mut(&selected) else {
            return false;
        };
        if client.is_fullscreen {
            return false;
        }

        client.is_floating = !client.is_floating || client.is_fixed;
        if client.is_floating {
            client.restore_border();
            let geometry = client.floating_geometry;
            self.push(Effect::RefreshBorder(selected));
            self.resize(selected, geometry, false);
        } else {
            client.save_floating_geometry();
            self.push(Effect::RefreshBorder(selected));
        }

        self.arrange(Some(self.selected_monitor));
        true
    }

    /// Move the selection to the head of the tiling order, or the next tiled
    /// client when the selection already is the head.
    pub fn zoom(&mut self) -> bool {
        let index = self.selected_monitor;
        if !self.monitors[index].layout().arranges() {
            return false;
        }
        let selected = self.selected_client();
        if selected
            .and_then(|window| self.clients.get(&window))
            .is_some_and(|client| client.is_floating)
        {
            return false;
        }

        let tiled = self.tiled_clients(index);
        let target = match selected {
            Some(window) if tiled.first() == Some(&window) => tiled.get(1).copied(),
            None => None,
            other => other,
        };
        let Some(target) = target else {
            return false;
        };

        self.detach(target);
        self.attach(target);
        self.focus(Some(target));
        self.arrange(Some(index));
        true
    }

    fn tiled_selection(&self) -> Option<(usize, Window)> {
        let window = self.selected_client()?;
        let client = self.clients.get(&window)?;
        (!client.is_floating).then_some((self.selected_monitor, window))
    }

    /// Swap the selection with the previous tiled client, wrapping to the
    /// end of the tiling order.
    pub fn push_up(&mut self) -> bool {
        let Some((index, selected)) = self.tiled_selection() else {
            return false;
        };
        let tiled = self.tiled_clients(index);
        let previous = tiled
            .iter()
            .position(|&w| w == selected)
            .and_then(|position| position.checked_sub(1))
            .map(|position| tiled[position]);

        let clients = &mut self.monitors[index].clients;
        clients.retain(|&w| w != selected);
        match previous.and_then(|anchor| clients.iter().position(|&w| w == anchor)) {
            Some(position) => clients.insert(position, selected),
            None => clients.push(selected),
        }

        self.focus(Some(selected));
        self.arrange(Some(index));
        true
    }

    /// Swap the selection with the next tiled client, wrapping to the head.
    pub fn push_down(&mut self) -> bool {
        let Some((index, selected)) = self.tiled_selection() else {
            return false;
        };
        let tiled = self.tiled_clients(index);
        let next = tiled
            .iter()
            .position(|&w| w == selected)
            .and_then(|position| tiled.get(position + 1))
            .copied();

        let clients = &mut self.monitors[index].clients;
        clients.retain(|&w| w != selected);
        match next.and_then(|anchor| clients.iter().position(|&w| w == anchor)) {
            Some(position) => clients.insert(position + 1, selected),
            None => clients.insert(0, selected),
        }

        self.focus(Some(selected));
        self.arrange(Some(index));
        true
    }

    /// Show or hide the scratchpad, spawning it when it does not exist.
    pub fn toggle_scratchpad(&mut self) {
        let index = self.selected_monitor;
        let scratch = self.scratch_tag();
        let existing = self.monitors[index]
            .clients
            .iter()
            .copied()
            .find(|&w| self.clients.get(&w).is_some_and(|c| c.tags & scratch != 0));

        let Some(window) = existing else {
            let command = self.config.scratchpad.command.clone();
            if !command.is_empty() {
                self.push(Effect::Spawn(command));
            }
            return;
        };

        let tagset = self.monitors[index].tagset() ^ scratch;
        if tagset != 0 {
            self.monitors[index].set_tagset(tagset);
            self.focus(None);
            self.arrange(Some(index));
        }
        if self.is_visible(window) {
            self.focus(Some(window));
            self.restack(index);
        }
    }

    pub fn toggle_bar(&mut self) {
        let index = self.selected_monitor;
        let monitor = &mut self.monitors[index];
        monitor.show_bar = !monitor.show_bar;
        self.arrange(Some(index));
    }

    pub fn cycle_tab_mode(&mut self) {
        let index = self.selected_monitor;
        let monitor = &mut self.monitors[index];
        monitor.tab_mode = monitor.tab_mode.next();
        self.arrange(Some(index));
    }
}
