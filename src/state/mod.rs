//! The window manager's model: clients, monitors, tags and focus.
//!
//! `WmState` never talks to the X server. Every operation mutates the model
//! and queues [`Effect`]s which the window manager drains and turns into
//! requests. This keeps the whole arrangement and focus logic testable
//! without a display.

mod focus;
mod pointer;
mod tags;

use crate::Config;
use crate::client::rules::{apply_rules, is_rotation_excluded};
use crate::client::{Client, TagMask};
use crate::drag::DragState;
use crate::geometry::Rect;
use crate::history::AltTabHistory;
use crate::layout::{BorderPolicy, TiledClient};
use crate::monitor::Monitor;
use crate::size_hints::{Constraints, SizeHints, apply_size_hints};
use log::{debug, trace};
use std::collections::HashMap;
use x11rb::protocol::xproto::Window;

/// Requests the model wants carried out on the display, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Move, resize and set the border, then tell the client with a synthetic
    /// ConfigureNotify.
    Configure {
        window: Window,
        geometry: Rect,
        border_width: i32,
    },
    /// Plain move and resize.
    MoveResize { window: Window, geometry: Rect },
    /// Plain move, used to show and hide clients.
    Move { window: Window, x: i32, y: i32 },
    /// Synthetic ConfigureNotify with the current geometry.
    NotifyGeometry(Window),
    /// Focused border colour, focused button grabs and input focus.
    Focus(Window),
    /// Unfocused border colour and button grabs. `reset_input` also hands the
    /// input focus back to the root window.
    Unfocus { window: Window, reset_input: bool },
    FocusRoot,
    /// Refresh the border colour after a floating state change.
    RefreshBorder(Window),
    /// Clear the urgency hint in WM_HINTS.
    ClearUrgency(Window),
    Raise(Window),
    Restack(RestackPlan),
    /// Warp to root coordinates.
    WarpPointer { x: i32, y: i32 },
    /// Warp relative to the inside of a window.
    WarpToWindow { window: Window, x: i32, y: i32 },
    SetFullscreen { window: Window, enabled: bool },
    Map(Window),
    /// Release the pointer grab of a drag that ended early.
    UngrabPointer,
    Spawn(Vec<String>),
    /// Bar or tab bar geometry of a monitor changed.
    PlaceBars(usize),
    DrawBars,
}

/// Stacking order for one monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestackPlan {
    pub monitor: usize,
    /// Floating selection, or selection under a floating layout.
    pub raise: Option<Window>,
    /// Tiled visible clients in recency order, stacked below the bar.
    pub below_bar: Vec<Window>,
}

/// Everything the window manager learned about a window before managing it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowInfo {
    pub window: Window,
    pub geometry: Rect,
    pub border_width: i32,
    pub name: String,
    pub class: String,
    pub instance: String,
    /// WM_TRANSIENT_FOR, whether managed or not.
    pub transient_for: Option<Window>,
    pub hints: SizeHints,
    pub urgent: bool,
    pub never_focus: bool,
    pub is_dialog: bool,
    pub fullscreen: bool,
}

impl WindowInfo {
    pub fn new(window: Window, geometry: Rect) -> Self {
        Self {
            window,
            geometry,
            border_width: 0,
            name: String::new(),
            class: String::new(),
            instance: String::new(),
            transient_for: None,
            hints: SizeHints::default(),
            urgent: false,
            never_focus: false,
            is_dialog: false,
            fullscreen: false,
        }
    }
}

/// Fields of a ConfigureRequest that the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigureRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub border_width: Option<i32>,
}

pub struct WmState {
    pub config: Config,
    pub clients: HashMap<Window, Client>,
    pub monitors: Vec<Monitor>,
    pub selected_monitor: usize,
    pub alt_tab: AltTabHistory,
    pub focus_follows_mouse: bool,
    pub mouse_follows_focus: bool,
    /// Root window size.
    pub screen: Rect,
    pub bar_height: i32,
    pub tab_height: i32,
    pub status_text: String,
    /// Where the pointer was last warped to, so the resulting EnterNotify
    /// does not move the focus again.
    pub pointer_transfer: Option<(i32, i32)>,
    pub drag: DragState,
    effects: Vec<Effect>,
}

impl WmState {
    pub fn new(config: Config, screen: Rect, heads: &[Rect], bar_height: i32, tab_height: i32) -> Self {
        let heads = if heads.is_empty() {
            vec![screen]
        } else {
            heads.to_vec()
        };

        let monitors = heads
            .iter()
            .enumerate()
            .map(|(num, &rect)| Monitor::new(num, rect, &config))
            .collect();

        let mut state = Self {
            focus_follows_mouse: config.focus_follows_mouse,
            mouse_follows_focus: config.mouse_follows_focus && !config.focus_follows_mouse,
            config,
            clients: HashMap::new(),
            monitors,
            selected_monitor: 0,
            alt_tab: AltTabHistory::new(),
            screen,
            bar_height,
            tab_height,
            status_text: format!("oxtile-{}", env!("CARGO_PKG_VERSION")),
            pointer_transfer: None,
            drag: DragState::Idle,
            effects: Vec::new(),
        };

        for index in 0..state.monitors.len() {
            state.update_bar_position(index);
        }

        state
    }

    /// Mask of all configured tags.
    pub fn tag_mask(&self) -> TagMask {
        (1 << self.config.tags.len()) - 1
    }

    /// Hidden tag carried by the scratchpad.
    pub fn scratch_tag(&self) -> TagMask {
        1 << self.config.tags.len()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn client(&self, window: Window) -> Option<&Client> {
        self.clients.get(&window)
    }

    pub fn client_mut(&mut self, window: Window) -> Option<&mut Client> {
        self.clients.get_mut(&window)
    }

    pub fn is_managed(&self, window: Window) -> bool {
        self.clients.contains_key(&window)
    }

    pub fn selected_monitor(&self) -> &Monitor {
        &self.monitors[self.selected_monitor]
    }

    pub fn selected_client(&self) -> Option<Window> {
        self.monitors[self.selected_monitor].selected
    }

    pub fn is_visible(&self, window: Window) -> bool {
        self.clients.get(&window).is_some_and(|client| {
            client.is_visible_on(self.monitors[client.monitor].tagset())
        })
    }

    fn is_tiled(&self, window: Window) -> bool {
        self.is_visible(window) && self.clients.get(&window).is_some_and(|c| !c.is_floating)
    }

    /// Visible, non-floating clients of a monitor in tiling order.
    pub fn tiled_clients(&self, monitor: usize) -> Vec<Window> {
        self.monitors[monitor]
            .clients
            .iter()
            .copied()
            .filter(|&window| self.is_tiled(window))
            .collect()
    }

    /// Visible clients of a monitor that take part in tabs and rotation.
    pub fn rotation_clients(&self, monitor: usize) -> Vec<Window> {
        self.monitors[monitor]
            .clients
            .iter()
            .copied()
            .filter(|&window| {
                self.is_visible(window)
                    && self.clients.get(&window).is_some_and(|c| !c.rotation_excluded)
            })
            .collect()
    }

    pub fn attach(&mut self, window: Window) {
        if let Some(monitor) = self.clients.get(&window).map(|c| c.monitor) {
            self.monitors[monitor].clients.insert(0, window);
        }
    }

    /// Insert after the first tiled client, or at the head when there is no
    /// tiled client or the selection is missing or floating.
    pub fn attach_aside(&mut self, window: Window) {
        let Some(monitor) = self.clients.get(&window).map(|c| c.monitor) else {
            return;
        };
        let selection_tiled = self.monitors[monitor]
            .selected
            .and_then(|selected| self.clients.get(&selected))
            .is_some_and(|selected| !selected.is_floating);
        let first_tiled = self.tiled_clients(monitor).first().copied();

        match first_tiled {
            Some(anchor) if selection_tiled => {
                let clients = &mut self.monitors[monitor].clients;
                let position = clients.iter().position(|&w| w == anchor).map_or(0, |p| p + 1);
                clients.insert(position, window);
            }
            _ => self.attach(window),
        }
    }

    pub fn detach(&mut self, window: Window) {
        if let Some(monitor) = self.clients.get(&window).map(|c| c.monitor) {
            self.monitors[monitor].clients.retain(|&w| w != window);
        }
    }

    pub fn attach_stack(&mut self, window: Window) {
        if let Some(monitor) = self.clients.get(&window).map(|c| c.monitor) {
            self.monitors[monitor].stack.insert(0, window);
        }
    }

    /// Remove from the recency stack. A detached selection passes to the
    /// most recent visible client.
    pub fn detach_stack(&mut self, window: Window) {
        let Some(monitor) = self.clients.get(&window).map(|c| c.monitor) else {
            return;
        };
        self.monitors[monitor].stack.retain(|&w| w != window);

        if self.monitors[monitor].selected == Some(window) {
            let fallback = self.monitors[monitor]
                .stack
                .iter()
                .copied()
                .find(|&w| self.is_visible(w));
            self.monitors[monitor].selected = fallback;
        }
    }

    /// Take over a newly mapped window.
    pub fn manage(&mut self, info: WindowInfo) {
        let window = info.window;
        if self.is_managed(window) {
            return;
        }

        let mut client = Client::new(window, self.selected_monitor);
        client.set_name(&info.name);
        client.set_class(&info.instance, &info.class);
        client.rotation_excluded =
            is_rotation_excluded(&self.config.rotation_excluded_classes, &client.class);

        let transient_parent = info
            .transient_for
            .and_then(|parent| self.clients.get(&parent))
            .map(|parent| (parent.monitor, parent.tags));

        if let Some((monitor, tags)) = transient_parent {
            client.monitor = monitor;
            client.tags = tags;
        } else {
            let outcome = apply_rules(&self.config.rules, &client.class, &client.instance, &client.name);
            client.is_floating = outcome.floating;
            client.is_centered = outcome.centered;
            if let Some(monitor) = outcome.monitor.filter(|&m| m < self.monitors.len()) {
                client.monitor = monitor;
            }
            client.tags = if outcome.tags & self.tag_mask() != 0 {
                outcome.tags & self.tag_mask()
            } else {
                self.monitors[client.monitor].tagset()
            };
        }

        let monitor = &self.monitors[client.monitor];
        let area = monitor.window_area;
        let screen = monitor.screen;
        let geometry = info.geometry;

        client.geometry = geometry;
        if (!monitor.layout().arranges() || client.is_floating) && client.is_centered {
            client.geometry.x = area.x + (area.width / 2 - geometry.width / 2);
            client.geometry.y = area.y + (area.height / 2 - geometry.height / 2);
        }
        client.old_geometry = client.geometry;
        client.original_border_width = info.border_width;

        // The border is not applied yet, sizes below use the requested one.
        client.border_width = info.border_width;
        if client.geometry.x + client.outer_width() > screen.right() {
            client.geometry.x = screen.right() - client.outer_width();
        }
        if client.geometry.y + client.outer_height() > screen.bottom() {
            client.geometry.y = screen.bottom() - client.outer_height();
        }
        client.geometry.x = client.geometry.x.max(screen.x);
        let center_x = client.geometry.x + client.geometry.width / 2;
        let covers_bar =
            monitor.bar_y == screen.y && center_x >= area.x && center_x < area.right();
        client.geometry.y = client.geometry.y.max(if covers_bar {
            self.bar_height
        } else {
            screen.y
        });
        client.border_width = self.config.border_width as i32;

        if !self.config.scratchpad.name.is_empty() && client.name == self.config.scratchpad.name {
            client.tags = self.scratch_tag();
            let monitor = &mut self.monitors[client.monitor];
            let tagset = monitor.tagset() | client.tags;
            monitor.set_tagset(tagset);
            client.is_floating = true;
            client.geometry.x = area.x + (area.width / 2 - client.outer_width() / 2);
            client.geometry.y = area.y + (area.height / 2 - client.outer_height() / 2);
        } else {
            client.tags &= self.tag_mask();
        }

        client.set_hints(info.hints);
        client.never_focus = info.never_focus;
        client.save_floating_geometry();
        if !client.is_floating {
            client.is_floating = info.transient_for.is_some() || client.is_fixed;
            client.old_state = client.is_floating;
        }
        if info.is_dialog {
            client.is_floating = true;
        }

        debug!(
            "managing window {} ({} / {}) on monitor {} with tags {:#b}",
            window, client.class, client.instance, client.monitor, client.tags
        );

        let monitor = client.monitor;
        let geometry = client.geometry;
        let border_width = client.border_width;
        let floating = client.is_floating;
        let excluded = client.rotation_excluded;
        let urgent = info.urgent;
        self.clients.insert(window, client);

        self.push(Effect::Configure {
            window,
            geometry,
            border_width,
        });
        if floating {
            self.push(Effect::Raise(window));
        }

        self.attach_aside(window);
        self.attach_stack(window);
        self.push(Effect::MoveResize {
            window,
            geometry: Rect::new(geometry.x + 2 * self.screen.width, geometry.y, geometry.width, geometry.height),
        });

        let previous = self.selected_client();
        if !excluded {
            if monitor == self.selected_monitor {
                if let Some(selected) = previous {
                    self.push(Effect::Unfocus {
                        window: selected,
                        reset_input: false,
                    });
                }
            }
            self.monitors[monitor].selected = Some(window);
        }

        if info.fullscreen {
            self.set_fullscreen(window, true);
        }
        if urgent {
            self.set_urgent(window, true);
        }

        self.arrange(Some(monitor));
        self.push(Effect::Map(window));

        if !excluded {
            self.focus_from(None, previous);
        }
    }

    /// Forget a client. Returns it so the caller can restore what the window
    /// had before it was managed.
    pub fn unmanage(&mut self, window: Window) -> Option<Client> {
        let monitor = self.clients.get(&window)?.monitor;

        self.detach(window);
        self.detach_stack(window);
        self.alt_tab.forget(window);
        if self.drag.window() == Some(window) {
            debug!("window {} vanished during a drag", window);
            self.drag = DragState::Idle;
            self.push(Effect::UngrabPointer);
        }

        let client = self.clients.remove(&window);
        debug!("unmanaged window {}", window);

        self.focus(None);
        self.arrange(Some(monitor));
        client
    }

    /// Show visible clients top down, hide the rest bottom up by moving them
    /// off screen.
    fn show_hide(&mut self, monitor: usize) {
        let arranges = self.monitors[monitor].layout().arranges();
        let (shown, hidden): (Vec<Window>, Vec<Window>) = self.monitors[monitor]
            .stack
            .iter()
            .copied()
            .partition(|&w| self.is_visible(w));

        for &window in &shown {
            let Some(client) = self.clients.get(&window) else {
                continue;
            };
            let geometry = client.geometry;
            let free = (!arranges || client.is_floating) && !client.is_fullscreen;
            self.push(Effect::Move {
                window,
                x: geometry.x,
                y: geometry.y,
            });
            if free {
                self.resize(window, geometry, false);
            }
        }

        for &window in hidden.iter().rev() {
            if let Some(client) = self.clients.get(&window) {
                let (x, y) = (-2 * client.outer_width(), client.geometry.y);
                self.push(Effect::Move { window, x, y });
            }
        }
    }

    /// Re-tile one monitor, or all of them.
    pub fn arrange(&mut self, monitor: Option<usize>) {
        let targets: Vec<usize> = match monitor {
            Some(index) => vec![index],
            None => (0..self.monitors.len()).collect(),
        };

        for &index in &targets {
            self.show_hide(index);
        }
        for &index in &targets {
            self.arrange_monitor(index);
        }
    }

    pub(crate) fn update_bar_position(&mut self, monitor: usize) {
        let visible_tabs = self.rotation_clients(monitor).len();
        let (bar_height, tab_height) = (self.bar_height, self.tab_height);
        self.monitors[monitor].update_bar_position(bar_height, tab_height, visible_tabs);
    }

    fn arrange_monitor(&mut self, monitor: usize) {
        self.update_bar_position(monitor);
        self.push(Effect::PlaceBars(monitor));

        if self.monitors[monitor].layout().arranges() {
            self.apply_layout(monitor);
        }
        self.update_layout_symbol(monitor);
        self.restack(monitor);
    }

    fn apply_layout(&mut self, monitor: usize) {
        let layout = self.monitors[monitor].layout();
        let area = self.monitors[monitor].window_area;
        let params = self.monitors[monitor].layout_params();

        let tiled: Vec<TiledClient> = self
            .tiled_clients(monitor)
            .into_iter()
            .filter_map(|window| {
                self.clients.get(&window).map(|client| TiledClient {
                    window,
                    weight: client.weight,
                })
            })
            .collect();
        if tiled.is_empty() {
            return;
        }

        let geometries = layout.new().arrange(&tiled, area, &params);
        let single = tiled.len() == 1;

        for (entry, outer) in tiled.iter().zip(geometries) {
            let Some(client) = self.clients.get_mut(&entry.window) else {
                continue;
            };
            let border_changed = match layout.border_policy() {
                BorderPolicy::StripSingle if single => client.strip_border(),
                BorderPolicy::AlwaysStrip => client.strip_border(),
                BorderPolicy::StripSingle | BorderPolicy::Keep => client.restore_border(),
            };

            let border = client.border_width;
            let inner = Rect::new(
                outer.x,
                outer.y,
                outer.width - 2 * border,
                outer.height - 2 * border,
            );
            self.resize(entry.window, inner, false);
            if border_changed {
                self.resize_client(entry.window, inner);
            }
        }
    }

    pub(crate) fn update_layout_symbol(&mut self, monitor: usize) {
        let tiled = self.tiled_clients(monitor);
        let recent = self.monitors[monitor].stack.first().copied();
        let position = recent
            .and_then(|window| tiled.iter().position(|&w| w == window))
            .map_or(tiled.len(), |index| index + 1);

        let m = &mut self.monitors[monitor];
        m.layout_symbol = m.layout().symbol(tiled.len(), m.master_count(), position);
    }

    /// Resize honouring size hints; nothing is sent when the hints leave the
    /// geometry unchanged.
    pub fn resize(&mut self, window: Window, proposed: Rect, interactive: bool) {
        let Some(client) = self.clients.get(&window) else {
            return;
        };
        let monitor = &self.monitors[client.monitor];
        let constraints = Constraints {
            screen_width: self.screen.width,
            screen_height: self.screen.height,
            window_area: monitor.window_area,
            bar_height: self.bar_height,
            honor_hints: self.config.respect_size_hints
                || client.is_floating
                || !monitor.layout().arranges(),
        };

        let (geometry, changed) = apply_size_hints(client, proposed, interactive, &constraints);
        if changed {
            self.resize_client(window, geometry);
        }
    }

    /// Resize unconditionally.
    pub fn resize_client(&mut self, window: Window, geometry: Rect) {
        let Some(client) = self.clients.get_mut(&window) else {
            return;
        };
        client.old_geometry = client.geometry;
        client.geometry = geometry;
        let border_width = client.border_width;
        self.push(Effect::Configure {
            window,
            geometry,
            border_width,
        });
    }

    /// Raise the floating selection and chain the tiled clients below the bar.
    pub fn restack(&mut self, monitor: usize) {
        self.push(Effect::DrawBars);

        let Some(selected) = self.monitors[monitor].selected else {
            return;
        };
        let arranges = self.monitors[monitor].layout().arranges();
        let raise = self
            .clients
            .get(&selected)
            .filter(|client| client.is_floating || !arranges)
            .map(|client| client.window);

        let below_bar = if arranges {
            self.monitors[monitor]
                .stack
                .iter()
                .copied()
                .filter(|&window| self.is_tiled(window))
                .collect()
        } else {
            Vec::new()
        };

        self.push(Effect::Restack(RestackPlan {
            monitor,
            raise,
            below_bar,
        }));
    }

    /// Index of the monitor sharing the largest area with `rect`, the selected
    /// monitor when none does.
    pub fn rect_to_monitor(&self, rect: Rect) -> usize {
        let mut best = self.selected_monitor;
        let mut best_area = 0;

        for (index, monitor) in self.monitors.iter().enumerate() {
            let area = rect.intersection_area(&monitor.window_area);
            if area > best_area {
                best_area = area;
                best = index;
            }
        }

        best
    }

    /// Enter or leave fullscreen.
    pub fn set_fullscreen(&mut self, window: Window, fullscreen: bool) {
        let Some(client) = self.clients.get_mut(&window) else {
            return;
        };

        if fullscreen && !client.is_fullscreen {
            client.is_fullscreen = true;
            client.old_state = client.is_floating;
            client.old_border_width = client.border_width;
            client.border_width = 0;
            client.is_floating = true;
            let screen = self.monitors[client.monitor].screen;

            self.push(Effect::SetFullscreen {
                window,
                enabled: true,
            });
            self.resize_client(window, screen);
            self.push(Effect::Raise(window));
        } else if !fullscreen && client.is_fullscreen {
            client.is_fullscreen = false;
            client.is_floating = client.old_state;
            client.border_width = client.old_border_width;
            client.old_border_width = 0;
            let monitor = client.monitor;
            let restored = client.old_geometry;

            self.push(Effect::SetFullscreen {
                window,
                enabled: false,
            });
            self.resize_client(window, restored);
            self.arrange(Some(monitor));
        }
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        let Some(window) = self.selected_client() else {
            return false;
        };
        let fullscreen = self.clients.get(&window).is_some_and(|c| c.is_fullscreen);
        self.set_fullscreen(window, !fullscreen);
        true
    }

    /// Urgency from WM_HINTS or an attention request. The selection never
    /// turns urgent; its hint is cleared instead.
    pub fn set_urgent(&mut self, window: Window, urgent: bool) {
        if urgent && self.selected_client() == Some(window) {
            self.push(Effect::ClearUrgency(window));
            return;
        }
        if let Some(client) = self.clients.get_mut(&window) {
            if client.is_urgent != urgent {
                client.is_urgent = urgent;
                self.push(Effect::DrawBars);
            }
        }
    }

    pub fn set_never_focus(&mut self, window: Window, never_focus: bool) {
        if let Some(client) = self.clients.get_mut(&window) {
            client.never_focus = never_focus;
        }
    }

    pub fn set_title(&mut self, window: Window, name: &str) {
        let selected = self.monitors.iter().any(|m| m.selected == Some(window));
        if let Some(client) = self.clients.get_mut(&window) {
            client.set_name(name);
            if selected {
                self.push(Effect::DrawBars);
            }
        }
    }

    pub fn set_size_hints(&mut self, window: Window, hints: SizeHints) {
        if let Some(client) = self.clients.get_mut(&window) {
            client.set_hints(hints);
        }
    }

    /// A WM_TRANSIENT_FOR change to a managed parent floats the client.
    pub fn set_transient_for(&mut self, window: Window, parent: Window) {
        if !self.is_managed(parent) {
            return;
        }
        let Some(client) = self.clients.get_mut(&window) else {
            return;
        };
        if !client.is_floating {
            client.is_floating = true;
            let monitor = client.monitor;
            trace!("window {} became transient for {}", window, parent);
            self.arrange(Some(monitor));
        }
    }

    pub fn set_dialog(&mut self, window: Window) {
        if let Some(client) = self.clients.get_mut(&window) {
            client.is_floating = true;
        }
    }

    pub fn set_status_text(&mut self, text: Option<String>) {
        self.status_text = text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| format!("oxtile-{}", env!("CARGO_PKG_VERSION")));
        self.push(Effect::DrawBars);
    }

    /// Handle a ConfigureRequest from a managed client. Returns false when the
    /// window is not managed and the request should be passed through.
    pub fn configure_request(&mut self, window: Window, request: ConfigureRequest) -> bool {
        let Some(client) = self.clients.get_mut(&window) else {
            return false;
        };

        if let Some(border_width) = request.border_width {
            client.border_width = border_width;
            return true;
        }

        let arranges = self.monitors[self.selected_monitor].layout().arranges();
        if !client.is_floating && arranges {
            self.push(Effect::NotifyGeometry(window));
            return true;
        }

        let screen = self.monitors[client.monitor].screen;
        let tagset = self.monitors[client.monitor].tagset();
        if let Some(x) = request.x {
            client.old_geometry.x = client.geometry.x;
            client.geometry.x = screen.x + x;
        }
        if let Some(y) = request.y {
            client.old_geometry.y = client.geometry.y;
            client.geometry.y = screen.y + y;
        }
        if let Some(width) = request.width {
            client.old_geometry.width = client.geometry.width;
            client.geometry.width = width;
        }
        if let Some(height) = request.height {
            client.old_geometry.height = client.geometry.height;
            client.geometry.height = height;
        }

        if client.is_floating && client.geometry.right() > screen.right() {
            client.geometry.x = screen.x + (screen.width / 2 - client.outer_width() / 2);
        }
        if client.is_floating && client.geometry.bottom() > screen.bottom() {
            client.geometry.y = screen.y + (screen.height / 2 - client.outer_height() / 2);
        }

        let moved_only = (request.x.is_some() || request.y.is_some())
            && request.width.is_none()
            && request.height.is_none();
        let visible = client.is_visible_on(tagset);
        let geometry = client.geometry;

        if moved_only {
            self.push(Effect::NotifyGeometry(window));
        }
        if visible {
            self.push(Effect::MoveResize { window, geometry });
        }
        true
    }

    /// Follow a change of output layout. New heads get monitors, changed
    /// heads are resized, clients of vanished heads move to the first
    /// monitor. Returns whether anything changed.
    pub fn update_geometry(&mut self, heads: &[Rect], screen: Rect) -> bool {
        let heads: Vec<Rect> = if heads.is_empty() {
            vec![screen]
        } else {
            heads.to_vec()
        };
        let mut dirty = self.screen != screen;
        self.screen = screen;

        let existing = self.monitors.len();
        if heads.len() >= existing {
            for index in existing..heads.len() {
                let monitor = Monitor::new(index, heads[index], &self.config);
                self.monitors.push(monitor);
            }
            for (index, &head) in heads.iter().enumerate() {
                if index >= existing || self.monitors[index].screen != head {
                    dirty = true;
                    self.monitors[index].num = index;
                    self.monitors[index].set_screen(head);
                    self.update_bar_position(index);
                }
            }
        } else {
            for removed in (heads.len()..existing).rev() {
                let orphans = std::mem::take(&mut self.monitors[removed].clients);
                let orphan_stack = std::mem::take(&mut self.monitors[removed].stack);

                for &window in orphans.iter().rev() {
                    if let Some(client) = self.clients.get_mut(&window) {
                        client.monitor = 0;
                    }
                    self.monitors[0].clients.insert(0, window);
                }
                for &window in orphan_stack.iter().rev() {
                    self.monitors[0].stack.insert(0, window);
                }

                if self.selected_monitor == removed {
                    self.selected_monitor = 0;
                }
                self.monitors.pop();
                dirty = true;
            }
        }

        if self.selected_monitor >= self.monitors.len() {
            self.selected_monitor = 0;
        }
        dirty
    }

    /// Everything done on quit: show all tags, drop the layout and hand all
    /// clients back. Returns the released clients.
    pub fn release_all(&mut self) -> Vec<Client> {
        for index in 0..self.monitors.len() {
            let all = self.tag_mask() | self.scratch_tag();
            let monitor = &mut self.monitors[index];
            monitor.set_tagset(all);
            monitor.set_layout(crate::layout::LayoutKind::Floating);
        }

        let mut released = Vec::new();
        for index in 0..self.monitors.len() {
            while let Some(&window) = self.monitors[index].stack.first() {
                match self.unmanage(window) {
                    Some(client) => released.push(client),
                    None => {
                        self.monitors[index].stack.remove(0);
                    }
                }
            }
        }
        released
    }
}
