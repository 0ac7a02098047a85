//! The X11 side: connection, startup, the event loop and turning model
//! [`Effect`]s into requests.

mod actions;
mod atoms;
mod events;
mod properties;

pub use atoms::AtomCache;

use crate::Config;
use crate::bar::{Bar, Font, TabBar, model};
use crate::errors::{WmResult, X11Error};
use crate::geometry::Rect;
use crate::keyboard::{self, KeyboardMapping};
use crate::monitor::detect_monitors;
use crate::state::{Effect, RestackPlan, WmState};
use log::{debug, info, trace, warn};
use properties::{ICONIC_STATE, NORMAL_STATE, WITHDRAWN_STATE};
use std::collections::VecDeque;
use x11rb::connection::Connection;
use x11rb::cursor::Handle as CursorHandle;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

/// Why [`WindowManager::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// Re-exec the binary.
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit(Exit),
}

struct Cursors {
    normal: Cursor,
    moving: Cursor,
    resizing: Cursor,
}

impl Cursors {
    fn load(connection: &RustConnection, screen_number: usize) -> WmResult<Self> {
        let database = x11rb::resource_manager::new_from_default(connection)?;
        let handle = CursorHandle::new(connection, screen_number, &database)?.reply()?;

        Ok(Self {
            normal: handle.load_cursor(connection, "left_ptr")?,
            moving: handle.load_cursor(connection, "fleur")?,
            resizing: handle.load_cursor(connection, "sizing")?,
        })
    }
}

pub struct WindowManager {
    connection: RustConnection,
    screen_number: usize,
    screen: Screen,
    root: Window,
    atoms: AtomCache,
    cursors: Cursors,
    wm_check_window: Window,
    state: WmState,
    keyboard: KeyboardMapping,
    // Declared before `font`: their Xft draws must go first.
    bars: Vec<Bar>,
    tab_bars: Vec<TabBar>,
    font: Font,
    /// Events read while draining EnterNotify, handled before new ones.
    pending: VecDeque<Event>,
    bars_dirty: bool,
    last_motion: Timestamp,
}

impl WindowManager {
    pub fn new(config: Config) -> WmResult<Self> {
        let (connection, screen_number) = x11rb::connect(None)?;
        let screen = connection.setup().roots[screen_number].clone();
        let root = screen.root;

        connection
            .change_window_attributes(
                root,
                &ChangeWindowAttributesAux::new().event_mask(EventMask::SUBSTRUCTURE_REDIRECT),
            )?
            .check()
            .map_err(|_| X11Error::OtherWindowManager)?;

        let cursors = Cursors::load(&connection, screen_number)?;
        connection
            .change_window_attributes(
                root,
                &ChangeWindowAttributesAux::new().cursor(cursors.normal).event_mask(
                    EventMask::SUBSTRUCTURE_REDIRECT
                        | EventMask::SUBSTRUCTURE_NOTIFY
                        | EventMask::BUTTON_PRESS
                        | EventMask::POINTER_MOTION
                        | EventMask::ENTER_WINDOW
                        | EventMask::LEAVE_WINDOW
                        | EventMask::STRUCTURE_NOTIFY
                        | EventMask::PROPERTY_CHANGE,
                ),
            )?
            .check()?;

        let atoms = AtomCache::new(&connection)?;
        let wm_check_window = Self::advertise_support(&connection, &screen, &atoms)?;

        let font = Font::open(screen_number as i32, &config.font)?;
        let bar_height = Bar::height_for(&font);
        let screen_rect = Rect::new(
            0,
            0,
            screen.width_in_pixels as i32,
            screen.height_in_pixels as i32,
        );
        let heads = detect_monitors(&connection, &screen)?;
        let state = WmState::new(config, screen_rect, &heads, bar_height, bar_height);
        let keyboard = KeyboardMapping::query(&connection)?;

        let mut window_manager = Self {
            connection,
            screen_number,
            screen,
            root,
            atoms,
            cursors,
            wm_check_window,
            state,
            keyboard,
            bars: Vec::new(),
            tab_bars: Vec::new(),
            font,
            pending: VecDeque::new(),
            bars_dirty: true,
            last_motion: 0,
        };

        window_manager.sync_bars()?;
        window_manager.grab_keys()?;
        window_manager.scan()?;
        let status = window_manager.root_name();
        window_manager.state.set_status_text(status);
        window_manager.state.focus(None);
        window_manager.apply_effects()?;

        info!(
            "oxtile started on screen {} with {} monitor(s)",
            window_manager.screen_number,
            window_manager.state.monitors.len()
        );
        Ok(window_manager)
    }

    /// Supporting WM check window plus `_NET_SUPPORTED` on the root.
    fn advertise_support(
        connection: &RustConnection,
        screen: &Screen,
        atoms: &AtomCache,
    ) -> WmResult<Window> {
        let root = screen.root;
        let wm_check_window = connection.generate_id()?;
        connection.create_window(
            screen.root_depth,
            wm_check_window,
            root,
            0,
            0,
            1,
            1,
            0,
            WindowClass::INPUT_OUTPUT,
            0,
            &CreateWindowAux::new(),
        )?;

        for window in [wm_check_window, root] {
            connection.change_property32(
                PropMode::REPLACE,
                window,
                atoms.net_supporting_wm_check,
                AtomEnum::WINDOW,
                &[wm_check_window],
            )?;
        }
        connection.change_property8(
            PropMode::REPLACE,
            wm_check_window,
            atoms.net_wm_name,
            atoms.utf8_string,
            b"oxtile",
        )?;
        connection.change_property32(
            PropMode::REPLACE,
            root,
            atoms.net_supported,
            AtomEnum::ATOM,
            &atoms.supported(),
        )?;
        connection.delete_property(root, atoms.net_client_list)?;
        Ok(wm_check_window)
    }

    pub fn state(&self) -> &WmState {
        &self.state
    }

    pub fn run(&mut self) -> WmResult<Exit> {
        loop {
            let event = match self.pending.pop_front() {
                Some(event) => event,
                None => {
                    self.connection.flush()?;
                    self.connection.wait_for_event()?
                }
            };

            if let Control::Exit(exit) = self.handle_event(event)? {
                info!("leaving: {:?}", exit);
                self.cleanup()?;
                return Ok(exit);
            }
        }
    }

    /// Manage the windows that already exist: normal ones first, then
    /// transients so that their parents are known.
    fn scan(&mut self) -> WmResult<()> {
        let tree = self.connection.query_tree(self.root)?.reply()?;
        let mut transients = Vec::new();

        for &window in &tree.children {
            let Ok(attributes) = self.connection.get_window_attributes(window)?.reply() else {
                continue;
            };
            if attributes.override_redirect || self.is_bar_window(window) {
                continue;
            }

            let iconic = self.wm_state(window) == Some(ICONIC_STATE);
            if attributes.map_state != MapState::VIEWABLE && !iconic {
                continue;
            }
            if self.transient_for(window).is_some() {
                transients.push(window);
            } else {
                self.manage_window(window)?;
            }
        }

        for window in transients {
            self.manage_window(window)?;
        }
        Ok(())
    }

    fn is_bar_window(&self, window: Window) -> bool {
        self.bars.iter().any(|bar| bar.window() == window)
            || self.tab_bars.iter().any(|tab_bar| tab_bar.window() == window)
    }

    pub(crate) fn manage_window(&mut self, window: Window) -> WmResult<()> {
        let Ok(geometry) = self.connection.get_geometry(window)?.reply() else {
            return Ok(());
        };
        let info = self.window_info(window, &geometry);

        self.connection.change_window_attributes(
            window,
            &ChangeWindowAttributesAux::new().event_mask(
                EventMask::ENTER_WINDOW
                    | EventMask::FOCUS_CHANGE
                    | EventMask::PROPERTY_CHANGE
                    | EventMask::STRUCTURE_NOTIFY,
            ),
        )?;
        keyboard::grab_buttons(
            &self.connection,
            window,
            false,
            &self.state.config.buttons,
            self.keyboard.numlock_mask,
        )?;

        self.state.manage(info);
        self.set_wm_state(window, NORMAL_STATE)?;
        self.update_client_list()?;
        Ok(())
    }

    /// Stop managing a window. A window that still exists gets its border
    /// back and is marked withdrawn.
    pub(crate) fn unmanage_window(&mut self, window: Window, destroyed: bool) -> WmResult<()> {
        let Some(client) = self.state.unmanage(window) else {
            return Ok(());
        };

        if !destroyed {
            self.connection.grab_server()?;
            self.connection.configure_window(
                window,
                &ConfigureWindowAux::new().border_width(client.original_border_width as u32),
            )?;
            self.connection
                .ungrab_button(ButtonIndex::ANY, window, ModMask::ANY)?;
            self.set_wm_state(window, WITHDRAWN_STATE)?;
            self.connection.ungrab_server()?;
        }

        self.update_client_list()?;
        self.apply_effects()
    }

    pub(crate) fn grab_keys(&mut self) -> WmResult<()> {
        keyboard::grab_keys(
            &self.connection,
            self.root,
            &self.state.config.keybindings,
            &self.keyboard,
        )
    }

    /// One bar and one tab bar per monitor.
    pub(crate) fn sync_bars(&mut self) -> WmResult<()> {
        let count = self.state.monitors.len();

        while self.bars.len() > count {
            if let Some(bar) = self.bars.pop() {
                bar.destroy(&self.connection)?;
            }
            if let Some(tab_bar) = self.tab_bars.pop() {
                tab_bar.destroy(&self.connection)?;
            }
        }

        while self.bars.len() < count {
            let index = self.bars.len();
            let (bar_geometry, tab_geometry) = self.bar_geometries(index);
            let bar = Bar::new(
                &self.connection,
                &self.screen,
                &self.font,
                bar_geometry,
                &self.state.config,
            )?;
            let tab_bar = TabBar::new(
                &self.connection,
                &self.screen,
                &self.font,
                tab_geometry,
                &self.state.config,
            )?;
            self.bars.push(bar);
            self.tab_bars.push(tab_bar);
        }

        for index in 0..count {
            self.place_bars(index)?;
        }
        self.bars_dirty = true;
        Ok(())
    }

    fn bar_geometries(&self, monitor: usize) -> (Rect, Rect) {
        let m = &self.state.monitors[monitor];
        let bar = Rect::new(m.screen.x, m.bar_y, m.screen.width, self.state.bar_height);
        let tab = Rect::new(
            m.window_area.x,
            m.tab_y,
            m.window_area.width,
            self.state.tab_height,
        );
        (bar, tab)
    }

    fn place_bars(&mut self, monitor: usize) -> WmResult<()> {
        let (bar_geometry, tab_geometry) = self.bar_geometries(monitor);
        if let Some(bar) = self.bars.get_mut(monitor) {
            bar.place(&self.connection, bar_geometry)?;
        }
        if let Some(tab_bar) = self.tab_bars.get_mut(monitor) {
            tab_bar.place(&self.connection, tab_geometry)?;
        }
        self.bars_dirty = true;
        Ok(())
    }

    fn draw_bars(&mut self) -> WmResult<()> {
        for index in 0..self.state.monitors.len() {
            if let Some(bar) = self.bars.get_mut(index) {
                let bar_model = model::bar_model(&self.state, index);
                bar.draw(&self.connection, &self.font, &bar_model, &self.state.config)?;
            }
            if self.state.monitors[index].tab_y >= 0 {
                if let Some(tab_bar) = self.tab_bars.get_mut(index) {
                    let tabs = model::tab_model(&self.state, index);
                    tab_bar.draw(&self.connection, &self.font, tabs, &self.state.config)?;
                }
            }
        }
        self.bars_dirty = false;
        Ok(())
    }

    pub(crate) fn invalidate_bars(&mut self) {
        self.bars_dirty = true;
    }

    fn border_color(&self, window: Window, focused: bool) -> u32 {
        let config = &self.state.config;
        match self.state.client(window) {
            Some(client) if client.is_urgent && !focused => config.border_urgent,
            Some(client) if client.is_floating => {
                if focused {
                    config.border_floating_selected
                } else {
                    config.border_floating_normal
                }
            }
            _ if focused => config.border_selected,
            _ => config.border_normal,
        }
    }

    fn set_border_color(&self, window: Window, focused: bool) -> WmResult<()> {
        self.connection.change_window_attributes(
            window,
            &ChangeWindowAttributesAux::new().border_pixel(self.border_color(window, focused)),
        )?;
        Ok(())
    }

    fn send_configure_notify(&self, window: Window) -> WmResult<()> {
        let Some(client) = self.state.client(window) else {
            return Ok(());
        };
        let geometry = client.geometry;

        let event = ConfigureNotifyEvent {
            response_type: CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: window,
            window,
            above_sibling: x11rb::NONE,
            x: geometry.x as i16,
            y: geometry.y as i16,
            width: geometry.width.max(1) as u16,
            height: geometry.height.max(1) as u16,
            border_width: client.border_width as u16,
            override_redirect: false,
        };
        self.connection
            .send_event(false, window, EventMask::STRUCTURE_NOTIFY, event)?;
        Ok(())
    }

    fn set_input_focus(&self, window: Window) -> WmResult<()> {
        let never_focus = self.state.client(window).is_some_and(|c| c.never_focus);
        if !never_focus {
            self.connection
                .set_input_focus(InputFocus::POINTER_ROOT, window, x11rb::CURRENT_TIME)?;
            self.connection.change_property32(
                PropMode::REPLACE,
                self.root,
                self.atoms.net_active_window,
                AtomEnum::WINDOW,
                &[window],
            )?;
        }
        self.send_protocol(window, self.atoms.wm_take_focus)?;
        Ok(())
    }

    fn focus_root(&self) -> WmResult<()> {
        self.connection
            .set_input_focus(InputFocus::POINTER_ROOT, self.root, x11rb::CURRENT_TIME)?;
        self.connection
            .delete_property(self.root, self.atoms.net_active_window)?;
        Ok(())
    }

    fn restack(&mut self, plan: RestackPlan) -> WmResult<()> {
        if let Some(window) = plan.raise {
            self.connection.configure_window(
                window,
                &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
            )?;
        }

        if let Some(bar) = self.bars.get(plan.monitor) {
            let mut sibling = bar.window();
            for window in plan.below_bar {
                self.connection.configure_window(
                    window,
                    &ConfigureWindowAux::new()
                        .sibling(sibling)
                        .stack_mode(StackMode::BELOW),
                )?;
                sibling = window;
            }
        }

        self.drain_enter_events()
    }

    /// Drop the EnterNotify events the restack itself caused.
    fn drain_enter_events(&mut self) -> WmResult<()> {
        self.connection.sync()?;
        while let Some(event) = self.connection.poll_for_event()? {
            if !matches!(event, Event::EnterNotify(_)) {
                self.pending.push_back(event);
            }
        }
        Ok(())
    }

    /// Carry out what the model asked for.
    pub(crate) fn apply_effects(&mut self) -> WmResult<()> {
        for effect in self.state.take_effects() {
            trace!("effect {:?}", effect);
            match effect {
                Effect::Configure {
                    window,
                    geometry,
                    border_width,
                } => {
                    self.connection.configure_window(
                        window,
                        &ConfigureWindowAux::new()
                            .x(geometry.x)
                            .y(geometry.y)
                            .width(geometry.width.max(1) as u32)
                            .height(geometry.height.max(1) as u32)
                            .border_width(border_width.max(0) as u32),
                    )?;
                    self.send_configure_notify(window)?;
                }
                Effect::MoveResize { window, geometry } => {
                    self.connection.configure_window(
                        window,
                        &ConfigureWindowAux::new()
                            .x(geometry.x)
                            .y(geometry.y)
                            .width(geometry.width.max(1) as u32)
                            .height(geometry.height.max(1) as u32),
                    )?;
                }
                Effect::Move { window, x, y } => {
                    self.connection
                        .configure_window(window, &ConfigureWindowAux::new().x(x).y(y))?;
                }
                Effect::NotifyGeometry(window) => self.send_configure_notify(window)?,
                Effect::Focus(window) => {
                    self.set_border_color(window, true)?;
                    keyboard::grab_buttons(
                        &self.connection,
                        window,
                        true,
                        &self.state.config.buttons,
                        self.keyboard.numlock_mask,
                    )?;
                    self.set_input_focus(window)?;
                }
                Effect::Unfocus {
                    window,
                    reset_input,
                } => {
                    keyboard::grab_buttons(
                        &self.connection,
                        window,
                        false,
                        &self.state.config.buttons,
                        self.keyboard.numlock_mask,
                    )?;
                    self.set_border_color(window, false)?;
                    if reset_input {
                        self.focus_root()?;
                    }
                }
                Effect::FocusRoot => self.focus_root()?,
                Effect::RefreshBorder(window) => {
                    let focused = self.state.selected_client() == Some(window);
                    self.set_border_color(window, focused)?;
                }
                Effect::ClearUrgency(window) => self.clear_urgency_hint(window)?,
                Effect::Raise(window) => {
                    self.connection.configure_window(
                        window,
                        &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
                    )?;
                }
                Effect::Restack(plan) => self.restack(plan)?,
                Effect::WarpPointer { x, y } => {
                    self.connection.warp_pointer(
                        x11rb::NONE,
                        self.root,
                        0,
                        0,
                        0,
                        0,
                        x as i16,
                        y as i16,
                    )?;
                }
                Effect::WarpToWindow { window, x, y } => {
                    self.connection
                        .warp_pointer(x11rb::NONE, window, 0, 0, 0, 0, x as i16, y as i16)?;
                }
                Effect::SetFullscreen { window, enabled } => {
                    self.set_fullscreen_property(window, enabled)?;
                }
                Effect::Map(window) => {
                    self.connection.map_window(window)?;
                }
                Effect::UngrabPointer => {
                    self.connection.ungrab_pointer(x11rb::CURRENT_TIME)?;
                }
                Effect::Spawn(argv) => actions::spawn(&argv),
                Effect::PlaceBars(monitor) => self.place_bars(monitor)?,
                Effect::DrawBars => self.bars_dirty = true,
            }
        }

        if self.bars_dirty {
            self.draw_bars()?;
        }
        Ok(())
    }

    /// Current pointer position on the root window.
    pub(crate) fn pointer_position(&self) -> Option<(i32, i32)> {
        let reply = self.connection.query_pointer(self.root).ok()?.reply().ok()?;
        Some((reply.root_x as i32, reply.root_y as i32))
    }

    /// Hand every client back and tear down what we created.
    fn cleanup(&mut self) -> WmResult<()> {
        let released = self.state.release_all();
        for client in &released {
            self.connection.configure_window(
                client.window,
                &ConfigureWindowAux::new().border_width(client.original_border_width as u32),
            )?;
            self.connection
                .ungrab_button(ButtonIndex::ANY, client.window, ModMask::ANY)?;
            self.set_wm_state(client.window, WITHDRAWN_STATE)?;
        }
        debug!("released {} client(s)", released.len());
        self.apply_effects()?;

        self.connection.ungrab_key(Grab::ANY, self.root, ModMask::ANY)?;
        for bar in &self.bars {
            bar.destroy(&self.connection)?;
        }
        for tab_bar in &self.tab_bars {
            tab_bar.destroy(&self.connection)?;
        }
        self.connection.destroy_window(self.wm_check_window)?;
        for cursor in [self.cursors.normal, self.cursors.moving, self.cursors.resizing] {
            self.connection.free_cursor(cursor)?;
        }
        self.focus_root()?;
        self.connection.flush()?;
        Ok(())
    }

    /// Re-read the outputs after the root window changed size.
    pub(crate) fn update_geometry(&mut self, width: u16, height: u16) -> WmResult<()> {
        self.screen.width_in_pixels = width;
        self.screen.height_in_pixels = height;
        let screen_rect = Rect::new(0, 0, width as i32, height as i32);
        let heads = detect_monitors(&self.connection, &self.screen)?;

        if !self.state.update_geometry(&heads, screen_rect) {
            return Ok(());
        }
        if heads.is_empty() {
            warn!("no outputs reported, using the whole screen");
        }

        self.sync_bars()?;
        let fullscreen: Vec<(Window, Rect)> = self
            .state
            .clients
            .values()
            .filter(|client| client.is_fullscreen)
            .map(|client| (client.window, self.state.monitors[client.monitor].screen))
            .collect();
        for (window, screen) in fullscreen {
            self.state.resize_client(window, screen);
        }

        self.state.focus(None);
        self.state.arrange(None);
        self.apply_effects()
    }
}
