use super::{Control, WindowManager};
use crate::bar::BarClick;
use crate::errors::{WmError, WmResult, is_ignorable};
use crate::keyboard::{self, Arg, Click, KeyboardMapping};
use crate::state::ConfigureRequest;
use log::{debug, trace, warn};
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::*;

/// Minimum time between two drag steps, about 60 per second.
const MOTION_INTERVAL_MS: u32 = 1000 / 60;

/// `_NET_WM_STATE` client message actions.
const NET_WM_STATE_REMOVE: u32 = 0;
const NET_WM_STATE_ADD: u32 = 1;
const NET_WM_STATE_TOGGLE: u32 = 2;

impl WindowManager {
    pub(crate) fn handle_event(&mut self, event: Event) -> WmResult<Control> {
        if self.state.drag.is_active() {
            return self.handle_drag_event(event);
        }
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: Event) -> WmResult<Control> {
        let control = match event {
            Event::MapRequest(event) => {
                self.map_request(event.window)?;
                Control::Continue
            }
            Event::UnmapNotify(event) => {
                self.unmap_notify(event)?;
                Control::Continue
            }
            Event::DestroyNotify(event) => {
                self.unmanage_window(event.window, true)?;
                Control::Continue
            }
            Event::ConfigureRequest(event) => {
                self.configure_request(event)?;
                Control::Continue
            }
            Event::ConfigureNotify(event) => {
                if event.window == self.root {
                    self.update_geometry(event.width, event.height)?;
                }
                Control::Continue
            }
            Event::PropertyNotify(event) => {
                self.property_notify(event)?;
                Control::Continue
            }
            Event::ClientMessage(event) => {
                self.client_message(event)?;
                Control::Continue
            }
            Event::EnterNotify(event) => {
                self.enter_notify(event)?;
                Control::Continue
            }
            Event::MotionNotify(event) => {
                if event.event == self.root {
                    self.state
                        .pointer_motion_root(event.root_x as i32, event.root_y as i32);
                    self.apply_effects()?;
                }
                Control::Continue
            }
            Event::ButtonPress(event) => self.button_press(event)?,
            Event::KeyPress(event) => self.key_press(event)?,
            Event::FocusIn(event) => {
                self.state.focus_in(event.event);
                self.apply_effects()?;
                Control::Continue
            }
            Event::MappingNotify(event) => {
                if event.request == Mapping::KEYBOARD {
                    self.keyboard = KeyboardMapping::query(&self.connection)?;
                    self.grab_keys()?;
                }
                Control::Continue
            }
            Event::Expose(event) => {
                if event.count == 0 {
                    self.invalidate_bars();
                    self.apply_effects()?;
                }
                Control::Continue
            }
            Event::Error(error) => {
                if is_ignorable(error.major_opcode, error.error_kind) {
                    debug!("ignoring X error {:?}", error);
                } else {
                    return Err(WmError::Protocol {
                        request: error.major_opcode,
                        error: format!("{:?}", error.error_kind),
                    });
                }
                Control::Continue
            }
            other => {
                trace!("unhandled event {:?}", other);
                Control::Continue
            }
        };
        Ok(control)
    }

    /// While the pointer is grabbed for a move or resize, motion and release
    /// drive the drag and other pointer or key input is dropped. Everything
    /// else, window lifecycle included, goes through the normal dispatch.
    fn handle_drag_event(&mut self, event: Event) -> WmResult<Control> {
        match event {
            Event::MotionNotify(event) => {
                if event.time.wrapping_sub(self.last_motion) <= MOTION_INTERVAL_MS {
                    return Ok(Control::Continue);
                }
                self.last_motion = event.time;
                self.state
                    .drag_motion(event.root_x as i32, event.root_y as i32);
                self.apply_effects()?;
                Ok(Control::Continue)
            }
            Event::ButtonRelease(_) => {
                self.state.end_drag();
                self.connection.ungrab_pointer(x11rb::CURRENT_TIME)?;
                self.apply_effects()?;
                self.drain_enter_events()?;
                Ok(Control::Continue)
            }
            Event::EnterNotify(_) | Event::ButtonPress(_) | Event::KeyPress(_) => {
                trace!("dropping {:?} during drag", event);
                Ok(Control::Continue)
            }
            other => self.dispatch(other),
        }
    }

    fn map_request(&mut self, window: Window) -> WmResult<()> {
        let Ok(attributes) = self.connection.get_window_attributes(window)?.reply() else {
            return Ok(());
        };
        if attributes.override_redirect || self.state.is_managed(window) {
            return Ok(());
        }
        self.manage_window(window)?;
        self.apply_effects()
    }

    fn unmap_notify(&mut self, event: UnmapNotifyEvent) -> WmResult<()> {
        if !self.state.is_managed(event.window) {
            return Ok(());
        }
        // A synthetic unmap is a client withdrawing itself.
        if event.response_type & 0x80 != 0 {
            self.set_wm_state(event.window, super::WITHDRAWN_STATE)?;
            return Ok(());
        }
        self.unmanage_window(event.window, false)
    }

    fn configure_request(&mut self, event: ConfigureRequestEvent) -> WmResult<()> {
        let mask = event.value_mask;
        let has = |flag: ConfigWindow| mask.contains(flag);

        let request = ConfigureRequest {
            x: has(ConfigWindow::X).then_some(event.x as i32),
            y: has(ConfigWindow::Y).then_some(event.y as i32),
            width: has(ConfigWindow::WIDTH).then_some(event.width as i32),
            height: has(ConfigWindow::HEIGHT).then_some(event.height as i32),
            border_width: has(ConfigWindow::BORDER_WIDTH).then_some(event.border_width as i32),
        };

        if self.state.configure_request(event.window, request) {
            return self.apply_effects();
        }

        let aux = ConfigureWindowAux::from_configure_request(&event);
        self.connection.configure_window(event.window, &aux)?;
        Ok(())
    }

    fn property_notify(&mut self, event: PropertyNotifyEvent) -> WmResult<()> {
        if event.window == self.root {
            if event.atom == self.atoms.wm_name {
                let status = self.root_name();
                self.state.set_status_text(status);
                self.apply_effects()?;
            }
            return Ok(());
        }
        if event.state == Property::DELETE || !self.state.is_managed(event.window) {
            return Ok(());
        }

        let window = event.window;
        let atom = event.atom;
        if atom == u32::from(AtomEnum::WM_TRANSIENT_FOR) {
            if let Some(parent) = self.transient_for(window) {
                self.state.set_transient_for(window, parent);
            }
        } else if atom == u32::from(AtomEnum::WM_NORMAL_HINTS) {
            let hints = self.size_hints(window);
            self.state.set_size_hints(window, hints);
        } else if atom == u32::from(AtomEnum::WM_HINTS) {
            let hints = self.wm_hints(window);
            self.state.set_urgent(window, hints.urgent);
            self.state.set_never_focus(window, hints.never_focus);
        } else if atom == self.atoms.wm_name || atom == self.atoms.net_wm_name {
            let title = self.window_title(window);
            self.state.set_title(window, &title);
        } else if atom == self.atoms.net_wm_window_type {
            if self.requests_fullscreen(window) {
                self.state.set_fullscreen(window, true);
            }
            if self.is_dialog(window) {
                self.state.set_dialog(window);
            }
        }
        self.apply_effects()
    }

    fn client_message(&mut self, event: ClientMessageEvent) -> WmResult<()> {
        let window = event.window;
        if !self.state.is_managed(window) {
            return Ok(());
        }
        let data = event.data.as_data32();

        if event.type_ == self.atoms.net_wm_state {
            let fullscreen = self.atoms.net_wm_state_fullscreen;
            if data[1] == fullscreen || data[2] == fullscreen {
                let current = self.state.client(window).is_some_and(|c| c.is_fullscreen);
                let enable = match data[0] {
                    NET_WM_STATE_ADD => true,
                    NET_WM_STATE_TOGGLE => !current,
                    NET_WM_STATE_REMOVE => false,
                    action => {
                        warn!("unknown _NET_WM_STATE action {}", action);
                        return Ok(());
                    }
                };
                self.state.set_fullscreen(window, enable);
            }

            let attention = self.atoms.net_wm_state_demands_attention;
            if (data[1] == attention || data[2] == attention)
                && self.state.selected_client() != Some(window)
            {
                self.state.set_urgent(window, true);
            }
        } else if event.type_ == self.atoms.net_active_window
            && self.state.selected_client() != Some(window)
            && !self.state.client(window).is_some_and(|c| c.is_urgent)
        {
            self.state.set_urgent(window, true);
        }
        self.apply_effects()
    }

    fn enter_notify(&mut self, event: EnterNotifyEvent) -> WmResult<()> {
        let from_inferior = event.detail == NotifyDetail::INFERIOR;
        if (event.mode != NotifyMode::NORMAL || from_inferior) && event.event != self.root {
            return Ok(());
        }

        let x = event.root_x as i32;
        let y = event.root_y as i32;
        let client = Some(event.event).filter(|&window| self.state.is_managed(window));
        let monitor = self.state.monitor_at(x, y);
        self.state.pointer_entered(client, monitor, x, y);
        self.apply_effects()
    }

    fn key_press(&mut self, event: KeyPressEvent) -> WmResult<Control> {
        let actions = keyboard::matching_keys(
            &self.state.config.keybindings,
            &self.keyboard,
            event.detail,
            u16::from(event.state),
        );
        self.run_actions(actions)
    }

    fn button_press(&mut self, event: ButtonPressEvent) -> WmResult<Control> {
        let window = event.event;
        let mut clicked = Arg::None;

        let click = if let Some(index) = self.bars.iter().position(|bar| bar.window() == window) {
            self.state.select_monitor(index);
            match self.bars[index].click(event.event_x as i32) {
                BarClick::Tag(tag) => {
                    clicked = Arg::UInt(1 << tag);
                    Click::TagBar
                }
                BarClick::LayoutSymbol => Click::LayoutSymbol,
                BarClick::StatusText => Click::StatusText,
                BarClick::WindowTitle => Click::WindowTitle,
            }
        } else if let Some(index) = self.tab_bars.iter().position(|tab| tab.window() == window) {
            self.state.select_monitor(index);
            match self.tab_bars[index].click(event.event_x as i32) {
                Some(tab) => {
                    clicked = Arg::Int(tab as i32);
                    Click::TabBar
                }
                None => {
                    self.apply_effects()?;
                    return Ok(Control::Continue);
                }
            }
        } else if self.state.is_managed(window) {
            self.state.focus(Some(window));
            let monitor = self.state.selected_monitor;
            self.state.restack(monitor);
            self.connection
                .allow_events(Allow::REPLAY_POINTER, x11rb::CURRENT_TIME)?;
            Click::ClientWindow
        } else {
            let monitor = self.state.monitor_at(event.root_x as i32, event.root_y as i32);
            self.state.select_monitor(monitor);
            Click::RootWindow
        };
        self.apply_effects()?;

        let actions = keyboard::matching_buttons(
            &self.state.config.buttons,
            click,
            event.detail,
            u16::from(event.state),
            self.keyboard.numlock_mask,
            &clicked,
        );
        self.run_actions(actions)
    }

    fn run_actions(&mut self, actions: Vec<(keyboard::KeyAction, Arg)>) -> WmResult<Control> {
        for (action, arg) in actions {
            if let Control::Exit(exit) = self.run_action(action, &arg)? {
                return Ok(Control::Exit(exit));
            }
        }
        Ok(Control::Continue)
    }
}
