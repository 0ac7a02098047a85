use super::{Control, Exit, WindowManager};
use crate::errors::WmResult;
use crate::keyboard::{Arg, KeyAction};
use crate::layout::LayoutKind;
use log::{debug, error, info, warn};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;

/// Start `argv` in its own process group, detached from the window
/// manager's stdin. A thread waits for it so it never lingers as a zombie.
pub(crate) fn spawn(argv: &[String]) {
    let Some((program, args)) = argv.split_first() else {
        return;
    };

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .process_group(0)
        .spawn();

    match child {
        Ok(mut child) => {
            debug!("spawned {} as {}", program, child.id());
            std::thread::spawn(move || {
                if let Err(err) = child.wait() {
                    warn!("waiting for child failed: {}", err);
                }
            });
        }
        Err(err) => error!("failed to spawn {}: {}", program, err),
    }
}

impl WindowManager {
    pub(crate) fn run_action(&mut self, action: KeyAction, arg: &Arg) -> WmResult<Control> {
        debug!("action {:?} {:?}", action, arg);

        match action {
            KeyAction::Spawn => {
                if let Some(argv) = arg.command() {
                    spawn(&argv);
                }
            }
            KeyAction::KillClient => self.kill_selected()?,
            KeyAction::Quit => return Ok(Control::Exit(Exit::Quit)),
            KeyAction::Restart => return Ok(Control::Exit(Exit::Restart)),
            KeyAction::FocusStack => {
                self.state.focus_stack(arg.int().unwrap_or(1));
            }
            KeyAction::FocusStackNoRaise => {
                self.state.focus_stack_no_raise(arg.int().unwrap_or(1));
            }
            KeyAction::FocusTab => {
                if let Some(index) = arg.int().and_then(|i| usize::try_from(i).ok()) {
                    self.state.focus_tab(index);
                }
            }
            KeyAction::FocusMonitor => {
                let pointer = self.pointer_position();
                self.state.focus_monitor(arg.int().unwrap_or(1), pointer);
            }
            KeyAction::AltTab => {
                let pointer = self.pointer_position();
                self.state.alt_tab(pointer);
            }
            KeyAction::ToggleFocusFollowsMouse => self.state.toggle_focus_follows_mouse(),
            KeyAction::ToggleMouseFollowsFocus => self.state.toggle_mouse_follows_focus(),
            KeyAction::PushUp => {
                self.state.push_up();
            }
            KeyAction::PushDown => {
                self.state.push_down();
            }
            KeyAction::IncMaster => {
                self.state.set_master_count(arg.int().unwrap_or(1));
            }
            KeyAction::SetMasterFactor => {
                if let Some(value) = arg.float() {
                    self.state.set_master_fraction(value);
                }
            }
            KeyAction::SetClientFactor => {
                if let Some(value) = arg.float() {
                    self.state.set_client_weight(value);
                }
            }
            KeyAction::ResetClientFactors => {
                self.state.reset_weights();
            }
            KeyAction::Zoom => {
                self.state.zoom();
            }
            KeyAction::SetLayout => {
                let layout = match arg {
                    Arg::Layout(layout) => Some(*layout),
                    Arg::Str(name) => LayoutKind::from_str(name).ok(),
                    _ => None,
                };
                self.state.set_layout(layout);
            }
            KeyAction::CycleLayout => self.state.cycle_layout(),
            KeyAction::ToggleBar => self.state.toggle_bar(),
            KeyAction::CycleTabMode => self.state.cycle_tab_mode(),
            KeyAction::ToggleFloating => {
                self.state.toggle_floating();
            }
            KeyAction::ToggleFullScreen => {
                self.state.toggle_fullscreen();
            }
            KeyAction::TagMonitor => {
                self.state.tag_monitor(arg.int().unwrap_or(1));
            }
            KeyAction::ToggleScratchpad => self.state.toggle_scratchpad(),
            KeyAction::View => {
                if let Some(mask) = arg.tag_mask() {
                    self.state.view(mask);
                }
            }
            KeyAction::ToggleView => {
                if let Some(mask) = arg.tag_mask() {
                    self.state.toggle_view(mask);
                }
            }
            KeyAction::Tag => {
                if let Some(mask) = arg.tag_mask() {
                    self.state.tag(mask);
                }
            }
            KeyAction::ToggleTag => {
                if let Some(mask) = arg.tag_mask() {
                    self.state.toggle_tag(mask);
                }
            }
            KeyAction::ViewPrevious => {
                self.state.view_previous();
            }
            KeyAction::CycleView => {
                self.state.cycle_view(arg.int().unwrap_or(1));
            }
            KeyAction::CycleTag => {
                self.state.cycle_tag(arg.int().unwrap_or(1));
            }
            KeyAction::MoveMouse => self.begin_drag(false)?,
            KeyAction::ResizeMouse => self.begin_drag(true)?,
            KeyAction::None => {}
        }

        self.apply_effects()?;
        Ok(Control::Continue)
    }

    /// Close the selection politely if it speaks WM_DELETE_WINDOW, otherwise
    /// kill its connection.
    fn kill_selected(&mut self) -> WmResult<()> {
        let Some(window) = self.state.selected_client() else {
            return Ok(());
        };

        if self.send_protocol(window, self.atoms.wm_delete_window)? {
            debug!("asked window {} to close", window);
            return Ok(());
        }

        info!("killing window {}", window);
        self.connection.grab_server()?;
        self.connection.set_close_down_mode(CloseDown::DESTROY_ALL)?;
        self.connection.kill_client(window)?;
        self.connection.ungrab_server()?;
        self.connection.flush()?;
        Ok(())
    }

    /// Grab the pointer and start moving or resizing the selection.
    fn begin_drag(&mut self, resize: bool) -> WmResult<()> {
        let fullscreen = self
            .state
            .selected_client()
            .and_then(|window| self.state.client(window))
            .is_some_and(|client| client.is_fullscreen);
        if fullscreen {
            return Ok(());
        }
        let Some((x, y)) = self.pointer_position() else {
            return Ok(());
        };

        let (window, cursor) = if resize {
            (self.state.begin_resize(x, y), self.cursors.resizing)
        } else {
            (self.state.begin_move(x, y), self.cursors.moving)
        };
        if window.is_none() {
            return Ok(());
        }
        self.apply_effects()?;

        let grab = self
            .connection
            .grab_pointer(
                false,
                self.root,
                EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::POINTER_MOTION,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
                x11rb::NONE,
                cursor,
                x11rb::CURRENT_TIME,
            )?
            .reply()?;

        if grab.status != GrabStatus::SUCCESS {
            warn!("pointer grab failed: {:?}", grab.status);
            self.state.end_drag();
            self.apply_effects()?;
        }
        self.last_motion = 0;
        Ok(())
    }
}
