//! Pointer and keyboard routing.
//!
//! The router owns the transient interaction state (active drag, open menu,
//! previous button mask) and turns each pointer sample into at most one
//! effect, checked in fixed priority order:
//!
//! 1. an active drag captures everything until the primary button is released;
//! 2. a click while a menu is open goes to that menu (or dismisses it);
//! 3. a click on a menu header toggles that menu;
//! 4. a click in the taskbar goes to the button under it;
//! 5. the topmost visible window under the pointer gets the event;
//! 6. anything else falls on the empty desktop and is dropped.
//!
//! Only the primary button drives this machine. Click and release are edges
//! against the previous sample; a held button is a level.

use gemos_abi::{MouseButtons, PointerSample};
use gemos_lib::klog_debug;

use crate::menu::{DesktopRequest, Launcher, MenuAction, MenuKind};
use crate::registry::WindowRegistry;
use crate::taskbar::{self, TaskbarEffect};
use crate::theme::{MENU_BAR_HEIGHT, TITLE_BAR_HEIGHT};
use crate::window::{Capabilities, WindowId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Dragging { target: WindowId, dx: i32, dy: i32 },
    MenuOpen(MenuKind),
}

/// What a single pointer event ended up doing. Returned for observability;
/// the effects have already been applied when the caller sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Drag target moved to follow the pointer.
    DragMove(WindowId),
    DragEnd(WindowId),
    MenuAction(MenuAction),
    /// Click inside the open menu's panel or the strip that hit no item.
    MenuKept,
    MenuDismissed,
    /// A header was clicked; the payload is the menu now open, if any.
    MenuToggled(Option<MenuKind>),
    Taskbar(WindowId, TaskbarEffect),
    CloseWindow(WindowId),
    DragStart(WindowId),
    /// Window under the pointer consumed the event (callbacks may or may
    /// not have fired).
    Window(WindowId),
    Unhandled,
}

pub struct InputRouter {
    mode: Mode,
    prev_buttons: MouseButtons,
    pointer: PointerSample,
    request: Option<DesktopRequest>,
    screen_width: i32,
    screen_height: i32,
}

impl InputRouter {
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            mode: Mode::Idle,
            prev_buttons: MouseButtons::empty(),
            pointer: PointerSample::new(screen_width / 2, screen_height / 2, MouseButtons::empty()),
            request: None,
            screen_width,
            screen_height,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last pointer sample seen.
    #[inline]
    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }

    pub fn open_menu(&self) -> Option<MenuKind> {
        match self.mode {
            Mode::MenuOpen(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn drag_target(&self) -> Option<WindowId> {
        match self.mode {
            Mode::Dragging { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn screen_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }

    /// Desktop-level change asked for by the last menu action, if not yet
    /// taken.
    pub fn take_request(&mut self) -> Option<DesktopRequest> {
        self.request.take()
    }

    /// Return to idle, dropping any drag or open menu.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.prev_buttons = MouseButtons::empty();
    }

    pub fn handle_pointer(
        &mut self,
        sample: PointerSample,
        windows: &mut WindowRegistry,
        launcher: &mut dyn Launcher,
    ) -> Dispatch {
        let held = sample.buttons.primary();
        let click = held && !self.prev_buttons.primary();
        self.prev_buttons = sample.buttons;
        self.pointer = sample;

        let (x, y) = (sample.x, sample.y);

        if let Mode::Dragging { target, dx, dy } = self.mode {
            if !held {
                self.mode = Mode::Idle;
                klog_debug!("wm: drag end slot {}", target.slot());
                return Dispatch::DragEnd(target);
            }
            if windows.set_position(target, x - dx, y - dy).is_ok() {
                return Dispatch::DragMove(target);
            }
            // Target vanished underneath us (closed by its own callback).
            self.mode = Mode::Idle;
        }

        if click {
            if let Some(dispatch) = self.route_menu_click(x, y, windows, launcher) {
                return dispatch;
            }
            if let Some(dispatch) = self.route_taskbar_click(x, y, windows) {
                return dispatch;
            }
        }

        self.route_window(sample, click, windows)
    }

    fn route_menu_click(
        &mut self,
        x: i32,
        y: i32,
        windows: &mut WindowRegistry,
        launcher: &mut dyn Launcher,
    ) -> Option<Dispatch> {
        let header = MenuKind::header_at(x, y);

        if let Mode::MenuOpen(open) = self.mode {
            if let Some(idx) = open.item_at(x, y) {
                let action = open.items()[idx].action;
                self.mode = Mode::Idle;
                klog_debug!("wm: menu action {:?}", action);
                if let Some(request) = launcher.launch(action, windows) {
                    self.request = Some(request);
                }
                return Some(Dispatch::MenuAction(action));
            }
            if header.is_none() {
                if y < MENU_BAR_HEIGHT || open.panel().contains(x, y) {
                    return Some(Dispatch::MenuKept);
                }
                self.mode = Mode::Idle;
                return Some(Dispatch::MenuDismissed);
            }
        }

        let kind = header?;
        self.mode = if self.open_menu() == Some(kind) {
            Mode::Idle
        } else {
            Mode::MenuOpen(kind)
        };
        Some(Dispatch::MenuToggled(self.open_menu()))
    }

    fn route_taskbar_click(
        &mut self,
        x: i32,
        y: i32,
        windows: &mut WindowRegistry,
    ) -> Option<Dispatch> {
        if !taskbar::in_taskbar(self.screen_height, y) {
            return None;
        }
        let order = windows.z_order();
        // Between buttons the click falls through to whatever window is
        // under it.
        let id = taskbar::button_at(self.screen_height, x, y, order.len())
            .and_then(|idx| order.as_slice().get(idx).copied())?;
        match taskbar::activate(windows, id) {
            Ok(effect) => Some(Dispatch::Taskbar(id, effect)),
            Err(err) => {
                klog_debug!("wm: taskbar button: {}", err);
                None
            }
        }
    }

    fn route_window(
        &mut self,
        sample: PointerSample,
        click: bool,
        windows: &mut WindowRegistry,
    ) -> Dispatch {
        let (x, y) = (sample.x, sample.y);
        let Some(id) = windows.window_at(x, y) else {
            return Dispatch::Unhandled;
        };
        let Some(state) = windows.get(id) else {
            return Dispatch::Unhandled;
        };
        let lx = x - state.x;
        let ly = y - state.y;
        let close_hit = state.is_close_hit(lx, ly);

        if click {
            if let Err(err) = windows.bring_to_front(id) {
                klog_debug!("wm: raise: {}", err);
                return Dispatch::Unhandled;
            }
        }

        if ly < TITLE_BAR_HEIGHT {
            if !click {
                return Dispatch::Window(id);
            }
            if close_hit {
                if let Err(err) = windows.close(id) {
                    klog_debug!("wm: close: {}", err);
                    return Dispatch::Unhandled;
                }
                return Dispatch::CloseWindow(id);
            }
            self.mode = Mode::Dragging {
                target: id,
                dx: lx,
                dy: ly,
            };
            klog_debug!("wm: drag start slot {} grab ({}, {})", id.slot(), lx, ly);
            return Dispatch::DragStart(id);
        }

        if let Some((state, app)) = windows.app_parts(id) {
            let caps = app.capabilities();
            if click && caps.contains(Capabilities::CLICK) {
                app.click(state, lx, ly);
            }
            if sample.buttons.primary() && caps.contains(Capabilities::POINTER_MOTION) {
                app.pointer_motion(state, lx, ly, sample.buttons);
            }
        }
        Dispatch::Window(id)
    }

    /// Deliver a character to the focused window, if it takes keys.
    pub fn handle_key(&mut self, c: char, windows: &mut WindowRegistry) -> Option<WindowId> {
        let id = windows.focused()?;
        let (state, app) = windows.app_parts(id)?;
        if !app.capabilities().contains(Capabilities::KEY) {
            return None;
        }
        app.key(state, c);
        Some(id)
    }
}
