//! Taskbar layout geometry and button behaviour.
//!
//! One square button per registry entry, laid out left to right in Z-order
//! (topmost window first).

use gemos_abi::{Color32, Rect};

use crate::error::WmResult;
use crate::registry::WindowRegistry;
use crate::theme::*;
use crate::window::WindowId;

pub const TASK_BUTTON_X0: i32 = 6;
pub const TASK_BUTTON_SIZE: i32 = 32;
pub const TASK_BUTTON_STRIDE: i32 = 36;
const TASK_BUTTON_INSET: i32 = 2;

// ── Layout geometry helpers ─────────────────────────────────────────────────

#[inline]
pub fn taskbar_y(fb_height: i32) -> i32 {
    fb_height - TASKBAR_HEIGHT
}

#[inline]
pub fn taskbar_rect(fb_width: i32, fb_height: i32) -> Rect {
    Rect::new(0, taskbar_y(fb_height), fb_width, TASKBAR_HEIGHT)
}

#[inline]
pub fn in_taskbar(fb_height: i32, y: i32) -> bool {
    y >= taskbar_y(fb_height) && y < fb_height
}

#[inline]
pub fn button_rect(fb_height: i32, index: usize) -> Rect {
    Rect::new(
        TASK_BUTTON_X0 + index as i32 * TASK_BUTTON_STRIDE,
        taskbar_y(fb_height) + TASK_BUTTON_INSET,
        TASK_BUTTON_SIZE,
        TASK_BUTTON_SIZE,
    )
}

/// Index of the button whose column contains `x`, among `count` buttons.
/// Only the horizontal extent matters once the point is in the taskbar.
pub fn button_at(fb_height: i32, x: i32, y: i32, count: usize) -> Option<usize> {
    if !in_taskbar(fb_height, y) {
        return None;
    }
    (0..count).find(|&i| {
        let r = button_rect(fb_height, i);
        x >= r.x && x < r.right()
    })
}

pub fn button_color(focused: bool, minimized: bool) -> Color32 {
    if focused {
        COLOR_TASK_FOCUSED
    } else if minimized {
        COLOR_TASK_MINIMIZED
    } else {
        COLOR_TASK_NORMAL
    }
}

// ── Button behaviour ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskbarEffect {
    Restored,
    Minimized,
    Raised,
}

/// Apply a taskbar button press to `id`: restore a minimized window,
/// minimize the focused one, raise anything else.
pub fn activate(windows: &mut WindowRegistry, id: WindowId) -> WmResult<TaskbarEffect> {
    let minimized = windows.get(id).is_some_and(|s| s.minimized);
    if minimized {
        windows.restore(id)?;
        Ok(TaskbarEffect::Restored)
    } else if windows.focused() == Some(id) {
        windows.minimize(id)?;
        Ok(TaskbarEffect::Minimized)
    } else {
        windows.bring_to_front(id)?;
        Ok(TaskbarEffect::Raised)
    }
}
