//! Window records and the application-facing callback surface.

use bitflags::bitflags;
use gemos_abi::{Color32, MouseButtons, Rect};
use gemos_gfx::Framebuffer;

use crate::theme::{CLOSE_HIT_WIDTH, TITLE_BAR_HEIGHT};

pub const TITLE_MAX_LEN: usize = 32;

/// Handle to a registry slot.
///
/// The generation changes every time the slot is closed, so an id kept
/// after its window was closed never aliases whatever reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId {
    slot: u16,
    generation: u16,
}

impl WindowId {
    #[inline]
    pub(crate) const fn new(slot: u16, generation: u16) -> Self {
        Self { slot, generation }
    }

    #[inline]
    pub const fn slot(self) -> u16 {
        self.slot
    }

    #[inline]
    pub const fn generation(self) -> u16 {
        self.generation
    }
}

/// Geometry and flags of one window, as seen by its application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub minimized: bool,
    title: [u8; TITLE_MAX_LEN],
    title_len: u8,
}

impl WindowState {
    pub fn new(x: i32, y: i32, width: i32, height: i32, title: &str) -> Self {
        let mut state = Self {
            x,
            y,
            width,
            height,
            minimized: false,
            title: [0; TITLE_MAX_LEN],
            title_len: 0,
        };
        state.set_title(title);
        state
    }

    /// Replace the title, truncating on a char boundary to fit.
    pub fn set_title(&mut self, title: &str) {
        let mut len = title.len().min(TITLE_MAX_LEN);
        while !title.is_char_boundary(len) {
            len -= 1;
        }
        self.title[..len].copy_from_slice(&title.as_bytes()[..len]);
        self.title_len = len as u8;
    }

    pub fn title(&self) -> &str {
        // Only ever filled from a &str cut on a char boundary.
        core::str::from_utf8(&self.title[..self.title_len as usize]).unwrap_or("")
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn title_bar(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, TITLE_BAR_HEIGHT.min(self.height))
    }

    #[inline]
    pub fn content(&self) -> Rect {
        Rect::new(
            self.x,
            self.y + TITLE_BAR_HEIGHT,
            self.width,
            self.height - TITLE_BAR_HEIGHT,
        )
    }

    /// Whether window-local `(lx, ly)` is in the close-button hit area.
    #[inline]
    pub fn is_close_hit(&self, lx: i32, ly: i32) -> bool {
        ly >= 0 && ly < TITLE_BAR_HEIGHT && lx > self.width - CLOSE_HIT_WIDTH && lx < self.width
    }
}

bitflags! {
    /// Callbacks an application actually implements. The window manager
    /// only invokes the ones listed here.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        const PAINT          = 1 << 0;
        const CLICK          = 1 << 1;
        const POINTER_MOTION = 1 << 2;
        const KEY            = 1 << 3;
    }
}

/// Behaviour attached to a window.
///
/// Coordinates are window-local: `(0, 0)` is the top-left corner of the
/// title bar, so content starts at `y == TITLE_BAR_HEIGHT`. Implement the
/// callbacks you need and list them in [`capabilities`]; the rest keep their
/// empty defaults and are never called.
///
/// [`capabilities`]: WindowApp::capabilities
pub trait WindowApp {
    fn capabilities(&self) -> Capabilities;

    fn paint(&mut self, _window: &WindowState, _canvas: &mut WindowCanvas<'_>) {}

    /// Primary button went down in the content area.
    fn click(&mut self, _window: &WindowState, _x: i32, _y: i32) {}

    /// Pointer moved (or stayed) in the content area with the primary
    /// button held, outside of a window drag.
    fn pointer_motion(&mut self, _window: &WindowState, _x: i32, _y: i32, _buttons: MouseButtons) {
    }

    /// Character typed while this window had focus.
    fn key(&mut self, _window: &WindowState, _c: char) {}
}

/// Drawing surface handed to [`WindowApp::paint`].
///
/// Translates window-local coordinates to the screen and clips everything to
/// the window's content area, so an application can never draw over its own
/// chrome or other windows' frames.
pub struct WindowCanvas<'a> {
    fb: &'a mut dyn Framebuffer,
    origin_x: i32,
    origin_y: i32,
    clip: Rect,
}

impl<'a> WindowCanvas<'a> {
    pub fn new(fb: &'a mut dyn Framebuffer, window: &WindowState) -> Self {
        let content = window.content();
        let clip = content.intersect(&fb.bounds()).unwrap_or_default();
        Self {
            fb,
            origin_x: window.x,
            origin_y: window.y,
            clip,
        }
    }

    /// Content area in window-local coordinates.
    pub fn content_rect(&self) -> Rect {
        self.clip.offset(-self.origin_x, -self.origin_y)
    }

    fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        (self.origin_x + x, self.origin_y + y)
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color32) {
        let (sx, sy) = self.to_screen(x, y);
        if let Some(r) = Rect::new(sx, sy, w, h).intersect(&self.clip) {
            self.fb.fill(r, color);
        }
    }

    /// Text is clipped whole: a string that would start outside the content
    /// area is skipped.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Color32) {
        let (sx, sy) = self.to_screen(x, y);
        if self.clip.contains(sx, sy) {
            self.fb.draw_string(sx, sy, text, color);
        }
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color32) {
        let (sx, sy) = self.to_screen(x, y);
        if self.clip.contains(sx, sy) {
            self.fb.put_pixel(sx, sy, color);
        }
    }

    /// Pixel currently in the back buffer, or 0 outside the content area.
    pub fn get_pixel(&self, x: i32, y: i32) -> Color32 {
        let (sx, sy) = self.to_screen(x, y);
        if self.clip.contains(sx, sy) {
            self.fb.get_pixel(sx, sy)
        } else {
            0
        }
    }
}
