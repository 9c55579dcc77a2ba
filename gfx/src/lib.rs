//! Drawing surface contract for the desktop compositor.
//!
//! The pixel driver (linear framebuffer, back buffer, glyph rasteriser) lives
//! in the platform layer and is reached only through [`Framebuffer`]. The
//! hosted [`DrawBuffer`] implements the same contract in memory so the
//! compositor can be exercised without hardware.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod draw_buffer;
pub mod font;
pub mod primitives;

pub use draw_buffer::{DrawBuffer, TextSpan};

use gemos_abi::{Color32, Rect};

/// Double-buffered drawing target.
///
/// All drawing goes to the back buffer and becomes visible on [`swap`].
/// Implementations clip every call to the screen; callers may pass
/// coordinates that are partially or wholly off screen.
///
/// [`swap`]: Framebuffer::swap
pub trait Framebuffer {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color32);

    /// Draw `text` with the 8x8 system font, top-left at `(x, y)`.
    fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Color32);

    fn put_pixel(&mut self, x: i32, y: i32, color: Color32);

    /// Back-buffer pixel, or 0 outside the screen.
    fn get_pixel(&self, x: i32, y: i32) -> Color32;

    /// Present the back buffer.
    fn swap(&mut self);

    #[inline]
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    #[inline]
    fn fill(&mut self, r: Rect, color: Color32) {
        self.draw_rect(r.x, r.y, r.w, r.h, color);
    }
}
