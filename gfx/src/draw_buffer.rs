use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use gemos_abi::{Color32, Rect};

use crate::Framebuffer;

/// One `draw_string` call, kept so tests can see what text a frame showed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Color32,
}

/// A heap-backed, double-buffered [`Framebuffer`].
///
/// `DrawBuffer` keeps an XRGB back buffer that all drawing lands in and a
/// front buffer that only changes on [`swap`](Framebuffer::swap). Text is not
/// rasterised (glyphs belong to the pixel driver); each `draw_string` is
/// logged as a [`TextSpan`] instead and published with the frame on swap.
pub struct DrawBuffer {
    width: i32,
    height: i32,
    back: Vec<Color32>,
    front: Vec<Color32>,
    pending_text: Vec<TextSpan>,
    text: Vec<TextSpan>,
    swaps: u32,
}

impl DrawBuffer {
    /// Create a black `width` x `height` buffer. Negative sizes become empty.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            back: vec![0; len],
            front: vec![0; len],
            pending_text: Vec::new(),
            text: Vec::new(),
            swaps: 0,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel as of the last swap.
    pub fn front_pixel(&self, x: i32, y: i32) -> Color32 {
        self.index(x, y).map_or(0, |i| self.front[i])
    }

    /// Text drawn in the last presented frame, in draw order.
    pub fn text(&self) -> &[TextSpan] {
        &self.text
    }

    /// First span of the last presented frame whose text equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&TextSpan> {
        self.text.iter().find(|span| span.text == needle)
    }

    pub fn swap_count(&self) -> u32 {
        self.swaps
    }

    /// Whether every back-buffer pixel of `r` (clipped to the screen) is `color`.
    pub fn region_is(&self, r: Rect, color: Color32) -> bool {
        let Some(clip) = r.intersect(&self.bounds()) else {
            return true;
        };
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                if self.get_pixel(x, y) != color {
                    return false;
                }
            }
        }
        true
    }
}

impl Framebuffer for DrawBuffer {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color32) {
        let Some(clip) = Rect::new(x, y, w, h).intersect(&self.bounds()) else {
            return;
        };
        let stride = self.width as usize;
        for row in clip.y..clip.bottom() {
            let start = row as usize * stride + clip.x as usize;
            self.back[start..start + clip.w as usize].fill(color);
        }
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Color32) {
        self.pending_text.push(TextSpan {
            x,
            y,
            text: String::from(text),
            color,
        });
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color32) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = color;
        }
    }

    fn get_pixel(&self, x: i32, y: i32) -> Color32 {
        self.index(x, y).map_or(0, |i| self.back[i])
    }

    fn swap(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.text = core::mem::take(&mut self.pending_text);
        self.swaps = self.swaps.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_clip_to_screen() {
        let mut fb = DrawBuffer::new(8, 8);
        fb.draw_rect(-2, 6, 4, 10, 0xABCDEF);
        assert_eq!(fb.get_pixel(0, 6), 0xABCDEF);
        assert_eq!(fb.get_pixel(1, 7), 0xABCDEF);
        assert_eq!(fb.get_pixel(2, 7), 0);
        fb.draw_rect(100, 100, 5, 5, 0x1);
        fb.draw_rect(0, 0, -3, 4, 0x1);
        assert!(fb.region_is(Rect::new(0, 0, 8, 6), 0));
    }

    #[test]
    fn swap_publishes_pixels_and_text() {
        let mut fb = DrawBuffer::new(4, 4);
        fb.put_pixel(1, 1, 0x00FF00);
        fb.draw_string(0, 0, "hi", 0xFFFFFF);
        assert_eq!(fb.front_pixel(1, 1), 0);
        assert!(fb.text().is_empty());

        fb.swap();
        assert_eq!(fb.front_pixel(1, 1), 0x00FF00);
        assert_eq!(fb.find_text("hi").map(|s| (s.x, s.y)), Some((0, 0)));
        assert_eq!(fb.swap_count(), 1);

        fb.swap();
        assert!(fb.find_text("hi").is_none());
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut fb = DrawBuffer::new(2, 2);
        fb.put_pixel(-1, 0, 0xFF);
        fb.put_pixel(2, 0, 0xFF);
        assert_eq!(fb.get_pixel(5, 5), 0);
        assert!(fb.region_is(fb.bounds(), 0));
    }
}
