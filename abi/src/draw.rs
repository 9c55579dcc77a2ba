/// Framebuffer colour, 0x00RRGGBB.
pub type Color32 = u32;

/// Construct a framebuffer colour value.
///
/// The desktop framebuffer is XRGB, so the high byte is always zero.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Screen rectangle with a top-left origin and an exclusive right/bottom edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open containment test: the right and bottom edges are outside.
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }

    /// Overlap of two rects, or `None` when they do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x0 < x1 && y0 < y1 {
            Some(Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0)))
        } else {
            None
        }
    }
}
