use gemos_abi::{Color32, Rect};

use crate::Framebuffer;

#[inline]
pub fn hline<T: Framebuffer + ?Sized>(target: &mut T, x: i32, y: i32, len: i32, color: Color32) {
    target.draw_rect(x, y, len, 1, color);
}

#[inline]
pub fn vline<T: Framebuffer + ?Sized>(target: &mut T, x: i32, y: i32, len: i32, color: Color32) {
    target.draw_rect(x, y, 1, len, color);
}

/// One-pixel outline just inside `r`.
pub fn rect<T: Framebuffer + ?Sized>(target: &mut T, r: Rect, color: Color32) {
    if r.is_empty() {
        return;
    }
    hline(target, r.x, r.y, r.w, color);
    hline(target, r.x, r.bottom() - 1, r.w, color);
    vline(target, r.x, r.y, r.h, color);
    vline(target, r.right() - 1, r.y, r.h, color);
}

/// Filled rect with a one-pixel outline.
pub fn panel<T: Framebuffer + ?Sized>(target: &mut T, r: Rect, fill: Color32, border: Color32) {
    target.fill(r, fill);
    rect(target, r, border);
}

/// Plot a character-art bitmap. Each row byte selects a colour from
/// `palette` by ASCII digit (`b'1'` is `palette[0]`); anything else is
/// transparent.
pub fn bitmap<T: Framebuffer + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    rows: &[&[u8]],
    palette: &[Color32],
) {
    for (dy, row) in rows.iter().enumerate() {
        for (dx, &cell) in row.iter().enumerate() {
            let idx = match cell {
                b'1'..=b'9' => (cell - b'1') as usize,
                _ => continue,
            };
            if let Some(&color) = palette.get(idx) {
                target.put_pixel(x + dx as i32, y + dy as i32, color);
            }
        }
    }
}
