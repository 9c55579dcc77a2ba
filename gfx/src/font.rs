//! System font metrics. Glyph bitmaps belong to the pixel driver; layout
//! code only needs the fixed cell size.

pub const FONT_CHAR_WIDTH: i32 = 8;
pub const FONT_CHAR_HEIGHT: i32 = 8;

/// Pixel width of `text` on a single line.
pub fn str_width(text: &str) -> i32 {
    let mut width = 0i32;
    for ch in text.chars() {
        if ch == '\n' {
            break;
        }
        width += FONT_CHAR_WIDTH;
    }
    width
}

/// X at which `text` is horizontally centred inside `[0, span)`.
#[inline]
pub fn centered_x(span: i32, text: &str) -> i32 {
    (span - str_width(text)) / 2
}
