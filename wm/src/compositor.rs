//! Frame composition.
//!
//! One full repaint per call, back to front: desktop, windows (bottom of the
//! Z-order first), menu strip, taskbar, open menu, cursor, then swap. The
//! compositor reads window geometry and router state but never changes
//! either; the only mutation it performs is letting applications update
//! their own state while they paint.

use gemos_abi::{PointerSample, Rect};
use gemos_gfx::{Framebuffer, font, primitives};

use crate::clock::WallTime;
use crate::menu::{MENU_ITEM_HEIGHT, MenuKind};
use crate::registry::WindowRegistry;
use crate::taskbar;
use crate::theme::*;
use crate::window::{Capabilities, WindowCanvas, WindowId, WindowState};

/// Arrow cursor, 12 wide by 16 tall. `1` is outline, `2` is fill.
const CURSOR_ARROW: [&[u8]; 16] = [
    b"1           ",
    b"11          ",
    b"121         ",
    b"1221        ",
    b"12221       ",
    b"122221      ",
    b"1222221     ",
    b"12222221    ",
    b"122222221   ",
    b"1222222221  ",
    b"1222221111  ",
    b"121221      ",
    b"11 1221     ",
    b"1  1221     ",
    b"    11      ",
    b"            ",
];

const CURSOR_PALETTE: [u32; 2] = [COLOR_BLACK, COLOR_WHITE];

const MENU_LABEL_Y: i32 = 6;
const CLOCK_RIGHT_MARGIN: i32 = 60;
const IDLE_TITLE: &str = "System";

/// Everything besides the registry that a frame depends on.
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo<'a> {
    pub theme: &'a Theme,
    pub pointer: PointerSample,
    pub open_menu: Option<MenuKind>,
    pub clock: Option<WallTime>,
}

pub fn compose<F: Framebuffer>(fb: &mut F, windows: &mut WindowRegistry, frame: &FrameInfo<'_>) {
    fb.fill(fb.bounds(), frame.theme.desktop);

    let order = windows.z_order();
    for &id in order.as_slice().iter().rev() {
        draw_window(fb, windows, id, frame.theme);
    }

    draw_menu_strip(fb, windows, frame);
    draw_taskbar(fb, windows);
    if let Some(kind) = frame.open_menu {
        draw_menu_panel(fb, kind, frame.pointer);
    }
    draw_cursor(fb, frame.pointer.x, frame.pointer.y);

    fb.swap();
}

fn draw_window<F: Framebuffer>(fb: &mut F, windows: &mut WindowRegistry, id: WindowId, theme: &Theme) {
    let focused = windows.focused() == Some(id);
    match windows.get(id) {
        Some(state) if !state.minimized => draw_chrome(fb, state, focused, theme),
        _ => return,
    }

    if let Some((state, app)) = windows.app_parts(id) {
        if app.capabilities().contains(Capabilities::PAINT) {
            let mut canvas = WindowCanvas::new(fb, state);
            app.paint(state, &mut canvas);
        }
    }
}

pub fn draw_chrome<F: Framebuffer + ?Sized>(fb: &mut F, s: &WindowState, focused: bool, theme: &Theme) {
    let (x, y, w, h) = (s.x, s.y, s.width, s.height);

    fb.draw_rect(x + SHADOW_OFFSET, y + SHADOW_OFFSET, w, h, COLOR_SHADOW);
    fb.draw_rect(x - 1, y - 1, w + 2, h + 2, COLOR_BLACK);

    let title_bg = if focused {
        theme.title_focused
    } else {
        theme.title_unfocused
    };
    fb.fill(s.title_bar(), title_bg);

    let bx = x + w - CLOSE_BOX_SIZE - CLOSE_BOX_INSET;
    let by = y + CLOSE_BOX_INSET;
    fb.draw_rect(bx, by, CLOSE_BOX_SIZE, CLOSE_BOX_SIZE, COLOR_CLOSE_FRAME);
    fb.draw_rect(bx + 1, by + 1, CLOSE_BOX_SIZE - 2, CLOSE_BOX_SIZE - 2, COLOR_WHITE);
    primitives::hline(fb, bx + 1, by + 1, CLOSE_BOX_SIZE - 2, COLOR_BLACK);
    fb.draw_string(bx + 4, by + 1, "X", COLOR_BLACK);

    fb.draw_string(x + 8, y + 6, s.title(), COLOR_WHITE);

    fb.fill(s.content(), theme.window_bg);
}

fn draw_menu_strip<F: Framebuffer>(fb: &mut F, windows: &WindowRegistry, frame: &FrameInfo<'_>) {
    let width = fb.width();
    fb.draw_rect(0, 0, width, MENU_BAR_HEIGHT, COLOR_WHITE);
    primitives::hline(fb, 0, MENU_BAR_HEIGHT, width, COLOR_BLACK);

    let p = frame.pointer;
    for kind in MenuKind::ALL {
        let header = kind.header();
        if header.contains(p.x, p.y) || frame.open_menu == Some(kind) {
            fb.draw_rect(header.x, 2, header.w, MENU_BAR_HEIGHT - 4, COLOR_HIGHLIGHT);
        }
        fb.draw_string(header.x + 5, MENU_LABEL_Y, kind.label(), frame.theme.text);
    }

    if let Some(time) = frame.clock {
        let mut buf = [0u8; 5];
        fb.draw_string(width - CLOCK_RIGHT_MARGIN, MENU_LABEL_Y, time.format(&mut buf), frame.theme.text);
    }

    match windows.focused().and_then(|id| windows.get(id)) {
        Some(state) => {
            let title = state.title();
            fb.draw_string(font::centered_x(width, title), MENU_LABEL_Y, title, frame.theme.text);
        }
        None => {
            fb.draw_string(
                (width - CLOCK_RIGHT_MARGIN) / 2,
                MENU_LABEL_Y,
                IDLE_TITLE,
                COLOR_GREY,
            );
        }
    }
}

fn draw_taskbar<F: Framebuffer>(fb: &mut F, windows: &WindowRegistry) {
    let (width, height) = (fb.width(), fb.height());
    let bar = taskbar::taskbar_rect(width, height);
    fb.fill(bar, COLOR_TASKBAR);
    primitives::hline(fb, 0, bar.y, width, COLOR_TASKBAR_EDGE);

    let focused = windows.focused();
    for (i, (id, state)) in windows.iter().enumerate() {
        let r = taskbar::button_rect(height, i);
        if r.x >= width {
            break;
        }
        fb.fill(r, taskbar::button_color(focused == Some(id), state.minimized));
        primitives::hline(fb, r.x, r.y, r.w, COLOR_TASK_BEVEL);
        primitives::vline(fb, r.x, r.y, r.h, COLOR_TASK_BEVEL);

        let icon = state.title().chars().next().unwrap_or('?');
        let mut buf = [0u8; 4];
        fb.draw_string(r.x + 12, bar.y + 10, icon.encode_utf8(&mut buf), COLOR_WHITE);
    }
}

fn draw_menu_panel<F: Framebuffer>(fb: &mut F, kind: MenuKind, pointer: PointerSample) {
    let panel = kind.panel();
    primitives::panel(fb, panel, COLOR_WHITE, COLOR_BLACK);

    for (i, item) in kind.items().iter().enumerate() {
        let row: Rect = kind.item_rect(i);
        if row.contains(pointer.x, pointer.y) {
            fb.fill(row, COLOR_HIGHLIGHT);
        }
        let text_y = row.y + (MENU_ITEM_HEIGHT - font::FONT_CHAR_HEIGHT) / 2;
        fb.draw_string(panel.x + 10, text_y, item.label, COLOR_BLACK);
    }
}

fn draw_cursor<F: Framebuffer>(fb: &mut F, x: i32, y: i32) {
    primitives::bitmap(fb, x, y, &CURSOR_ARROW, &CURSOR_PALETTE);
}
