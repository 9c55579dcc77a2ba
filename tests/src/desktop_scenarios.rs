//! Whole-desktop behaviour driven through `Desktop::handle_mouse`.

use alloc::boxed::Box;

use gemos_abi::MouseButtons;
use gemos_gfx::{DrawBuffer, font};
use gemos_wm::taskbar::{self, TaskbarEffect};
use gemos_wm::theme::COLOR_TASK_MINIMIZED;
use gemos_wm::{
    Desktop, DesktopConfig, Dispatch, MenuAction, MenuKind, NoClock, ThemePreset,
    WINDOW_POOL_CAPACITY,
};

use crate::WindowLauncher;

const NONE: MouseButtons = MouseButtons::empty();
const LEFT: MouseButtons = MouseButtons::LEFT;

fn desktop() -> Desktop {
    let cfg = DesktopConfig {
        screen_width: 640,
        screen_height: 480,
        ..DesktopConfig::default()
    };
    Desktop::new(cfg, Box::new(WindowLauncher::default()), Box::new(NoClock))
}

fn click(d: &mut Desktop, x: i32, y: i32) -> Dispatch {
    let hit = d.handle_mouse(x, y, LEFT);
    d.handle_mouse(x, y, NONE);
    hit
}

#[test]
fn dragged_window_keeps_its_grab_offset() {
    let mut d = desktop();
    let mut fb = DrawBuffer::new(640, 480);
    let id = d.create_window(100, 100, 200, 150, "Drag").unwrap();

    assert_eq!(d.handle_mouse(105, 105, LEFT), Dispatch::DragStart(id));
    assert_eq!(d.handle_mouse(150, 150, LEFT), Dispatch::DragMove(id));
    assert_eq!(d.handle_mouse(150, 150, NONE), Dispatch::DragEnd(id));

    let pos = d.windows().get(id).map(|s| (s.x, s.y));
    assert_eq!(pos, Some((145, 145)));

    d.paint(&mut fb);
    let theme = *d.theme();
    assert_eq!(fb.front_pixel(200, 155), theme.title_focused);
    assert_eq!(fb.front_pixel(110, 130), theme.desktop);
}

#[test]
fn drag_capture_ignores_menu_headers() {
    let mut d = desktop();
    let id = d.create_window(100, 100, 200, 150, "Drag").unwrap();

    d.handle_mouse(110, 110, LEFT);
    assert_eq!(d.handle_mouse(80, 10, LEFT), Dispatch::DragMove(id));
    assert_eq!(d.router().open_menu(), None);
    assert_eq!(d.handle_mouse(80, 10, NONE), Dispatch::DragEnd(id));

    // Released; the same spot is now an ordinary header click.
    assert_eq!(
        d.handle_mouse(80, 10, LEFT),
        Dispatch::MenuToggled(Some(MenuKind::Apps))
    );
}

#[test]
fn pool_refuses_the_twenty_first_window_until_one_closes() {
    let mut d = desktop();
    let mut last = None;
    for i in 0..WINDOW_POOL_CAPACITY as i32 {
        last = d.create_window(i * 10, 30 + i * 5, 100, 80, "w");
        assert!(last.is_some());
    }
    let last = last.unwrap();
    let before = d.windows().z_order();

    assert!(d.create_window(0, 30, 100, 80, "extra").is_none());
    assert_eq!(d.windows().len(), WINDOW_POOL_CAPACITY);
    assert_eq!(d.windows().z_order().as_slice(), before.as_slice());

    // Close box of the topmost window, at (190, 125).
    assert_eq!(click(&mut d, 280, 130), Dispatch::CloseWindow(last));
    assert_eq!(d.windows().focused(), before.as_slice().get(1).copied());

    let reused = d.create_window(0, 30, 100, 80, "again").unwrap();
    assert_eq!(reused.slot(), last.slot());
    assert_ne!(reused.generation(), last.generation());
    assert!(d.windows().get(last).is_none());
}

#[test]
fn apps_menu_launch_opens_a_focused_window() {
    let mut d = desktop();
    let mut fb = DrawBuffer::new(640, 480);

    assert_eq!(
        click(&mut d, 80, 10),
        Dispatch::MenuToggled(Some(MenuKind::Apps))
    );
    d.paint(&mut fb);
    assert!(fb.find_text("Minesweeper").is_some());

    let snake = MenuKind::Apps.item_rect(1);
    assert_eq!(
        click(&mut d, snake.x + 20, snake.y + 10),
        Dispatch::MenuAction(MenuAction::Launch("Snake"))
    );
    assert_eq!(d.router().open_menu(), None);

    d.paint(&mut fb);
    assert!(fb.find_text("Minesweeper").is_none());
    let centred = font::centered_x(640, "Snake");
    assert!(
        fb.text()
            .iter()
            .any(|s| s.text == "Snake" && (s.x, s.y) == (centred, 6))
    );
    let button = taskbar::button_rect(480, 0);
    assert_eq!(
        fb.front_pixel(button.x + 20, button.y + 20),
        taskbar::button_color(true, false)
    );
}

#[test]
fn outside_click_dismisses_menu_without_reaching_windows() {
    let mut d = desktop();
    let id = d.create_window(300, 200, 200, 150, "Under").unwrap();

    click(&mut d, 20, 10);
    assert_eq!(d.router().open_menu(), Some(MenuKind::System));

    // Empty part of the strip keeps the menu open.
    assert_eq!(click(&mut d, 400, 10), Dispatch::MenuKept);
    assert_eq!(d.router().open_menu(), Some(MenuKind::System));

    assert_eq!(d.handle_mouse(350, 210, LEFT), Dispatch::MenuDismissed);
    assert_eq!(d.router().open_menu(), None);
    assert_eq!(d.router().drag_target(), None);
    d.handle_mouse(350, 210, NONE);

    assert_eq!(d.handle_mouse(350, 210, LEFT), Dispatch::DragStart(id));
}

#[test]
fn taskbar_button_minimizes_and_restores() {
    let mut d = desktop();
    let mut fb = DrawBuffer::new(640, 480);
    let id = d.create_window(100, 100, 200, 150, "Task").unwrap();
    let button = taskbar::button_rect(480, 0);
    let (bx, by) = (button.x + 14, button.y + 14);

    assert_eq!(
        click(&mut d, bx, by),
        Dispatch::Taskbar(id, TaskbarEffect::Minimized)
    );
    assert_eq!(d.windows().focused(), None);

    d.paint(&mut fb);
    assert_eq!(fb.front_pixel(150, 150), d.theme().desktop);
    // Clear of the bevel and of the cursor parked on the button.
    assert_eq!(fb.front_pixel(button.x + 4, button.y + 4), COLOR_TASK_MINIMIZED);
    assert!(fb.find_text("System").is_some());

    assert_eq!(
        click(&mut d, bx, by),
        Dispatch::Taskbar(id, TaskbarEffect::Restored)
    );
    assert_eq!(d.windows().focused(), Some(id));
}

#[test]
fn closing_focused_window_hands_focus_down_the_stack() {
    let mut d = desktop();
    let bottom = d.create_window(10, 40, 150, 100, "Bottom").unwrap();
    let top = d.create_window(300, 40, 150, 100, "Top").unwrap();

    // Top's close area is the title bar right of `width - 20`.
    assert_eq!(click(&mut d, 300 + 150 - 5, 45), Dispatch::CloseWindow(top));
    assert_eq!(d.windows().focused(), Some(bottom));
    assert_eq!(d.windows().len(), 1);
}

#[test]
fn settings_item_repaints_desktop_in_new_theme() {
    let cfg = DesktopConfig {
        screen_width: 640,
        screen_height: 480,
        ..DesktopConfig::default()
    };
    let launcher = WindowLauncher {
        settings_theme: Some(ThemePreset::Crimson),
        ..WindowLauncher::default()
    };
    let mut d = Desktop::new(cfg, Box::new(launcher), Box::new(NoClock));
    let mut fb = DrawBuffer::new(640, 480);
    let id = d.create_window(300, 200, 200, 150, "Still here").unwrap();

    d.paint(&mut fb);
    assert_eq!(fb.front_pixel(100, 300), ThemePreset::Slate.theme().desktop);

    click(&mut d, 20, 10);
    let settings = MenuKind::System.item_rect(1);
    assert_eq!(
        click(&mut d, settings.x + 15, settings.y + 10),
        Dispatch::MenuAction(MenuAction::Settings)
    );

    d.paint(&mut fb);
    let crimson = ThemePreset::Crimson.theme();
    assert_eq!(*d.theme(), crimson);
    assert_eq!(fb.front_pixel(100, 300), crimson.desktop);
    assert_eq!(fb.front_pixel(305, 205), crimson.title_focused);
    assert_eq!(d.windows().focused(), Some(id));
}
