//! Desktop colours and fixed chrome metrics.

use gemos_abi::{Color32, rgb};

pub const MENU_BAR_HEIGHT: i32 = 24;
pub const TITLE_BAR_HEIGHT: i32 = 24;
pub const TASKBAR_HEIGHT: i32 = 36;

pub const SHADOW_OFFSET: i32 = 4;
pub const CLOSE_BOX_SIZE: i32 = 14;
pub const CLOSE_BOX_INSET: i32 = 4;
/// Width of the title-bar strip, measured from the right edge, that closes
/// the window when clicked. Wider than the drawn box to be forgiving.
pub const CLOSE_HIT_WIDTH: i32 = 20;

pub const COLOR_WHITE: Color32 = rgb(0xFF, 0xFF, 0xFF);
pub const COLOR_BLACK: Color32 = rgb(0x00, 0x00, 0x00);
pub const COLOR_GREY: Color32 = rgb(0x80, 0x80, 0x80);
pub const COLOR_SHADOW: Color32 = rgb(0x20, 0x20, 0x20);
pub const COLOR_HIGHLIGHT: Color32 = rgb(0xA0, 0xA0, 0xE0);
pub const COLOR_CLOSE_FRAME: Color32 = rgb(0xC0, 0xC0, 0xC0);

pub const COLOR_TASKBAR: Color32 = rgb(0x30, 0x30, 0x30);
pub const COLOR_TASKBAR_EDGE: Color32 = rgb(0x60, 0x60, 0x60);
pub const COLOR_TASK_FOCUSED: Color32 = rgb(0x60, 0x60, 0x60);
pub const COLOR_TASK_NORMAL: Color32 = rgb(0x40, 0x40, 0x40);
pub const COLOR_TASK_MINIMIZED: Color32 = rgb(0x20, 0x20, 0x20);
pub const COLOR_TASK_BEVEL: Color32 = rgb(0x80, 0x80, 0x80);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub desktop: Color32,
    pub window_bg: Color32,
    pub title_focused: Color32,
    pub title_unfocused: Color32,
    pub text: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        ThemePreset::Slate.theme()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreset {
    #[default]
    Slate,
    Forest,
    Crimson,
    HighContrast,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 4] = [
        ThemePreset::Slate,
        ThemePreset::Forest,
        ThemePreset::Crimson,
        ThemePreset::HighContrast,
    ];

    /// Presets differ only in the desktop colour.
    pub const fn theme(self) -> Theme {
        let desktop = match self {
            ThemePreset::Slate => rgb(0x40, 0x50, 0x60),
            ThemePreset::Forest => rgb(0x00, 0x40, 0x00),
            ThemePreset::Crimson => rgb(0x60, 0x00, 0x00),
            ThemePreset::HighContrast => rgb(0x00, 0x00, 0x00),
        };
        Theme {
            desktop,
            window_bg: rgb(0xE0, 0xE0, 0xE0),
            title_focused: rgb(0x00, 0x00, 0x80),
            title_unfocused: COLOR_GREY,
            text: COLOR_BLACK,
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("slate") {
            Some(ThemePreset::Slate)
        } else if value.eq_ignore_ascii_case("forest") {
            Some(ThemePreset::Forest)
        } else if value.eq_ignore_ascii_case("crimson") {
            Some(ThemePreset::Crimson)
        } else if value.eq_ignore_ascii_case("contrast")
            || value.eq_ignore_ascii_case("high-contrast")
        {
            Some(ThemePreset::HighContrast)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreset::Slate => "slate",
            ThemePreset::Forest => "forest",
            ThemePreset::Crimson => "crimson",
            ThemePreset::HighContrast => "contrast",
        }
    }
}

impl core::fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
