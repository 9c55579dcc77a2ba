use gemos_lib::KlogLevel;
use gemos_lib::cmdline::{find_value, parse_bool, parse_u32};

use crate::theme::ThemePreset;

const DEFAULT_WIDTH: i32 = 1024;
const DEFAULT_HEIGHT: i32 = 768;
const DEFAULT_THEME: ThemePreset = ThemePreset::Slate;
/// Reading the RTC stalls the bus, so the clock is sampled sparingly.
const DEFAULT_CLOCK_REFRESH_FRAMES: u32 = 100;
/// Smallest screen that still fits the menu strip, one window and the taskbar.
const MIN_DIMENSION: i32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DesktopConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub theme: ThemePreset,
    /// Frames between clock reads; 0 hides the clock.
    pub clock_refresh_frames: u32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_WIDTH,
            screen_height: DEFAULT_HEIGHT,
            theme: DEFAULT_THEME,
            clock_refresh_frames: DEFAULT_CLOCK_REFRESH_FRAMES,
        }
    }
}

fn parse_dimension(value: &str) -> Option<i32> {
    let parsed = parse_u32(value)?;
    let parsed = i32::try_from(parsed).ok()?;
    (parsed >= MIN_DIMENSION).then_some(parsed)
}

pub fn config_from_cmdline(cmdline: Option<&str>) -> DesktopConfig {
    let mut cfg = DesktopConfig::default();
    if let Some(cmdline) = cmdline {
        for token in cmdline.split_whitespace() {
            if let Some(value) = token.strip_prefix("desktop.width=") {
                if let Some(width) = parse_dimension(value) {
                    cfg.screen_width = width;
                }
            } else if let Some(value) = token.strip_prefix("desktop.height=") {
                if let Some(height) = parse_dimension(value) {
                    cfg.screen_height = height;
                }
            } else if let Some(value) = token.strip_prefix("desktop.theme=") {
                if let Some(theme) = ThemePreset::from_str(value) {
                    cfg.theme = theme;
                }
            } else if let Some(value) = token.strip_prefix("desktop.clock=") {
                if let Some(frames) = parse_u32(value) {
                    cfg.clock_refresh_frames = frames;
                } else if parse_bool(value) == Some(false) {
                    cfg.clock_refresh_frames = 0;
                }
            }
        }
    }
    cfg
}

/// `klog=<level>` from the boot command line, if present and valid.
pub fn log_level_from_cmdline(cmdline: &str) -> Option<KlogLevel> {
    find_value(cmdline, "klog").and_then(KlogLevel::from_str)
}
