//! Desktop window manager: window registry, input routing, menus, taskbar
//! and the compositor that paints them.
//!
//! Input arrives from interrupt context through the driver input queue;
//! everything in this crate runs on the main loop, owned by a single
//! [`Desktop`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod clock;
pub mod compositor;
pub mod config;
pub mod desktop;
pub mod error;
pub mod menu;
pub mod registry;
pub mod router;
pub mod taskbar;
pub mod theme;
pub mod window;

pub use clock::{Clock, NoClock, WallTime};
pub use config::{DesktopConfig, config_from_cmdline};
pub use desktop::Desktop;
pub use error::{WmError, WmResult};
pub use menu::{DesktopRequest, Launcher, MenuAction, MenuKind, NoLauncher};
pub use registry::{WINDOW_POOL_CAPACITY, WindowRegistry};
pub use router::{Dispatch, InputRouter, Mode};
pub use theme::{Theme, ThemePreset};
pub use window::{Capabilities, WindowApp, WindowCanvas, WindowId, WindowState};
