//! The owned desktop context.
//!
//! One [`Desktop`] holds the registry, the router and everything the
//! compositor reads. The main loop drains the driver input queue into
//! [`Desktop::pump`] and then calls [`Desktop::paint`]; interrupt handlers
//! never touch it directly.

use alloc::boxed::Box;

use gemos_abi::{InputEvent, MouseButtons, PointerSample};
use gemos_gfx::Framebuffer;
use gemos_lib::{klog_debug, klog_info, klog_set_level};

use crate::clock::{Clock, WallTime};
use crate::compositor::{self, FrameInfo};
use crate::config::{DesktopConfig, config_from_cmdline, log_level_from_cmdline};
use crate::menu::{DesktopRequest, Launcher};
use crate::registry::WindowRegistry;
use crate::router::{Dispatch, InputRouter};
use crate::theme::{Theme, ThemePreset};
use crate::window::{WindowApp, WindowId};

pub struct Desktop {
    windows: WindowRegistry,
    router: InputRouter,
    config: DesktopConfig,
    theme: Theme,
    launcher: Box<dyn Launcher>,
    clock: Box<dyn Clock>,
    frame: u64,
    time: Option<WallTime>,
}

impl Desktop {
    pub fn new(config: DesktopConfig, launcher: Box<dyn Launcher>, clock: Box<dyn Clock>) -> Self {
        klog_info!(
            "wm: desktop {}x{}, theme {}, clock every {} frames",
            config.screen_width,
            config.screen_height,
            config.theme,
            config.clock_refresh_frames
        );
        Self {
            windows: WindowRegistry::new(),
            router: InputRouter::new(config.screen_width, config.screen_height),
            config,
            theme: config.theme.theme(),
            launcher,
            clock,
            frame: 0,
            time: None,
        }
    }

    /// Build from the boot command line, applying `klog=` along the way.
    pub fn from_cmdline(
        cmdline: Option<&str>,
        launcher: Box<dyn Launcher>,
        clock: Box<dyn Clock>,
    ) -> Self {
        if let Some(level) = cmdline.and_then(log_level_from_cmdline) {
            klog_set_level(level);
        }
        Self::new(config_from_cmdline(cmdline), launcher, clock)
    }

    #[inline]
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, preset: ThemePreset) {
        klog_info!("wm: theme -> {}", preset);
        self.config.theme = preset;
        self.theme = preset.theme();
    }

    #[inline]
    pub fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    #[inline]
    pub fn windows_mut(&mut self) -> &mut WindowRegistry {
        &mut self.windows
    }

    #[inline]
    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    /// Frames painted so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Open a window, or `None` if the pool is full or the size is unusable.
    pub fn create_window(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        title: &str,
    ) -> Option<WindowId> {
        match self.windows.create(x, y, width, height, title) {
            Ok(id) => Some(id),
            Err(err) => {
                klog_debug!("wm: create \"{}\" failed: {}", title, err);
                None
            }
        }
    }

    /// [`create_window`](Self::create_window) with an application attached.
    pub fn open_app(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        title: &str,
        app: Box<dyn WindowApp>,
    ) -> Option<WindowId> {
        let id = self.create_window(x, y, width, height, title)?;
        self.windows.set_app(id, app).ok()?;
        Some(id)
    }

    pub fn handle_mouse(&mut self, x: i32, y: i32, buttons: MouseButtons) -> Dispatch {
        self.handle_sample(PointerSample::new(x, y, buttons))
    }

    pub fn handle_sample(&mut self, sample: PointerSample) -> Dispatch {
        let dispatch = self
            .router
            .handle_pointer(sample, &mut self.windows, self.launcher.as_mut());
        if let Some(request) = self.router.take_request() {
            self.apply(request);
        }
        dispatch
    }

    fn apply(&mut self, request: DesktopRequest) {
        match request {
            DesktopRequest::SetTheme(preset) => self.set_theme(preset),
        }
    }

    pub fn handle_keyboard(&mut self, c: char) -> Option<WindowId> {
        self.router.handle_key(c, &mut self.windows)
    }

    /// Route queued events in arrival order. Returns how many were handled.
    pub fn pump<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut handled = 0;
        for event in events {
            match event {
                InputEvent::Pointer(sample) => {
                    self.handle_sample(sample);
                }
                InputEvent::Key(c) => {
                    self.handle_keyboard(c);
                }
            }
            handled += 1;
        }
        handled
    }

    /// Compose one frame into `fb` and present it.
    pub fn paint<F: Framebuffer>(&mut self, fb: &mut F) {
        self.frame = self.frame.wrapping_add(1);
        self.refresh_clock();

        let frame = FrameInfo {
            theme: &self.theme,
            pointer: self.router.pointer(),
            open_menu: self.router.open_menu(),
            clock: self.time,
        };
        compositor::compose(fb, &mut self.windows, &frame);
    }

    // First frame reads immediately, then every `clock_refresh_frames`.
    // A failed read keeps the last good time on screen.
    fn refresh_clock(&mut self) {
        let every = u64::from(self.config.clock_refresh_frames);
        if every == 0 {
            self.time = None;
            return;
        }
        if (self.frame - 1) % every == 0 {
            if let Some(time) = self.clock.read() {
                self.time = Some(time);
            }
        }
    }
}
