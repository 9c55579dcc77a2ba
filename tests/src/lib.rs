//! End-to-end desktop scenarios.
//!
//! These drive the whole stack the way the main loop does: raw device
//! bytes into the packet decoder, decoded samples through the input queue,
//! the queue into a [`Desktop`], then a composed frame. The fixtures here
//! stand in for the hardware and the application layer.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use gemos_abi::MouseButtons;
use gemos_drivers::input_event::InputQueue;
use gemos_drivers::mouse::PacketDecoder;
use gemos_drivers::ps2::PacketHeader;
use gemos_gfx::Framebuffer;
use gemos_wm::{Desktop, DesktopRequest, MenuAction, ThemePreset, WindowRegistry};

#[cfg(test)]
mod desktop_scenarios;
#[cfg(test)]
mod pointer_pipeline;

/// Encode one movement packet the way the device would send it.
///
/// `dy` is in screen space (positive is down); the wire carries it inverted.
/// Deltas must fit in nine bits.
pub fn encode_packet(dx: i32, dy: i32, buttons: MouseButtons) -> [u8; 3] {
    let wire_dy = -dy;
    let mut header = PacketHeader::ALWAYS_ONE
        | PacketHeader::from_bits_truncate(buttons.bits() & PacketHeader::BUTTONS.bits());
    if dx < 0 {
        header |= PacketHeader::X_SIGN;
    }
    if wire_dy < 0 {
        header |= PacketHeader::Y_SIGN;
    }
    [header.bits(), dx as u8, wire_dy as u8]
}

/// Simulated machine: decoder and queue on the interrupt side, a desktop
/// and framebuffer on the main-loop side.
pub struct Machine<F: Framebuffer> {
    pub decoder: PacketDecoder,
    pub queue: InputQueue,
    pub desktop: Desktop,
    pub fb: F,
}

impl<F: Framebuffer> Machine<F> {
    pub fn new(desktop: Desktop, fb: F) -> Self {
        let (w, h) = desktop.router().screen_size();
        Self {
            decoder: PacketDecoder::new(w, h),
            queue: InputQueue::new(),
            desktop,
            fb,
        }
    }

    /// Interrupt side: feed raw bytes.
    pub fn irq_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if let Some(sample) = self.decoder.feed(byte) {
                self.queue.push(gemos_abi::InputEvent::Pointer(sample));
            }
        }
    }

    pub fn irq_key(&mut self, c: char) {
        self.queue.push(gemos_abi::InputEvent::Key(c));
    }

    /// Main-loop side: drain the queue, then paint. Returns events handled.
    pub fn frame(&mut self) -> usize {
        let queue = &mut self.queue;
        let handled = self.desktop.pump(core::iter::from_fn(|| queue.pop()));
        self.desktop.paint(&mut self.fb);
        handled
    }

    /// One packet followed by one frame, as when the loop keeps up.
    pub fn step(&mut self, dx: i32, dy: i32, buttons: MouseButtons) {
        self.irq_bytes(&encode_packet(dx, dy, buttons));
        self.frame();
    }
}

/// Launcher that opens a plain window named after the launched app,
/// answers Settings with `settings_theme`, and counts everything else.
#[derive(Default)]
pub struct WindowLauncher {
    pub other_actions: u32,
    pub settings_theme: Option<ThemePreset>,
}

impl gemos_wm::Launcher for WindowLauncher {
    fn launch(
        &mut self,
        action: MenuAction,
        windows: &mut WindowRegistry,
    ) -> Option<DesktopRequest> {
        match action {
            MenuAction::Launch(name) => {
                let _ = windows.create(160, 120, 240, 160, name);
                None
            }
            MenuAction::Settings if self.settings_theme.is_some() => {
                self.settings_theme.map(DesktopRequest::SetTheme)
            }
            _ => {
                self.other_actions += 1;
                None
            }
        }
    }
}
