//! Input event types passed from the interrupt layer to the window manager.

use bitflags::bitflags;

bitflags! {
    /// Pointer button state, laid out exactly like the low three bits of a
    /// PS/2 packet header so the decoder can copy them straight across.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary (left) button, bit 0.
        const LEFT   = 1 << 0;
        /// Secondary (right) button, bit 1.
        const RIGHT  = 1 << 1;
        /// Middle button, bit 2.
        const MIDDLE = 1 << 2;
    }
}

impl MouseButtons {
    /// Whether the primary button is held. Only the primary button drives
    /// window-manager state (click, drag, release).
    #[inline]
    pub fn primary(self) -> bool {
        self.contains(Self::LEFT)
    }
}

/// One fully decoded, screen-clamped pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerSample {
    pub x: i32,
    pub y: i32,
    pub buttons: MouseButtons,
}

impl PointerSample {
    #[inline]
    pub const fn new(x: i32, y: i32, buttons: MouseButtons) -> Self {
        Self { x, y, buttons }
    }
}

/// An input event queued by interrupt context for the desktop main loop.
///
/// Keys arrive already translated (scancode map and shift state resolved by
/// the keyboard driver); pointer events arrive as absolute samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Pointer(PointerSample),
    Key(char),
}

impl InputEvent {
    #[inline]
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }
}
