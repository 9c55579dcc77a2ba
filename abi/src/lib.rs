//! GemOS desktop shared types
//!
//! Plain data shared between the interrupt-side drivers, the window manager
//! and the application layer. Nothing in here touches hardware or global
//! state, so every type is freely copyable across the IRQ/main-loop boundary.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod draw;
pub mod input;

pub use draw::{Color32, Rect, rgb};
pub use input::{InputEvent, MouseButtons, PointerSample};
