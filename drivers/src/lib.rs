//! Interrupt-side input drivers for the GemOS desktop.
//!
//! The interrupt layer hands raw device bytes to [`ps2::mouse::handle_irq`]
//! and translated characters to [`input_event::route_key`]. Both land in a
//! single bounded queue that the desktop main loop drains once per frame.

#![cfg_attr(not(test), no_std)]

pub mod input_event;
pub mod ps2;

pub use ps2::mouse;
