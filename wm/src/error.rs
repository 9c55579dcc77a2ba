//! Window-manager error type.
//!
//! Nothing here is fatal: the worst outcome of any failed operation is a
//! window that was not created or an id that no longer refers to anything.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmError {
    /// Every pool slot holds a live window.
    PoolExhausted { capacity: usize },
    /// The id's slot was closed (and possibly reused) since it was issued.
    StaleWindow { slot: u16 },
    /// Width or height is zero, negative or beyond the supported extent.
    InvalidGeometry { width: i32, height: i32 },
    /// Origin too far from the screen to keep edge arithmetic in range.
    InvalidPosition { x: i32, y: i32 },
}

impl fmt::Display for WmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolExhausted { capacity } => {
                write!(f, "window pool exhausted ({} live windows)", capacity)
            }
            Self::StaleWindow { slot } => write!(f, "stale window id for slot {}", slot),
            Self::InvalidGeometry { width, height } => {
                write!(f, "invalid window size {}x{}", width, height)
            }
            Self::InvalidPosition { x, y } => write!(f, "window origin ({}, {}) out of range", x, y),
        }
    }
}

/// Convenience result type for window-manager operations.
pub type WmResult<T = ()> = Result<T, WmError>;
