//! PS/2 auxiliary device protocol
//!
//! Controller programming and port I/O live in the platform layer; this
//! module only describes the stream the mouse sends once data reporting is
//! enabled.
//!
//! # Packet layout
//!
//! | Byte | Contents |
//! |------|----------|
//! | 0    | Header: buttons, always-one, sign and overflow bits |
//! | 1    | X movement, low 8 bits |
//! | 2    | Y movement, low 8 bits (positive is up) |
//!
//! # Header bits
//!
//! | Bit | Name | Description |
//! |-----|------|-------------|
//! | 0   | L    | Left button held |
//! | 1   | R    | Right button held |
//! | 2   | M    | Middle button held |
//! | 3   | 1    | Always set; used to find the start of a packet |
//! | 4   | XS   | X delta sign (9th bit) |
//! | 5   | YS   | Y delta sign (9th bit) |
//! | 6   | XO   | X counter overflowed |
//! | 7   | YO   | Y counter overflowed |

pub mod mouse;

use bitflags::bitflags;

/// Bytes per standard (non-wheel) packet.
pub const PACKET_LEN: usize = 3;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PacketHeader: u8 {
        const LEFT       = 0x01;
        const RIGHT      = 0x02;
        const MIDDLE     = 0x04;
        const ALWAYS_ONE = 0x08;
        const X_SIGN     = 0x10;
        const Y_SIGN     = 0x20;
        const X_OVERFLOW = 0x40;
        const Y_OVERFLOW = 0x80;
    }
}

impl PacketHeader {
    pub const BUTTONS: Self = Self::LEFT.union(Self::RIGHT).union(Self::MIDDLE);
    pub const OVERFLOW: Self = Self::X_OVERFLOW.union(Self::Y_OVERFLOW);

    /// Whether `byte` may start a packet.
    #[inline]
    pub const fn is_frame_start(byte: u8) -> bool {
        byte & Self::ALWAYS_ONE.bits() != 0
    }

    #[inline]
    pub fn overflowed(self) -> bool {
        self.intersects(Self::OVERFLOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_and_overflow_bits() {
        assert!(PacketHeader::is_frame_start(0x08));
        assert!(!PacketHeader::is_frame_start(0x05));
        assert!(PacketHeader::from_bits_retain(0xC8).overflowed());
        assert!(PacketHeader::from_bits_retain(0x48).overflowed());
        assert!(!PacketHeader::from_bits_retain(0x39).overflowed());
        assert_eq!(PacketHeader::BUTTONS.bits(), 0x07);
    }
}
