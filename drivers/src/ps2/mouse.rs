use gemos_abi::{MouseButtons, PointerSample};
use gemos_lib::{IrqMutex, klog_info};

use crate::input_event;
use crate::ps2::{PACKET_LEN, PacketHeader};

pub const DEFAULT_WIDTH: i32 = 1024;
pub const DEFAULT_HEIGHT: i32 = 768;

/// Counters for everything the decoder threw away. Dropping is silent by
/// contract, so these are the only trace a bad stream leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Samples emitted.
    pub packets: u32,
    /// Bytes skipped while looking for a packet start.
    pub resync_drops: u32,
    /// Complete packets discarded because an overflow bit was set.
    pub overflow_drops: u32,
}

/// Three-byte packet state machine turning relative motion into an
/// absolute, screen-clamped pointer position.
#[derive(Clone, Debug)]
pub struct PacketDecoder {
    x: i32,
    y: i32,
    buttons: MouseButtons,
    cycle: u8,
    packet: [u8; PACKET_LEN],
    width: i32,
    height: i32,
    stats: DecoderStats,
}

impl PacketDecoder {
    /// Decoder for a `width` x `height` screen, pointer at the centre.
    pub const fn new(width: i32, height: i32) -> Self {
        let width = if width > 0 { width } else { 1 };
        let height = if height > 0 { height } else { 1 };
        Self {
            x: width / 2,
            y: height / 2,
            buttons: MouseButtons::empty(),
            cycle: 0,
            packet: [0; PACKET_LEN],
            width,
            height,
            stats: DecoderStats {
                packets: 0,
                resync_drops: 0,
                overflow_drops: 0,
            },
        }
    }

    /// Change the clamp rectangle. Non-positive sizes are ignored.
    pub fn set_bounds(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.x = self.x.clamp(0, width - 1);
        self.y = self.y.clamp(0, height - 1);
    }

    /// Forget any partially received packet.
    pub fn reset(&mut self) {
        self.cycle = 0;
    }

    /// Feed one byte from the device. Returns a sample only on the third
    /// byte of a packet without overflow bits.
    pub fn feed(&mut self, byte: u8) -> Option<PointerSample> {
        if self.cycle == 0 && !PacketHeader::is_frame_start(byte) {
            self.stats.resync_drops = self.stats.resync_drops.wrapping_add(1);
            return None;
        }

        self.packet[self.cycle as usize] = byte;
        self.cycle += 1;
        if (self.cycle as usize) < PACKET_LEN {
            return None;
        }
        self.cycle = 0;

        let header = PacketHeader::from_bits_retain(self.packet[0]);
        if header.overflowed() {
            self.stats.overflow_drops = self.stats.overflow_drops.wrapping_add(1);
            return None;
        }

        let dx = sign_extend(self.packet[1], header.contains(PacketHeader::X_SIGN));
        let dy = sign_extend(self.packet[2], header.contains(PacketHeader::Y_SIGN));

        // Device Y grows upward, screen Y grows downward.
        self.x = self.x.saturating_add(dx).clamp(0, self.width - 1);
        self.y = self.y.saturating_sub(dy).clamp(0, self.height - 1);
        self.buttons = MouseButtons::from_bits_truncate(header.bits() & PacketHeader::BUTTONS.bits());
        self.stats.packets = self.stats.packets.wrapping_add(1);

        Some(self.sample())
    }

    /// Current absolute position and buttons.
    #[inline]
    pub fn sample(&self) -> PointerSample {
        PointerSample::new(self.x, self.y, self.buttons)
    }

    #[inline]
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// True while a packet is partially received.
    #[inline]
    pub fn mid_packet(&self) -> bool {
        self.cycle != 0
    }
}

/// Widen a 9-bit two's-complement delta (8 data bits plus a header sign bit).
#[inline]
fn sign_extend(low: u8, negative: bool) -> i32 {
    let raw = low as u32;
    if negative {
        (raw | 0xFFFF_FF00) as i32
    } else {
        raw as i32
    }
}

static DECODER: IrqMutex<PacketDecoder> =
    IrqMutex::new(PacketDecoder::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));

/// Prepare the global decoder for a `width` x `height` desktop.
///
/// The device itself must already be reporting; this only resets the
/// stream state and publishes the starting position so the first frame has
/// a cursor.
pub fn init(width: i32, height: i32) {
    let sample = {
        let mut decoder = DECODER.lock();
        *decoder = PacketDecoder::new(width, height);
        decoder.sample()
    };

    input_event::route_pointer(sample);

    klog_info!("PS/2 mouse: decoder ready at ({}, {})", sample.x, sample.y);
}

pub fn set_bounds(width: i32, height: i32) {
    DECODER.lock().set_bounds(width, height);
}

/// Process a single mouse data byte from the IRQ handler.
pub fn handle_irq(data: u8) {
    let sample = DECODER.lock().feed(data);

    if let Some(sample) = sample {
        input_event::route_pointer(sample);
    }
}

pub fn get_position() -> (i32, i32) {
    let decoder = DECODER.lock();
    (decoder.x, decoder.y)
}

pub fn get_buttons() -> MouseButtons {
    DECODER.lock().buttons
}

pub fn stats() -> DecoderStats {
    DECODER.lock().stats()
}
