//! Wall-clock source for the menu strip.

/// Hours and minutes as read from the real-time clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
}

impl WallTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// `HH:MM`, written into `buf`.
    pub fn format<'a>(&self, buf: &'a mut [u8; 5]) -> &'a str {
        let digit = |v: u8| b'0' + (v % 10);
        *buf = [
            digit(self.hour / 10),
            digit(self.hour),
            b':',
            digit(self.minute / 10),
            digit(self.minute),
        ];
        core::str::from_utf8(buf).unwrap_or("--:--")
    }
}

/// Something that can read the time. Reads may be slow (the RTC waits out
/// its update-in-progress window), so the desktop only calls this every
/// few frames.
pub trait Clock {
    /// `None` when the clock could not be read.
    fn read(&mut self) -> Option<WallTime>;
}

/// Clock that never has a time.
pub struct NoClock;

impl Clock for NoClock {
    fn read(&mut self) -> Option<WallTime> {
        None
    }
}
