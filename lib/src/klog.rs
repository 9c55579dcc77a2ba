//! Kernel logging.
//!
//! Every log line goes through a single **backend** function pointer. Until a
//! backend is registered, the early backend writes straight to COM1 with raw
//! port I/O on bare metal, and drops the line on hosted builds (unit tests
//! and the desktop simulator register their own backend if they care).
//!
//! # Backend contract
//!
//! The backend receives the pre-formatted arguments for a **single log line**
//! and must append the trailing newline itself. Callers never include one.
//!
//! ```ignore
//! gemos_lib::klog::klog_register_backend(serial_backend);
//! gemos_lib::klog_info!("desktop: {}x{}", width, height);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicPtr, AtomicU8, Ordering};

// ---------------------------------------------------------------------------
// Log levels
// ---------------------------------------------------------------------------

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("error") {
            Some(KlogLevel::Error)
        } else if value.eq_ignore_ascii_case("warn") {
            Some(KlogLevel::Warn)
        } else if value.eq_ignore_ascii_case("info") {
            Some(KlogLevel::Info)
        } else if value.eq_ignore_ascii_case("debug") {
            Some(KlogLevel::Debug)
        } else if value.eq_ignore_ascii_case("trace") {
            Some(KlogLevel::Trace)
        } else {
            None
        }
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Info as u8);

#[inline(always)]
fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Backend dispatch
// ---------------------------------------------------------------------------

/// Signature of a klog backend.
pub type KlogBackend = fn(fmt::Arguments<'_>);

/// Stored as a raw pointer; `null` means "use the early backend".
static BACKEND: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
fn early_backend(args: fmt::Arguments<'_>) {
    use x86_64::instructions::port::Port;

    const COM1: u16 = 0x3F8;
    const LSR_OFFSET: u16 = 5;
    const LSR_TX_EMPTY: u8 = 0x20;

    struct EarlyWriter;

    impl EarlyWriter {
        fn put(byte: u8) {
            let mut lsr = Port::<u8>::new(COM1 + LSR_OFFSET);
            let mut thr = Port::<u8>::new(COM1);
            // SAFETY: COM1 is a fixed legacy port; writing it has no memory effects.
            unsafe {
                while lsr.read() & LSR_TX_EMPTY == 0 {
                    core::hint::spin_loop();
                }
                thr.write(byte);
            }
        }
    }

    impl fmt::Write for EarlyWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for byte in s.bytes() {
                Self::put(byte);
            }
            Ok(())
        }
    }

    let _ = fmt::write(&mut EarlyWriter, args);
    EarlyWriter::put(b'\r');
    EarlyWriter::put(b'\n');
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
fn early_backend(_args: fmt::Arguments<'_>) {}

#[inline]
fn dispatch(args: fmt::Arguments<'_>) {
    let ptr = BACKEND.load(Ordering::Acquire);
    if ptr.is_null() {
        early_backend(args);
    } else {
        // SAFETY: `klog_register_backend` only stores valid `KlogBackend` fn
        // pointers, which are pointer-sized on every supported target.
        let backend: KlogBackend = unsafe { core::mem::transmute(ptr) };
        backend(args);
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Replace the early backend. Typically called once by the serial driver.
pub fn klog_register_backend(backend: KlogBackend) {
    BACKEND.store(backend as *mut (), Ordering::Release);
}

/// Initialise klog (sets default level). Called very early in boot.
pub fn klog_init() {
    CURRENT_LEVEL.store(KlogLevel::Info as u8, Ordering::Relaxed);
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

pub fn klog_is_enabled(level: KlogLevel) -> bool {
    is_enabled(level)
}

/// Emit a formatted log line at the given level.
pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) {
        return;
    }
    dispatch(args);
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::klog::log_args($level, ::core::format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}
