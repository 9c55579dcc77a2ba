use core::ops::{Deref, DerefMut};

/// Mutex that masks interrupts while held.
///
/// State shared between an interrupt handler and the main loop (the pointer
/// decoder, the input queue) must never be locked by the main loop with
/// interrupts enabled, or the handler would spin forever on the same core.
/// On bare-metal x86_64 the guard saves the interrupt flag, disables
/// interrupts, and restores the saved flag after the lock is released. On
/// hosted targets there are no interrupts to mask and this is a plain spin
/// lock.
pub struct IrqMutex<T> {
    inner: spin::Mutex<T>,
}

/// Field order matters: the lock guard drops first, then interrupts are
/// restored, so no interrupt can observe the lock held.
pub struct IrqMutexGuard<'a, T> {
    guard: spin::MutexGuard<'a, T>,
    _irq: IrqSave,
}

struct IrqSave {
    were_enabled: bool,
}

impl IrqSave {
    #[cfg(all(target_arch = "x86_64", target_os = "none"))]
    #[inline]
    fn save() -> Self {
        use x86_64::instructions::interrupts;
        let were_enabled = interrupts::are_enabled();
        interrupts::disable();
        Self { were_enabled }
    }

    #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
    #[inline]
    fn save() -> Self {
        Self {
            were_enabled: false,
        }
    }
}

impl Drop for IrqSave {
    #[inline]
    fn drop(&mut self) {
        #[cfg(all(target_arch = "x86_64", target_os = "none"))]
        if self.were_enabled {
            x86_64::instructions::interrupts::enable();
        }
        #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
        let _ = self.were_enabled;
    }
}

impl<T> IrqMutex<T> {
    #[inline]
    pub const fn new(data: T) -> Self {
        Self {
            inner: spin::Mutex::new(data),
        }
    }

    /// Check if the lock is currently held.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    #[inline]
    pub fn lock(&self) -> IrqMutexGuard<'_, T> {
        let irq = IrqSave::save();
        IrqMutexGuard {
            guard: self.inner.lock(),
            _irq: irq,
        }
    }

    /// Non-blocking acquire. Interrupts are restored immediately on failure.
    #[inline]
    pub fn try_lock(&self) -> Option<IrqMutexGuard<'_, T>> {
        let irq = IrqSave::save();
        let guard = self.inner.try_lock()?;
        Some(IrqMutexGuard { guard, _irq: irq })
    }

    /// Run `f` with the lock held and return its result.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }
}

impl<'a, T> Deref for IrqMutexGuard<'a, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<'a, T> DerefMut for IrqMutexGuard<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
