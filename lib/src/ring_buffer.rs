/// Fixed-capacity FIFO over a backing array with head/tail/count indices.
///
/// Only `Copy` is required of `T`: the backing array is filled from a
/// caller-supplied value, so the buffer can live in a `static` even for
/// element types without a sensible `Default`.
#[derive(Debug)]
pub struct RingBuffer<T, const N: usize> {
    data: [T; N],
    head: u32,
    tail: u32,
    count: u32,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Create an empty ring buffer whose slots are filled with `value`.
    /// Const so it can back a `static`.
    #[inline(always)]
    pub const fn new_with(value: T) -> Self {
        Self {
            data: [value; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[inline(always)]
    pub const fn len(&self) -> u32 {
        self.count
    }

    #[inline(always)]
    pub const fn capacity(&self) -> u32 {
        N as u32
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.count >= N as u32
    }

    #[inline(always)]
    fn advance(index: u32) -> u32 {
        (index + 1) % N as u32
    }

    /// Push, discarding the oldest element when full.
    #[inline(always)]
    pub fn push_overwrite(&mut self, value: T) {
        if N == 0 {
            return;
        }
        if self.is_full() {
            self.tail = Self::advance(self.tail);
            self.count -= 1;
        }
        self.data[self.head as usize] = value;
        self.head = Self::advance(self.head);
        self.count += 1;
    }

    /// Push without overwrite; returns true on success, false if full.
    #[inline(always)]
    pub fn try_push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.data[self.head as usize] = value;
        self.head = Self::advance(self.head);
        self.count += 1;
        true
    }

    /// Pop oldest element; returns Some(value) or None when empty.
    #[inline(always)]
    pub fn try_pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.data[self.tail as usize];
        self.tail = Self::advance(self.tail);
        self.count -= 1;
        Some(value)
    }

    /// Peek at the oldest element without removing it.
    #[inline(always)]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.data[self.tail as usize])
    }

    /// Mutable access to the most recently pushed element.
    #[inline]
    pub fn newest_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let idx = (self.head + N as u32 - 1) % N as u32;
        Some(&mut self.data[idx as usize])
    }
}
