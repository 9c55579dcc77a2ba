//! Interrupt-to-main-loop input queue
//!
//! Interrupt handlers are producers; the desktop main loop is the only
//! consumer. Every event passes through one FIFO so pointer and keyboard
//! input keep their arrival order relative to each other, and nothing an
//! interrupt delivers can be observed by the window manager halfway through
//! a frame.
//!
//! Pointer samples coalesce: a new sample replaces the newest queued sample
//! when both carry the same button mask and the queued one is not itself a
//! press or release. Motion therefore never piles up behind a slow frame,
//! while every press and release reaches the router as its own event at the
//! position where it happened.

use gemos_abi::{InputEvent, MouseButtons, PointerSample};
use gemos_lib::{IrqMutex, RingBuffer};

pub const INPUT_QUEUE_CAPACITY: usize = 64;

pub struct InputQueue {
    events: RingBuffer<InputEvent, INPUT_QUEUE_CAPACITY>,
    overwritten: u32,
    /// Button mask of the most recent pointer sample pushed.
    last_buttons: MouseButtons,
    /// The newest queued event is a sample whose mask differs from the one
    /// before it. Such a sample is never overwritten.
    newest_is_edge: bool,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub const fn new() -> Self {
        Self {
            events: RingBuffer::new_with(InputEvent::Key('\0')),
            overwritten: 0,
            last_buttons: MouseButtons::empty(),
            newest_is_edge: false,
        }
    }

    /// Queue an event. When full, the oldest event is lost.
    pub fn push(&mut self, event: InputEvent) {
        let mut edge = false;
        if let InputEvent::Pointer(sample) = event {
            edge = sample.buttons != self.last_buttons;
            self.last_buttons = sample.buttons;
            if !edge && !self.newest_is_edge {
                if let Some(InputEvent::Pointer(newest)) = self.events.newest_mut() {
                    if newest.buttons == sample.buttons {
                        *newest = sample;
                        return;
                    }
                }
            }
        }
        self.newest_is_edge = edge;

        if self.events.is_full() {
            self.overwritten = self.overwritten.wrapping_add(1);
        }
        self.events.push_overwrite(event);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.try_pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to a full queue since creation.
    #[inline]
    pub fn overwritten(&self) -> u32 {
        self.overwritten
    }

    pub fn clear(&mut self) {
        self.events.reset();
        self.newest_is_edge = false;
    }
}

static INPUT_QUEUE: IrqMutex<InputQueue> = IrqMutex::new(InputQueue::new());

/// Queue a decoded pointer sample (called from the mouse IRQ path).
pub fn route_pointer(sample: PointerSample) {
    INPUT_QUEUE.lock().push(InputEvent::Pointer(sample));
}

/// Queue a translated character (called from the keyboard IRQ path).
pub fn route_key(c: char) {
    INPUT_QUEUE.lock().push(InputEvent::Key(c));
}

/// Take the oldest pending event. The lock is held only for the pop, so
/// interrupts are never masked while the event is being handled.
pub fn pop_event() -> Option<InputEvent> {
    INPUT_QUEUE.lock().pop()
}

/// Iterator over everything pending, suitable for `Desktop::pump`.
pub fn drain() -> impl Iterator<Item = InputEvent> {
    core::iter::from_fn(pop_event)
}

pub fn pending() -> usize {
    INPUT_QUEUE.lock().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemos_abi::MouseButtons;

    fn ptr(x: i32, y: i32, buttons: MouseButtons) -> InputEvent {
        InputEvent::Pointer(PointerSample::new(x, y, buttons))
    }

    #[test]
    fn motion_with_same_buttons_coalesces() {
        let mut q = InputQueue::new();
        q.push(ptr(1, 1, MouseButtons::empty()));
        q.push(ptr(2, 2, MouseButtons::empty()));
        q.push(ptr(3, 3, MouseButtons::empty()));
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop(), Some(ptr(3, 3, MouseButtons::empty())));
    }

    #[test]
    fn button_edges_survive_coalescing() {
        let mut q = InputQueue::new();
        q.push(ptr(1, 1, MouseButtons::empty()));
        q.push(ptr(1, 1, MouseButtons::LEFT));
        q.push(ptr(5, 5, MouseButtons::LEFT));
        q.push(ptr(5, 5, MouseButtons::empty()));
        assert_eq!(q.pop(), Some(ptr(1, 1, MouseButtons::empty())));
        assert_eq!(q.pop(), Some(ptr(1, 1, MouseButtons::LEFT)));
        assert_eq!(q.pop(), Some(ptr(5, 5, MouseButtons::LEFT)));
        assert_eq!(q.pop(), Some(ptr(5, 5, MouseButtons::empty())));
        assert!(q.is_empty());
    }

    #[test]
    fn press_keeps_its_position_under_held_motion() {
        let mut q = InputQueue::new();
        q.push(ptr(10, 10, MouseButtons::LEFT));
        q.push(ptr(20, 20, MouseButtons::LEFT));
        q.push(ptr(30, 30, MouseButtons::LEFT));
        q.push(ptr(40, 40, MouseButtons::LEFT));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(ptr(10, 10, MouseButtons::LEFT)));
        assert_eq!(q.pop(), Some(ptr(40, 40, MouseButtons::LEFT)));

        // Same for a release: later motion queues behind it.
        q.push(ptr(40, 40, MouseButtons::empty()));
        q.push(ptr(41, 40, MouseButtons::empty()));
        q.push(ptr(42, 40, MouseButtons::empty()));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(ptr(40, 40, MouseButtons::empty())));
        assert_eq!(q.pop(), Some(ptr(42, 40, MouseButtons::empty())));
    }

    #[test]
    fn keys_separate_pointer_runs() {
        let mut q = InputQueue::new();
        q.push(ptr(1, 1, MouseButtons::empty()));
        q.push(InputEvent::Key('a'));
        q.push(ptr(2, 2, MouseButtons::empty()));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(ptr(1, 1, MouseButtons::empty())));
        assert_eq!(q.pop(), Some(InputEvent::Key('a')));
    }

    #[test]
    fn full_queue_overwrites_oldest() {
        let mut q = InputQueue::new();
        for i in 0..(INPUT_QUEUE_CAPACITY as u32 + 2) {
            q.push(InputEvent::Key(char::from_u32('a' as u32 + i % 26).unwrap_or('?')));
        }
        assert_eq!(q.len(), INPUT_QUEUE_CAPACITY);
        assert_eq!(q.overwritten(), 2);
        assert_eq!(q.pop(), Some(InputEvent::Key('c')));
    }
}
