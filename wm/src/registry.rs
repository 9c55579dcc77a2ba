//! Window registry: a fixed pool of window slots plus the Z-order over them.
//!
//! Slots are an arena indexed by [`WindowId::slot`]. Closing a window frees
//! its slot onto a free stack and bumps the slot generation, so the pool is
//! bounded by *live* windows rather than windows ever created.
//!
//! The Z-order is a dense array of slot indices, topmost first. Minimized
//! windows stay in it (the taskbar lists them) but are skipped by hit tests
//! and painting.

use alloc::boxed::Box;

use gemos_lib::{klog_debug, klog_warn};

use crate::error::{WmError, WmResult};
use crate::window::{WindowApp, WindowId, WindowState};

pub const WINDOW_POOL_CAPACITY: usize = 20;

/// Largest accepted window width or height.
pub const MAX_WINDOW_EXTENT: i32 = 1 << 14;
/// Window origins stay within this distance of the screen origin, so edge
/// and chrome arithmetic never leaves `i32`.
pub const MAX_WINDOW_COORD: i32 = 1 << 20;

#[inline]
fn extent_ok(v: i32) -> bool {
    (1..=MAX_WINDOW_EXTENT).contains(&v)
}

#[inline]
fn coord_ok(v: i32) -> bool {
    (-MAX_WINDOW_COORD..=MAX_WINDOW_COORD).contains(&v)
}

pub(crate) struct WindowEntry {
    pub(crate) state: WindowState,
    pub(crate) app: Option<Box<dyn WindowApp>>,
}

struct Slot {
    generation: u16,
    entry: Option<WindowEntry>,
}

impl Slot {
    const fn empty() -> Self {
        Self {
            generation: 0,
            entry: None,
        }
    }
}

/// Snapshot of the stacking order, topmost first.
///
/// Copying the order out lets callers walk it while mutating windows.
#[derive(Clone, Copy, Debug)]
pub struct ZOrder {
    ids: [WindowId; WINDOW_POOL_CAPACITY],
    len: usize,
}

impl ZOrder {
    #[inline]
    pub fn as_slice(&self) -> &[WindowId] {
        &self.ids[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub struct WindowRegistry {
    slots: [Slot; WINDOW_POOL_CAPACITY],
    free: [u16; WINDOW_POOL_CAPACITY],
    free_len: usize,
    order: [u16; WINDOW_POOL_CAPACITY],
    order_len: usize,
    focused: Option<WindowId>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        // Free stack pops from the end; seed it so slot 0 is handed out first.
        let mut free = [0u16; WINDOW_POOL_CAPACITY];
        for (i, slot) in free.iter_mut().enumerate() {
            *slot = (WINDOW_POOL_CAPACITY - 1 - i) as u16;
        }
        Self {
            slots: [const { Slot::empty() }; WINDOW_POOL_CAPACITY],
            free,
            free_len: WINDOW_POOL_CAPACITY,
            order: [0; WINDOW_POOL_CAPACITY],
            order_len: 0,
            focused: None,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        WINDOW_POOL_CAPACITY
    }

    /// Live windows, minimized ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.order_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_len == 0
    }

    #[inline]
    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Topmost window, minimized or not.
    pub fn front(&self) -> Option<WindowId> {
        self.id_at(0)
    }

    fn id_for_slot(&self, slot: u16) -> WindowId {
        WindowId::new(slot, self.slots[slot as usize].generation)
    }

    fn id_at(&self, index: usize) -> Option<WindowId> {
        if index < self.order_len {
            Some(self.id_for_slot(self.order[index]))
        } else {
            None
        }
    }

    fn order_index(&self, slot: u16) -> Option<usize> {
        self.order[..self.order_len].iter().position(|&s| s == slot)
    }

    fn check(&self, id: WindowId) -> WmResult<usize> {
        let idx = id.slot() as usize;
        match self.slots.get(idx) {
            Some(slot) if slot.generation == id.generation() && slot.entry.is_some() => Ok(idx),
            _ => Err(WmError::StaleWindow { slot: id.slot() }),
        }
    }

    pub(crate) fn entry(&self, id: WindowId) -> Option<&WindowEntry> {
        let idx = self.check(id).ok()?;
        self.slots[idx].entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self, id: WindowId) -> Option<&mut WindowEntry> {
        let idx = self.check(id).ok()?;
        self.slots[idx].entry.as_mut()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.check(id).is_ok()
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowState> {
        self.entry(id).map(|e| &e.state)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowState> {
        self.entry_mut(id).map(|e| &mut e.state)
    }

    /// Allocate a slot, stack it on top and focus it.
    pub fn create(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        title: &str,
    ) -> WmResult<WindowId> {
        if !extent_ok(width) || !extent_ok(height) {
            return Err(WmError::InvalidGeometry { width, height });
        }
        if !coord_ok(x) || !coord_ok(y) {
            return Err(WmError::InvalidPosition { x, y });
        }
        if self.free_len == 0 {
            klog_warn!("wm: window pool exhausted, refusing \"{}\"", title);
            return Err(WmError::PoolExhausted {
                capacity: WINDOW_POOL_CAPACITY,
            });
        }

        self.free_len -= 1;
        let slot = self.free[self.free_len];
        self.slots[slot as usize].entry = Some(WindowEntry {
            state: WindowState::new(x, y, width, height, title),
            app: None,
        });

        self.order.copy_within(0..self.order_len, 1);
        self.order[0] = slot;
        self.order_len += 1;

        let id = self.id_for_slot(slot);
        self.focused = Some(id);
        klog_debug!("wm: created \"{}\" in slot {} at ({}, {})", title, slot, x, y);
        Ok(id)
    }

    /// Attach (or replace) the application driving a window.
    pub fn set_app(&mut self, id: WindowId, app: Box<dyn WindowApp>) -> WmResult {
        let idx = self.check(id)?;
        if let Some(entry) = self.slots[idx].entry.as_mut() {
            entry.app = Some(app);
        }
        Ok(())
    }

    /// Move to the top of the Z-order and focus. Other windows keep their
    /// relative order.
    pub fn bring_to_front(&mut self, id: WindowId) -> WmResult {
        self.check(id)?;
        let slot = id.slot();
        if let Some(pos) = self.order_index(slot) {
            if pos != 0 {
                self.order.copy_within(0..pos, 1);
                self.order[0] = slot;
            }
        }
        if self.focused != Some(id) {
            klog_debug!("wm: focus -> slot {}", slot);
        }
        self.focused = Some(id);
        Ok(())
    }

    /// Unlink and free. If the window had focus, focus passes to whatever is
    /// now on top.
    pub fn close(&mut self, id: WindowId) -> WmResult {
        let idx = self.check(id)?;
        let slot = id.slot();
        if let Some(pos) = self.order_index(slot) {
            self.order.copy_within(pos + 1..self.order_len, pos);
            self.order_len -= 1;
        }

        let entry = self.slots[idx].entry.take();
        self.slots[idx].generation = self.slots[idx].generation.wrapping_add(1);
        self.free[self.free_len] = slot;
        self.free_len += 1;

        if self.focused == Some(id) {
            self.focused = self.front();
        }

        if let Some(entry) = entry {
            klog_debug!("wm: closed \"{}\" (slot {})", entry.state.title(), slot);
        }
        Ok(())
    }

    /// Hide without unlinking. Minimizing the focused window leaves nothing
    /// focused.
    pub fn minimize(&mut self, id: WindowId) -> WmResult {
        let idx = self.check(id)?;
        if let Some(entry) = self.slots[idx].entry.as_mut() {
            entry.state.minimized = true;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        klog_debug!("wm: minimized slot {}", id.slot());
        Ok(())
    }

    /// Unhide, raise and focus.
    pub fn restore(&mut self, id: WindowId) -> WmResult {
        let idx = self.check(id)?;
        if let Some(entry) = self.slots[idx].entry.as_mut() {
            entry.state.minimized = false;
        }
        klog_debug!("wm: restored slot {}", id.slot());
        self.bring_to_front(id)
    }

    pub fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> WmResult {
        self.check(id)?;
        if !coord_ok(x) || !coord_ok(y) {
            return Err(WmError::InvalidPosition { x, y });
        }
        let state = self
            .get_mut(id)
            .ok_or(WmError::StaleWindow { slot: id.slot() })?;
        state.x = x;
        state.y = y;
        Ok(())
    }

    pub fn z_order(&self) -> ZOrder {
        let mut ids = [WindowId::new(0, 0); WINDOW_POOL_CAPACITY];
        for (dst, &slot) in ids.iter_mut().zip(&self.order[..self.order_len]) {
            *dst = self.id_for_slot(slot);
        }
        ZOrder {
            ids,
            len: self.order_len,
        }
    }

    /// Windows with their state, topmost first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (WindowId, &WindowState)> + '_ {
        self.order[..self.order_len].iter().filter_map(move |&slot| {
            let id = self.id_for_slot(slot);
            self.get(id).map(|state| (id, state))
        })
    }

    /// Topmost visible window containing the screen point.
    pub fn window_at(&self, x: i32, y: i32) -> Option<WindowId> {
        self.iter()
            .find(|(_, state)| !state.minimized && state.bounds().contains(x, y))
            .map(|(id, _)| id)
    }

    /// Split borrow of a window's state and its application, for callbacks.
    pub(crate) fn app_parts(
        &mut self,
        id: WindowId,
    ) -> Option<(&WindowState, &mut (dyn WindowApp + 'static))> {
        let WindowEntry { state, app } = self.entry_mut(id)?;
        let app = app.as_deref_mut()?;
        Some((&*state, app))
    }
}
