use alloc::vec::Vec;

use crate::{Measurement, SlotHost, SlotId, SlotItem};

/// A reusable display unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    id: SlotId,
    bound_index: Option<usize>,
    offset: f64,
    extent: f64,
    margin: f64,
    needs_measure: bool,
}

impl Slot {
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn bound_index(&self) -> Option<usize> {
        self.bound_index
    }

    pub fn is_bound(&self) -> bool {
        self.bound_index.is_some()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Space this slot occupies when stacked (`extent + margin`).
    pub fn stacked(&self) -> f64 {
        self.extent + self.margin
    }

    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub(crate) fn translate(&mut self, delta: f64) {
        self.offset += delta;
    }

    pub(crate) fn rebind(&mut self, index: usize, offset: f64) {
        self.bound_index = Some(index);
        self.offset = offset;
    }

    pub(crate) fn apply_measurement(&mut self, m: Measurement) {
        let m = m.sanitized();
        self.extent = m.extent;
        self.margin = m.margin;
        self.needs_measure = false;
    }

    pub(crate) fn item(&self) -> Option<SlotItem> {
        Some(SlotItem {
            slot: self.id,
            index: self.bound_index?,
            offset: self.offset,
            extent: self.extent,
            margin: self.margin,
        })
    }
}

/// A pool of recyclable slots addressed as a ring.
///
/// The slot for data index `i` always lives at ring position `i % len()`. Slots are created
/// lazily and never destroyed; rebinding only swaps the bound index.
#[derive(Clone, Debug, Default)]
pub struct SlotPool {
    slots: Vec<Slot>,
    next_id: usize,
}

impl SlotPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots in the pool.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot at ring position `window_position % len()`.
    pub fn slot_at(&self, window_position: usize) -> Option<&Slot> {
        let n = self.slots.len();
        if n == 0 {
            return None;
        }
        self.slots.get(window_position % n)
    }

    pub(crate) fn slot_at_mut(&mut self, window_position: usize) -> Option<&mut Slot> {
        let n = self.slots.len();
        if n == 0 {
            return None;
        }
        self.slots.get_mut(window_position % n)
    }

    /// Iterates the slots in storage order.
    pub fn iter(&self) -> core::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, Slot> {
        self.slots.iter_mut()
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Binds storage position `position` to data index `index`.
    ///
    /// An existing slot is rebound and keeps its previous extent unless it was flagged for
    /// re-measurement. Otherwise a new slot is created, bound, measured against `width` and
    /// appended; this is the pool's only allocation path.
    pub fn ensure_capacity_for<T, H: SlotHost<T>>(
        &mut self,
        position: usize,
        index: usize,
        item: &T,
        width: f64,
        host: &mut H,
    ) -> Result<&mut Slot, H::Error> {
        if position < self.slots.len() {
            let slot = &mut self.slots[position];
            host.bind(slot.id, index, item)?;
            slot.bound_index = Some(index);
            if slot.needs_measure {
                let m = host.measure(slot.id, width)?;
                slot.apply_measurement(m);
            }
            return Ok(slot);
        }

        debug_assert_eq!(position, self.slots.len(), "pool grows one slot at a time");
        let id = SlotId(self.next_id);
        host.create(id)?;
        host.bind(id, index, item)?;
        let m = host.measure(id, width)?;
        self.next_id += 1;

        let mut slot = Slot {
            id,
            bound_index: Some(index),
            offset: 0.0,
            extent: 0.0,
            margin: 0.0,
            needs_measure: false,
        };
        slot.apply_measurement(m);
        rdebug!(slot = id.0, index, extent = slot.extent, "pool: created slot");
        self.slots.push(slot);
        let last = self.slots.len() - 1;
        Ok(&mut self.slots[last])
    }

    /// Flags every slot for re-measurement on its next bind.
    pub(crate) fn invalidate_measurements(&mut self) {
        for slot in &mut self.slots {
            slot.needs_measure = true;
        }
    }

    /// Clears the binding of every slot from storage position `position` onward.
    pub(crate) fn unbind_from<T, H: SlotHost<T>>(&mut self, position: usize, host: &mut H) {
        for slot in self.slots.iter_mut().skip(position) {
            if slot.bound_index.take().is_some() {
                host.unbind(slot.id);
            }
        }
    }

    pub(crate) fn reset_offsets(&mut self) {
        for slot in &mut self.slots {
            slot.offset = 0.0;
        }
    }

    /// Reorders storage so that the slot for data index `first` sits at position 0 and the
    /// rest follow in window order.
    pub(crate) fn rotate_to_window_order(&mut self, first: usize) {
        let n = self.slots.len();
        if n > 1 {
            self.slots.rotate_left(first % n);
        }
    }

    /// Inverse of [`Self::rotate_to_window_order`] for the current (possibly grown) length.
    pub(crate) fn restore_ring_order(&mut self, first: usize) {
        let n = self.slots.len();
        if n > 1 {
            self.slots.rotate_right(first % n);
        }
    }
}
