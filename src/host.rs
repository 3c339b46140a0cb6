use crate::{Measurement, SlotId};

/// Capabilities the host UI layer supplies to the window.
///
/// The engine never renders anything itself. It decides *when* a slot is created, bound or
/// measured and keeps the offset bookkeeping; the host owns the actual display objects, keyed by
/// [`SlotId`].
///
/// All callbacks are synchronous. An error aborts the current pass and is returned to the caller
/// unchanged; the window is left in a consistent state (a failed rebind leaves the slot on its
/// previous item).
pub trait SlotHost<T> {
    type Error;

    /// Called once for every new slot, before its first bind.
    fn create(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        let _ = slot;
        Ok(())
    }

    /// Replaces the data displayed by `slot`. Must not change the slot's size without a
    /// subsequent [`SlotHost::measure`].
    fn bind(&mut self, slot: SlotId, index: usize, item: &T) -> Result<(), Self::Error>;

    /// Measures `slot` constrained to `width` with unconstrained height.
    ///
    /// Must return a finite, non-negative extent. Invalid values are clamped to 0.
    fn measure(&mut self, slot: SlotId, width: f64) -> Result<Measurement, Self::Error>;

    /// Called when a slot no longer has an item (the sequence is shorter than the pool).
    fn unbind(&mut self, slot: SlotId) {
        let _ = slot;
    }

    /// Receives the extrapolated total content extent after each fill pass of a
    /// [`crate::Layout::Scroll`] window, so the host can size its scroll track.
    fn on_content_extent(&mut self, extent: f64) {
        let _ = extent;
    }
}
