use alloc::vec::Vec;

use crate::pool::Slot;
use crate::{
    ContentExtentEstimator, Layout, RecyclePolicy, ScrollDirection, SlotHost, SlotItem, SlotPool,
    WindowOptions, WindowRange, WindowState,
};

/// Viewport height reported before the host has laid the window out.
const UNSET: f64 = -1.0;

/// A slot-recycling window over a data sequence.
///
/// The window keeps a small [`SlotPool`] bound to the contiguous run of indexes
/// `[first_visible_index, first_visible_index + pool_size)` (clipped to the sequence). As the
/// content scrolls, the slot that leaves one edge of the viewport is rebound to the next item
/// past the opposite edge instead of allocating a new one.
///
/// This type does not render. The host supplies measurement and binding through [`SlotHost`]
/// and reads slot positions back via [`Self::for_each_slot`] after each update. Every operation
/// runs synchronously and leaves the window consistent before returning.
#[derive(Clone, Debug)]
pub struct WindowManager<T, H> {
    options: WindowOptions,
    host: H,
    items: Vec<T>,
    pool: SlotPool,
    first_visible: usize,
    scroll_offset: f64,
    viewport_width: f64,
    viewport_height: f64,
    measured_width: Option<f64>,
    extent: ContentExtentEstimator,
    has_estimate: bool,
}

impl<T, H: SlotHost<T>> WindowManager<T, H> {
    /// Creates an empty window. Nothing is bound until the host reports a viewport size via
    /// [`Self::set_viewport`].
    pub fn new(options: WindowOptions, host: H) -> Self {
        rdebug!(
            layout = ?options.layout,
            recycle = ?options.recycle,
            overscan = options.overscan,
            "WindowManager::new"
        );
        Self {
            options,
            host,
            items: Vec::new(),
            pool: SlotPool::new(),
            first_visible: 0,
            scroll_offset: 0.0,
            viewport_width: 0.0,
            viewport_height: UNSET,
            measured_width: None,
            extent: ContentExtentEstimator::new(),
            has_estimate: false,
        }
    }

    /// Creates a window over `items`. Binding is still deferred until the first viewport size.
    pub fn with_items(options: WindowOptions, host: H, items: impl IntoIterator<Item = T>) -> Self {
        let mut w = Self::new(options, host);
        w.items = items.into_iter().collect();
        w
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn first_visible_index(&self) -> usize {
        self.first_visible
    }

    /// Net applied scroll. For `Layout::Scroll` this is the container's scroll offset; for
    /// `Layout::Translate` it is the accumulated content translation.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Whether the host has reported a usable viewport size.
    pub fn is_laid_out(&self) -> bool {
        self.viewport_height >= 0.0
    }

    /// The extrapolated total content extent. Only `Layout::Scroll` windows produce one, after
    /// their first fill pass.
    pub fn estimated_total_extent(&self) -> Option<f64> {
        self.has_estimate
            .then(|| self.extent.estimated_total_extent())
    }

    pub fn extent_estimator(&self) -> &ContentExtentEstimator {
        &self.extent
    }

    /// The run of data indexes currently bound to slots.
    pub fn window_range(&self) -> WindowRange {
        let count = self.items.len();
        let start = self.first_visible;
        if self.pool.is_empty() || count == 0 {
            return WindowRange {
                start_index: start,
                end_index: start,
            };
        }
        WindowRange {
            start_index: start,
            end_index: start.saturating_add(self.pool.len()).min(count),
        }
    }

    pub fn state(&self) -> WindowState {
        WindowState {
            first_visible_index: self.first_visible,
            pool_size: self.pool.len(),
            item_count: self.items.len(),
            scroll_offset: self.scroll_offset,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            estimated_total_extent: self.estimated_total_extent(),
        }
    }

    /// Returns the bound slot for data index `index`, if it is inside the window.
    pub fn slot_for_index(&self, index: usize) -> Option<SlotItem> {
        if !self.window_range().contains(index) {
            return None;
        }
        self.pool.slot_at(index).and_then(Slot::item)
    }

    /// Visits every bound slot in window order (lowest data index first).
    pub fn for_each_slot(&self, mut f: impl FnMut(SlotItem)) {
        let range = self.window_range();
        for i in range.start_index..range.end_index {
            if let Some(item) = self.pool.slot_at(i).and_then(Slot::item) {
                f(item);
            }
        }
    }

    /// Collects bound slots into `out` in window order (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::for_each_slot`]. Reuse `out` across frames.
    pub fn collect_slots(&self, out: &mut Vec<SlotItem>) {
        out.clear();
        self.for_each_slot(|it| out.push(it));
    }

    /// Replaces the data sequence, rewinds to the first item and re-runs the fill pass.
    ///
    /// Existing slots are rebound, never destroyed. A `Layout::Scroll` host should also reset
    /// its container to offset 0.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), H::Error> {
        self.items = items.into_iter().collect();
        self.first_visible = 0;
        self.scroll_offset = 0.0;
        self.pool.reset_offsets();
        rdebug!(count = self.items.len(), "set_items");
        self.fill()
    }

    /// Records a new viewport size and re-runs the fill pass against the current window.
    ///
    /// A negative (or non-finite) height marks the window as not laid out; every operation is a
    /// no-op until a usable size arrives. A width change re-measures every slot.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<(), H::Error> {
        self.viewport_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.viewport_height = if height.is_finite() { height } else { UNSET };
        rtrace!(width, height, "set_viewport");
        self.fill()
    }

    pub fn set_overscan(&mut self, overscan: usize) -> Result<(), H::Error> {
        self.options.overscan = overscan;
        self.fill()
    }

    pub fn set_edge_safety_margin(&mut self, margin: f64) {
        self.options.edge_safety_margin = margin;
    }

    /// Forces every slot to be re-measured (e.g. after the host swapped its item template).
    pub fn invalidate_measurements(&mut self) -> Result<(), H::Error> {
        self.pool.invalidate_measurements();
        self.fill()
    }

    /// Re-measures the slot bound to `index` and restacks the slots after it.
    ///
    /// Returns `false` when `index` is outside the window.
    pub fn remeasure_index(&mut self, index: usize) -> Result<bool, H::Error> {
        let range = self.window_range();
        if !range.contains(index) {
            return Ok(false);
        }
        let width = self.viewport_width;
        let Some(slot) = self.pool.slot_at_mut(index) else {
            return Ok(false);
        };
        let before = slot.stacked();
        let m = self.host.measure(slot.id(), width)?;
        slot.apply_measurement(m);
        let delta = slot.stacked() - before;
        if delta != 0.0 {
            for i in index + 1..range.end_index {
                if let Some(s) = self.pool.slot_at_mut(i) {
                    s.translate(delta);
                }
            }
        }
        Ok(true)
    }

    /// Creates or rebinds slots starting at the current first visible index until the viewport
    /// is covered, plus `overscan` slots past the fold.
    ///
    /// A window left behind by single-step recycling is first caught up with the viewport. Slots
    /// are then stacked from the leading slot's current offset, so re-running with unchanged
    /// size and data reproduces the same window and the pool only grows with the viewport. Host
    /// errors abort the pass.
    pub fn fill(&mut self) -> Result<(), H::Error> {
        if !self.is_laid_out() {
            rtrace!("fill: not laid out, deferring");
            return Ok(());
        }

        let width = self.viewport_width;
        if self.measured_width.is_some_and(|w| w != width) {
            self.pool.invalidate_measurements();
        }
        self.measured_width = Some(width);

        let count = self.items.len();
        self.extent.begin_pass();
        if count == 0 {
            self.first_visible = 0;
            self.pool.unbind_from(0, &mut self.host);
            self.publish_extent(0);
            return Ok(());
        }
        if self.first_visible >= count {
            self.first_visible = count - 1;
        }
        self.settle()?;

        let first = self.first_visible;
        self.pool.rotate_to_window_order(first);
        let filled = self.fill_in_window_order(first, count, width);
        self.pool.restore_ring_order(first);
        filled?;

        self.publish_extent(count);
        rdebug!(first, pool = self.pool.len(), count, "fill");
        Ok(())
    }

    /// Finishes recycling that `RecyclePolicy::SingleStep` updates left behind, so the fill
    /// stacks from a leading slot that touches the viewport instead of one far outside it.
    fn settle(&mut self) -> Result<(), H::Error> {
        if !self
            .pool
            .slot_at(self.first_visible)
            .is_some_and(Slot::is_bound)
        {
            return Ok(());
        }

        let mut recycled = 0usize;
        while self.recycle_step(ScrollDirection::Forward)? {
            recycled += 1;
        }
        while self.leading_starts_below_top() && self.recycle_step(ScrollDirection::Backward)? {
            recycled += 1;
        }
        if recycled > 0 {
            rdebug!(recycled, first = self.first_visible, "fill: settled lagging window");
        }
        Ok(())
    }

    fn leading_starts_below_top(&self) -> bool {
        let (top, _) = self.viewport_edges();
        self.pool
            .slot_at(self.first_visible)
            .is_some_and(|s| s.offset() > top)
    }

    fn fill_in_window_order(
        &mut self,
        first: usize,
        count: usize,
        width: f64,
    ) -> Result<(), H::Error> {
        let anchor = self
            .pool
            .slot_at(0)
            .filter(|s| s.is_bound())
            .map_or(0.0, Slot::offset);
        let fold = match self.options.layout {
            Layout::Translate => self.viewport_height,
            Layout::Scroll => self.scroll_offset + self.viewport_height,
        };

        let mut cursor = anchor;
        let mut beyond_fold = 0usize;
        let mut k = 0usize;
        while first + k < count {
            if cursor >= fold {
                beyond_fold += 1;
                if k >= self.pool.len() && beyond_fold > self.options.overscan {
                    break;
                }
            }
            let index = first + k;
            let slot =
                self.pool
                    .ensure_capacity_for(k, index, &self.items[index], width, &mut self.host)?;
            slot.set_offset(cursor);
            cursor += slot.stacked();
            self.extent.record(slot.stacked());
            k += 1;
        }

        self.pool.unbind_from(k, &mut self.host);
        Ok(())
    }

    fn publish_extent(&mut self, count: usize) {
        if self.options.layout != Layout::Scroll {
            return;
        }
        let extent = self.extent.finish_pass(count);
        self.has_estimate = true;
        rdebug!(
            extent,
            average = self.extent.average_extent(),
            "fill: content extent"
        );
        self.host.on_content_extent(extent);
    }

    /// Applies one scroll update and recycles slots across the viewport edges.
    ///
    /// The meaning of `delta` follows [`Layout`]: for `Translate` it moves every slot (negative
    /// moves content up), for `Scroll` it changes the container's scroll offset (positive moves
    /// toward later items). With [`RecyclePolicy::SingleStep`] at most one slot is recycled per
    /// call; with `UntilSettled` recycling repeats until the edge slot is back in range.
    ///
    /// Returns the number of recycled slots. Non-finite deltas and calls before layout are
    /// ignored.
    pub fn apply_scroll(&mut self, delta: f64) -> Result<usize, H::Error> {
        if !self.is_laid_out() || !delta.is_finite() {
            return Ok(0);
        }

        self.scroll_offset += delta;
        if self.options.layout == Layout::Scroll && self.scroll_offset < 0.0 {
            self.scroll_offset = 0.0;
        }
        if self.pool.is_empty() {
            return Ok(0);
        }
        if self.options.layout == Layout::Translate {
            for slot in self.pool.iter_mut() {
                slot.translate(delta);
            }
        }

        let direction = match self.options.layout {
            Layout::Translate if delta < 0.0 => ScrollDirection::Forward,
            Layout::Scroll if delta > 0.0 => ScrollDirection::Forward,
            _ => ScrollDirection::Backward,
        };

        let mut recycled = 0usize;
        while self.recycle_step(direction)? {
            recycled += 1;
            if self.options.recycle == RecyclePolicy::SingleStep {
                break;
            }
        }
        Ok(recycled)
    }

    /// Moves to an absolute scroll position reported by the host (typically a native scroll
    /// container in `Layout::Scroll`). Equivalent to `apply_scroll(scroll_y - scroll_offset())`.
    pub fn scroll_to(&mut self, scroll_y: f64) -> Result<usize, H::Error> {
        let delta = scroll_y - self.scroll_offset;
        self.apply_scroll(delta)
    }

    fn viewport_edges(&self) -> (f64, f64) {
        match self.options.layout {
            Layout::Translate => (0.0, self.viewport_height),
            Layout::Scroll => (
                self.scroll_offset,
                self.scroll_offset + self.viewport_height,
            ),
        }
    }

    /// Recycles one slot from the edge that left the viewport to the opposite edge.
    ///
    /// The rebind happens before any bookkeeping changes, so a host error leaves the window
    /// untouched.
    fn recycle_step(&mut self, direction: ScrollDirection) -> Result<bool, H::Error> {
        let n = self.pool.len();
        let count = self.items.len();
        let first = self.first_visible;
        if n == 0 || count == 0 {
            return Ok(false);
        }
        let margin = self.options.edge_safety_margin;
        let (top, bottom) = self.viewport_edges();
        let (Some(leading), Some(trailing)) =
            (self.pool.slot_at(first), self.pool.slot_at(first + n - 1))
        else {
            return Ok(false);
        };

        let (position, index, offset) = match direction {
            ScrollDirection::Forward => {
                let index = first + n;
                if index >= count {
                    return Ok(false);
                }
                if top - leading.offset() - leading.extent() <= margin {
                    return Ok(false);
                }
                (first, index, trailing.offset() + trailing.stacked())
            }
            ScrollDirection::Backward => {
                if first == 0 {
                    return Ok(false);
                }
                // An unbound trailing slot (sequence shorter than the pool) is always free.
                if trailing.is_bound() && trailing.offset() <= bottom + margin {
                    return Ok(false);
                }
                (first + n - 1, first - 1, leading.offset() - trailing.stacked())
            }
        };

        let Some(slot) = self.pool.slot_at_mut(position) else {
            return Ok(false);
        };
        self.host.bind(slot.id(), index, &self.items[index])?;
        slot.rebind(index, offset);
        self.first_visible = match direction {
            ScrollDirection::Forward => first + 1,
            ScrollDirection::Backward => first - 1,
        };
        rtrace!(
            ?direction,
            slot = slot.id().0,
            index,
            offset,
            first = self.first_visible,
            "recycle"
        );
        Ok(true)
    }
}
