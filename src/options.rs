/// Default tolerance added to edge-of-viewport comparisons.
pub const DEFAULT_EDGE_SAFETY_MARGIN: f64 = 8.0;

/// Default number of extra slots created past the fold for [`Layout::Scroll`].
pub const DEFAULT_SCROLL_OVERSCAN: usize = 3;

/// Coordinate convention of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// The container is not scrollable. Slot offsets are relative to the viewport top and every
    /// scroll delta translates all slots. A negative delta moves content up (toward later items).
    #[default]
    Translate,
    /// Slots live in content coordinates under a natively scrolling container. Offsets are never
    /// translated; the delta is a change of the container's scroll offset, so a positive delta
    /// moves toward later items.
    Scroll,
}

/// How many slots a single scroll update may recycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecyclePolicy {
    /// At most one slot per update. Assumes per-frame deltas smaller than one item.
    #[default]
    SingleStep,
    /// Keep recycling until the window edge settles, so large jumps are handled in one call.
    UntilSettled,
}

/// Configuration for [`crate::WindowManager`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowOptions {
    pub layout: Layout,
    pub recycle: RecyclePolicy,
    /// Slots created past the viewport's bottom edge during a fill pass.
    pub overscan: usize,
    /// Tolerance added to edge tests to absorb layout rounding.
    pub edge_safety_margin: f64,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::translate()
    }
}

impl WindowOptions {
    /// A window that translates its slots itself: single-step recycling, no overscan.
    pub fn translate() -> Self {
        Self {
            layout: Layout::Translate,
            recycle: RecyclePolicy::SingleStep,
            overscan: 0,
            edge_safety_margin: DEFAULT_EDGE_SAFETY_MARGIN,
        }
    }

    /// A window under a natively scrolling container: loop-until-settled recycling with
    /// overscan, and a published content extent estimate.
    pub fn scroll() -> Self {
        Self {
            layout: Layout::Scroll,
            recycle: RecyclePolicy::UntilSettled,
            overscan: DEFAULT_SCROLL_OVERSCAN,
            edge_safety_margin: DEFAULT_EDGE_SAFETY_MARGIN,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_recycle(mut self, recycle: RecyclePolicy) -> Self {
        self.recycle = recycle;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_edge_safety_margin(mut self, margin: f64) -> Self {
        self.edge_safety_margin = margin;
        self
    }
}
