/// Stable identity of a pooled slot.
///
/// Ids are assigned in creation order and never reused. Hosts key their display objects by this
/// id; the slot's position inside the pool may change when the pool grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub usize);

/// The result of measuring a slot's content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Height of the content in the scroll axis.
    pub extent: f64,
    /// Additional trailing space after the content.
    pub margin: f64,
}

impl Measurement {
    pub fn new(extent: f64, margin: f64) -> Self {
        Self { extent, margin }
    }

    /// Space the slot occupies when stacked (`extent + margin`).
    pub fn stacked(&self) -> f64 {
        self.extent + self.margin
    }

    pub(crate) fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        if !self.extent.is_finite() || self.extent < 0.0 {
            rwarn!(extent = self.extent, "measurement: invalid extent, clamping to 0");
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            rwarn!(margin = self.margin, "measurement: invalid margin, clamping to 0");
        }
        Self {
            extent: clean(self.extent),
            margin: clean(self.margin),
        }
    }
}

/// A bound slot as seen by the host's render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotItem {
    pub slot: SlotId,
    /// Index into the data sequence.
    pub index: usize,
    /// Vertical position; viewport-relative for `Layout::Translate`, content-absolute for
    /// `Layout::Scroll`.
    pub offset: f64,
    pub extent: f64,
    pub margin: f64,
}

impl SlotItem {
    /// Offset just past this slot, including its trailing margin.
    pub fn end(&self) -> f64 {
        self.offset + self.extent + self.margin
    }
}

/// The contiguous run of data indexes currently bound to slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Direction of a recycle step relative to the data sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// Toward higher indexes (the leading slot moves to the trailing edge).
    Forward,
    /// Toward lower indexes (the trailing slot moves to the leading edge).
    Backward,
}
