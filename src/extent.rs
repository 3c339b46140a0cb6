/// Extrapolates the total content extent of a sequence from the slots measured in the latest
/// fill pass: `len × (accumulated / slots)`.
///
/// Only [`crate::Layout::Scroll`] windows publish this value. The estimate is recomputed on every
/// pass and never corrects the host's current scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentExtentEstimator {
    accumulated: f64,
    slots: usize,
    average: f64,
    estimate: f64,
}

impl ContentExtentEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new pass. The previous estimate stays readable until [`Self::finish_pass`].
    pub fn begin_pass(&mut self) {
        self.accumulated = 0.0;
        self.slots = 0;
    }

    /// Records one slot's stacked extent (content plus trailing margin).
    pub fn record(&mut self, stacked_extent: f64) {
        self.accumulated += stacked_extent;
        self.slots += 1;
    }

    /// Closes the pass and returns the new estimate for a sequence of `len` items.
    pub fn finish_pass(&mut self, len: usize) -> f64 {
        self.average = if self.slots == 0 {
            0.0
        } else {
            self.accumulated / self.slots as f64
        };
        self.estimate = len as f64 * self.average;
        self.estimate
    }

    /// Average stacked extent observed in the last completed pass.
    pub fn average_extent(&self) -> f64 {
        self.average
    }

    pub fn estimated_total_extent(&self) -> f64 {
        self.estimate
    }

    /// Slots recorded so far in the current pass.
    pub fn recorded(&self) -> usize {
        self.slots
    }
}
