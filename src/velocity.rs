/// Default number of samples kept by [`VelocitySampler`].
pub const DEFAULT_SAMPLE_CAPACITY: usize = 10;

/// Default age window (relative to the newest sample) used by [`VelocitySampler`].
pub const DEFAULT_MAX_AGE_MS: u64 = 200;

/// Estimating from fewer samples than this keeps every one of them.
const MIN_SAMPLES_BEFORE_DROP: usize = 3;

/// A fixed-capacity ring of recent `(position, timestamp)` samples that produces a single
/// smoothed velocity on demand.
///
/// Adding a sample is O(1) and never allocates. The estimate only looks at samples within
/// `max_age_ms` of the newest one.
#[derive(Clone, Debug)]
pub struct VelocitySampler<const N: usize = DEFAULT_SAMPLE_CAPACITY> {
    positions: [f64; N],
    times_ms: [u64; N],
    head: usize, // newest sample
    len: usize,
    max_age_ms: u64,
}

impl<const N: usize> Default for VelocitySampler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> VelocitySampler<N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "VelocitySampler capacity must be non-zero") };
        Self {
            positions: [0.0; N],
            times_ms: [0; N],
            head: N - 1,
            len: 0,
            max_age_ms: DEFAULT_MAX_AGE_MS,
        }
    }

    pub fn with_max_age_ms(mut self, max_age_ms: u64) -> Self {
        self.max_age_ms = max_age_ms;
        self
    }

    pub fn max_age_ms(&self) -> u64 {
        self.max_age_ms
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of live samples (at most the capacity).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discards the sample history. Call at the start of every drag so that samples from a
    /// previous gesture never leak into the next estimate.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Records a sample, overwriting the oldest one when the ring is full.
    pub fn add_sample(&mut self, position: f64, now_ms: u64) {
        self.head = (self.head + 1) % N;
        self.positions[self.head] = position;
        self.times_ms[self.head] = now_ms;
        self.len = (self.len + 1).min(N);
    }

    /// Same as [`Self::estimate_velocity_in`] with `units_per_ms = 1.0`.
    pub fn estimate_velocity(&self) -> f64 {
        self.estimate_velocity_in(1.0)
    }

    /// Estimates the current velocity in position units per millisecond, scaled by
    /// `units_per_ms` (e.g. `1000.0` for units per second).
    ///
    /// The estimate walks back from the newest sample while samples are within `max_age_ms`.
    /// When more than three samples qualify the oldest one is discarded. Each remaining sample
    /// then yields a velocity relative to the oldest retained sample; these are folded together
    /// with `acc = (acc + v) / 2`, so later pairs weigh more.
    ///
    /// Degenerate input (no samples, a single sample, only duplicate timestamps) yields `0.0`.
    pub fn estimate_velocity_in(&self, units_per_ms: f64) -> f64 {
        if self.len == 0 {
            return 0.0;
        }

        let min_time = self.times_ms[self.head].saturating_sub(self.max_age_ms);
        let mut oldest = self.head;
        let mut count = 1usize;
        while count < self.len {
            let prev = (oldest + N - 1) % N;
            if self.times_ms[prev] < min_time {
                break;
            }
            oldest = prev;
            count += 1;
        }

        if count > MIN_SAMPLES_BEFORE_DROP {
            oldest = (oldest + 1) % N;
            count -= 1;
        }

        let oldest_y = self.positions[oldest];
        let oldest_ms = self.times_ms[oldest];
        let mut acc: Option<f64> = None;
        for i in 1..count {
            let idx = (oldest + i) % N;
            let duration = self.times_ms[idx].saturating_sub(oldest_ms);
            if duration == 0 {
                continue;
            }
            let velocity = (self.positions[idx] - oldest_y) / duration as f64 * units_per_ms;
            acc = Some(match acc {
                None => velocity,
                Some(prev) => (prev + velocity) * 0.5,
            });
        }

        let velocity = acc.unwrap_or(0.0);
        rtrace!(velocity, samples = count, "estimate_velocity");
        velocity
    }
}
