use recycler::{
    DEFAULT_SAMPLE_CAPACITY, Layout, SlotHost, VelocitySampler, WindowManager, WindowOptions,
};

use crate::{Easing, Tween};

/// Default length of the post-release deceleration.
pub const DEFAULT_FLING_DURATION_MS: u64 = 1000;

/// Configuration for the fling that follows a drag release.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingOptions {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Scale applied to the estimated velocity (units per millisecond). The decayed value is
    /// applied as a scroll delta on every tick.
    pub velocity_units: f64,
}

impl Default for FlingOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_FLING_DURATION_MS,
            easing: Easing::CubicOut,
            velocity_units: 1.0,
        }
    }
}

impl FlingOptions {
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_velocity_units(mut self, velocity_units: f64) -> Self {
        self.velocity_units = velocity_units;
        self
    }
}

/// A raw pan gesture sample as delivered by the host's gesture recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Started {
        now_ms: u64,
    },
    /// `total_offset` is the cumulative vertical offset since the gesture started.
    Moved {
        total_offset: f64,
        now_ms: u64,
    },
    Ended {
        now_ms: u64,
    },
    Cancelled {
        now_ms: u64,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    /// A release fling is decaying; advanced by [`FlingController::tick`].
    Flinging,
}

/// A framework-neutral controller that wraps a [`WindowManager`] and turns pan gestures into
/// scrolling: drag deltas are applied directly, and a release starts a decaying fling.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `handle(event)` for every gesture sample
/// - `on_viewport` when the viewport is resized
/// - `tick(now_ms)` each frame while [`Self::is_flinging`] is true
///
/// At most one scroll driver is active at a time: a new gesture cancels a running fling before
/// any of its samples are applied.
///
/// `N` is the capacity of the drag sample ring; swap it with [`Self::with_sampler`].
#[derive(Clone, Debug)]
pub struct FlingController<T, H, const N: usize = DEFAULT_SAMPLE_CAPACITY> {
    window: WindowManager<T, H>,
    sampler: VelocitySampler<N>,
    options: FlingOptions,
    state: GestureState,
    previous_total_offset: f64,
    fling: Option<Tween>,
    release_velocity: f64,
}

impl<T, H: SlotHost<T>> FlingController<T, H> {
    pub fn new(options: WindowOptions, host: H) -> Self {
        Self::from_window(WindowManager::new(options, host))
    }

    pub fn from_window(window: WindowManager<T, H>) -> Self {
        Self {
            window,
            sampler: VelocitySampler::new(),
            options: FlingOptions::default(),
            state: GestureState::Idle,
            previous_total_offset: 0.0,
            fling: None,
            release_velocity: 0.0,
        }
    }
}

impl<T, H: SlotHost<T>, const N: usize> FlingController<T, H, N> {
    pub fn with_fling_options(mut self, options: FlingOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the drag sampler, e.g. to change its capacity or age window.
    pub fn with_sampler<const M: usize>(
        self,
        sampler: VelocitySampler<M>,
    ) -> FlingController<T, H, M> {
        FlingController {
            window: self.window,
            sampler,
            options: self.options,
            state: self.state,
            previous_total_offset: self.previous_total_offset,
            fling: self.fling,
            release_velocity: self.release_velocity,
        }
    }

    pub fn window(&self) -> &WindowManager<T, H> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut WindowManager<T, H> {
        &mut self.window
    }

    pub fn into_window(self) -> WindowManager<T, H> {
        self.window
    }

    pub fn fling_options(&self) -> &FlingOptions {
        &self.options
    }

    pub fn sampler(&self) -> &VelocitySampler<N> {
        &self.sampler
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    /// The running fling, if any.
    pub fn fling(&self) -> Option<&Tween> {
        self.fling.as_ref()
    }

    /// Velocity estimated at the last release (0 before the first release).
    pub fn release_velocity(&self) -> f64 {
        self.release_velocity
    }

    pub fn cancel_fling(&mut self) {
        if self.fling.take().is_some() {
            adebug!("fling cancelled");
            if self.state == GestureState::Flinging {
                self.state = GestureState::Idle;
            }
        }
    }

    /// Forwards a viewport size change to the window.
    ///
    /// A running fling is cancelled first; an active drag keeps going against the refilled
    /// window.
    pub fn on_viewport(&mut self, width: f64, height: f64) -> Result<(), H::Error> {
        self.cancel_fling();
        self.window.set_viewport(width, height)
    }

    /// Replaces the window's data. Any running fling is cancelled before the refill.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), H::Error> {
        self.cancel_fling();
        self.window.set_items(items)
    }

    /// Advances the gesture state machine with one sample and returns the resulting state.
    pub fn handle(&mut self, event: GestureEvent) -> Result<GestureState, H::Error> {
        match event {
            GestureEvent::Started { .. } => {
                self.cancel_fling();
                self.sampler.reset();
                self.previous_total_offset = 0.0;
                self.state = GestureState::Dragging;
                atrace!("drag started");
            }
            GestureEvent::Moved {
                total_offset,
                now_ms,
            } => {
                if self.state != GestureState::Dragging {
                    atrace!(state = ?self.state, "move outside a drag ignored");
                    return Ok(self.state);
                }
                let delta = total_offset - self.previous_total_offset;
                self.sampler.add_sample(total_offset, now_ms);
                self.previous_total_offset = total_offset;
                self.scroll_by(delta)?;
            }
            GestureEvent::Ended { now_ms } | GestureEvent::Cancelled { now_ms } => {
                if self.state != GestureState::Dragging {
                    return Ok(self.state);
                }
                self.release(now_ms);
            }
        }
        Ok(self.state)
    }

    fn release(&mut self, now_ms: u64) {
        let velocity = self
            .sampler
            .estimate_velocity_in(self.options.velocity_units);
        self.release_velocity = velocity;
        self.previous_total_offset = 0.0;

        if !velocity.is_finite() {
            awarn!(velocity, "non-finite release velocity, fling suppressed");
            self.state = GestureState::Idle;
            return;
        }
        if velocity == 0.0 {
            self.state = GestureState::Idle;
            return;
        }

        adebug!(
            velocity,
            samples = self.sampler.len(),
            duration_ms = self.options.duration_ms,
            "fling started"
        );
        self.fling = Some(Tween::new(
            velocity,
            0.0,
            now_ms,
            self.options.duration_ms,
            self.options.easing,
        ));
        self.state = GestureState::Flinging;
    }

    /// Advances a running fling.
    ///
    /// - If a fling is active, applies the decayed velocity as one scroll delta and returns the
    ///   window's new scroll offset.
    /// - Otherwise returns `None` without touching the window.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<f64>, H::Error> {
        let Some(tween) = self.fling else {
            return Ok(None);
        };

        let value = tween.sample(now_ms);
        self.scroll_by(value)?;

        if tween.is_done(now_ms) {
            self.fling = None;
            self.state = GestureState::Idle;
            adebug!(now_ms, "fling finished");
        }

        Ok(Some(self.window.scroll_offset()))
    }

    /// Applies a finger-space delta (positive = finger moved down).
    fn scroll_by(&mut self, delta: f64) -> Result<usize, H::Error> {
        match self.window.options().layout {
            Layout::Translate => self.window.apply_scroll(delta),
            // Dragging content down scrolls the container back toward its start.
            Layout::Scroll => self.window.apply_scroll(-delta),
        }
    }
}
