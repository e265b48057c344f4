//! Time-driven scalar tweens
//!
//! A [`Tween`] never advances on its own. Hosts call [`Tween::update`] once per
//! tick and read [`Tween::value`] afterwards. Every update recomputes the value
//! from the wall-clock time elapsed since the last `animate`, so skipped or
//! irregular ticks are harmless.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::easing::Easing;

/// How a tween gets from its current value to a new target
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "TweenConfigRepr")]
pub struct TweenConfig {
    pub duration: Duration,
    pub easing: Easing,
    /// Time to hold at `from` before the curve starts
    pub delay: Duration,
    /// Emit `debug` events for `animate` calls
    pub debug: bool,
}

impl TweenConfig {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    pub fn from_millis(duration_ms: u64) -> Self {
        Self::new(Duration::from_millis(duration_ms))
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            easing: Easing::Linear,
            delay: Duration::ZERO,
            debug: false,
        }
    }
}

/// On-disk shape: millisecond integers and an easing string
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TweenConfigRepr {
    duration_ms: u64,
    easing: Easing,
    delay_ms: u64,
    debug: bool,
}

impl Default for TweenConfigRepr {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            easing: Easing::Linear,
            delay_ms: 0,
            debug: false,
        }
    }
}

impl From<TweenConfigRepr> for TweenConfig {
    fn from(repr: TweenConfigRepr) -> Self {
        Self {
            duration: Duration::from_millis(repr.duration_ms),
            easing: repr.easing,
            delay: Duration::from_millis(repr.delay_ms),
            debug: repr.debug,
        }
    }
}

/// Where a tween is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenPhase {
    /// Never animated, or pinned with [`Tween::jump_to`]
    Idle,
    /// Between `animate` and the end of delay plus duration
    Active,
    /// Reached its target; stays here until the next `animate`
    Settled,
}

/// A single animated `f64`
#[derive(Clone, Debug)]
pub struct Tween {
    value: f64,
    from: f64,
    to: f64,
    start: Option<Instant>,
    config: TweenConfig,
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Tween {
    /// An idle tween resting at `initial`
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            from: initial,
            to: initial,
            start: None,
            config: TweenConfig::default(),
        }
    }

    /// Value as of the last update
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.config.duration
    }

    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    pub fn easing(&self) -> &Easing {
        &self.config.easing
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Instant of the last accepted `animate`
    pub fn started_at(&self) -> Option<Instant> {
        self.start
    }

    pub fn phase(&self) -> TweenPhase {
        self.phase_at(Instant::now())
    }

    pub fn phase_at(&self, now: Instant) -> TweenPhase {
        match self.progress_at(now) {
            None => TweenPhase::Idle,
            Some(ratio) if ratio < 1.0 => TweenPhase::Active,
            Some(_) => TweenPhase::Settled,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive_at(Instant::now())
    }

    pub fn is_alive_at(&self, now: Instant) -> bool {
        self.phase_at(now) == TweenPhase::Active
    }

    /// Elapsed ratio since the end of the delay, unclamped above 1.
    ///
    /// `None` while idle. A zero duration reports 1 once the delay is over.
    /// A delay reaching past the end of the clock never ends.
    pub fn progress_at(&self, now: Instant) -> Option<f64> {
        let start = self.start?;
        let Some(begin) = start.checked_add(self.config.delay) else {
            return Some(0.0);
        };
        if now < begin {
            return Some(0.0);
        }
        let elapsed = now.duration_since(begin);
        if self.config.duration.is_zero() {
            return Some(1.0);
        }
        Some(elapsed.as_secs_f64() / self.config.duration.as_secs_f64())
    }

    /// The value an update at `now` would produce, without storing it
    pub fn value_at(&self, now: Instant) -> f64 {
        match self.progress_at(now) {
            None => self.value,
            Some(ratio) if ratio < 1.0 => {
                self.from + (self.to - self.from) * self.config.easing.ease(ratio)
            }
            Some(_) => self.to,
        }
    }

    pub fn animate(&mut self, target: f64, config: TweenConfig) -> bool {
        self.animate_at(Instant::now(), target, config)
    }

    /// Retarget towards `target`, starting from the live value at `now`.
    ///
    /// While active, a target equal to the live value, `from` or `to` is
    /// ignored and `false` is returned.
    pub fn animate_at(&mut self, now: Instant, target: f64, config: TweenConfig) -> bool {
        let live = self.value_at(now);

        if self.is_alive_at(now) && (target == live || target == self.from || target == self.to) {
            if config.debug {
                tracing::debug!(
                    to_value = target,
                    live,
                    from = self.from,
                    to = self.to,
                    "animate ignored"
                );
            }
            return false;
        }

        if config.debug {
            tracing::debug!(
                to_value = target,
                from = live,
                duration = ?config.duration,
                easing = %config.easing,
                "animate"
            );
        }

        self.value = live;
        self.from = live;
        self.to = target;
        self.start = Some(now);
        self.config = config;
        true
    }

    /// Recompute the value for the current time. Returns whether still active.
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> bool {
        self.value = self.value_at(now);
        self.is_alive_at(now)
    }

    /// Pin the tween at `value` and return to idle
    pub fn jump_to(&mut self, value: f64) {
        self.value = value;
        self.from = value;
        self.to = value;
        self.start = None;
    }
}
