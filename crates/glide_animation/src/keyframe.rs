//! Keyframe-composed easing
//!
//! A sorted list of `(time, value)` anchors splits `[0,1]` into segments. Each
//! segment remaps `t` into its own `[0,1]`, runs it through the easing of the
//! keyframe that opens the segment (linear when unset) and interpolates
//! between the two anchor values.

use crate::easing::{Ease, Easing};
use crate::error::{AnimationError, Result};

/// A single anchor in a [`KeyFrameEasing`]
#[derive(Clone, Debug)]
pub struct KeyFrame {
    /// Position in the normalized domain (0.0 to 1.0)
    pub time: f64,
    /// Output value at this position
    pub value: f64,
    /// Easing for the segment starting at this keyframe
    pub easing: Option<Easing>,
}

impl KeyFrame {
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            easing: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Easing built from two or more keyframes
#[derive(Clone, Debug)]
pub struct KeyFrameEasing {
    keyframes: Vec<KeyFrame>,
}

impl KeyFrameEasing {
    /// Validate and wrap a keyframe list.
    ///
    /// Requires at least two keyframes with finite values and finite times in
    /// `[0,1]`, strictly ascending.
    pub fn new(keyframes: Vec<KeyFrame>) -> Result<Self> {
        if keyframes.len() < 2 {
            return Err(AnimationError::InvalidKeyFrames(format!(
                "need at least 2 keyframes, got {}",
                keyframes.len()
            )));
        }

        for kf in &keyframes {
            if !kf.time.is_finite() || !kf.value.is_finite() {
                return Err(AnimationError::InvalidKeyFrames(format!(
                    "keyframe ({}, {}) is not finite",
                    kf.time, kf.value
                )));
            }
            if !(0.0..=1.0).contains(&kf.time) {
                return Err(AnimationError::InvalidKeyFrames(format!(
                    "time {} is outside [0, 1]",
                    kf.time
                )));
            }
        }

        if let Some(pair) = keyframes.windows(2).find(|w| w[0].time >= w[1].time) {
            return Err(AnimationError::InvalidKeyFrames(format!(
                "times must be strictly ascending, found {} then {}",
                pair[0].time, pair[1].time
            )));
        }

        Ok(Self { keyframes })
    }

    pub fn builder() -> KeyFrameBuilder {
        KeyFrameBuilder::default()
    }

    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    /// Evaluate at `t`.
    ///
    /// Queries before the first keyframe or after the last one clamp to that
    /// keyframe's value.
    pub fn ease(&self, t: f64) -> f64 {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return t;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First segment whose end lies at or past t
        let index = self
            .keyframes
            .windows(2)
            .position(|w| t <= w[1].time)
            .unwrap_or(self.keyframes.len() - 2);
        let start = &self.keyframes[index];
        let end = &self.keyframes[index + 1];

        let local = (t - start.time) / (end.time - start.time);
        let progress = start.easing.as_ref().map_or(local, |e| e.ease(local));
        start.value + (end.value - start.value) * progress
    }
}

impl Ease for KeyFrameEasing {
    fn ease(&self, t: f64) -> f64 {
        KeyFrameEasing::ease(self, t)
    }
}

/// Thin convenience layer that collects keyframes before validation
#[derive(Clone, Debug, Default)]
pub struct KeyFrameBuilder {
    keyframes: Vec<KeyFrame>,
}

impl KeyFrameBuilder {
    /// Add a keyframe whose outgoing segment is linear
    pub fn at(mut self, time: f64, value: f64) -> Self {
        self.keyframes.push(KeyFrame::new(time, value));
        self
    }

    /// Add a keyframe whose outgoing segment uses `easing`
    pub fn at_with_ease(mut self, time: f64, value: f64, easing: Easing) -> Self {
        self.keyframes
            .push(KeyFrame::new(time, value).with_easing(easing));
        self
    }

    pub fn build(self) -> Result<KeyFrameEasing> {
        KeyFrameEasing::new(self.keyframes)
    }
}
