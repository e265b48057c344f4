//! Easing functions for animations
//!
//! An easing maps a normalized time ratio in `[0,1]` to a progress ratio.
//! Back, elastic and bounce curves leave `[0,1]` on purpose; callers must not
//! clamp their output.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::bezier::CubicBezier;
use crate::error::{AnimationError, Result};
use crate::keyframe::KeyFrameEasing;
use crate::presets;

/// Anything that can map a time ratio to a progress ratio
pub trait Ease {
    fn ease(&self, t: f64) -> f64;
}

/// Overshoot amount of the back family
pub const BACK_C1: f64 = 1.70158;
pub const BACK_C2: f64 = BACK_C1 * 1.525;
pub const BACK_C3: f64 = BACK_C1 + 1.0;
/// Angular frequencies of the elastic family
pub const ELASTIC_C4: f64 = 2.0 * PI / 3.0;
pub const ELASTIC_C5: f64 = 2.0 * PI / 4.5;

/// Easing function type
#[derive(Clone, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    /// `t^n` for an arbitrary exponent
    PowIn(f64),
    /// `1 - (1-t)^n`
    PowOut(f64),
    /// Symmetric power curve split at `t = 0.5`
    PowInOut(f64),
    /// Table-sampled cubic bezier
    CubicBezier(Arc<CubicBezier>),
    /// Piecewise keyframe composition
    KeyFrames(Arc<KeyFrameEasing>),
    /// Each easing's output feeds the next one
    Chain(Arc<[Easing]>),
    /// Caller-supplied function
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Easing {
    /// Apply the easing function to a time ratio (0.0 to 1.0)
    pub fn ease(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInSine => sine_in(t),
            Easing::EaseOutSine => sine_out(t),
            Easing::EaseInOutSine => sine_in_out(t),
            Easing::EaseInQuad => pow_in(t, 2.0),
            Easing::EaseOutQuad => pow_out(t, 2.0),
            Easing::EaseInOutQuad => pow_in_out(t, 2.0),
            Easing::EaseInCubic => pow_in(t, 3.0),
            Easing::EaseOutCubic => pow_out(t, 3.0),
            Easing::EaseInOutCubic => pow_in_out(t, 3.0),
            Easing::EaseInQuart => pow_in(t, 4.0),
            Easing::EaseOutQuart => pow_out(t, 4.0),
            Easing::EaseInOutQuart => pow_in_out(t, 4.0),
            Easing::EaseInQuint => pow_in(t, 5.0),
            Easing::EaseOutQuint => pow_out(t, 5.0),
            Easing::EaseInOutQuint => pow_in_out(t, 5.0),
            Easing::EaseInExpo => expo_in(t),
            Easing::EaseOutExpo => expo_out(t),
            Easing::EaseInOutExpo => expo_in_out(t),
            Easing::EaseInCirc => circ_in(t),
            Easing::EaseOutCirc => circ_out(t),
            Easing::EaseInOutCirc => circ_in_out(t),
            Easing::EaseInElastic => elastic_in(t),
            Easing::EaseOutElastic => elastic_out(t),
            Easing::EaseInOutElastic => elastic_in_out(t),
            Easing::EaseInBack => back_in(t),
            Easing::EaseOutBack => back_out(t),
            Easing::EaseInOutBack => back_in_out(t),
            Easing::EaseInBounce => bounce_in(t),
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseInOutBounce => bounce_in_out(t),
            Easing::PowIn(n) => pow_in(t, *n),
            Easing::PowOut(n) => pow_out(t, *n),
            Easing::PowInOut(n) => pow_in_out(t, *n),
            Easing::CubicBezier(curve) => curve.ease(t),
            Easing::KeyFrames(frames) => frames.ease(t),
            Easing::Chain(easings) => easings.iter().fold(t, |acc, e| e.ease(acc)),
            Easing::Custom(f) => f(t),
        }
    }

    /// Compose easings left to right
    pub fn chain(easings: impl IntoIterator<Item = Easing>) -> Self {
        Easing::Chain(easings.into_iter().collect())
    }

    /// Wrap an arbitrary function
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Easing::Custom(Arc::new(f))
    }

    /// Name in the preset table, if this is one of the closed-form presets
    pub fn preset_name(&self) -> Option<&'static str> {
        let name = match self {
            Easing::Linear => "linear",
            Easing::EaseInSine => "sine-in",
            Easing::EaseOutSine => "sine-out",
            Easing::EaseInOutSine => "sine-both",
            Easing::EaseInQuad => "quad-in",
            Easing::EaseOutQuad => "quad-out",
            Easing::EaseInOutQuad => "quad-both",
            Easing::EaseInCubic => "cubic-in",
            Easing::EaseOutCubic => "cubic-out",
            Easing::EaseInOutCubic => "cubic-both",
            Easing::EaseInQuart => "quart-in",
            Easing::EaseOutQuart => "quart-out",
            Easing::EaseInOutQuart => "quart-both",
            Easing::EaseInQuint => "quint-in",
            Easing::EaseOutQuint => "quint-out",
            Easing::EaseInOutQuint => "quint-both",
            Easing::EaseInExpo => "expo-in",
            Easing::EaseOutExpo => "expo-out",
            Easing::EaseInOutExpo => "expo-both",
            Easing::EaseInCirc => "circ-in",
            Easing::EaseOutCirc => "circ-out",
            Easing::EaseInOutCirc => "circ-both",
            Easing::EaseInElastic => "elastic-in",
            Easing::EaseOutElastic => "elastic-out",
            Easing::EaseInOutElastic => "elastic-both",
            Easing::EaseInBack => "back-in",
            Easing::EaseOutBack => "back-out",
            Easing::EaseInOutBack => "back-both",
            Easing::EaseInBounce => "bounce-in",
            Easing::EaseOutBounce => "bounce-out",
            Easing::EaseInOutBounce => "bounce-both",
            _ => return None,
        };
        Some(name)
    }
}

impl Ease for Easing {
    fn ease(&self, t: f64) -> f64 {
        Easing::ease(self, t)
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Easing::CubicBezier(Arc::new(curve))
    }
}

impl From<KeyFrameEasing> for Easing {
    fn from(frames: KeyFrameEasing) -> Self {
        Easing::KeyFrames(Arc::new(frames))
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::PowIn(n) => f.debug_tuple("PowIn").field(n).finish(),
            Easing::PowOut(n) => f.debug_tuple("PowOut").field(n).finish(),
            Easing::PowInOut(n) => f.debug_tuple("PowInOut").field(n).finish(),
            Easing::CubicBezier(curve) => f
                .debug_tuple("CubicBezier")
                .field(&format_args!("{curve}"))
                .finish(),
            Easing::KeyFrames(frames) => f
                .debug_tuple("KeyFrames")
                .field(&frames.keyframes().len())
                .finish(),
            Easing::Chain(easings) => f.debug_tuple("Chain").field(easings).finish(),
            Easing::Custom(_) => f.write_str("Custom(..)"),
            named => f.write_str(named.preset_name().unwrap_or("?")),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.preset_name() {
            return f.write_str(name);
        }
        match self {
            Easing::PowIn(n) => write!(f, "pow-in({n})"),
            Easing::PowOut(n) => write!(f, "pow-out({n})"),
            Easing::PowInOut(n) => write!(f, "pow-both({n})"),
            Easing::CubicBezier(curve) => write!(f, "cubic-bezier({curve})"),
            Easing::KeyFrames(_) => f.write_str("<keyframes>"),
            Easing::Chain(_) => f.write_str("<chain>"),
            _ => f.write_str("<custom>"),
        }
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    /// Accepts a preset name (`quad-in`), a bezier preset (`bezier:quad-in`),
    /// `cubic-bezier(x1,y1,x2,y2)`, a bare `x1,y1,x2,y2`, or `pow-in(n)`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if let Some(args) = call_args(trimmed, "cubic-bezier") {
            return Ok(CubicBezier::parse(args)?.into());
        }
        if let Some(name) = trimmed.strip_prefix("bezier:") {
            return Ok(presets::bezier_preset(name.trim())?.into());
        }
        for (prefix, ctor) in [
            ("pow-in", Easing::PowIn as fn(f64) -> Easing),
            ("pow-out", Easing::PowOut),
            ("pow-both", Easing::PowInOut),
        ] {
            if let Some(arg) = call_args(trimmed, prefix) {
                return match arg.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(ctor(n)),
                    _ => Err(AnimationError::parse(s, "exponent is not a finite number")),
                };
            }
        }
        if trimmed.contains(',') {
            return Ok(CubicBezier::parse(trimmed)?.into());
        }

        presets::preset(trimmed)
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `name(args)` -> `args`
fn call_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

// ============================================================================
// Closed-form functions
// ============================================================================

#[inline]
pub fn pow_in(t: f64, n: f64) -> f64 {
    t.powf(n)
}

#[inline]
pub fn pow_out(t: f64, n: f64) -> f64 {
    1.0 - (1.0 - t).powf(n)
}

#[inline]
pub fn pow_in_out(t: f64, n: f64) -> f64 {
    if t < 0.5 {
        2f64.powf(n - 1.0) * t.powf(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powf(n) / 2.0
    }
}

#[inline]
pub fn sine_in(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

#[inline]
pub fn sine_out(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

#[inline]
pub fn sine_in_out(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

#[inline]
pub fn circ_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).sqrt()
}

#[inline]
pub fn circ_out(t: f64) -> f64 {
    (1.0 - (t - 1.0).powi(2)).sqrt()
}

pub fn circ_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

pub fn expo_in(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * t - 10.0)
    }
}

pub fn expo_out(t: f64) -> f64 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

pub fn expo_in_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        t
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

pub fn elastic_in(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        t
    } else {
        -2f64.powf(10.0 * t - 10.0) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

pub fn elastic_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        t
    } else {
        2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

pub fn elastic_in_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        t
    } else if t < 0.5 {
        -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin() / 2.0 + 1.0
    }
}

#[inline]
pub fn back_in(t: f64) -> f64 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

#[inline]
pub fn back_out(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
}

pub fn back_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

/// Four quadratic bounces of decreasing amplitude
pub fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

#[inline]
pub fn bounce_in(t: f64) -> f64 {
    1.0 - bounce_out(1.0 - t)
}

pub fn bounce_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn power_family_matches_formulas() {
        assert_abs_diff_eq!(Easing::EaseInQuad.ease(0.5), 0.25);
        assert_abs_diff_eq!(Easing::EaseOutCubic.ease(0.5), 0.875);
        assert_abs_diff_eq!(Easing::EaseInOutQuart.ease(0.25), 8.0 * 0.25f64.powi(4));
        assert_abs_diff_eq!(Easing::EaseInOutQuint.ease(0.75), 1.0 - 0.5f64.powi(5) / 2.0);
        assert_abs_diff_eq!(Easing::PowIn(2.5).ease(0.5), 0.5f64.powf(2.5));
    }

    #[test]
    fn exponential_boundaries_are_exact() {
        assert_eq!(expo_in(0.0), 0.0);
        assert_eq!(expo_out(1.0), 1.0);
        assert_eq!(expo_in_out(0.0), 0.0);
        assert_eq!(expo_in_out(1.0), 1.0);
    }

    #[test]
    fn elastic_passes_boundaries_through() {
        for f in [elastic_in, elastic_out, elastic_in_out] {
            assert_eq!(f(0.0), 0.0);
            assert_eq!(f(1.0), 1.0);
        }
    }

    #[test]
    fn back_and_elastic_overshoot() {
        assert!(back_in(0.2) < 0.0);
        assert!(back_out(0.8) > 1.0);
        assert!(elastic_out(0.1) > 1.0);
    }

    #[test]
    fn bounce_out_hits_thresholds() {
        assert_abs_diff_eq!(bounce_out(1.0 / 2.75), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounce_out(1.5 / 2.75), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(bounce_out(2.25 / 2.75), 0.9375, epsilon = 1e-12);
        assert_abs_diff_eq!(bounce_out(2.625 / 2.75), 0.984375, epsilon = 1e-12);
        assert_abs_diff_eq!(bounce_out(1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounce_in(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounce_in_out(0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn bounce_out_is_continuous_at_thresholds() {
        for threshold in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75] {
            let below = bounce_out(threshold - 1e-9);
            let above = bounce_out(threshold + 1e-9);
            assert_abs_diff_eq!(below, 1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(above, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn chain_feeds_output_forward() {
        let chained = Easing::chain([Easing::EaseInQuad, Easing::EaseInQuad]);
        assert_abs_diff_eq!(chained.ease(0.5), 0.0625);
    }

    #[test]
    fn custom_wraps_closure() {
        let step = Easing::custom(|t| if t < 0.5 { 0.0 } else { 1.0 });
        assert_eq!(step.ease(0.4), 0.0);
        assert_eq!(step.ease(0.6), 1.0);
        assert_eq!(format!("{step:?}"), "Custom(..)");
    }

    #[test]
    fn parse_preset_names() {
        let e: Easing = "quad-in".parse().unwrap();
        assert!(matches!(e, Easing::EaseInQuad));
        let e: Easing = " bounce-both ".parse().unwrap();
        assert!(matches!(e, Easing::EaseInOutBounce));
    }

    #[test]
    fn parse_bezier_forms() {
        let e: Easing = "cubic-bezier(0.42, 0, 0.58, 1)".parse().unwrap();
        assert!(matches!(e, Easing::CubicBezier(_)));
        let e: Easing = "0.42,0,0.58,1".parse().unwrap();
        assert!(matches!(e, Easing::CubicBezier(_)));
        let e: Easing = "bezier:back-in".parse().unwrap();
        assert!(e.ease(0.5) < 0.0);
    }

    #[test]
    fn parse_power_forms() {
        let e: Easing = "pow-out(1.5)".parse().unwrap();
        assert!(matches!(e, Easing::PowOut(n) if n == 1.5));
        assert!("pow-in(x)".parse::<Easing>().is_err());
    }

    #[test]
    fn parse_failures() {
        assert!(matches!(
            "wobble".parse::<Easing>(),
            Err(AnimationError::UnknownPreset(_))
        ));
        assert!(matches!(
            "cubic-bezier(1,2,3)".parse::<Easing>(),
            Err(AnimationError::Parse { .. })
        ));
        assert!("bezier:bounce-out".parse::<Easing>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for e in [
            Easing::EaseOutBack,
            Easing::PowInOut(3.5),
            "cubic-bezier(0.1,0.2,0.3,0.4)".parse().unwrap(),
        ] {
            let reparsed: Easing = e.to_string().parse().unwrap();
            assert_eq!(reparsed.to_string(), e.to_string());
        }
    }

    #[test]
    fn deserialize_from_string() {
        #[derive(serde::Deserialize)]
        struct Holder {
            easing: Easing,
        }
        let holder: Holder = toml::from_str(r#"easing = "sine-out""#).unwrap();
        assert!(matches!(holder.easing, Easing::EaseOutSine));
        assert!(toml::from_str::<Holder>(r#"easing = "nope""#).is_err());
    }
}
