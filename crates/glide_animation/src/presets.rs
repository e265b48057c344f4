//! Named easing presets
//!
//! Two immutable tables built on first access:
//!
//! - closed-form easings: `linear` plus `sine`, `quad`, `cubic`, `quart`,
//!   `quint`, `expo`, `circ`, `elastic`, `back` and `bounce`, each in `-in`,
//!   `-out` and `-both` flavours;
//! - bezier equivalents for `linear` and every family except `elastic` and
//!   `bounce`, using the control points of common web curve editors.
//!
//! Lookups are by exact name.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use crate::bezier::CubicBezier;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};

/// Control points `[x1, y1, x2, y2]` of the bezier presets
const BEZIER_CONTROL_POINTS: &[(&str, [f64; 4])] = &[
    ("linear", [0.0, 0.0, 1.0, 1.0]),
    ("sine-in", [0.12, 0.0, 0.39, 0.0]),
    ("sine-out", [0.61, 1.0, 0.88, 1.0]),
    ("sine-both", [0.37, 0.0, 0.63, 1.0]),
    ("quad-in", [0.11, 0.0, 0.5, 0.0]),
    ("quad-out", [0.5, 1.0, 0.89, 1.0]),
    ("quad-both", [0.45, 0.0, 0.55, 1.0]),
    ("cubic-in", [0.32, 0.0, 0.67, 0.0]),
    ("cubic-out", [0.33, 1.0, 0.68, 1.0]),
    ("cubic-both", [0.65, 0.0, 0.35, 1.0]),
    ("quart-in", [0.5, 0.0, 0.75, 0.0]),
    ("quart-out", [0.25, 1.0, 0.5, 1.0]),
    ("quart-both", [0.76, 0.0, 0.24, 1.0]),
    ("quint-in", [0.64, 0.0, 0.78, 0.0]),
    ("quint-out", [0.22, 1.0, 0.36, 1.0]),
    ("quint-both", [0.83, 0.0, 0.17, 1.0]),
    ("expo-in", [0.7, 0.0, 0.84, 0.0]),
    ("expo-out", [0.16, 1.0, 0.3, 1.0]),
    ("expo-both", [0.87, 0.0, 0.13, 1.0]),
    ("circ-in", [0.55, 0.0, 1.0, 0.45]),
    ("circ-out", [0.0, 0.55, 0.45, 1.0]),
    ("circ-both", [0.85, 0.0, 0.15, 1.0]),
    ("back-in", [0.36, 0.0, 0.66, -0.56]),
    ("back-out", [0.34, 1.56, 0.64, 1.0]),
    ("back-both", [0.68, -0.6, 0.32, 1.6]),
];

const CLOSED_FORM: [Easing; 31] = [
    Easing::Linear,
    Easing::EaseInSine,
    Easing::EaseOutSine,
    Easing::EaseInOutSine,
    Easing::EaseInQuad,
    Easing::EaseOutQuad,
    Easing::EaseInOutQuad,
    Easing::EaseInCubic,
    Easing::EaseOutCubic,
    Easing::EaseInOutCubic,
    Easing::EaseInQuart,
    Easing::EaseOutQuart,
    Easing::EaseInOutQuart,
    Easing::EaseInQuint,
    Easing::EaseOutQuint,
    Easing::EaseInOutQuint,
    Easing::EaseInExpo,
    Easing::EaseOutExpo,
    Easing::EaseInOutExpo,
    Easing::EaseInCirc,
    Easing::EaseOutCirc,
    Easing::EaseInOutCirc,
    Easing::EaseInElastic,
    Easing::EaseOutElastic,
    Easing::EaseInOutElastic,
    Easing::EaseInBack,
    Easing::EaseOutBack,
    Easing::EaseInOutBack,
    Easing::EaseInBounce,
    Easing::EaseOutBounce,
    Easing::EaseInOutBounce,
];

struct PresetTable {
    easings: IndexMap<&'static str, Easing>,
    beziers: IndexMap<&'static str, Arc<CubicBezier>>,
}

fn table() -> &'static PresetTable {
    static TABLE: OnceLock<PresetTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let easings = CLOSED_FORM
            .into_iter()
            .filter_map(|e| e.preset_name().map(|name| (name, e)))
            .collect();
        let beziers = BEZIER_CONTROL_POINTS
            .iter()
            .map(|(name, values)| (*name, Arc::new(CubicBezier::from_values(*values))))
            .collect();
        PresetTable { easings, beziers }
    })
}

/// Look up a closed-form easing by name
pub fn preset(name: &str) -> Result<Easing> {
    table()
        .easings
        .get(name)
        .cloned()
        .ok_or_else(|| AnimationError::UnknownPreset(name.to_string()))
}

/// Copy a bezier preset out of the shared table
pub fn bezier_preset(name: &str) -> Result<CubicBezier> {
    shared_bezier_preset(name).map(|curve| (*curve).clone())
}

/// Borrow a bezier preset without copying its sample table
pub fn shared_bezier_preset(name: &str) -> Result<Arc<CubicBezier>> {
    table()
        .beziers
        .get(name)
        .cloned()
        .ok_or_else(|| AnimationError::UnknownPreset(name.to_string()))
}

/// Closed-form preset names and easings, in table order
pub fn presets() -> impl Iterator<Item = (&'static str, &'static Easing)> {
    table().easings.iter().map(|(name, easing)| (*name, easing))
}

/// Bezier preset names and curves, in table order
pub fn bezier_presets() -> impl Iterator<Item = (&'static str, &'static CubicBezier)> {
    table()
        .beziers
        .iter()
        .map(|(name, curve)| (*name, curve.as_ref()))
}
