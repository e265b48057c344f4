//! Glide Animation Core
//!
//! Easing curves and time-driven scalar tweens.
//!
//! # Features
//!
//! - **Closed-form easings**: power, sine, circ, expo, elastic, back and bounce
//! - **Cubic bezier**: web-editor compatible curves evaluated from a sample table
//! - **Keyframes**: piecewise composition with per-segment easing
//! - **Tweens**: pull-based values that retarget smoothly from wherever they are
//! - **Registry**: named tweens with shared defaults
//!
//! Nothing here owns a clock or a thread. A host calls `update` on its tweens
//! at whatever cadence it likes and reads the values back.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use glide_animation::{Easing, TweenConfig, TweenContext};
//!
//! let start = Instant::now();
//! let mut ctx = TweenContext::new();
//! ctx.animate_at(start, "opacity", 1.0, TweenConfig::from_millis(200).with_easing(Easing::EaseOutCubic));
//!
//! assert!(ctx.update_at(start + Duration::from_millis(100)));
//! assert!(!ctx.update_at(start + Duration::from_millis(200)));
//! assert_eq!(ctx.value("opacity"), Some(1.0));
//! ```

pub mod bezier;
pub mod context;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod point;
pub mod presets;
pub mod scheduler;
pub mod tween;

pub use bezier::{BezierConfig, CubicBezier};
pub use context::TweenContext;
pub use easing::{Ease, Easing};
pub use error::{AnimationError, Result};
pub use keyframe::{KeyFrame, KeyFrameBuilder, KeyFrameEasing};
pub use point::Point;
pub use presets::{bezier_preset, bezier_presets, preset, presets};
pub use scheduler::{AnimationScheduler, TweenId};
pub use tween::{Tween, TweenConfig, TweenPhase};
