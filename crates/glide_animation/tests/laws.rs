//! Property-based laws for easings and tweens.

use std::time::{Duration, Instant};

use glide_animation::{Easing, KeyFrameEasing, Tween, TweenConfig, TweenContext, TweenPhase};
use proptest::prelude::*;

const SYMMETRIC: [Easing; 10] = [
    Easing::EaseInOutSine,
    Easing::EaseInOutQuad,
    Easing::EaseInOutCubic,
    Easing::EaseInOutQuart,
    Easing::EaseInOutQuint,
    Easing::EaseInOutExpo,
    Easing::EaseInOutCirc,
    Easing::EaseInOutElastic,
    Easing::EaseInOutBack,
    Easing::EaseInOutBounce,
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_both_variants_are_point_symmetric(t in 0.0f64..=1.0) {
        for easing in &SYMMETRIC {
            let sum = easing.ease(t) + easing.ease(1.0 - t);
            prop_assert!((sum - 1.0).abs() < 1e-9, "{easing}: t={t} sum={sum}");
        }
    }

    #[test]
    fn prop_pow_both_is_point_symmetric(t in 0.0f64..=1.0, n in 1.0f64..8.0) {
        let easing = Easing::PowInOut(n);
        let sum = easing.ease(t) + easing.ease(1.0 - t);
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_in_and_out_mirror(t in 0.0f64..=1.0) {
        let pairs = [
            (Easing::EaseInQuad, Easing::EaseOutQuad),
            (Easing::EaseInCirc, Easing::EaseOutCirc),
            (Easing::EaseInBounce, Easing::EaseOutBounce),
            (Easing::EaseInBack, Easing::EaseOutBack),
        ];
        for (ease_in, ease_out) in &pairs {
            let mirrored = 1.0 - ease_out.ease(1.0 - t);
            prop_assert!((ease_in.ease(t) - mirrored).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_identity_bezier(t in 0.0f64..=1.0) {
        let curve: Easing = "0,0,1,1".parse().unwrap();
        prop_assert!((curve.ease(t) - t).abs() < 1e-9);
    }

    #[test]
    fn prop_boundary_keyframes_are_identity(t in 0.0f64..=1.0) {
        let frames = KeyFrameEasing::builder().at(0.0, 0.0).at(1.0, 1.0).build().unwrap();
        prop_assert!((frames.ease(t) - t).abs() < 1e-12);
    }

    #[test]
    fn prop_active_value_follows_curve(
        from in -1000.0f64..1000.0,
        to in -1000.0f64..1000.0,
        duration_ms in 1u64..10_000,
        elapsed_permille in 0u64..1000,
    ) {
        let t0 = Instant::now();
        let mut tween = Tween::new(from);
        tween.animate_at(t0, to, TweenConfig::from_millis(duration_ms).with_easing(Easing::EaseInOutSine));

        let elapsed = Duration::from_millis(duration_ms) * elapsed_permille as u32 / 1000;
        let now = t0 + elapsed;
        let alive = tween.update_at(now);

        let ratio = elapsed.as_secs_f64() / Duration::from_millis(duration_ms).as_secs_f64();
        let expected = from + (to - from) * Easing::EaseInOutSine.ease(ratio);
        prop_assert!((tween.value() - expected).abs() < 1e-6);
        prop_assert_eq!(alive, ratio < 1.0);
    }

    #[test]
    fn prop_settled_is_terminal(
        to in -1000.0f64..1000.0,
        duration_ms in 0u64..5_000,
        extra in prop::collection::vec(0u64..10_000, 1..8),
    ) {
        let t0 = Instant::now();
        let mut tween = Tween::new(0.0);
        tween.animate_at(t0, to, TweenConfig::from_millis(duration_ms).with_easing(Easing::EaseOutElastic));

        let end = t0 + Duration::from_millis(duration_ms);
        for offset in extra {
            let now = end + Duration::from_millis(offset);
            prop_assert!(!tween.update_at(now));
            prop_assert_eq!(tween.value(), to);
            prop_assert_eq!(tween.phase_at(now), TweenPhase::Settled);
        }
    }

    #[test]
    fn prop_retarget_starts_at_live_value(
        to in 1.0f64..1000.0,
        new_target in -1000.0f64..0.0,
        at_permille in 1u64..1000,
    ) {
        let t0 = Instant::now();
        let mut tween = Tween::new(0.0);
        tween.animate_at(t0, to, TweenConfig::from_millis(1000).with_easing(Easing::EaseOutCubic));

        let now = t0 + Duration::from_millis(at_permille);
        let live = tween.value_at(now);
        prop_assert!(tween.animate_at(now, new_target, TweenConfig::from_millis(500)));
        prop_assert_eq!(tween.from(), live);
        prop_assert_eq!(tween.to(), new_target);
    }

    #[test]
    fn prop_context_alive_iff_any_tween_alive(
        durations in prop::collection::vec(1u64..1000, 1..6),
        sample_ms in 0u64..1200,
    ) {
        let t0 = Instant::now();
        let mut ctx = TweenContext::new();
        for (i, duration) in durations.iter().enumerate() {
            ctx.animate_at(t0, &format!("t{i}"), 1.0, TweenConfig::from_millis(*duration));
        }

        let now = t0 + Duration::from_millis(sample_ms);
        let expected = durations.iter().any(|d| sample_ms < *d);
        prop_assert_eq!(ctx.update_at(now), expected);
    }
}
