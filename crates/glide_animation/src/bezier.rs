//! Cubic bezier easing backed by a sampled lookup table
//!
//! The curve is pinned at `(0,0)` and `(1,1)`; only the two inner control
//! points are free. Instead of solving `x(t) = time` on every call, the curve
//! is sampled once at uniformly spaced `t` and `ease` interpolates linearly
//! inside the sample table. The approximation error shrinks with the number
//! of samples.
//!
//! Control points use the same `x1,y1,x2,y2` convention as web cubic-bezier
//! editors, so strings can be pasted straight in:
//!
//! ```
//! use glide_animation::CubicBezier;
//!
//! let curve: CubicBezier = "0.34, 1.56, 0.64, 1".parse()?;
//! assert!((curve.ease(1.0) - 1.0).abs() < 1e-9);
//! # Ok::<(), glide_animation::AnimationError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::easing::Ease;
use crate::error::{AnimationError, Result};
use crate::point::{parse_components, Point};

/// Number of samples taken along the curve unless configured otherwise
pub const DEFAULT_POINTS_AMOUNT: usize = 30;

const START: Point = Point::new(0.0, 0.0);
const END: Point = Point::new(1.0, 1.0);

/// Full configuration for a [`CubicBezier`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierConfig {
    /// First free control point
    pub p1: Point,
    /// Second free control point
    pub p2: Point,
    /// Number of uniformly spaced samples (must be at least 1)
    pub points_amount: usize,
}

impl BezierConfig {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            points_amount: DEFAULT_POINTS_AMOUNT,
        }
    }

    pub fn with_points_amount(mut self, points_amount: usize) -> Self {
        self.points_amount = points_amount;
        self
    }
}

impl Default for BezierConfig {
    fn default() -> Self {
        Self::new(START, END)
    }
}

/// A cubic bezier curve usable as an easing function
#[derive(Clone, Debug, PartialEq)]
pub struct CubicBezier {
    p1: Point,
    p2: Point,
    points_amount: usize,
    /// `(B(t).x, 1 - B(t).y)` samples followed by the `(1, 0)` sentinel
    table: Vec<Point>,
}

impl CubicBezier {
    /// Build a curve from a complete configuration.
    ///
    /// Fails when a control point is not finite or `points_amount` is zero.
    pub fn new(config: BezierConfig) -> Result<Self> {
        validate(&config)?;
        Ok(Self::build(config))
    }

    /// Build a curve from its two control points with the default sample count
    pub fn from_points(p1: Point, p2: Point) -> Result<Self> {
        Self::new(BezierConfig::new(p1, p2))
    }

    /// Parse an `"x1,y1,x2,y2"` string
    pub fn parse(input: &str) -> Result<Self> {
        let c = parse_components(input, 4)?;
        Self::from_points(Point::new(c[0], c[1]), Point::new(c[2], c[3]))
    }

    /// Copy a curve out of the named bezier preset table
    pub fn from_preset(name: &str) -> Result<Self> {
        crate::presets::bezier_preset(name)
    }

    /// The `(0,0)-(1,1)` curve, which is the identity
    pub fn linear() -> Self {
        Self::build(BezierConfig::default())
    }

    /// Build from constant control values known to be finite
    pub(crate) fn from_values([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::build(BezierConfig::new(Point::new(x1, y1), Point::new(x2, y2)))
    }

    fn build(config: BezierConfig) -> Self {
        Self {
            p1: config.p1,
            p2: config.p2,
            points_amount: config.points_amount,
            table: build_table(config.p1, config.p2, config.points_amount),
        }
    }

    pub fn config(&self) -> BezierConfig {
        BezierConfig {
            p1: self.p1,
            p2: self.p2,
            points_amount: self.points_amount,
        }
    }

    pub fn control_points(&self) -> (Point, Point) {
        (self.p1, self.p2)
    }

    pub fn points_amount(&self) -> usize {
        self.points_amount
    }

    /// The precomputed sample table, sentinel included
    pub fn table(&self) -> &[Point] {
        &self.table
    }

    /// Replace both control points and rebuild the table
    pub fn set_control_points(&mut self, p1: Point, p2: Point) -> Result<()> {
        let config = BezierConfig { p1, p2, ..self.config() };
        *self = Self::new(config)?;
        Ok(())
    }

    /// Change the sample count and rebuild the table
    pub fn set_points_amount(&mut self, points_amount: usize) -> Result<()> {
        let config = self.config().with_points_amount(points_amount);
        *self = Self::new(config)?;
        Ok(())
    }

    /// Evaluate the parametric curve at `t`.
    ///
    /// `B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3`
    #[inline]
    pub fn evaluate(&self, t: f64) -> Point {
        evaluate(self.p1, self.p2, t)
    }

    /// Map a time ratio to a progress ratio through the sample table
    pub fn ease(&self, time: f64) -> f64 {
        let (lower, upper) = self.bracket(time);

        if (upper.x - lower.x).abs() < f64::EPSILON {
            return 1.0 - lower.y;
        }

        let slope = (upper.y - lower.y) / (upper.x - lower.x);
        let interpolated_y = slope * (time - lower.x) + lower.y;
        1.0 - interpolated_y
    }

    /// Find the samples surrounding `time`.
    ///
    /// Outside the table's x range the boundary sample is returned twice. With
    /// control points outside the unit square the x coordinates are not
    /// monotonic, so the first segment (in curve order) that spans `time`
    /// wins, whichever direction it runs.
    fn bracket(&self, time: f64) -> (Point, Point) {
        let (Some(&first), Some(&last)) = (self.table.first(), self.table.last()) else {
            return (START, START);
        };

        if time <= first.x {
            return (first, first);
        }
        if time >= last.x {
            return (last, last);
        }

        for pair in self.table.windows(2) {
            let (lower, upper) = if pair[0].x <= pair[1].x {
                (pair[0], pair[1])
            } else {
                (pair[1], pair[0])
            };
            if lower.x <= time && time <= upper.x {
                return (lower, upper);
            }
        }

        (last, last)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::linear()
    }
}

impl Ease for CubicBezier {
    fn ease(&self, t: f64) -> f64 {
        CubicBezier::ease(self, t)
    }
}

impl FromStr for CubicBezier {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.p1.x, self.p1.y, self.p2.x, self.p2.y)
    }
}

fn validate(config: &BezierConfig) -> Result<()> {
    if !config.p1.is_finite() || !config.p2.is_finite() {
        return Err(AnimationError::InvalidConfig(format!(
            "control points must be finite, got ({}) and ({})",
            config.p1, config.p2
        )));
    }
    if config.points_amount == 0 {
        return Err(AnimationError::InvalidConfig(
            "points_amount must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[inline]
fn evaluate(p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;

    Point::new(
        a * START.x + b * p1.x + c * p2.x + d * END.x,
        a * START.y + b * p1.y + c * p2.y + d * END.y,
    )
}

fn build_table(p1: Point, p2: Point, points_amount: usize) -> Vec<Point> {
    let mut table = Vec::with_capacity(points_amount + 1);
    for i in 0..points_amount {
        let t = i as f64 / points_amount as f64;
        let sample = evaluate(p1, p2, t);
        table.push(Point::new(sample.x, 1.0 - sample.y));
    }
    table.push(Point::new(1.0, 0.0));

    tracing::trace!(samples = table.len(), "built cubic bezier table");
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(s: &str) -> CubicBezier {
        match s.parse() {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    /// Reference inverse by bisection on the exact curve
    fn exact_ease(curve: &CubicBezier, x: f64) -> f64 {
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..60 {
            let mid = (lo + hi) / 2.0;
            if curve.evaluate(mid).x < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        curve.evaluate((lo + hi) / 2.0).y
    }

    #[test]
    fn table_has_points_amount_plus_one_entries() {
        let c = curve("0.42,0,0.58,1");
        assert_eq!(c.table().len(), DEFAULT_POINTS_AMOUNT + 1);
        assert_eq!(c.table()[0], Point::new(0.0, 1.0));
        assert_eq!(*c.table().last().unwrap(), Point::new(1.0, 0.0));
    }

    #[test]
    fn identity_curve() {
        let c = curve("0,0,1,1");
        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            assert!((c.ease(t) - t).abs() < 1e-9, "t={t} got {}", c.ease(t));
        }
    }

    #[test]
    fn endpoints_are_pinned() {
        let c = curve("0.25,0.75,0.75,0.25");
        assert_eq!(c.ease(0.0), 0.0);
        assert_eq!(c.ease(1.0), 1.0);
        assert_eq!(c.ease(-3.0), 0.0);
        assert_eq!(c.ease(4.0), 1.0);
    }

    #[test]
    fn evaluate_endpoints() {
        let c = curve("0.1,0.9,0.9,0.1");
        assert_eq!(c.evaluate(0.0), Point::new(0.0, 0.0));
        assert_eq!(c.evaluate(1.0), Point::new(1.0, 1.0));
    }

    #[test]
    fn malformed_strings_fail() {
        for bad in ["1,2,3", "", "a,b,c,d", "1,2,3,4,5", "0.1,0.2,,0.4"] {
            assert!(
                matches!(CubicBezier::parse(bad), Err(AnimationError::Parse { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn zero_points_amount_is_rejected() {
        let config = BezierConfig::default().with_points_amount(0);
        assert!(matches!(
            CubicBezier::new(config),
            Err(AnimationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_finite_control_point_is_rejected() {
        let result = CubicBezier::from_points(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn non_monotonic_table_uses_first_spanning_segment() {
        // x rises past 0.6, falls back near 0.3, then rises to 1
        let c = curve("1.8,-0.4,-0.8,1.4");
        let t = 0.5;
        let spans = |w: &&[Point]| w[0].x.min(w[1].x) <= t && t <= w[0].x.max(w[1].x);

        let spanning: Vec<&[Point]> = c.table().windows(2).filter(spans).collect();
        assert!(spanning.len() >= 2, "expected an ambiguous query, got {spanning:?}");

        let first = spanning[0];
        let (lower, upper) = if first[0].x <= first[1].x {
            (first[0], first[1])
        } else {
            (first[1], first[0])
        };
        let y = lower.y + (upper.y - lower.y) * (t - lower.x) / (upper.x - lower.x);

        assert!((c.ease(t) - (1.0 - y)).abs() < 1e-12);
        // The early dip of the curve, not its late overshoot
        assert!(c.ease(t) < 0.0);
    }

    #[test]
    fn overshooting_control_points_do_not_panic() {
        let c = curve("1.8,-0.4,-0.8,1.4");
        for i in -10..=110 {
            let t = i as f64 / 100.0;
            assert!(c.ease(t).is_finite());
        }
        assert_eq!(c.ease(0.0), 0.0);
        assert_eq!(c.ease(1.0), 1.0);
    }

    #[test]
    fn back_curve_overshoots() {
        let c = curve("0.36,0,0.66,-0.56");
        let min = (0..=100)
            .map(|i| c.ease(i as f64 / 100.0))
            .fold(f64::INFINITY, f64::min);
        assert!(min < 0.0);
    }

    #[test]
    fn single_sample_table_is_linear_between_endpoints() {
        let config = BezierConfig::new(Point::new(0.9, 0.1), Point::new(0.1, 0.9)).with_points_amount(1);
        let c = CubicBezier::new(config).unwrap();
        assert_eq!(c.table().len(), 2);
        assert!((c.ease(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn more_samples_reduce_error() {
        let coarse = CubicBezier::new(
            BezierConfig::new(Point::new(0.42, 0.0), Point::new(0.58, 1.0)).with_points_amount(8),
        )
        .unwrap();
        let mut fine = coarse.clone();
        fine.set_points_amount(256).unwrap();
        assert_eq!(fine.table().len(), 257);

        let max_err = |c: &CubicBezier| {
            (1..100)
                .map(|i| {
                    let x = i as f64 / 100.0;
                    (c.ease(x) - exact_ease(c, x)).abs()
                })
                .fold(0.0, f64::max)
        };
        assert!(max_err(&fine) < max_err(&coarse));
        assert!(max_err(&fine) < 1e-3);
    }

    #[test]
    fn set_control_points_rebuilds_table() {
        let mut c = CubicBezier::linear();
        let before = c.table().to_vec();
        c.set_control_points(Point::new(0.5, 0.0), Point::new(0.75, 0.0))
            .unwrap();
        assert_ne!(c.table(), before.as_slice());
        assert_eq!(c.control_points().0, Point::new(0.5, 0.0));
    }

    #[test]
    fn display_matches_input_format() {
        let c = curve("0.68, -0.6, 0.32, 1.6");
        assert_eq!(c.to_string(), "0.68,-0.6,0.32,1.6");
        assert_eq!(curve(&c.to_string()), c);
    }
}
