use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use rand::Rng;
use rand::distributions::Open01;

use crate::config::Config;

// Squared distances below this are treated as this, so a point sitting on
// the center is not pushed by an infinite force.
const MIN_CENTER_DIST_SQ: f64 = 1.0;

#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn dist_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    fn key(&self) -> (u64, u64) {
        // +0.0 and -0.0 compare equal, so they must hash equal too.
        let norm = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        (norm(self.x), norm(self.y))
    }
}

// Exact coordinate equality; NaN never shows up in generated points.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

fn center(config: &Config) -> Point {
    Point::new(config.center_x, config.center_y)
}

/// Classic heart curve, scaled by `enlarge` and moved to the canvas center.
/// Coordinates are truncated toward zero so nearby samples land on the same
/// pixel.
pub fn heart_function(t: f64, enlarge: f64, config: &Config) -> Point {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());

    let x = x * enlarge + config.center_x;
    let y = y * enlarge + config.center_y;
    Point::new(x.trunc(), y.trunc())
}

/// Pull a point toward the center by an exponentially distributed fraction
/// (mean `beta`) on each axis independently.
pub fn scatter_inside<R: Rng + ?Sized>(p: Point, beta: f64, config: &Config, rng: &mut R) -> Point {
    let u1: f64 = rng.sample(Open01);
    let u2: f64 = rng.sample(Open01);
    let ratio_x = -beta * u1.ln();
    let ratio_y = -beta * u2.ln();

    let c = center(config);
    let dx = ratio_x * (p.x - c.x);
    let dy = ratio_y * (p.y - c.y);
    Point::new(p.x - dx, p.y - dy)
}

fn central_force(p: Point, exponent: f64, config: &Config) -> f64 {
    let d_sq = p.dist_sq(center(config)).max(MIN_CENTER_DIST_SQ);
    1.0 / d_sq.powf(exponent)
}

/// Radial pull toward the center, stronger the closer the point already is.
pub fn shrink(p: Point, ratio: f64, config: &Config) -> Point {
    let force = central_force(p, config.shrink_exponent, config);
    let c = center(config);
    let dx = ratio * force * (p.x - c.x);
    let dy = ratio * force * (p.y - c.y);
    Point::new(p.x - dx, p.y - dy)
}

/// Beat amplitude for phase `p`. Period is π/2, bounded by ±2/π.
pub fn curve(p: f64) -> f64 {
    2.0 * (2.0 * (4.0 * p).sin()) / (2.0 * PI)
}

/// Per-frame displacement of a seed point: a central pull scaled by the
/// frame's `ratio`, plus integer jitter on both axes.
pub fn calc_position<R: Rng + ?Sized>(p: Point, ratio: f64, config: &Config, rng: &mut R) -> Point {
    let force = central_force(p, config.beat_exponent, config);
    let c = center(config);
    let jitter = config.point_jitter;

    let dx = ratio * force * (p.x - c.x) + rng.gen_range(-jitter..=jitter) as f64;
    let dy = ratio * force * (p.y - c.y) + rng.gen_range(-jitter..=jitter) as f64;
    Point::new(p.x - dx, p.y - dy)
}
