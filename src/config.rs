use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Error;

/// Every tunable constant of the animation, fixed at construction time.
///
/// The exponents and jitter ranges are hand-tuned for the look of the
/// beat, not derived from anything physical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub center_x: f64,
    pub center_y: f64,
    /// Scale applied to the unit heart curve for seed points.
    pub image_enlarge: f64,
    /// Scale of the outline the halo is sampled from.
    pub halo_enlarge: f64,
    pub heart_color: u32,
    pub background_color: u32,

    pub seed_count: usize,
    pub center_diffusion_count: usize,
    pub edge_beta: f64,
    pub center_beta: f64,

    pub shrink_exponent: f64,
    pub beat_exponent: f64,
    pub halo_jitter: i32,
    pub point_jitter: i32,

    pub frame_count: usize,
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas_width: 640,
            canvas_height: 480,
            center_x: 320.0,
            center_y: 240.0,
            image_enlarge: 11.0,
            halo_enlarge: 11.6,
            heart_color: 0xFF2121,
            background_color: 0x000000,
            seed_count: 3000,
            center_diffusion_count: 3000,
            edge_beta: 0.05,
            center_beta: 0.17,
            shrink_exponent: 0.6,
            beat_exponent: 0.52,
            halo_jitter: 14,
            point_jitter: 1,
            frame_count: 20,
            frame_interval_ms: 160,
        }
    }
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.frame_count == 0 {
            return Err(Error::InvalidConfig("frame_count must be at least 1".into()));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.seed_count == 0 {
            return Err(Error::InvalidConfig("seed_count must be at least 1".into()));
        }
        // Written as negated comparisons so NaN is rejected too.
        if !(self.edge_beta > 0.0 && self.edge_beta.is_finite())
            || !(self.center_beta > 0.0 && self.center_beta.is_finite())
        {
            return Err(Error::InvalidConfig("scatter betas must be positive and finite".into()));
        }
        if !(self.image_enlarge.is_finite() && self.halo_enlarge.is_finite()) {
            return Err(Error::InvalidConfig("enlarge factors must be finite".into()));
        }
        if !(self.shrink_exponent.is_finite() && self.beat_exponent.is_finite()) {
            return Err(Error::InvalidConfig("force exponents must be finite".into()));
        }
        if !(self.center_x >= 0.0 && self.center_x < self.canvas_width as f64)
            || !(self.center_y >= 0.0 && self.center_y < self.canvas_height as f64)
        {
            return Err(Error::InvalidConfig(format!(
                "center ({}, {}) must lie inside the {}x{} canvas",
                self.center_x, self.center_y, self.canvas_width, self.canvas_height
            )));
        }
        if self.halo_jitter < 0 || self.point_jitter < 0 {
            return Err(Error::InvalidConfig("jitter ranges must not be negative".into()));
        }
        Ok(())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable config: {e}>"))
    }
}
