use std::collections::HashSet;
use std::f64::consts::PI;

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Error;
use crate::math::{Point, calc_position, curve, heart_function, scatter_inside, shrink};

const HALO_SIZES: [u32; 3] = [1, 2, 2];

/// Insertion-ordered set of points with exact-coordinate deduplication.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    seen: HashSet<Point>,
    points: Vec<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if an identical point was already present.
    pub fn insert(&mut self, p: Point) -> bool {
        if self.seen.insert(p) {
            self.points.push(p);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPoint {
    pub point: Point,
    pub size: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// Halo points first, then core, edge and center points.
    pub points: Vec<RenderPoint>,
    pub halo_len: usize,
}

/// Beat-derived parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beat {
    pub ratio: f64,
    pub halo_radius: u32,
    pub halo_number: usize,
}

impl Beat {
    pub fn at(frame: usize) -> Self {
        let c = curve(frame as f64 / 10.0 * PI);
        Beat {
            ratio: 10.0 * c,
            halo_radius: (4.0 + 6.0 * (1.0 + c)) as u32,
            halo_number: (3000.0 + 4000.0 * c.abs().powi(2)) as usize,
        }
    }
}

pub struct Heart {
    config: Config,
    points: PointSet,
    edge_diffusion_points: PointSet,
    center_diffusion_points: PointSet,
    frames: Vec<Frame>,
}

impl Heart {
    /// Builds the seed sets and precomputes every frame. This is the only
    /// expensive step; rendering afterwards is a lookup.
    pub fn new<R: Rng + ?Sized>(config: Config, rng: &mut R) -> Result<Self, Error> {
        config.validate()?;
        debug!("heart config: {}", config.to_json());

        let mut heart = Heart::empty(config);
        heart.build(heart.config.seed_count, rng);

        for frame in 0..heart.config.frame_count {
            let computed = heart.calc(frame, rng);
            heart.frames.push(computed);
        }

        info!(
            "heart ready: {} frames, {} core / {} edge / {} center points",
            heart.frames.len(),
            heart.points.len(),
            heart.edge_diffusion_points.len(),
            heart.center_diffusion_points.len()
        );
        Ok(heart)
    }

    fn empty(config: Config) -> Self {
        Heart {
            points: PointSet::new(),
            edge_diffusion_points: PointSet::new(),
            center_diffusion_points: PointSet::new(),
            frames: Vec::with_capacity(config.frame_count),
            config,
        }
    }

    fn build<R: Rng + ?Sized>(&mut self, number: usize, rng: &mut R) {
        let config = &self.config;

        for _ in 0..number {
            let t = rng.gen_range(0.0..2.0 * PI);
            self.points.insert(heart_function(t, config.image_enlarge, config));
        }

        for &p in self.points.iter() {
            let q = scatter_inside(p, config.edge_beta, config, rng);
            self.edge_diffusion_points.insert(q);
        }

        let core = self.points.as_slice();
        for _ in 0..config.center_diffusion_count {
            if let Some(&p) = core.choose(rng) {
                let q = scatter_inside(p, config.center_beta, config, rng);
                self.center_diffusion_points.insert(q);
            }
        }

        debug!(
            "built {} core points from {} samples, {} edge, {} center",
            self.points.len(),
            number,
            self.edge_diffusion_points.len(),
            self.center_diffusion_points.len()
        );
    }

    fn calc<R: Rng + ?Sized>(&self, frame: usize, rng: &mut R) -> Frame {
        let config = &self.config;
        let beat = Beat::at(frame);

        let mut points = Vec::with_capacity(
            beat.halo_number
                + self.points.len()
                + self.edge_diffusion_points.len()
                + self.center_diffusion_points.len(),
        );

        // halo: sample and dedup the outline first, then jitter the survivors
        let mut halo = PointSet::new();
        for _ in 0..beat.halo_number {
            let t = rng.gen_range(0.0..2.0 * PI);
            let p = heart_function(t, config.halo_enlarge, config);
            halo.insert(shrink(p, beat.halo_radius as f64, config));
        }
        let jitter = config.halo_jitter;
        for &p in halo.iter() {
            let x = p.x + rng.gen_range(-jitter..=jitter) as f64;
            let y = p.y + rng.gen_range(-jitter..=jitter) as f64;
            let size = HALO_SIZES.choose(rng).copied().unwrap_or(2);
            points.push(RenderPoint { point: Point::new(x, y), size });
        }
        let halo_len = points.len();

        // shape
        for &p in self.points.iter() {
            let point = calc_position(p, beat.ratio, config, rng);
            points.push(RenderPoint { point, size: rng.gen_range(1..=3) });
        }

        for &p in self.edge_diffusion_points.iter().chain(self.center_diffusion_points.iter()) {
            let point = calc_position(p, beat.ratio, config, rng);
            points.push(RenderPoint { point, size: rng.gen_range(1..=2) });
        }

        debug!("frame {frame}: ratio {:.3}, {} halo, {} total", beat.ratio, halo_len, points.len());
        Frame { points, halo_len }
    }

    /// Frame for any index; indices wrap around the precomputed loop.
    pub fn frame(&self, index: u64) -> &Frame {
        let len = self.frames.len() as u64;
        &self.frames[(index % len) as usize]
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, index: u64) {
        canvas.clear();
        let color = self.config.heart_color;
        for rp in &self.frame(index).points {
            canvas.fill_square(rp.point.x.floor() as i32, rp.point.y.floor() as i32, rp.size, color);
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn edge_diffusion_points(&self) -> &PointSet {
        &self.edge_diffusion_points
    }

    pub fn center_diffusion_points(&self) -> &PointSet {
        &self.center_diffusion_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        squares: Vec<(i32, i32, u32, u32)>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.squares.clear();
        }

        fn fill_square(&mut self, x: i32, y: i32, size: u32, color: u32) {
            self.squares.push((x, y, size, color));
        }
    }

    fn heart_with(config: Config, seed: u64) -> Heart {
        let mut rng = StdRng::seed_from_u64(seed);
        Heart::new(config, &mut rng).unwrap()
    }

    #[test]
    fn point_set_dedups_in_insertion_order() {
        let mut set = PointSet::new();
        assert!(set.insert(Point::new(1.0, 2.0)));
        assert!(set.insert(Point::new(3.0, 4.0)));
        assert!(!set.insert(Point::new(1.0, 2.0)));
        assert!(set.insert(Point::new(1.0, 2.5)));

        assert_eq!(set.len(), 3);
        let xs: Vec<f64> = set.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 1.0]);
    }

    #[test]
    fn beat_at_rest_and_peak() {
        let rest = Beat::at(0);
        assert_eq!(rest.ratio, 0.0);
        assert_eq!(rest.halo_radius, 10);
        assert_eq!(rest.halo_number, 3000);

        for frame in 0..40 {
            let beat = Beat::at(frame);
            assert!((6..=13).contains(&beat.halo_radius), "frame {frame}: {beat:?}");
            assert!((3000..=4622).contains(&beat.halo_number), "frame {frame}: {beat:?}");
            assert!(beat.ratio.abs() <= 6.4);
        }
    }

    #[test]
    fn build_cardinalities() {
        let heart = heart_with(Config { frame_count: 1, ..Config::default() }, 42);

        let core = heart.points().len();
        assert!(core > 0 && core <= 3000, "core = {core}");
        // Truncated curve samples collide a lot at 3000 draws.
        assert!(core < 3000);
        assert_eq!(heart.edge_diffusion_points().len(), core);
        let center = heart.center_diffusion_points().len();
        assert!(center > 0 && center <= 3000, "center = {center}");
    }

    #[test]
    fn diffusion_points_sit_inside_the_outline() {
        let heart = heart_with(Config { frame_count: 1, ..Config::default() }, 8);
        let c = Point::new(heart.config().center_x, heart.config().center_y);
        let max_core = heart.points().iter().map(|p| p.dist_sq(c)).fold(0.0, f64::max);
        for p in heart.edge_diffusion_points().iter() {
            assert!(p.dist_sq(c) < max_core);
        }
    }

    #[test]
    fn every_frame_is_precomputed_and_valid() {
        let heart = heart_with(Config::default(), 1);
        assert_eq!(heart.frame_count(), 20);
        for i in 0..20 {
            let frame = heart.frame(i);
            assert!(!frame.points.is_empty());
            assert!(frame.halo_len > 0);
            for rp in &frame.points {
                assert!((1..=3).contains(&rp.size));
                assert!(rp.point.x.is_finite() && rp.point.y.is_finite());
            }
            for rp in &frame.points[..frame.halo_len] {
                assert!((1..=2).contains(&rp.size));
            }
        }
    }

    #[test]
    fn single_frame_point_count_adds_up() {
        let config = Config { frame_count: 1, ..Config::default() };
        let mut rng = StdRng::seed_from_u64(2024);
        let mut heart = Heart::empty(config.clone());
        heart.build(config.seed_count, &mut rng);

        // The halo outline is drawn first, so replaying those draws from a
        // copy of the generator gives the deduped halo count.
        let mut replay = rng.clone();
        let beat = Beat::at(0);
        let outline: HashSet<Point> = (0..beat.halo_number)
            .map(|_| {
                let t = replay.gen_range(0.0..2.0 * PI);
                shrink(heart_function(t, config.halo_enlarge, &config), beat.halo_radius as f64, &config)
            })
            .collect();
        assert!(!outline.is_empty() && outline.len() <= beat.halo_number);

        let frame = heart.calc(0, &mut rng);
        assert_eq!(frame.halo_len, outline.len());
        let expected = outline.len()
            + heart.points().len()
            + heart.edge_diffusion_points().len()
            + heart.center_diffusion_points().len();
        assert_eq!(frame.points.len(), expected);
        assert!(frame.points.iter().all(|rp| (1..=3).contains(&rp.size)));
    }

    #[test]
    fn same_seed_same_animation() {
        let config = Config { frame_count: 2, ..Config::default() };
        let a = heart_with(config.clone(), 99);
        let b = heart_with(config, 99);
        assert_eq!(a.frame(0).points, b.frame(0).points);
        assert_eq!(a.frame(1).points, b.frame(1).points);
    }

    #[test]
    fn render_wraps_around_frame_count() {
        let heart = heart_with(Config { frame_count: 3, ..Config::default() }, 17);

        for k in 0..3u64 {
            let mut first = Recorder::default();
            let mut wrapped = Recorder::default();
            heart.render(&mut first, k);
            heart.render(&mut wrapped, 3 + k);
            heart.render(&mut wrapped, 3 * 1000 + k);
            assert_eq!(first.squares, wrapped.squares, "frame {k}");
            assert_eq!(wrapped.clears, 2);
        }
    }

    #[test]
    fn render_draws_one_square_per_point_in_heart_color() {
        let config = Config { frame_count: 1, ..Config::default() };
        let color = config.heart_color;
        let heart = heart_with(config, 5);

        let mut rec = Recorder::default();
        heart.render(&mut rec, 0);
        assert_eq!(rec.clears, 1);
        assert_eq!(rec.squares.len(), heart.frame(0).points.len());
        assert!(rec.squares.iter().all(|&(_, _, _, c)| c == color));

        let mut canvas = PixelCanvas::new(640, 480, 0);
        heart.render(&mut canvas, 0);
        assert!(canvas.pixels.iter().any(|&p| p == color));
        assert_eq!(canvas.pixel(0, 0), Some(0));
    }

    #[test]
    fn zero_frames_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = Heart::new(Config { frame_count: 0, ..Config::default() }, &mut rng);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn bad_jitter_or_beta_fails_instead_of_panicking() {
        let mut rng = StdRng::seed_from_u64(0);
        for config in [
            Config { halo_jitter: -1, ..Config::default() },
            Config { point_jitter: -3, ..Config::default() },
            Config { edge_beta: f64::NAN, ..Config::default() },
            Config { center_beta: f64::NAN, ..Config::default() },
        ] {
            assert!(matches!(Heart::new(config, &mut rng), Err(Error::InvalidConfig(_))));
        }
    }
}
