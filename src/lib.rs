pub mod math;
pub mod config;
pub mod error;
pub mod canvas;
pub mod heart;
pub mod ticker;
pub mod visualizer;

pub use math::{Point, heart_function, scatter_inside, shrink, curve, calc_position};
pub use config::Config;
pub use error::Error;
pub use canvas::{Canvas, PixelCanvas};
pub use heart::{Beat, Frame, Heart, PointSet, RenderPoint};
pub use ticker::{StopHandle, Ticker};
pub use visualizer::{Screen, Visualizer, play};
