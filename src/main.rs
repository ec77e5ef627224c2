use std::time::Instant;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use particle_heart::{Config, Heart, Ticker, Visualizer, play};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    let mut visualizer = Visualizer::new("Particle Heart", config.canvas_width, config.canvas_height)?;

    let started = Instant::now();
    let mut rng = StdRng::from_entropy();
    let heart = Heart::new(config, &mut rng)?;
    info!("precomputed {} frames in {:?}", heart.frame_count(), started.elapsed());

    let mut ticker = Ticker::new(heart.config().frame_interval());
    play(&heart, &mut visualizer, &mut ticker).await?;
    Ok(())
}
