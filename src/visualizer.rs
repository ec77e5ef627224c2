use log::info;
use minifb::{Window, WindowOptions};

use crate::canvas::PixelCanvas;
use crate::error::Error;
use crate::heart::Heart;
use crate::ticker::Ticker;

/// Something that can show a finished [`PixelCanvas`] until the user closes it.
pub trait Screen {
    fn is_open(&self) -> bool;
    fn present(&mut self, canvas: &PixelCanvas) -> Result<(), Error>;
}

/// Window that shows a [`PixelCanvas`].
pub struct Visualizer {
    window: Window,
}

impl Visualizer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Visualizer { window })
    }
}

impl Screen for Visualizer {
    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn present(&mut self, canvas: &PixelCanvas) -> Result<(), Error> {
        self.window
            .update_with_buffer(&canvas.pixels, canvas.width, canvas.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }
}

/// Plays the heart's frame loop into the window until the window closes or
/// the ticker is stopped.
pub async fn play<D: Screen + ?Sized>(heart: &Heart, display: &mut D, ticker: &mut Ticker) -> Result<(), Error> {
    let config = heart.config();
    let mut canvas = PixelCanvas::new(config.canvas_width, config.canvas_height, config.background_color);
    let stop = ticker.stop_handle();

    while let Some(frame) = ticker.tick().await {
        // Closed windows may refuse updates, so check before presenting.
        if !display.is_open() {
            info!("window closed after {frame} frames");
            stop.stop();
            break;
        }
        heart.render(&mut canvas, frame);
        display.present(&canvas)?;
    }
    Ok(())
}
