/// Minimal drawing surface the heart renders onto.
pub trait Canvas {
    /// Wipe everything drawn so far.
    fn clear(&mut self);

    /// Filled axis-aligned square with its top-left corner at (x, y).
    fn fill_square(&mut self, x: i32, y: i32, size: u32, color: u32);
}

/// Software canvas over a `0x00RRGGBB` pixel buffer, the layout minifb
/// expects. Squares are clipped to the buffer.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    pub width: usize,
    pub height: usize,
    pub background: u32,
    pub pixels: Vec<u32>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, background: u32) -> Self {
        PixelCanvas {
            width,
            height,
            background,
            pixels: vec![background; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    fn put_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }
}

impl Canvas for PixelCanvas {
    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    fn fill_square(&mut self, x: i32, y: i32, size: u32, color: u32) {
        for dy in 0..size as i64 {
            for dx in 0..size as i64 {
                self.put_pixel(x as i64 + dx, y as i64 + dy, color);
            }
        }
    }
}
