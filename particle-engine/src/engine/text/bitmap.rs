use constants::text::LUMINANCE_THRESHOLD;

/// Single-channel luminance raster of one rendered word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    luminance: Vec<u8>,
}

impl GlyphBitmap {
    /// Black bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            luminance: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Wrap existing row-major luminance. None if the length does not match.
    pub fn from_luminance(width: u32, height: u32, luminance: Vec<u8>) -> Option<Self> {
        if luminance.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            luminance,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.luminance.len()
    }

    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.luminance[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Brighten a pixel, keeping the larger of the old and new values.
    /// Out of range writes are dropped.
    pub fn brighten(&mut self, x: i32, y: i32, value: u8) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + x as usize;
        self.luminance[index] = self.luminance[index].max(value);
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.luminance(x, y) > LUMINANCE_THRESHOLD
    }

    pub fn foreground_count(&self) -> usize {
        self.luminance
            .iter()
            .filter(|&&value| value > LUMINANCE_THRESHOLD)
            .count()
    }

    /// Fraction of pixels classified as foreground.
    pub fn coverage(&self) -> f32 {
        if self.luminance.is_empty() {
            return 0.0;
        }
        self.foreground_count() as f32 / self.pixel_count() as f32
    }
}
