//! Pixel normalization.
//!
//! Decoded images come in one of four channel layouts. Everything
//! downstream works on a [`PixelGrid`] of uniform RGBA pixels.

use crate::error::Error;

/// Largest width or height that fits the signed 16-bit header fields.
pub const MAX_DIMENSION: u32 = i16::MAX as u32;

/// A single RGBA pixel, each channel in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }

    /// Any non-zero alpha counts as visible when trimming.
    pub fn is_visible(&self) -> bool {
        self.a >= 1
    }
}

/// Channel layout of the decoded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Grey,
    GreyAlpha,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    pub fn from_metadata(greyscale: bool, alpha: bool) -> Self {
        match (greyscale, alpha) {
            (true, false) => Self::Grey,
            (true, true) => Self::GreyAlpha,
            (false, false) => Self::Rgb,
            (false, true) => Self::Rgba,
        }
    }

    pub fn from_channel_count(count: u8) -> Result<Self, Error> {
        match count {
            1 => Ok(Self::Grey),
            2 => Ok(Self::GreyAlpha),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            _ => Err(Error::UnsupportedChannelLayout(count)),
        }
    }

    /// Number of samples making up one pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Grey => 1,
            Self::GreyAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    // `samples` always holds exactly `self.channels()` values
    fn pixel(&self, samples: &[u8]) -> Pixel {
        match self {
            Self::Grey => Pixel::new(samples[0], samples[0], samples[0], 255),
            Self::GreyAlpha => Pixel::new(samples[0], samples[0], samples[0], samples[1]),
            Self::Rgb => Pixel::new(samples[0], samples[1], samples[2], 255),
            Self::Rgba => Pixel::new(samples[0], samples[1], samples[2], samples[3]),
        }
    }
}

/// Decoded image as handed over by the decoder: one sample vector per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub rows: Vec<Vec<u8>>,
}

impl RawImage {
    pub fn new(width: u32, height: u32, layout: ChannelLayout, rows: Vec<Vec<u8>>) -> Self {
        RawImage {
            width,
            height,
            layout,
            rows,
        }
    }

    /// Split a flat, row-major sample buffer into rows.
    pub fn from_samples(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: &[u8],
    ) -> Result<Self, Error> {
        let stride = width as usize * layout.channels();
        if samples.len() != stride * height as usize {
            return Err(Error::MalformedImage(format!(
                "{} samples for a {}x{} image with {} channels",
                samples.len(),
                width,
                height,
                layout.channels()
            )));
        }
        let rows = if stride == 0 {
            vec![Vec::new(); height as usize]
        } else {
            samples.chunks(stride).map(|row| row.to_vec()).collect()
        };
        Ok(RawImage::new(width, height, layout, rows))
    }
}

/// Row-major RGBA pixels with the origin at the top left.
///
/// Every row has exactly `width` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, Error> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::ImageTooLarge { width, height });
        }
        if pixels.len() != width as usize * height as usize {
            return Err(Error::MalformedImage(format!(
                "{} pixels for a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(PixelGrid {
            width,
            height,
            pixels,
        })
    }

    /// Convert decoded samples into RGBA pixels.
    ///
    /// Samples are consumed left to right, `layout.channels()` at a time.
    pub fn normalize(raw: &RawImage) -> Result<Self, Error> {
        if raw.rows.len() != raw.height as usize {
            return Err(Error::MalformedImage(format!(
                "expected {} rows, found {}",
                raw.height,
                raw.rows.len()
            )));
        }

        let channels = raw.layout.channels();
        let mut pixels = Vec::with_capacity(raw.width as usize * raw.height as usize);

        for (y, row) in raw.rows.iter().enumerate() {
            if row.len() % channels != 0 {
                return Err(Error::MalformedImage(format!(
                    "row {} has {} samples, not a multiple of {}",
                    y,
                    row.len(),
                    channels
                )));
            }
            if row.len() / channels != raw.width as usize {
                return Err(Error::MalformedImage(format!(
                    "row {} has {} pixels, expected {}",
                    y,
                    row.len() / channels,
                    raw.width
                )));
            }
            pixels.extend(row.chunks_exact(channels).map(|s| raw.layout.pixel(s)));
        }

        PixelGrid::new(raw.width, raw.height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels of row `y`.
    ///
    /// Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Pixel] {
        let width = self.width as usize;
        &self.pixels[y * width..(y + 1) * width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x < self.width as usize && y < self.height as usize {
            self.pixels.get(y * self.width as usize + x)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        (0..self.height as usize).map(move |y| self.row(y))
    }
}
