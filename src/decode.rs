//! Bridge from the `image` crate to [`RawImage`].
//!
//! Container parsing is left entirely to `image`; this module only flattens
//! whatever it produces into 8-bit samples and picks the matching layout.

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::{
    error::Error,
    pixel::{ChannelLayout, RawImage},
};

/// Decode an image file into raw 8-bit samples.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<RawImage, Error> {
    let path = path.as_ref();
    let image = image::open(path)?;
    debug!(
        "Decoded '{}': {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    RawImage::from_dynamic(&image)
}

fn scale_u16(sample: u16) -> u8 {
    (u32::from(sample) * 255 / 65535) as u8
}

fn scale_f32(sample: f32) -> u8 {
    (sample.max(0.0).min(1.0) * 255.0) as u8
}

impl RawImage {
    /// Flatten a decoded image, keeping its channel layout.
    ///
    /// Deeper samples are scaled down to `0..=255`, formats without a direct
    /// mapping are converted to RGBA first.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, Error> {
        let samples: Vec<u8> = match image {
            DynamicImage::ImageLuma8(buf) => buf.as_raw().clone(),
            DynamicImage::ImageLumaA8(buf) => buf.as_raw().clone(),
            DynamicImage::ImageRgb8(buf) => buf.as_raw().clone(),
            DynamicImage::ImageRgba8(buf) => buf.as_raw().clone(),
            DynamicImage::ImageLuma16(buf) => buf.as_raw().iter().copied().map(scale_u16).collect(),
            DynamicImage::ImageLumaA16(buf) => {
                buf.as_raw().iter().copied().map(scale_u16).collect()
            }
            DynamicImage::ImageRgb16(buf) => buf.as_raw().iter().copied().map(scale_u16).collect(),
            DynamicImage::ImageRgba16(buf) => buf.as_raw().iter().copied().map(scale_u16).collect(),
            DynamicImage::ImageRgb32F(buf) => buf.as_raw().iter().copied().map(scale_f32).collect(),
            DynamicImage::ImageRgba32F(buf) => {
                buf.as_raw().iter().copied().map(scale_f32).collect()
            }
            other => {
                return Self::from_dynamic(&DynamicImage::ImageRgba8(other.to_rgba8()));
            }
        };
        let layout = ChannelLayout::from_channel_count(image.color().channel_count())?;
        RawImage::from_samples(image.width(), image.height(), layout, &samples)
    }
}
