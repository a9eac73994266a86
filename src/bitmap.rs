//! One complete conversion.
//!
//! A [`Bitmap`] is built from a pixel grid in one go: trim, then header and
//! packed rows. Nothing touches the filesystem until one of the `save_*`
//! methods is called.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::{
    bounds::BoundingBox,
    color::ColorMap,
    decode::decode,
    emit,
    error::Error,
    header::BitmapHeader,
    pack::PackedBlob,
    pixel::{PixelGrid, RawImage},
};

/// A converted image: header plus packed rows, ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    name: String,
    header: BitmapHeader,
    blob: PackedBlob,
}

impl Bitmap {
    /// Trim and pack a normalized grid.
    ///
    /// `name` is used for the declarations in the C source output.
    pub fn from_grid(
        name: impl Into<String>,
        grid: &PixelGrid,
        color_map: ColorMap,
    ) -> Result<Self, Error> {
        let name = name.into();
        let bounds = BoundingBox::trim(grid);
        debug!(
            "'{}': {}x{} image trimmed to {:?}",
            name,
            grid.width(),
            grid.height(),
            bounds
        );

        let header = BitmapHeader::new(bounds);
        let blob = PackedBlob::pack(grid, bounds, color_map)?;
        debug!(
            "'{}': row size {} bytes, {} bytes of pixel data",
            name,
            header.row_size_bytes,
            blob.len()
        );

        Ok(Bitmap { name, header, blob })
    }

    pub fn from_raw(
        name: impl Into<String>,
        raw: &RawImage,
        color_map: ColorMap,
    ) -> Result<Self, Error> {
        let grid = PixelGrid::normalize(raw)?;
        Self::from_grid(name, &grid, color_map)
    }

    /// Decode and convert an image file. The file stem becomes the name.
    pub fn open<P: AsRef<Path>>(path: P, color_map: ColorMap) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw = decode(path)?;
        Self::from_raw(name, &raw, color_map)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &BitmapHeader {
        &self.header
    }

    pub fn bounds(&self) -> BoundingBox {
        self.header.bounds
    }

    pub fn blob(&self) -> &PackedBlob {
        &self.blob
    }

    /// Complete `.pbi` file contents.
    pub fn to_pbi(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BitmapHeader::SIZE + self.blob.len());
        emit::write_pbi(&mut buf, &self.header, &self.blob)
            .expect("writing into a Vec cannot fail");
        buf
    }

    /// C source declaring the pixel array and `GBitmap` struct.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        emit::write_source(&mut out, &self.name, &self.header, &self.blob)
            .expect("writing into a String cannot fail");
        out
    }

    pub fn save_pbi<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        std::fs::write(path, self.to_pbi())?;
        info!("Saved bitmap as '{}'", path.display());
        Ok(())
    }

    pub fn save_source<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        std::fs::write(path, self.to_source())?;
        info!("Saved source as '{}'", path.display());
        Ok(())
    }
}

/// Default `.pbi` output next to the input file.
pub fn pbi_path_for(input: &Path) -> PathBuf {
    input.with_extension("pbi")
}

/// Default `.h` output next to the input file.
pub fn source_path_for(input: &Path) -> PathBuf {
    input.with_extension("h")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{ChannelLayout, Pixel};

    #[test]
    fn test_two_by_two_scenario() {
        let raw = RawImage::new(
            2,
            2,
            ChannelLayout::Rgba,
            vec![
                vec![255, 255, 255, 255, 255, 255, 255, 255],
                vec![0, 0, 0, 255, 0, 0, 0, 255],
            ],
        );
        let bitmap = Bitmap::from_raw("square", &raw, ColorMap::WHITE_IS_SET).unwrap();
        assert_eq!(bitmap.bounds(), BoundingBox::new(0, 0, 2, 2));
        assert_eq!(bitmap.header().row_size_bytes, 4);
        assert_eq!(bitmap.blob().as_bytes(), &[0x03, 0, 0, 0, 0, 0, 0, 0]);

        let pbi = bitmap.to_pbi();
        assert_eq!(pbi.len(), 12 + 8);
        assert_eq!(&pbi[12..], bitmap.blob().as_bytes());
    }

    #[test]
    fn test_opaque_image_is_not_trimmed() {
        for (width, height) in [(1, 1), (7, 3), (33, 2), (64, 5)].iter().copied() {
            let pixels = vec![Pixel::new(90, 90, 90, 255); (width * height) as usize];
            let grid = PixelGrid::new(width, height, pixels).unwrap();
            let bitmap = Bitmap::from_grid("opaque", &grid, ColorMap::BLACK_IS_SET).unwrap();
            assert_eq!(
                bitmap.bounds(),
                BoundingBox::new(0, 0, width as i16, height as i16)
            );
            assert_eq!(bitmap.to_pbi().len(), 12 + bitmap.header().blob_len());
        }
    }

    #[test]
    fn test_fully_transparent_image() {
        let grid = PixelGrid::new(4, 4, vec![Pixel::new(0, 0, 0, 0); 16]).unwrap();
        let bitmap = Bitmap::from_grid("empty", &grid, ColorMap::WHITE_IS_SET).unwrap();
        assert_eq!(bitmap.bounds(), BoundingBox::EMPTY);
        assert_eq!(bitmap.header().row_size_bytes, 0);
        assert!(bitmap.blob().is_empty());
        assert_eq!(
            bitmap.to_pbi(),
            vec![0x00, 0x00, 0x00, 0x10, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_faint_image_is_all_transparent_bits() {
        // alpha 50 keeps the pixels inside the box but classifies them as
        // transparent, whatever their color
        let pixels = (0..16u8)
            .map(|i| Pixel::new(i * 16, 255 - i * 16, i, 50))
            .collect();
        let grid = PixelGrid::new(4, 4, pixels).unwrap();

        for color_map in [
            ColorMap::WHITE_IS_SET,
            ColorMap::BLACK_IS_SET,
            ColorMap::new(false, true, true),
        ]
        .iter()
        .copied()
        {
            let bitmap = Bitmap::from_grid("faint", &grid, color_map).unwrap();
            assert_eq!(bitmap.bounds(), BoundingBox::new(0, 0, 4, 4));
            for row in 0..4 {
                for column in 0..4 {
                    assert_eq!(
                        bitmap.blob().bit(row, column),
                        Some(color_map.transparent)
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_paths() {
        let input = Path::new("bitmaps/arrow.png");
        assert_eq!(pbi_path_for(input), PathBuf::from("bitmaps/arrow.pbi"));
        assert_eq!(source_path_for(input), PathBuf::from("bitmaps/arrow.h"));
    }
}
