//! Transparent border trimming.
//!
//! The bitmap only stores the part of the image that has visible pixels;
//! its position is kept in the header as a [`BoundingBox`].

use crate::pixel::{Pixel, PixelGrid};

/// Rectangle of the source image kept in the bitmap.
///
/// All fields fit the signed 16-bit header slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl BoundingBox {
    /// Box of an image without any visible pixel.
    pub const EMPTY: BoundingBox = BoundingBox {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        BoundingBox { x, y, w, h }
    }

    /// Smallest box containing every pixel with non-zero alpha.
    ///
    /// Runs four separate scans (top, bottom, left, right), each stopping at
    /// the first visible row or column. A fully transparent grid yields
    /// [`BoundingBox::EMPTY`].
    pub fn trim(grid: &PixelGrid) -> Self {
        let width = grid.width() as usize;
        let height = grid.height() as usize;

        let row_visible = |y: usize| grid.row(y).iter().any(Pixel::is_visible);
        let column_visible =
            |x: usize| grid.rows().any(|row| row[x].is_visible());

        let top = match (0..height).find(|&y| row_visible(y)) {
            Some(top) => top,
            None => return Self::EMPTY,
        };
        let bottom = (top..height)
            .rev()
            .find(|&y| row_visible(y))
            .map_or(top, |y| y + 1);
        let left = (0..width).find(|&x| column_visible(x)).unwrap_or(0);
        let right = (left..width)
            .rev()
            .find(|&x| column_visible(x))
            .map_or(left, |x| x + 1);

        // PixelGrid caps both dimensions at i16::MAX
        BoundingBox {
            x: left as i16,
            y: top as i16,
            w: (right - left) as i16,
            h: (bottom - top) as i16,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_alpha(width: u32, alphas: &[u8]) -> PixelGrid {
        let height = alphas.len() as u32 / width;
        let pixels = alphas.iter().map(|&a| Pixel::new(0, 0, 0, a)).collect();
        PixelGrid::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_trim_opaque() {
        let grid = grid_from_alpha(3, &[255; 6]);
        assert_eq!(BoundingBox::trim(&grid), BoundingBox::new(0, 0, 3, 2));
    }

    #[test]
    fn test_trim_transparent_border() {
        #[rustfmt::skip]
        let grid = grid_from_alpha(5, &[
            0, 0, 0, 0, 0,
            0, 0, 1, 0, 0,
            0, 9, 0, 0, 0,
            0, 0, 0, 0, 0,
        ]);
        assert_eq!(BoundingBox::trim(&grid), BoundingBox::new(1, 1, 2, 2));
    }

    #[test]
    fn test_trim_single_pixel_in_corner() {
        #[rustfmt::skip]
        let grid = grid_from_alpha(3, &[
            0, 0, 0,
            0, 0, 0,
            0, 0, 200,
        ]);
        assert_eq!(BoundingBox::trim(&grid), BoundingBox::new(2, 2, 1, 1));
    }

    #[test]
    fn test_trim_fully_transparent() {
        let grid = grid_from_alpha(4, &[0; 16]);
        let bounds = BoundingBox::trim(&grid);
        assert_eq!(bounds, BoundingBox::EMPTY);
        assert!(bounds.is_empty());
    }

    #[test]
    fn test_trim_empty_grid() {
        let grid = PixelGrid::new(0, 0, Vec::new()).unwrap();
        assert_eq!(BoundingBox::trim(&grid), BoundingBox::EMPTY);
    }
}
