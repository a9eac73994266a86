//! Bit packing.
//!
//! Each output row is a run of 32-bit little-endian words. Bit `b` of word
//! `k` holds the pixel at column `bounds.x + 32 * k + b`, so the least
//! significant bit is the leftmost pixel of the word. Columns past the right
//! edge of the source image are left clear.

use log::debug;

use crate::{bounds::BoundingBox, color::ColorMap, error::Error, pixel::PixelGrid};

/// Length of one output row in bytes: `w` rounded up to whole 32-bit words.
pub fn row_size_bytes(w: i16) -> u16 {
    if w <= 0 {
        return 0;
    }
    ((w as u16 + 31) / 32) * 4
}

/// Row-padded 1-bit image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBlob {
    row_size_bytes: u16,
    data: Vec<u8>,
}

impl PackedBlob {
    /// Pack the pixels inside `bounds`.
    ///
    /// The blob is always `row_size_bytes(bounds.w) * bounds.h` bytes long.
    pub fn pack(grid: &PixelGrid, bounds: BoundingBox, color_map: ColorMap) -> Result<Self, Error> {
        if bounds.x < 0
            || bounds.y < 0
            || bounds.y as u32 + bounds.h.max(0) as u32 > grid.height()
            || bounds.x as u32 + bounds.w.max(0) as u32 > grid.width()
        {
            return Err(Error::InvalidBounds(bounds));
        }

        let row_size = row_size_bytes(bounds.w);
        let row_size_words = row_size as usize / 4;
        let height = bounds.h.max(0) as usize;
        let x_max = grid.width() as usize;
        let top = bounds.y as usize;

        debug!(
            "Packing {:?} into {} rows of {} bytes",
            bounds, height, row_size
        );

        let mut data = Vec::with_capacity(row_size as usize * height);
        for y in top..top + height {
            let row = grid.row(y);
            for column_word in 0..row_size_words {
                let x_offset = bounds.x as usize + column_word * 32;
                let mut word: u32 = 0;
                for bit in 0..32 {
                    let x = x_offset + bit;
                    if x < x_max {
                        word |= color_map.classify(&row[x]) << bit;
                    }
                }
                data.extend_from_slice(&word.to_le_bytes());
            }
        }

        Ok(PackedBlob {
            row_size_bytes: row_size,
            data,
        })
    }

    pub fn row_size_bytes(&self) -> u16 {
        self.row_size_bytes
    }

    /// Number of packed rows.
    pub fn height(&self) -> usize {
        match self.row_size_bytes {
            0 => 0,
            n => self.data.len() / n as usize,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Word `index` of packed row `row`.
    pub fn word(&self, row: usize, index: usize) -> Option<u32> {
        if index >= self.row_size_bytes as usize / 4 {
            return None;
        }
        let start = row * self.row_size_bytes as usize + index * 4;
        let bytes = self.data.get(start..start + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Bit for `column` (counted from the left edge of the box) in `row`.
    pub fn bit(&self, row: usize, column: usize) -> Option<bool> {
        let word = self.word(row, column / 32)?;
        Some(word & (1 << (column % 32)) != 0)
    }
}
