//! The 12-byte PBI file header.

use crate::{bounds::BoundingBox, error::Error, pack::row_size_bytes};

/// Current PBI format version, stored in the top nibble of `info_flags`.
pub const VERSION: u16 = 1;

/// Fixed 12-byte header preceding the pixel data of a PBI file.
///
/// Layout (all little-endian):
///
/// | offset | type | field            |
/// |--------|------|------------------|
/// | 0      | u16  | `row_size_bytes` |
/// | 2      | u16  | `info_flags`     |
/// | 4      | i16  | `bounds.x`       |
/// | 6      | i16  | `bounds.y`       |
/// | 8      | i16  | `bounds.w`       |
/// | 10     | i16  | `bounds.h`       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub row_size_bytes: u16,
    /// Bit 0 is reserved and always zero, bits 12-15 hold the version.
    pub info_flags: u16,
    pub bounds: BoundingBox,
}

impl BitmapHeader {
    pub const SIZE: usize = 12;

    pub fn new(bounds: BoundingBox) -> Self {
        BitmapHeader {
            row_size_bytes: row_size_bytes(bounds.w),
            info_flags: VERSION << 12,
            bounds,
        }
    }

    pub fn version(&self) -> u8 {
        (self.info_flags >> 12) as u8
    }

    /// Expected length of the pixel data following the header.
    pub fn blob_len(&self) -> usize {
        self.row_size_bytes as usize * self.bounds.h.max(0) as usize
    }

    pub fn to_bytes(&self) -> [u8; BitmapHeader::SIZE] {
        let mut buf = [0u8; BitmapHeader::SIZE];
        buf[0..2].copy_from_slice(&self.row_size_bytes.to_le_bytes());
        buf[2..4].copy_from_slice(&self.info_flags.to_le_bytes());
        buf[4..6].copy_from_slice(&self.bounds.x.to_le_bytes());
        buf[6..8].copy_from_slice(&self.bounds.y.to_le_bytes());
        buf[8..10].copy_from_slice(&self.bounds.w.to_le_bytes());
        buf[10..12].copy_from_slice(&self.bounds.h.to_le_bytes());
        buf
    }

    /// Read a header from the start of a PBI file.
    pub fn from_buf(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::InvalidHeader(format!(
                "{} bytes, expected at least {}",
                buf.len(),
                Self::SIZE
            )));
        }
        Ok(BitmapHeader {
            row_size_bytes: u16::from_le_bytes([buf[0], buf[1]]),
            info_flags: u16::from_le_bytes([buf[2], buf[3]]),
            bounds: BoundingBox {
                x: i16::from_le_bytes([buf[4], buf[5]]),
                y: i16::from_le_bytes([buf[6], buf[7]]),
                w: i16::from_le_bytes([buf[8], buf[9]]),
                h: i16::from_le_bytes([buf[10], buf[11]]),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes() {
        let header = BitmapHeader::new(BoundingBox::new(3, 2, 10, 5));
        assert_eq!(header.info_flags, 0x1000);
        assert_eq!(header.row_size_bytes, 4);
        assert_eq!(
            header.to_bytes(),
            [0x04, 0x00, 0x00, 0x10, 0x03, 0x00, 0x02, 0x00, 0x0a, 0x00, 0x05, 0x00]
        );
        assert_eq!(header.blob_len(), 20);
    }

    #[test]
    fn test_header_signed_fields() {
        let header = BitmapHeader {
            row_size_bytes: 0,
            info_flags: 0x1000,
            bounds: BoundingBox::new(-1, 0, -2, 0),
        };
        let bytes = header.to_bytes();
        assert_eq!(&bytes[4..6], &[0xff, 0xff]);
        assert_eq!(&bytes[8..10], &[0xfe, 0xff]);
        assert_eq!(BitmapHeader::from_buf(&bytes).unwrap(), header);
        assert_eq!(header.blob_len(), 0);
    }

    #[test]
    fn test_parse_header() {
        let bytes = [0x08, 0x00, 0x00, 0x10, 0x00, 0x00, 0x01, 0x00, 0x28, 0x00, 0x03, 0x00, 0xaa];
        let header = BitmapHeader::from_buf(&bytes).unwrap();
        assert_eq!(header.row_size_bytes, 8);
        assert_eq!(header.version(), 1);
        assert_eq!(header.bounds, BoundingBox::new(0, 1, 40, 3));

        assert!(matches!(
            BitmapHeader::from_buf(&bytes[..11]),
            Err(Error::InvalidHeader(_))
        ));
    }
}
