//! PBI bitmap generator
//!
//! This crate converts raster images into the 1-bit-per-pixel PBI format
//! used by small embedded displays, either as a binary `.pbi` file or as a
//! C source file for static linkage.
//!
//! # Example
//!
//! ```rust,no_run
//! use pbi_gen::{Bitmap, ColorMap};
//!
//! let bitmap = Bitmap::open("bitmaps/arrow.png", ColorMap::WHITE_IS_SET)?;
//! bitmap.save_pbi("bitmaps/arrow.pbi")?;
//! println!("{}", bitmap.to_source());
//! # Ok::<(), pbi_gen::Error>(())
//! ```

mod batch;
mod bitmap;
mod bounds;
mod color;
mod decode;
mod emit;
mod error;
mod header;
mod pack;
mod pixel;

pub use crate::{
    batch::{convert_dir, BatchConfig, BatchReport, Converted},
    bitmap::{pbi_path_for, source_path_for, Bitmap},
    bounds::BoundingBox,
    color::{ColorMap, ColorMapError, Shade, ALPHA_THRESHOLD, LUMINANCE_THRESHOLD},
    decode::decode,
    emit::{c_identifier, write_manifest, write_pbi, write_source},
    error::Error,
    header::{BitmapHeader, VERSION},
    pack::{row_size_bytes, PackedBlob},
    pixel::{ChannelLayout, Pixel, PixelGrid, RawImage, MAX_DIMENSION},
};
