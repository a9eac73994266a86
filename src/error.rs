//! Error types for bitmap conversion.
//!
//! This module defines all possible errors that can occur while decoding a
//! source image, converting it into a PBI bitmap and writing the results.

use std::path::PathBuf;
use thiserror::Error;

use crate::bounds::BoundingBox;

/// Main error type for conversions.
///
/// A conversion either completes or fails with one of these; there is no
/// partial result and nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// The decoded samples do not describe a consistent image.
    ///
    /// Raised when a row's sample count is not a multiple of the channel
    /// count, or when the number of rows or pixels per row does not match
    /// the image dimensions.
    #[error("Malformed image: {0}")]
    MalformedImage(String),

    /// The source image uses a channel count other than 1 to 4.
    #[error("Unsupported channel layout with {0} channels")]
    UnsupportedChannelLayout(u8),

    /// Image dimensions do not fit the signed 16-bit header fields.
    #[error("Image is {width}x{height}, at most 32767 pixels per side are supported")]
    ImageTooLarge { width: u32, height: u32 },

    /// A bounding box reaches outside the image it is applied to.
    #[error("Bounding box {0:?} does not fit the image")]
    InvalidBounds(BoundingBox),

    #[error("Invalid PBI header: {0}")]
    InvalidHeader(String),

    /// Two sources in one batch map to the same output files.
    ///
    /// Happens for stems differing only in the extension's case, such as
    /// `logo.png` and `logo.PNG`. The first source in sorted order wins.
    #[error("'{}' would overwrite the output of '{}'", .path.display(), .first.display())]
    DuplicateOutput { path: PathBuf, first: PathBuf },

    /// Source image could not be decoded.
    ///
    /// Wraps errors from the `image` crate for unreadable or unknown
    /// container formats.
    #[error(transparent)]
    DecodeError(#[from] image::ImageError),

    /// An output sink could not be written.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
