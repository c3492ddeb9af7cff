#![deny(missing_docs)]
//! Raw pixel buffers and pixel formats used by the quadrilateral transform.

/// strided raw pixel buffer.
pub mod image;

/// Error types for the image module.
pub mod error;

/// pixel format table.
pub mod pixel_format;

pub use crate::error::ImageError;
pub use crate::image::{aligned_stride, ImageSize, PixelBuffer};
pub use crate::pixel_format::PixelFormat;
