//! Pixel interpolation methods for the perspective resampler.
//!
//! Interpolation works on the raw bytes of a [`quadwarp_image::PixelBuffer`],
//! one byte at a time, so every supported pixel format is handled the same way.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, copies the pixel under the truncated coordinate
//! - **Bilinear**: Weighted average of the 4 surrounding pixels

mod bilinear;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::interpolate_pixel;
pub use interpolate::InterpolationMode;
