//! Perspective resampling of pixel buffers.
//!
//! Every destination pixel is mapped back into the source through a
//! [`crate::homography::Homography`] and sampled there (inverse mapping), so
//! the destination has no holes.
//!
//! # Examples
//!
//! Shifting an image left by one pixel:
//!
//! ```
//! use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
//! use quadwarp_imgproc::homography::Homography;
//! use quadwarp_imgproc::interpolation::InterpolationMode;
//! use quadwarp_imgproc::warp::warp_perspective;
//!
//! let size = ImageSize { width: 3, height: 1 };
//! let src = PixelBuffer::from_packed(size, PixelFormat::Indexed8, &[1, 2, 3]).unwrap();
//! let mut dst = PixelBuffer::new(size, PixelFormat::Indexed8).unwrap();
//!
//! let m = Homography::from_array([1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
//! warp_perspective(&src, &mut dst, &m, InterpolationMode::Bilinear).unwrap();
//!
//! assert_eq!(dst.to_packed(), vec![2, 3, 0]);
//! ```

mod perspective;

pub use perspective::{warp_perspective, warp_quadrilateral};
