//! Quadrilateral perspective rectification of raster images.
//!
//! ```
//! use quadwarp::image::{ImageSize, PixelBuffer, PixelFormat};
//! use quadwarp::imgproc::{filter::rectify, homography::Quadrilateral};
//! use quadwarp::imgproc::interpolation::InterpolationMode;
//!
//! let src = PixelBuffer::new(ImageSize { width: 640, height: 480 }, PixelFormat::Argb32).unwrap();
//! let page = Quadrilateral::new([40, 25], [610, 60], [590, 470], [20, 440]);
//!
//! let dst = rectify(&src, &page, ImageSize { width: 210, height: 297 }, InterpolationMode::Bilinear)
//!     .unwrap();
//! assert_eq!(dst.format(), PixelFormat::Argb32);
//! ```

#[doc(inline)]
pub use quadwarp_image as image;

#[doc(inline)]
pub use quadwarp_imgproc as imgproc;
