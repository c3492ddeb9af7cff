use crate::{ImageSize, PixelFormat};

/// An error type for the image and transform modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image size has a zero dimension.
    #[error("Invalid image size: width and height must be > 0, got {0}x{1}")]
    InvalidImageSize(usize, usize),

    /// Error when the row stride cannot hold a row or is not 4-byte aligned.
    #[error("Invalid stride {0}: must be >= {1} and a multiple of 4")]
    InvalidStride(usize, usize),

    /// Error when the pixel data length does not match stride * height.
    #[error("Data length ({0}) does not match the buffer size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the source quadrilateral is missing or does not have 4 corners.
    #[error("Invalid quadrilateral: expected 4 corners, got {0}")]
    InvalidQuadrilateral(usize),

    /// Error when the requested output dimensions are not positive.
    #[error("Invalid output dimensions {0}x{1}: width and height must be > 0")]
    InvalidDimensions(usize, usize),

    /// Error when a quadrilateral collapses and the homography is undefined.
    #[error("Degenerate quadrilateral: the projective mapping is singular")]
    DegenerateQuadrilateral,

    /// Error when the determinant of a matrix is zero.
    #[error("Cannot compute the determinant of the transformation matrix")]
    CannotComputeDeterminant,

    /// Error when the filter does not accept the source pixel format.
    #[error("Unsupported pixel format {0:?}")]
    UnsupportedPixelFormat(PixelFormat),

    /// Error when the destination buffer format differs from the expected one.
    #[error("Pixel format mismatch: expected {0:?}, found {1:?}")]
    FormatMismatch(PixelFormat, PixelFormat),

    /// Error when the destination buffer size differs from the expected one.
    #[error("Dimension mismatch: expected {0}, found {1}")]
    DimensionMismatch(ImageSize, ImageSize),

    /// Error when the parallel execution could not be set up.
    #[error("Parallel execution failed: {0}")]
    ParallelExecution(String),
}
