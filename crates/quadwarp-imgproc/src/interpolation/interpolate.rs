use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use quadwarp_image::PixelBuffer;

/// Sampling policy used by the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// The coordinates must lie inside the image: `0 <= u < width` and
/// `0 <= v < height`.
///
/// # Arguments
///
/// * `image` - The source pixel buffer.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `dst_pixel` - The bytes of the destination pixel to write.
/// * `interpolation` - The interpolation mode to use.
pub fn interpolate_pixel(
    image: &PixelBuffer,
    u: f64,
    v: f64,
    dst_pixel: &mut [u8],
    interpolation: InterpolationMode,
) {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, dst_pixel),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, dst_pixel),
    }
}
