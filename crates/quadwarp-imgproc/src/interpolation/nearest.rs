use quadwarp_image::PixelBuffer;

/// Kernel for nearest neighbor interpolation
///
/// Copies the bytes of the pixel at `(floor(u), floor(v))` verbatim.
///
/// # Arguments
///
/// * `image` - The input pixel buffer.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `dst_pixel` - The destination pixel bytes.
pub(crate) fn nearest_neighbor_interpolation(
    image: &PixelBuffer,
    u: f64,
    v: f64,
    dst_pixel: &mut [u8],
) {
    let iu = (u.floor() as usize).min(image.cols() - 1);
    let iv = (v.floor() as usize).min(image.rows() - 1);

    dst_pixel.copy_from_slice(image.pixel(iu, iv));
}
