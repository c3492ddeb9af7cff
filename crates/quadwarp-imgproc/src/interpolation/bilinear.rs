use quadwarp_image::PixelBuffer;

/// Kernel for bilinear interpolation
///
/// Each byte of the pixel is interpolated independently and rounded to the
/// nearest `u8`. The right and bottom neighbours are clamped to the last column and
/// row, so a coordinate on the image edge only reads the edge pixels.
///
/// # Arguments
///
/// * `image` - The input pixel buffer.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `dst_pixel` - The destination pixel bytes.
pub(crate) fn bilinear_interpolation(image: &PixelBuffer, u: f64, v: f64, dst_pixel: &mut [u8]) {
    let (rows, cols) = (image.rows(), image.cols());

    let sx1 = (u.floor() as usize).min(cols - 1);
    let sy1 = (v.floor() as usize).min(rows - 1);

    let sx2 = (sx1 + 1).min(cols - 1);
    let sy2 = (sy1 + 1).min(rows - 1);

    let dx1 = u - sx1 as f64;
    let dx2 = 1.0 - dx1;
    let dy1 = v - sy1 as f64;
    let dy2 = 1.0 - dy1;

    let p1 = image.pixel(sx1, sy1);
    let p2 = image.pixel(sx2, sy1);
    let p3 = image.pixel(sx1, sy2);
    let p4 = image.pixel(sx2, sy2);

    for (k, out) in dst_pixel.iter_mut().enumerate() {
        let top = dx2 * p1[k] as f64 + dx1 * p2[k] as f64;
        let bottom = dx2 * p3[k] as f64 + dx1 * p4[k] as f64;
        *out = (dy2 * top + dy1 * bottom).round() as u8;
    }
}
