use crate::{
    homography::Homography,
    interpolation::{interpolate_pixel, InterpolationMode},
    parallel::{self, ExecutionStrategy},
};

use quadwarp_image::{ImageError, PixelBuffer};

/// Fill a destination buffer by inverse mapping into the source buffer.
///
/// For every destination pixel `(x, y)` the source coordinate is
/// `m * (x, y, 1)` divided by its homogeneous component. Pixels that map
/// outside the source are left untouched, so a freshly allocated destination
/// keeps zeros there. Only the pixel bytes of each destination row are
/// written, never the stride padding.
///
/// * `src` - The source buffer, read only.
/// * `dst` - The destination buffer, same pixel format as `src`.
/// * `m` - The 3x3 homography dst -> src.
/// * `interpolation` - The interpolation mode to use.
/// * `strategy` - How the destination rows are distributed over threads.
///
/// # Errors
///
/// Returns [`ImageError::FormatMismatch`] if the buffers have different
/// pixel formats, or an execution error if the thread pool cannot be built.
///
/// # Example
///
/// ```
/// use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
/// use quadwarp_imgproc::homography::Homography;
/// use quadwarp_imgproc::interpolation::InterpolationMode;
/// use quadwarp_imgproc::parallel::ExecutionStrategy;
/// use quadwarp_imgproc::warp::warp_quadrilateral;
///
/// let src = PixelBuffer::from_packed(
///     ImageSize { width: 2, height: 2 },
///     PixelFormat::Indexed8,
///     &[0, 10, 20, 30],
/// ).unwrap();
///
/// // sample the source at half the destination coordinates
/// let m = Homography::from_array([0.5, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 1.0]);
///
/// let mut dst = PixelBuffer::new(ImageSize { width: 3, height: 1 }, PixelFormat::Indexed8).unwrap();
///
/// warp_quadrilateral(&src, &mut dst, &m, InterpolationMode::Bilinear, ExecutionStrategy::Serial)
///     .unwrap();
///
/// assert_eq!(dst.to_packed(), vec![0, 5, 10]);
/// ```
pub fn warp_quadrilateral(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    m: &Homography,
    interpolation: InterpolationMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if src.format() != dst.format() {
        return Err(ImageError::FormatMismatch(src.format(), dst.format()));
    }

    let (src_cols, src_rows) = (src.cols() as f64, src.rows() as f64);

    parallel::par_iter_rows_resample(dst, strategy, |x, y, dst_pixel| {
        let (u, v) = m.transform_point(x as f64, y as f64);
        // NaN fails every comparison and is skipped as well
        if u >= 0.0 && v >= 0.0 && u < src_cols && v < src_rows {
            interpolate_pixel(src, u, v, dst_pixel, interpolation);
        }
    })?;

    Ok(())
}

/// Applies a perspective transformation to a pixel buffer.
///
/// Unlike [`warp_quadrilateral`] the matrix maps source to destination and is
/// inverted first. Rows are processed in parallel on the global thread pool.
///
/// * `src` - The source buffer.
/// * `dst` - The destination buffer, same pixel format as `src`.
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if the matrix is singular.
pub fn warp_perspective(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    m: &Homography,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    let inv_m = m.inverse()?;
    warp_quadrilateral(
        src,
        dst,
        &inv_m,
        interpolation,
        ExecutionStrategy::default(),
    )
}
