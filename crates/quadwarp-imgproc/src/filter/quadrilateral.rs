use quadwarp_image::{ImageError, ImageSize, PixelBuffer};

use super::TransformationFilter;
use crate::{
    homography::{map_quad_to_quad, Homography, Point2d, Quadrilateral},
    interpolation::InterpolationMode,
    parallel::ExecutionStrategy,
    warp::warp_quadrilateral,
};

/// Maps a quadrilateral region of the source onto a rectangle of a fixed size.
///
/// The corners are given in source pixel coordinates in the order top-left,
/// top-right, bottom-right, bottom-left. The output has the requested size and
/// the pixel format of the source.
///
/// # Example
///
/// ```
/// use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
/// use quadwarp_imgproc::filter::{QuadrilateralTransform, TransformationFilter};
/// use quadwarp_imgproc::homography::Point2d;
///
/// let src = PixelBuffer::new(ImageSize { width: 64, height: 48 }, PixelFormat::Rgb24).unwrap();
///
/// let corners: Vec<Point2d> = vec![[5, 3].into(), [60, 8].into(), [58, 45].into(), [2, 40].into()];
/// let transform = QuadrilateralTransform::new(corners, ImageSize { width: 32, height: 32 });
///
/// let dst = transform.apply(&src).unwrap();
/// assert_eq!(dst.size(), ImageSize { width: 32, height: 32 });
/// assert_eq!(dst.format(), PixelFormat::Rgb24);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QuadrilateralTransform {
    source_quadrilateral: Vec<Point2d>,
    new_size: ImageSize,
    interpolation: InterpolationMode,
    strategy: ExecutionStrategy,
}

impl QuadrilateralTransform {
    /// Create a new transform with bilinear sampling.
    ///
    /// # Arguments
    ///
    /// * `source_quadrilateral` - The corners of the region in the source.
    /// * `new_size` - The size of the output buffer.
    pub fn new(source_quadrilateral: Vec<Point2d>, new_size: ImageSize) -> Self {
        Self {
            source_quadrilateral,
            new_size,
            interpolation: InterpolationMode::default(),
            strategy: ExecutionStrategy::default(),
        }
    }

    /// Set the sampling policy.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set how the output rows are distributed over threads.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The corners of the source region.
    pub fn source_quadrilateral(&self) -> &[Point2d] {
        &self.source_quadrilateral
    }

    /// The requested output size.
    pub fn new_size(&self) -> ImageSize {
        self.new_size
    }

    /// The sampling policy.
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// The execution strategy.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    fn quadrilateral(&self) -> Result<Quadrilateral, ImageError> {
        Quadrilateral::try_from(self.source_quadrilateral.as_slice())
    }
}

impl TransformationFilter for QuadrilateralTransform {
    type Plan = Homography;

    fn output_size(&self, _src: &PixelBuffer) -> Result<ImageSize, ImageError> {
        self.quadrilateral()?;

        let ImageSize { width, height } = self.new_size;
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(width, height));
        }

        Ok(self.new_size)
    }

    fn plan(&self, _src: &PixelBuffer, dst_size: ImageSize) -> Result<Homography, ImageError> {
        let dst_rect = Quadrilateral::from_rect(dst_size.width, dst_size.height);
        let m = map_quad_to_quad(&dst_rect, &self.quadrilateral()?)?;

        log::debug!("destination to source homography: {:?}", m.as_array());

        Ok(m)
    }

    fn process(
        &self,
        plan: &Homography,
        src: &PixelBuffer,
        dst: &mut PixelBuffer,
    ) -> Result<(), ImageError> {
        log::trace!(
            "resampling {} -> {} with {:?} on {:?}",
            src.size(),
            dst.size(),
            self.interpolation,
            self.strategy
        );
        warp_quadrilateral(src, dst, plan, self.interpolation, self.strategy)
    }
}

/// Rectify a quadrilateral region of `src` into a new buffer of `new_size`.
///
/// Shorthand for [`QuadrilateralTransform::apply`](TransformationFilter::apply).
///
/// # Arguments
///
/// * `src` - The source buffer.
/// * `corners` - Top-left, top-right, bottom-right and bottom-left corners in `src`.
/// * `new_size` - The size of the output buffer.
/// * `interpolation` - The sampling policy.
///
/// # Example
///
/// ```
/// use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
/// use quadwarp_imgproc::filter::rectify;
/// use quadwarp_imgproc::homography::Quadrilateral;
/// use quadwarp_imgproc::interpolation::InterpolationMode;
///
/// let size = ImageSize { width: 3, height: 2 };
/// let src = PixelBuffer::from_packed(size, PixelFormat::Indexed8, &[1, 2, 3, 4, 5, 6]).unwrap();
///
/// let dst = rectify(&src, &Quadrilateral::from_rect(3, 2), size, InterpolationMode::Bilinear)
///     .unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn rectify(
    src: &PixelBuffer,
    corners: &Quadrilateral,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<PixelBuffer, ImageError> {
    QuadrilateralTransform::new(corners.corners().to_vec(), new_size)
        .with_interpolation(interpolation)
        .apply(src)
}
