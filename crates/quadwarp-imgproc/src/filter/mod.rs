//! Size changing filters
//!
//! A size changing filter produces an output buffer whose size is decided by
//! the filter rather than copied from the source. The [`TransformationFilter`]
//! trait captures the shared pipeline: validate the source format, compute
//! the output size, prepare the per-call state, allocate and process.

use quadwarp_image::{ImageError, ImageSize, PixelBuffer, PixelFormat};

mod quadrilateral;
pub use quadrilateral::{rectify, QuadrilateralTransform};

/// Identity translation for every supported pixel format.
pub const FORMAT_TRANSLATIONS: &[(PixelFormat, PixelFormat)] = &[
    (PixelFormat::Indexed8, PixelFormat::Indexed8),
    (PixelFormat::Rgb24, PixelFormat::Rgb24),
    (PixelFormat::Rgb32, PixelFormat::Rgb32),
    (PixelFormat::Argb32, PixelFormat::Argb32),
    (PixelFormat::PArgb32, PixelFormat::PArgb32),
];

/// A filter that creates an output buffer of a different size than its input.
///
/// Implementors provide the size computation, an optional per-call plan and
/// the processing step. The provided [`apply`](TransformationFilter::apply)
/// and [`apply_into`](TransformationFilter::apply_into) methods run every
/// validation before touching or allocating the destination.
pub trait TransformationFilter {
    /// Per-call state computed before the destination is allocated.
    type Plan: Sync;

    /// Supported source formats and the destination format each one produces.
    fn format_translations(&self) -> &'static [(PixelFormat, PixelFormat)] {
        FORMAT_TRANSLATIONS
    }

    /// The destination pixel format for a source buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedPixelFormat`] if the source format is
    /// not in the translation table.
    fn destination_format(&self, src: &PixelBuffer) -> Result<PixelFormat, ImageError> {
        self.format_translations()
            .iter()
            .find(|(from, _)| *from == src.format())
            .map(|(_, to)| *to)
            .ok_or(ImageError::UnsupportedPixelFormat(src.format()))
    }

    /// Compute the size of the destination buffer.
    fn output_size(&self, src: &PixelBuffer) -> Result<ImageSize, ImageError>;

    /// Compute the per-call state for a destination of `dst_size`.
    fn plan(&self, src: &PixelBuffer, dst_size: ImageSize) -> Result<Self::Plan, ImageError>;

    /// Fill the destination buffer.
    fn process(
        &self,
        plan: &Self::Plan,
        src: &PixelBuffer,
        dst: &mut PixelBuffer,
    ) -> Result<(), ImageError>;

    /// Apply the filter and return a newly allocated destination buffer.
    ///
    /// The source resolution metadata is copied onto the result.
    fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer, ImageError> {
        let dst_format = self.destination_format(src)?;
        let dst_size = self.output_size(src)?;
        let plan = self.plan(src, dst_size)?;

        log::debug!("allocating {dst_size} destination as {dst_format}");

        let mut dst = PixelBuffer::new(dst_size, dst_format)?;
        self.process(&plan, src, &mut dst)?;
        dst.set_resolution(src.resolution());

        Ok(dst)
    }

    /// Apply the filter into a caller supplied destination buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::FormatMismatch`] or [`ImageError::DimensionMismatch`]
    /// if the destination does not match the expected format and size. The
    /// destination is left untouched on every validation error.
    fn apply_into(&self, src: &PixelBuffer, dst: &mut PixelBuffer) -> Result<(), ImageError> {
        let dst_format = self.destination_format(src)?;
        if dst.format() != dst_format {
            return Err(ImageError::FormatMismatch(dst_format, dst.format()));
        }

        let dst_size = self.output_size(src)?;
        if dst.size() != dst_size {
            return Err(ImageError::DimensionMismatch(dst_size, dst.size()));
        }

        let plan = self.plan(src, dst_size)?;
        self.process(&plan, src, dst)
    }
}
