use crate::{error::ImageError, pixel_format::PixelFormat};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use quadwarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Row stride for a buffer of `width` pixels, rounded up to a multiple of 4 bytes.
///
/// # Examples
///
/// ```
/// use quadwarp_image::{aligned_stride, PixelFormat};
///
/// assert_eq!(aligned_stride(5, PixelFormat::Rgb24), 16);
/// assert_eq!(aligned_stride(3, PixelFormat::Indexed8), 4);
/// assert_eq!(aligned_stride(3, PixelFormat::Argb32), 12);
/// ```
pub const fn aligned_stride(width: usize, format: PixelFormat) -> usize {
    (width * format.bytes_per_pixel() + 3) & !3
}

/// A raw pixel buffer with a padded row stride.
///
/// Rows are stored contiguously, each `stride` bytes long. Only the first
/// `width * bytes_per_pixel` bytes of a row hold pixels, the rest is padding.
///
/// Invariants: `stride >= width * bytes_per_pixel`, `stride % 4 == 0` and
/// `data.len() == stride * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    size: ImageSize,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
    resolution: Option<(f32, f32)>,
}

impl PixelBuffer {
    /// Create a zero-initialized buffer with a 4-byte aligned stride.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `format` - The pixel format of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageSize`] if the width or the height is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
    ///
    /// let buffer = PixelBuffer::new(
    ///     ImageSize { width: 5, height: 2 },
    ///     PixelFormat::Rgb24,
    /// ).unwrap();
    ///
    /// assert_eq!(buffer.stride(), 16);
    /// assert_eq!(buffer.as_slice().len(), 32);
    /// assert!(buffer.as_slice().iter().all(|&b| b == 0));
    /// ```
    pub fn new(size: ImageSize, format: PixelFormat) -> Result<Self, ImageError> {
        check_size(size)?;
        let stride = aligned_stride(size.width, format);
        Ok(Self {
            size,
            stride,
            format,
            data: vec![0u8; stride * size.height],
            resolution: None,
        })
    }

    /// Wrap existing pixel memory.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `stride` - The number of bytes per row, including padding.
    /// * `format` - The pixel format of the data.
    /// * `data` - The raw bytes, `stride * height` long.
    ///
    /// # Errors
    ///
    /// Fails if the size is empty, the stride violates the buffer invariants or
    /// the data length does not match `stride * height`.
    pub fn from_raw(
        size: ImageSize,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        check_size(size)?;

        let row_bytes = size.width * format.bytes_per_pixel();
        if stride < row_bytes || stride % 4 != 0 {
            return Err(ImageError::InvalidStride(stride, row_bytes));
        }

        if data.len() != stride * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                stride * size.height,
            ));
        }

        Ok(Self {
            size,
            stride,
            format,
            data,
            resolution: None,
        })
    }

    /// Create a buffer from tightly packed rows, adding the row padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
    ///
    /// let buffer = PixelBuffer::from_packed(
    ///     ImageSize { width: 3, height: 2 },
    ///     PixelFormat::Indexed8,
    ///     &[1, 2, 3, 4, 5, 6],
    /// ).unwrap();
    ///
    /// assert_eq!(buffer.as_slice(), &[1, 2, 3, 0, 4, 5, 6, 0]);
    /// assert_eq!(buffer.to_packed(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn from_packed(
        size: ImageSize,
        format: PixelFormat,
        packed: &[u8],
    ) -> Result<Self, ImageError> {
        let mut buffer = Self::new(size, format)?;

        let row_bytes = buffer.row_bytes();
        if packed.len() != row_bytes * size.height {
            return Err(ImageError::InvalidDataLength(
                packed.len(),
                row_bytes * size.height,
            ));
        }

        buffer
            .data
            .chunks_exact_mut(buffer.stride)
            .zip(packed.chunks_exact(row_bytes))
            .for_each(|(dst_row, src_row)| dst_row[..row_bytes].copy_from_slice(src_row));

        Ok(buffer)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Number of pixel bytes in a row, excluding padding.
    pub fn row_bytes(&self) -> usize {
        self.size.width * self.bytes_per_pixel()
    }

    /// Horizontal and vertical resolution in dots per inch, if known.
    pub fn resolution(&self) -> Option<(f32, f32)> {
        self.resolution
    }

    /// Set the resolution metadata in dots per inch.
    pub fn set_resolution(&mut self, resolution: Option<(f32, f32)>) {
        self.resolution = resolution;
    }

    /// Byte offset of the pixel at `(x, y)`.
    ///
    /// Computes `y * stride + x * bytes_per_pixel`. Bounds are checked in debug builds.
    #[inline]
    pub fn offset_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.size.width && y < self.size.height,
            "pixel ({x}, {y}) out of bounds {}",
            self.size
        );
        y * self.stride + x * self.bytes_per_pixel()
    }

    /// Bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let offset = self.offset_of(x, y);
        &self.data[offset..offset + self.bytes_per_pixel()]
    }

    /// Mutable bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let offset = self.offset_of(x, y);
        let bpp = self.bytes_per_pixel();
        &mut self.data[offset..offset + bpp]
    }

    /// Bytes of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixel(x, y))
    }

    /// Write the bytes of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Fails if the coordinates are out of bounds or the value length does
    /// not match the bytes per pixel.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: &[u8]) -> Result<(), ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        if value.len() != self.bytes_per_pixel() {
            return Err(ImageError::InvalidDataLength(
                value.len(),
                self.bytes_per_pixel(),
            ));
        }
        self.pixel_mut(x, y).copy_from_slice(value);
        Ok(())
    }

    /// Pixel bytes of row `y`, without the padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Mutable pixel bytes of row `y`, without the padding.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let row_bytes = self.row_bytes();
        &mut self.data[start..start + row_bytes]
    }

    /// The raw bytes including row padding.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The mutable raw bytes including row padding.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy the pixels into a tightly packed vector, dropping the row padding.
    pub fn to_packed(&self) -> Vec<u8> {
        let row_bytes = self.row_bytes();
        let mut packed = Vec::with_capacity(row_bytes * self.size.height);
        self.data
            .chunks_exact(self.stride)
            .for_each(|row| packed.extend_from_slice(&row[..row_bytes]));
        packed
    }

    /// Consume the buffer and return its raw bytes including padding.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

fn check_size(size: ImageSize) -> Result<(), ImageError> {
    if size.width == 0 || size.height == 0 {
        return Err(ImageError::InvalidImageSize(size.width, size.height));
    }
    Ok(())
}
