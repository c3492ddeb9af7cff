/// Byte layout of one pixel in a [`crate::PixelBuffer`].
///
/// The set is closed: these are the layouts a host bitmap layer hands over
/// after locking its memory. Channels are stored in the host's native byte
/// order; the transform treats every byte as an independent sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit palette index per pixel.
    Indexed8,
    /// 24-bit RGB, 3 bytes per pixel.
    Rgb24,
    /// 32-bit RGB with an unused padding byte.
    Rgb32,
    /// 32-bit RGB with straight alpha.
    Argb32,
    /// 32-bit RGB with premultiplied alpha.
    PArgb32,
}

impl PixelFormat {
    /// All supported pixel formats.
    pub const ALL: [PixelFormat; 5] = [
        PixelFormat::Indexed8,
        PixelFormat::Rgb24,
        PixelFormat::Rgb32,
        PixelFormat::Argb32,
        PixelFormat::PArgb32,
    ];

    /// Number of bytes used to store one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgb32 | PixelFormat::Argb32 | PixelFormat::PArgb32 => 4,
        }
    }

    /// Number of bits used to store one pixel.
    pub const fn bits_per_pixel(self) -> usize {
        self.bytes_per_pixel() * 8
    }

    /// Whether the format carries an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb32 | PixelFormat::PArgb32)
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PixelFormat::Indexed8 => "8bpp indexed",
            PixelFormat::Rgb24 => "24bpp RGB",
            PixelFormat::Rgb32 => "32bpp RGB",
            PixelFormat::Argb32 => "32bpp ARGB",
            PixelFormat::PArgb32 => "32bpp premultiplied ARGB",
        };
        write!(f, "{name}")
    }
}
