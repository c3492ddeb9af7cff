use argh::FromArgs;
use image::DynamicImage;
use quadwarp_image::{ImageSize, PixelBuffer, PixelFormat};
use quadwarp_imgproc::{
    filter::{QuadrilateralTransform, TransformationFilter},
    homography::Point2d,
    interpolation::InterpolationMode,
};

/// Rectifies a quadrilateral region of an image, e.g. a photographed document
#[derive(Debug, FromArgs)]
struct Args {
    /// input image path
    #[argh(positional)]
    input: String,

    /// output image path
    #[argh(option, short = 'o', default = "String::from(\"rectified.png\")")]
    output: String,

    /// corners as x0,y0,x1,y1,x2,y2,x3,y3 (top-left, top-right, bottom-right, bottom-left)
    #[argh(option, short = 'c')]
    corners: String,

    /// output width in pixels
    #[argh(option)]
    width: usize,

    /// output height in pixels
    #[argh(option)]
    height: usize,

    /// use nearest neighbor sampling instead of bilinear
    #[argh(switch, short = 'n')]
    nearest: bool,
}

fn parse_corners(value: &str) -> Result<Vec<Point2d>, String> {
    let coords = value
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    if coords.len() != 8 {
        return Err(format!("expected 8 coordinates, got {}", coords.len()));
    }

    Ok(coords
        .chunks_exact(2)
        .map(|p| Point2d::new(p[0], p[1]))
        .collect())
}

/// Wrap a decoded image into a pixel buffer, keeping 8 bits per channel.
fn to_pixel_buffer(img: DynamicImage) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let buffer = match img {
        DynamicImage::ImageLuma8(gray) => {
            PixelBuffer::from_packed(size, PixelFormat::Indexed8, gray.as_raw())?
        }
        DynamicImage::ImageRgb8(rgb) => {
            PixelBuffer::from_packed(size, PixelFormat::Rgb24, rgb.as_raw())?
        }
        other => PixelBuffer::from_packed(size, PixelFormat::Argb32, other.to_rgba8().as_raw())?,
    };

    Ok(buffer)
}

fn from_pixel_buffer(buffer: &PixelBuffer) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (width, height) = (buffer.width() as u32, buffer.height() as u32);
    let packed = buffer.to_packed();

    let img: Option<DynamicImage> = match buffer.format() {
        PixelFormat::Indexed8 => image::GrayImage::from_raw(width, height, packed).map(Into::into),
        PixelFormat::Rgb24 => image::RgbImage::from_raw(width, height, packed).map(Into::into),
        _ => image::RgbaImage::from_raw(width, height, packed).map(Into::into),
    };

    img.ok_or_else(|| "pixel buffer does not fit the image dimensions".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let src = to_pixel_buffer(image::open(&args.input)?)?;
    log::info!("loaded {} as {}", src.size(), src.format());

    let interpolation = if args.nearest {
        InterpolationMode::Nearest
    } else {
        InterpolationMode::Bilinear
    };

    let transform = QuadrilateralTransform::new(
        parse_corners(&args.corners)?,
        ImageSize {
            width: args.width,
            height: args.height,
        },
    )
    .with_interpolation(interpolation);

    let now = std::time::Instant::now();
    let dst = transform.apply(&src)?;
    log::info!("rectified to {} in {:?}", dst.size(), now.elapsed());

    from_pixel_buffer(&dst)?.save(&args.output)?;
    println!("saved {}", args.output);

    Ok(())
}
