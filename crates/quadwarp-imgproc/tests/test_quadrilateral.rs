use quadwarp_image::{ImageError, ImageSize, PixelBuffer, PixelFormat};
use quadwarp_imgproc::filter::{rectify, QuadrilateralTransform, TransformationFilter};
use quadwarp_imgproc::homography::{map_quad_to_quad, Point2d, Quadrilateral};
use quadwarp_imgproc::interpolation::InterpolationMode;
use quadwarp_imgproc::parallel::ExecutionStrategy;
use rand::Rng;

fn corners(quad: &Quadrilateral) -> Vec<Point2d> {
    quad.corners().to_vec()
}

/// Indexed buffer where every byte is `f(x, y)`.
fn indexed_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> u8,
) -> Result<PixelBuffer, ImageError> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(f(x, y));
        }
    }
    PixelBuffer::from_packed(ImageSize { width, height }, PixelFormat::Indexed8, &data)
}

#[test]
fn test_identity_ramp_4x4() -> Result<(), ImageError> {
    let src = indexed_from_fn(4, 4, |x, y| (x + 4 * y) as u8)?;

    let transform = QuadrilateralTransform::new(
        vec![[0, 0].into(), [3, 0].into(), [3, 3].into(), [0, 3].into()],
        ImageSize {
            width: 4,
            height: 4,
        },
    );
    let dst = transform.apply(&src)?;

    assert_eq!(dst.to_packed(), (0..16).collect::<Vec<u8>>());
    assert_eq!(dst.as_slice(), src.as_slice());
    Ok(())
}

#[test]
fn test_identity_every_format() -> Result<(), ImageError> {
    let mut rng = rand::rng();

    for format in PixelFormat::ALL {
        for _ in 0..4 {
            let size = ImageSize {
                width: rng.random_range(2..13),
                height: rng.random_range(2..13),
            };
            let packed: Vec<u8> = (0..size.width * size.height * format.bytes_per_pixel())
                .map(|_| rng.random())
                .collect();
            let src = PixelBuffer::from_packed(size, format, &packed)?;
            let rect = Quadrilateral::from_rect(size.width, size.height);

            for mode in [InterpolationMode::Bilinear, InterpolationMode::Nearest] {
                let dst = rectify(&src, &rect, size, mode)?;
                assert_eq!(dst.format(), format);
                assert_eq!(dst, src, "{format:?} {size} {mode:?}");
            }
        }
    }

    Ok(())
}

#[test]
fn test_identity_wide_source_stride() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 3,
        height: 3,
    };

    // 9 bytes of pixels, 16 bytes of stride, padding filled with garbage
    let mut data = vec![0xEEu8; 16 * 3];
    for y in 0..3 {
        for x in 0..9 {
            data[y * 16 + x] = (y * 9 + x) as u8;
        }
    }
    let src = PixelBuffer::from_raw(size, 16, PixelFormat::Rgb24, data)?;

    let dst = rectify(
        &src,
        &Quadrilateral::from_rect(3, 3),
        size,
        InterpolationMode::Bilinear,
    )?;

    assert_eq!(dst.stride(), 12);
    assert_eq!(dst.to_packed(), (0..27).collect::<Vec<u8>>());
    // destination padding stays zero
    assert!((0..3).all(|y| dst.as_slice()[y * 12 + 9..y * 12 + 12] == [0, 0, 0]));
    Ok(())
}

#[test]
fn test_affine_scale_linear_ramp() -> Result<(), ImageError> {
    let src = indexed_from_fn(4, 4, |x, y| (20 * x + 60 * y) as u8)?;

    // a 7x7 output over the whole 4x4 source samples it at (x / 2, y / 2)
    let dst = rectify(
        &src,
        &Quadrilateral::from_rect(4, 4),
        ImageSize {
            width: 7,
            height: 7,
        },
        InterpolationMode::Bilinear,
    )?;

    for y in 0..7 {
        for x in 0..7 {
            assert_eq!(dst.pixel(x, y), &[(10 * x + 30 * y) as u8], "({x}, {y})");
        }
    }
    Ok(())
}

#[test]
fn test_sub_rectangle_crop() -> Result<(), ImageError> {
    let src = indexed_from_fn(4, 4, |x, y| (x + 4 * y) as u8)?;

    let dst = rectify(
        &src,
        &Quadrilateral::new([1, 1], [2, 1], [2, 2], [1, 2]),
        ImageSize {
            width: 2,
            height: 2,
        },
        InterpolationMode::Nearest,
    )?;

    assert_eq!(dst.to_packed(), vec![5, 6, 9, 10]);
    Ok(())
}

#[test]
fn test_boundary_clamp_reads_edge_pixel() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 3,
        height: 2,
    };

    // the padding byte after every row would show up in a read past the edge
    #[rustfmt::skip]
    let data = vec![
        10, 20, 30, 255,
        40, 50, 60, 255,
    ];
    let src = PixelBuffer::from_raw(size, 4, PixelFormat::Indexed8, data)?;

    // 5x3 over a 3x2 source samples it at (x / 2, y / 2)
    let dst = rectify(
        &src,
        &Quadrilateral::from_rect(3, 2),
        ImageSize {
            width: 5,
            height: 3,
        },
        InterpolationMode::Bilinear,
    )?;

    #[rustfmt::skip]
    let expected = vec![
        10, 15, 20, 25, 30,
        25, 30, 35, 40, 45,
        40, 45, 50, 55, 60,
    ];
    assert_eq!(dst.to_packed(), expected);
    Ok(())
}

#[test]
fn test_out_of_bounds_pixels_stay_zero() -> Result<(), ImageError> {
    // values start at 1 so that only skipped pixels are zero
    let src = indexed_from_fn(4, 4, |x, y| (1 + x + 4 * y) as u8)?;

    // the left half of the region lies outside the source
    let dst = rectify(
        &src,
        &Quadrilateral::new([-2, 0], [1, 0], [1, 3], [-2, 3]),
        ImageSize {
            width: 4,
            height: 4,
        },
        InterpolationMode::Bilinear,
    )?;

    #[rustfmt::skip]
    let expected = vec![
        0, 0, 1, 2,
        0, 0, 5, 6,
        0, 0, 9, 10,
        0, 0, 13, 14,
    ];
    assert_eq!(dst.to_packed(), expected);
    Ok(())
}

#[test]
fn test_projective_ramp_is_sampled_linearly() -> Result<(), ImageError> {
    let src = indexed_from_fn(40, 40, |x, y| (2 * x + 3 * y) as u8)?;
    let quad = Quadrilateral::new([5, 4], [33, 8], [30, 35], [3, 30]);
    let size = ImageSize {
        width: 20,
        height: 15,
    };

    let dst = rectify(&src, &quad, size, InterpolationMode::Bilinear)?;
    let m = map_quad_to_quad(&Quadrilateral::from_rect(20, 15), &quad)?;

    for y in 0..size.height {
        for x in 0..size.width {
            let (u, v) = m.transform_point(x as f64, y as f64);
            let expected = 2.0 * u + 3.0 * v;
            let value = dst.pixel(x, y)[0] as f64;
            assert!(
                (value - expected).abs() <= 0.5 + 1e-6,
                "({x}, {y}) -> ({u}, {v}): {value} != {expected}"
            );
        }
    }

    // corners land on the quadrilateral corners
    assert_eq!(dst.pixel(0, 0), &[22]);
    assert_eq!(dst.pixel(19, 14), &[165]);
    Ok(())
}

#[test]
fn test_rgb_channels_are_independent() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 16,
        height: 16,
    };
    let mut packed = Vec::with_capacity(16 * 16 * 3);
    for y in 0..16 {
        for x in 0..16 {
            packed.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 77]);
        }
    }
    let src = PixelBuffer::from_packed(size, PixelFormat::Rgb24, &packed)?;

    let dst = rectify(
        &src,
        &Quadrilateral::new([1.5, 2.0], [13.25, 1.0], [14.0, 12.5], [0.5, 14.0]),
        ImageSize {
            width: 11,
            height: 9,
        },
        InterpolationMode::Bilinear,
    )?;

    for y in 0..9 {
        for x in 0..11 {
            assert_eq!(dst.pixel(x, y)[2], 77, "({x}, {y})");
        }
    }
    Ok(())
}

#[test]
fn test_strategies_agree() -> Result<(), ImageError> {
    let src = indexed_from_fn(32, 24, |x, y| ((x * 7 + y * 13) % 256) as u8)?;
    let quad = Quadrilateral::new([2, 3], [29, 1], [31, 22], [0, 20]);
    let size = ImageSize {
        width: 17,
        height: 13,
    };

    let mut outputs = Vec::new();
    for strategy in [
        ExecutionStrategy::Serial,
        ExecutionStrategy::ParallelRows,
        ExecutionStrategy::Fixed(3),
    ] {
        let transform = QuadrilateralTransform::new(corners(&quad), size).with_strategy(strategy);
        outputs.push(transform.apply(&src)?);
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
    Ok(())
}

#[test]
fn test_degenerate_leaves_destination_untouched() -> Result<(), ImageError> {
    let src = indexed_from_fn(32, 32, |x, y| (x + y) as u8)?;
    let size = ImageSize {
        width: 8,
        height: 8,
    };
    let quad = Quadrilateral::new([0, 0], [10, 0], [20, 0], [5, 20]);
    let transform = QuadrilateralTransform::new(corners(&quad), size);

    let mut dst = PixelBuffer::from_raw(size, 8, PixelFormat::Indexed8, vec![0x77; 64])?;
    let res = transform.apply_into(&src, &mut dst);

    assert_eq!(res, Err(ImageError::DegenerateQuadrilateral));
    assert!(dst.as_slice().iter().all(|&b| b == 0x77));

    assert_eq!(
        transform.apply(&src),
        Err(ImageError::DegenerateQuadrilateral)
    );
    Ok(())
}

#[test]
fn test_apply_into_mismatch_leaves_destination_untouched() -> Result<(), ImageError> {
    let src = indexed_from_fn(8, 8, |x, y| (x * y) as u8)?;
    let size = ImageSize {
        width: 4,
        height: 4,
    };
    let transform = QuadrilateralTransform::new(corners(&Quadrilateral::from_rect(8, 8)), size);

    let mut wrong_format = PixelBuffer::from_raw(size, 12, PixelFormat::Rgb24, vec![0x55; 48])?;
    assert_eq!(
        transform.apply_into(&src, &mut wrong_format),
        Err(ImageError::FormatMismatch(
            PixelFormat::Indexed8,
            PixelFormat::Rgb24
        ))
    );
    assert!(wrong_format.as_slice().iter().all(|&b| b == 0x55));

    let wrong = ImageSize {
        width: 5,
        height: 4,
    };
    let mut wrong_size = PixelBuffer::from_raw(wrong, 8, PixelFormat::Indexed8, vec![0x55; 32])?;
    assert_eq!(
        transform.apply_into(&src, &mut wrong_size),
        Err(ImageError::DimensionMismatch(size, wrong))
    );
    assert!(wrong_size.as_slice().iter().all(|&b| b == 0x55));

    let mut dst = PixelBuffer::new(size, PixelFormat::Indexed8)?;
    transform.apply_into(&src, &mut dst)?;
    assert_eq!(dst, transform.apply(&src)?);
    Ok(())
}

#[test]
fn test_resolution_is_carried_over() -> Result<(), ImageError> {
    let mut src = indexed_from_fn(8, 8, |x, _| x as u8)?;
    src.set_resolution(Some((96.0, 72.0)));

    let dst = rectify(
        &src,
        &Quadrilateral::new([1, 1], [6, 0], [7, 7], [0, 6]),
        ImageSize {
            width: 3,
            height: 5,
        },
        InterpolationMode::Nearest,
    )?;

    assert_eq!(dst.resolution(), Some((96.0, 72.0)));
    Ok(())
}
