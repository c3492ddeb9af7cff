//! Projective mappings between quadrilaterals.
//!
//! A [`Homography`] maps the homogeneous point `(x, y, 1)` to `(x', y', w')`
//! and the projected point is `(x' / w', y' / w')`. The mapping between two
//! quadrilaterals is composed from two unit square mappings:
//!
//! ```text
//! quad_to_quad(src, dst) = square_to_quad(dst) * adj(square_to_quad(src))
//! ```
//!
//! The adjugate is the inverse scaled by the determinant, and that scale
//! cancels out in the homogeneous division.

use quadwarp_image::ImageError;

/// Threshold below which a quadrilateral is treated as a parallelogram.
const PARALLELOGRAM_EPSILON: f64 = 1e-13;

/// A 2D point with floating point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2d {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point2d {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2d {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<(f64, f64)> for Point2d {
    fn from(p: (f64, f64)) -> Self {
        Self { x: p.0, y: p.1 }
    }
}

impl From<[i32; 2]> for Point2d {
    fn from(p: [i32; 2]) -> Self {
        Self {
            x: p[0] as f64,
            y: p[1] as f64,
        }
    }
}

impl From<(i32, i32)> for Point2d {
    fn from(p: (i32, i32)) -> Self {
        Self {
            x: p.0 as f64,
            y: p.1 as f64,
        }
    }
}

/// Four corners in the order top-left, top-right, bottom-right, bottom-left.
///
/// The order defines the correspondence with the corners of another
/// quadrilateral. No geometric validation is done on construction; a
/// collapsed quadrilateral is detected when its mapping is computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrilateral(pub [Point2d; 4]);

impl Quadrilateral {
    /// Create a quadrilateral from its corners.
    pub fn new(
        top_left: impl Into<Point2d>,
        top_right: impl Into<Point2d>,
        bottom_right: impl Into<Point2d>,
        bottom_left: impl Into<Point2d>,
    ) -> Self {
        Self([
            top_left.into(),
            top_right.into(),
            bottom_right.into(),
            bottom_left.into(),
        ])
    }

    /// The corners `(0, 0), (w-1, 0), (w-1, h-1), (0, h-1)` of a `width` x `height` raster.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_imgproc::homography::{Point2d, Quadrilateral};
    ///
    /// let rect = Quadrilateral::from_rect(4, 3);
    /// assert_eq!(rect.corners()[2], Point2d::new(3.0, 2.0));
    /// ```
    pub fn from_rect(width: usize, height: usize) -> Self {
        let (w, h) = (width as f64 - 1.0, height as f64 - 1.0);
        Self([
            Point2d::new(0.0, 0.0),
            Point2d::new(w, 0.0),
            Point2d::new(w, h),
            Point2d::new(0.0, h),
        ])
    }

    /// The corners in winding order.
    pub fn corners(&self) -> &[Point2d; 4] {
        &self.0
    }
}

impl From<[Point2d; 4]> for Quadrilateral {
    fn from(corners: [Point2d; 4]) -> Self {
        Self(corners)
    }
}

impl TryFrom<&[Point2d]> for Quadrilateral {
    type Error = ImageError;

    fn try_from(points: &[Point2d]) -> Result<Self, Self::Error> {
        let corners: [Point2d; 4] = points
            .try_into()
            .map_err(|_| ImageError::InvalidQuadrilateral(points.len()))?;
        Ok(Self(corners))
    }
}

/// A 3x3 projective transformation stored in row-major order.
///
/// The element `(2, 2)` is not normalized to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography([f64; 9]);

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

impl Homography {
    /// The identity transformation.
    #[rustfmt::skip]
    pub const fn identity() -> Self {
        Self([
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ])
    }

    /// Create a homography from row-major elements.
    pub const fn from_array(m: [f64; 9]) -> Self {
        Self(m)
    }

    /// The row-major elements.
    pub fn as_array(&self) -> &[f64; 9] {
        &self.0
    }

    /// The element at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is larger than 2.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 3 && col < 3, "index ({row}, {col}) out of a 3x3 matrix");
        self.0[row * 3 + col]
    }

    /// The determinant of the matrix.
    #[rustfmt::skip]
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) -
        m[1] * (m[3] * m[8] - m[5] * m[6]) +
        m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// The adjugate, the transpose of the cofactor matrix.
    #[rustfmt::skip]
    pub fn adjugate(&self) -> Self {
        let m = &self.0;
        Self([
            det2(m[4], m[5], m[7], m[8]),  // [0, 0]
            det2(m[2], m[1], m[8], m[7]),  // [0, 1]
            det2(m[1], m[2], m[4], m[5]),  // [0, 2]
            det2(m[5], m[3], m[8], m[6]),  // [1, 0]
            det2(m[0], m[2], m[6], m[8]),  // [1, 1]
            det2(m[2], m[0], m[5], m[3]),  // [1, 2]
            det2(m[3], m[4], m[6], m[7]),  // [2, 0]
            det2(m[1], m[0], m[7], m[6]),  // [2, 1]
            det2(m[0], m[1], m[3], m[4]),  // [2, 2]
        ])
    }

    /// The inverse matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CannotComputeDeterminant`] if the matrix is singular.
    pub fn inverse(&self) -> Result<Self, ImageError> {
        let det = self.determinant();

        if det == 0.0 {
            return Err(ImageError::CannotComputeDeterminant);
        }

        let inv_det = 1.0 / det;
        let mut inv = self.adjugate();
        inv.0.iter_mut().for_each(|v| *v *= inv_det);

        Ok(inv)
    }

    /// The matrix product `self * rhs`.
    pub fn mul(&self, rhs: &Homography) -> Self {
        let (a, b) = (&self.0, &rhs.0);
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self(out)
    }

    /// Project a point, dividing by the homogeneous coordinate.
    ///
    /// The result is not finite when the point maps to infinity.
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        let w = m[6] * x + m[7] * y + m[8];
        let u = (m[0] * x + m[1] * y + m[2]) / w;
        let v = (m[3] * x + m[4] * y + m[5]) / w;
        (u, v)
    }
}

/// Determinant of the 2x2 matrix `[[a, b], [c, d]]` given as `a d - b c`.
#[inline]
fn det2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * d - b * c
}

/// Compute the mapping of the unit square onto a quadrilateral.
///
/// The corners `(0, 0), (1, 0), (1, 1), (0, 1)` land on the quadrilateral
/// corners in order. Parallelograms get an exact affine matrix.
///
/// # Errors
///
/// Returns [`ImageError::DegenerateQuadrilateral`] if the quadrilateral
/// collapses, that is when the projective system or the resulting matrix is
/// singular.
pub fn map_unit_square_to_quad(quad: &Quadrilateral) -> Result<Homography, ImageError> {
    let [p0, p1, p2, p3] = quad.0;

    let px = p0.x - p1.x + p2.x - p3.x;
    let py = p0.y - p1.y + p2.y - p3.y;

    let sq = if px.abs() < PARALLELOGRAM_EPSILON && py.abs() < PARALLELOGRAM_EPSILON {
        #[rustfmt::skip]
        let m = [
            p1.x - p0.x, p2.x - p1.x, p0.x,
            p1.y - p0.y, p2.y - p1.y, p0.y,
            0.0, 0.0, 1.0,
        ];
        Homography(m)
    } else {
        let dx1 = p1.x - p2.x;
        let dx2 = p3.x - p2.x;
        let dy1 = p1.y - p2.y;
        let dy2 = p3.y - p2.y;

        let del = det2(dx1, dx2, dy1, dy2);
        if del == 0.0 {
            return Err(ImageError::DegenerateQuadrilateral);
        }

        let g = det2(px, dx2, py, dy2) / del;
        let h = det2(dx1, px, dy1, py) / del;

        #[rustfmt::skip]
        let m = [
            p1.x - p0.x + g * p1.x, p3.x - p0.x + h * p3.x, p0.x,
            p1.y - p0.y + g * p1.y, p3.y - p0.y + h * p3.y, p0.y,
            g, h, 1.0,
        ];
        Homography(m)
    };

    // three colinear corners leave a rank deficient matrix
    if sq.determinant() == 0.0 {
        return Err(ImageError::DegenerateQuadrilateral);
    }

    Ok(sq)
}

/// Compute the homography mapping one quadrilateral onto another.
///
/// # Arguments
///
/// * `src` - The quadrilateral to map from.
/// * `dst` - The quadrilateral to map onto.
///
/// # Returns
///
/// A matrix that takes points of `src` to points of `dst`, up to scale.
///
/// # Errors
///
/// Returns [`ImageError::DegenerateQuadrilateral`] if either quadrilateral collapses.
///
/// # Example
///
/// ```
/// use quadwarp_imgproc::homography::{map_quad_to_quad, Quadrilateral};
///
/// let src = Quadrilateral::from_rect(11, 11);
/// let dst = Quadrilateral::new([10, 10], [30, 12], [28, 40], [8, 35]);
///
/// let m = map_quad_to_quad(&src, &dst).unwrap();
/// let (x, y) = m.transform_point(10.0, 0.0);
///
/// assert!((x - 30.0).abs() < 1e-9);
/// assert!((y - 12.0).abs() < 1e-9);
/// ```
pub fn map_quad_to_quad(
    src: &Quadrilateral,
    dst: &Quadrilateral,
) -> Result<Homography, ImageError> {
    let square_to_src = map_unit_square_to_quad(src)?;
    let square_to_dst = map_unit_square_to_quad(dst)?;

    Ok(square_to_dst.mul(&square_to_src.adjugate()))
}
