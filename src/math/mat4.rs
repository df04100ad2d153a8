//! 4x4 transformation matrix stored row-major.
//!
//! # Convention
//! - `data[row][col]`, flattened index `row * 4 + col`
//! - [`Mat4::multiply_vec`] (and `Mat4 * Vec4`) computes
//!   `out[i] = sum_j v[j] * m[i][j]`, i.e. the vector acts as a column on the right
//! - [`Mat4::compose`] is the composition operator used when chaining axis
//!   rotations. It is **not** the conventional product: it computes
//!   `left * transpose(right)`. Use `Mul<Mat4>` for the conventional product.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::vec4::Vec4;
use super::{Axis, MathError};

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub const ZERO: Mat4 = Mat4 {
        data: [[0.0; 4]; 4],
    };

    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a matrix from 16 row-major values.
    ///
    /// Any other length yields [`Mat4::ZERO`]. Use `Mat4::try_from` to get an
    /// error instead.
    pub fn from_slice(values: &[f32]) -> Self {
        Mat4::try_from(values).unwrap_or_else(|err| {
            log::warn!("{err}; using zero matrix");
            Mat4::ZERO
        })
    }

    /// Rotation about `axis` by `theta_degrees` (right-handed).
    pub fn rotation(axis: Axis, theta_degrees: f32) -> Self {
        let (s, c) = theta_degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Mat4::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, -s, 0.0],
                [0.0, s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Y => Mat4::new([
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Z => Mat4::new([
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    /// Rotation about the axis named by `axis` (`'x'`, `'y'` or `'z'`).
    ///
    /// An unrecognised axis character yields [`Mat4::ZERO`] rather than an error.
    pub fn rotation_for(axis: char, theta_degrees: f32) -> Self {
        match Axis::try_from(axis) {
            Ok(axis) => Mat4::rotation(axis, theta_degrees),
            Err(err) => {
                log::warn!("{err}; using zero matrix");
                Mat4::ZERO
            }
        }
    }

    /// Perspective projection from near/far planes and a field of view in degrees.
    ///
    /// `far` must differ from `near`; otherwise the depth terms are NaN/infinite.
    pub fn projection(near: f32, far: f32, fov_degrees: f32) -> Self {
        let s = 1.0 / (fov_degrees / 2.0).to_radians().tan();
        let depth = far - near;
        Mat4::new([
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, -far / depth, -1.0],
            [0.0, 0.0, -(far * near) / depth, 0.0],
        ])
    }

    /// Composition operator: `out[i][j] = sum_k self[i][k] * rhs[j][k]`.
    ///
    /// Row `j` of `rhs` is read as if it were column `j`, so the result equals
    /// `self * rhs.transpose()`. Chained rotations rely on exactly this.
    pub fn compose(&self, rhs: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.data[i][k] * rhs.data[j][k]).sum();
            }
        }
        Mat4::new(result)
    }

    /// `out[i] = sum_j v[j] * self[i][j]`.
    pub fn multiply_vec(&self, v: Vec4) -> Vec4 {
        let v = v.to_array();
        let row = |i: usize| -> f32 { (0..4).map(|j| v[j] * self.data[i][j]).sum() };
        Vec4::new(row(0), row(1), row(2), row(3))
    }

    /// Multiplies every component in place.
    pub fn scale(&mut self, scalar: f32) {
        self.data
            .iter_mut()
            .flatten()
            .for_each(|value| *value *= scalar);
    }

    pub fn transpose(&self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.data[j][i];
            }
        }
        Mat4::new(result)
    }

    /// Row-major copy of the 16 components.
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (i, value) in self.data.iter().flatten().enumerate() {
            out[i] = *value;
        }
        out
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

impl TryFrom<&[f32]> for Mat4 {
    type Error = MathError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        if values.len() != 16 {
            return Err(MathError::InvalidLength {
                expected: 16,
                actual: values.len(),
            });
        }
        let mut data = [[0.0f32; 4]; 4];
        for (i, value) in values.iter().enumerate() {
            data[i / 4][i % 4] = *value;
        }
        Ok(Mat4::new(data))
    }
}

/// Conventional matrix product.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Same as [`Mat4::multiply_vec`].
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        self.multiply_vec(v)
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_rotation_is_identity() {
        assert_relative_eq!(Mat4::rotation_for('x', 0.0), Mat4::identity());
        assert_relative_eq!(Mat4::rotation_for('y', 0.0), Mat4::identity());
        assert_relative_eq!(Mat4::rotation_for('z', 0.0), Mat4::identity());
    }

    #[test]
    fn unknown_axis_gives_zero_matrix() {
        assert_eq!(Mat4::rotation_for('w', 45.0), Mat4::ZERO);
    }

    #[test]
    fn rotation_z_quarter_turn_moves_x_onto_y() {
        let r = Mat4::rotation(Axis::Z, 90.0);
        let v = r.multiply_vec(Vec4::point(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vec4::point(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn compose_is_left_times_transposed_right() {
        let a = Mat4::from_slice(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            16.0,
        ]);
        let b = Mat4::rotation(Axis::Y, 30.0);
        assert_relative_eq!(a.compose(&b), a * b.transpose(), epsilon = 1e-5);
    }

    #[test]
    fn composing_opposite_rotations_doubles_the_angle() {
        // left * transpose(right): transpose(R(-t)) = R(t), so the angles add up.
        let composed = Mat4::rotation(Axis::X, 30.0).compose(&Mat4::rotation(Axis::X, -30.0));
        assert_relative_eq!(composed, Mat4::rotation(Axis::X, 60.0), epsilon = 1e-6);
    }

    #[test]
    fn composing_equal_rotations_cancels_out() {
        let composed = Mat4::rotation(Axis::Z, 40.0).compose(&Mat4::rotation(Axis::Z, 40.0));
        assert_relative_eq!(composed, Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn conventional_product_inverts_rotation() {
        let product = Mat4::rotation(Axis::Y, 25.0) * Mat4::rotation(Axis::Y, -25.0);
        assert_relative_eq!(product, Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn multiply_vec_uses_rows_as_weights() {
        let m = Mat4::from_slice(&[
            1.0, 0.0, 0.0, 5.0, //
            0.0, 2.0, 0.0, 0.0, //
            0.0, 0.0, 3.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let v = m * Vec4::point(1.0, 1.0, 1.0);
        assert_eq!(v, Vec4::new(6.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn wrong_length_initializer() {
        assert_eq!(Mat4::from_slice(&[1.0; 9]), Mat4::ZERO);
        assert!(matches!(
            Mat4::try_from(&[1.0f32; 15][..]),
            Err(MathError::InvalidLength {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn projection_terms() {
        let p = Mat4::projection(1.0, 101.0, 90.0);
        assert_relative_eq!(p.get(0, 0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.get(1, 1), 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.get(2, 2), -101.0 / 100.0, epsilon = 1e-6);
        assert_eq!(p.get(2, 3), -1.0);
        assert_relative_eq!(p.get(3, 2), -101.0 / 100.0, epsilon = 1e-6);
        assert_eq!(p.get(3, 3), 0.0);
    }

    #[test]
    fn scale_in_place() {
        let mut m = Mat4::identity();
        m.scale(3.0);
        assert_eq!(m.get(0, 0), 3.0);
        assert_eq!(m.get(3, 3), 3.0);
        assert_eq!(m.get(0, 1), 0.0);
    }
}
