//! 4x4 transform matrix.

use std::ops;

use serde::{Deserialize, Serialize};

use super::{Vector3f, Vector4f};
use crate::error::Result;
use crate::lane::{Mat4, Vec4};

/// A 4x4 matrix whose rows are the X, Y, Z basis vectors and the W
/// (translation) row.
///
/// `a * b` applies `b` first, then `a`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f32; 4]; 4]", into = "[[f32; 4]; 4]")]
pub struct Mat4f(pub(crate) Mat4);

impl Mat4f {
    /// Builds a matrix from four rows.
    pub fn new(x: Vector4f, y: Vector4f, z: Vector4f, w: Vector4f) -> Self {
        Self(Mat4::create(x.0, y.0, z.0, w.0))
    }

    /// Identity matrix
    pub fn identity() -> Self {
        Self(Mat4::identity())
    }

    /// Builds a matrix from row arrays.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self(Mat4::from_rows(rows))
    }

    /// Loads 16 contiguous row-major floats.
    pub fn from_slice(src: &[f32]) -> Result<Self> {
        Mat4::try_load(src).map(Self)
    }

    /// Replaces the contents with 16 contiguous row-major floats.
    pub fn load(&mut self, src: &[f32]) -> Result<()> {
        self.0 = Mat4::try_load(src)?;
        Ok(())
    }

    /// Writes 16 contiguous row-major floats.
    pub fn store(&self, dst: &mut [f32]) -> Result<()> {
        if dst.len() < 16 {
            return Err(crate::error::MathError::SliceTooShort {
                needed: 16,
                got: dst.len(),
            });
        }
        self.0.store(dst);
        Ok(())
    }

    /// Perspective projection; `fov_y` in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self(Mat4::perspective(fov_y, aspect, near, far))
    }

    /// Orthographic projection. See [`Matrix4::orthographic`](crate::lane::Matrix4::orthographic)
    /// for the depth translation term.
    pub fn orthographic(l: f32, r: f32, b: f32, t: f32, near: f32, far: f32) -> Self {
        Self(Mat4::orthographic(l, r, b, t, near, far))
    }

    /// View matrix looking from `eye` toward `center`.
    pub fn look(eye: &Vector3f, center: &Vector3f, up: &Vector3f) -> Self {
        Self(Mat4::look(eye.0, center.0, up.0))
    }

    /// Rotation of `radians` about `axis`.
    pub fn axis_rotation(radians: f32, axis: &Vector3f) -> Self {
        Self(Mat4::axis_rotation(radians, axis.0))
    }

    /// Translation by `(x, y, z)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self(Mat4::translation(x, y, z))
    }

    /// Uniform scale
    pub fn scale(s: f32) -> Self {
        Self(Mat4::scale_uniform(s))
    }

    /// Per-axis scale
    pub fn scale_vector(v: &Vector3f) -> Self {
        Self(Mat4::scale(v.x(), v.y(), v.z()))
    }

    /// Transpose
    pub fn transpose(&self) -> Self {
        Self(self.0.transposed())
    }

    /// General inverse. Singular matrices produce non-finite values.
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Transforms a direction (ignores translation).
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        Vector3f::from_lanes(self.0.vec3_mul(v.0))
    }

    /// Transforms a point (applies translation).
    pub fn transform_point(&self, p: &Vector3f) -> Vector3f {
        Vector3f::from_lanes(self.0.point3_mul(p.0))
    }

    /// Transforms a point by the inverse of this rigid transform.
    pub fn inverse_orthographic_transform_point(&self, p: &Vector3f) -> Vector3f {
        Vector3f::from_lanes(self.0.inverse_orthographic_point3_mul(p.0))
    }

    /// Transforms a direction by the inverse of this rigid transform.
    pub fn inverse_orthographic_transform_vector(&self, v: &Vector3f) -> Vector3f {
        Vector3f::from_lanes(self.0.inverse_orthographic_vec3_mul(v.0))
    }

    /// Elementwise product
    pub fn component_mul(&self, rhs: &Self) -> Self {
        Self(self.0.component_mul(&rhs.0))
    }

    /// Elementwise quotient
    pub fn component_div(&self, rhs: &Self) -> Self {
        Self(self.0.component_div(&rhs.0))
    }

    /// Sum of the four rows
    pub fn sum_rows(&self) -> Vector4f {
        Vector4f(self.0.sum_rows())
    }

    /// Rows `[x, y, z, w]`
    pub fn rows(&self) -> [Vector4f; 4] {
        [
            Vector4f(self.0.x),
            Vector4f(self.0.y),
            Vector4f(self.0.z),
            Vector4f(self.0.w),
        ]
    }

    /// Row `i` (0 = X, 3 = W/translation).
    ///
    /// # Panics
    ///
    /// Panics if `i > 3`.
    pub fn row(&self, i: usize) -> Vector4f {
        self.rows()[i]
    }

    /// Rows as plain arrays
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        self.0.to_rows()
    }
}

impl Vector3f {
    /// Wraps a transform result, clearing the W lane.
    fn from_lanes(v: Vec4) -> Self {
        Self(super::live_only::<Self>(v))
    }
}

impl Default for Mat4f {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f32; 4]; 4]> for Mat4f {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Mat4f> for [[f32; 4]; 4] {
    fn from(m: Mat4f) -> Self {
        m.to_rows()
    }
}

impl ops::Mul for Mat4f {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0.mul(&rhs.0))
    }
}

impl ops::MulAssign for Mat4f {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = self.0.mul(&rhs.0);
    }
}

impl ops::Mul<Vector4f> for Mat4f {
    type Output = Vector4f;

    fn mul(self, rhs: Vector4f) -> Vector4f {
        Vector4f(self.0.vec4_mul(rhs.0))
    }
}

impl ops::Add for Mat4f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.add(&rhs.0))
    }
}

impl ops::Sub for Mat4f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.sub(&rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_mul() {
        let m = Mat4f::translation(1.0, 2.0, 3.0) * Mat4f::scale(2.0);
        assert_eq!(Mat4f::identity() * m, m);
        assert_eq!(m * Mat4f::identity(), m);
        let v = Vector4f::new(1.0, -2.0, 3.0, 1.0);
        assert_eq!(Mat4f::identity() * v, v);
    }

    #[test]
    fn test_transform_point_and_vector() {
        let m = Mat4f::translation(10.0, 0.0, 0.0) * Mat4f::scale_vector(&Vector3f::new(2.0, 3.0, 4.0));
        let p = Vector3f::new(1.0, 1.0, 1.0);
        assert_eq!(m.transform_point(&p), Vector3f::new(12.0, 3.0, 4.0));
        assert_eq!(m.transform_vector(&p), Vector3f::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_mul_assign_order() {
        let mut m = Mat4f::translation(0.0, 5.0, 0.0);
        m *= Mat4f::axis_rotation(FRAC_PI_2, &Vector3f::new(0.0, 0.0, 1.0));
        // rotate first, then translate
        let p = m.transform_point(&Vector3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y(), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = Mat4f::perspective(1.0, 1.3, 0.1, 100.0);
        let product = m * m.inverse();
        for (i, row) in product.to_rows().iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(*value, expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_inverse_orthographic_transforms() {
        let rigid = Mat4f::translation(4.0, -1.0, 2.0)
            * Mat4f::axis_rotation(0.4, &Vector3f::new(1.0, 1.0, 0.0));
        let p = Vector3f::new(0.5, 2.0, -3.0);
        let back = rigid.inverse_orthographic_transform_point(&rigid.transform_point(&p));
        let dir = rigid.inverse_orthographic_transform_vector(&rigid.transform_vector(&p));
        for (got, want) in back.to_array().iter().zip(p.to_array()) {
            assert_relative_eq!(*got, want, epsilon = 1e-5);
        }
        for (got, want) in dir.to_array().iter().zip(p.to_array()) {
            assert_relative_eq!(*got, want, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_slice_round_trip() {
        let data: Vec<f32> = (0..16).map(|i| i as f32 * 0.5).collect();
        let m = Mat4f::from_slice(&data).unwrap();
        let mut out = [0.0; 16];
        m.store(&mut out).unwrap();
        assert_eq!(out.as_slice(), data.as_slice());
        assert!(m.store(&mut out[..8]).is_err());

        let mut loaded = Mat4f::identity();
        loaded.load(&data).unwrap();
        assert_eq!(loaded, m);
        assert_eq!(m.transpose().rows()[0].to_array(), [0.0, 2.0, 4.0, 6.0]);
        assert_eq!(m.row(3).to_array(), [6.0, 6.5, 7.0, 7.5]);
        assert_eq!(Mat4f::from_rows(m.to_rows()), m);
    }

    #[test]
    fn test_elementwise_ops() {
        let a = Mat4f::scale(2.0);
        let b = Mat4f::identity();
        assert_eq!((a + b).to_rows()[0], [3.0, 0.0, 0.0, 0.0]);
        assert_eq!((a - b).to_rows()[3], [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(a.component_mul(&a).to_rows()[1], [0.0, 4.0, 0.0, 0.0]);
        assert_eq!(a.sum_rows().to_array(), [2.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_serde_rows() {
        let m = Mat4f::translation(1.0, 2.0, 3.0);
        let yaml = serde_yaml::to_string(&m).unwrap();
        let parsed: Mat4f = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, m);
    }
}
