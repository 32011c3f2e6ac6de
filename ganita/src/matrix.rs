//! Matrix construction and transforms.
//!
//! Rows are basis vectors: a vector is transformed as
//! `x_row * v.x + y_row * v.y + z_row * v.z + w_row * v.w`, and the W row
//! carries translation. `a.mul(&b)` transforms each row of `b` by `a`, so
//! `a.mul(&b)` applied to a vector equals `a` applied after `b`.
//!
//! # Coordinate Frame
//!
//! Right-handed, camera looking down -Z, clip-space depth in [-1, 1].

use std::f32::consts::FRAC_PI_2;

use crate::error::{MathError, Result};
use crate::lane::{Flip0101, Flip1010, Lane4, Matrix4, flip_sign};
use crate::ops::{dot, normalize};

impl<V: Lane4> Matrix4<V> {
    /// Identity rows as a compile-time literal.
    pub const IDENTITY_ROWS: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    /// Builds a matrix from four row vectors.
    #[inline(always)]
    pub fn create(x: V, y: V, z: V, w: V) -> Self {
        Self { x, y, z, w }
    }

    /// The identity matrix.
    #[inline(always)]
    pub fn identity() -> Self {
        Self::from_rows(Self::IDENTITY_ROWS)
    }

    /// Builds a matrix from row arrays.
    #[inline(always)]
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self::create(
            V::from_array(rows[0]),
            V::from_array(rows[1]),
            V::from_array(rows[2]),
            V::from_array(rows[3]),
        )
    }

    /// Row arrays `[x, y, z, w]`.
    #[inline(always)]
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        [
            self.x.to_array(),
            self.y.to_array(),
            self.z.to_array(),
            self.w.to_array(),
        ]
    }

    /// Loads 16 contiguous row-major floats.
    ///
    /// # Panics
    ///
    /// Panics if `src` holds fewer than 16 floats.
    pub fn load(src: &[f32]) -> Self {
        Self::create(
            V::load::<4>(&src[0..4]),
            V::load::<4>(&src[4..8]),
            V::load::<4>(&src[8..12]),
            V::load::<4>(&src[12..16]),
        )
    }

    /// Like [`Matrix4::load`] but reports a short slice as an error.
    pub fn try_load(src: &[f32]) -> Result<Self> {
        if src.len() < 16 {
            return Err(MathError::SliceTooShort {
                needed: 16,
                got: src.len(),
            });
        }
        Ok(Self::load(src))
    }

    /// Stores the matrix as 16 contiguous row-major floats.
    ///
    /// # Panics
    ///
    /// Panics if `dst` holds fewer than 16 floats.
    pub fn store(&self, dst: &mut [f32]) {
        self.x.store::<4>(&mut dst[0..4]);
        self.y.store::<4>(&mut dst[4..8]);
        self.z.store::<4>(&mut dst[8..12]);
        self.w.store::<4>(&mut dst[12..16]);
    }

    /// Row-wise sum `x + y + z + w`.
    #[inline(always)]
    pub fn sum_rows(&self) -> V {
        self.x.add(self.y).add(self.z).add(self.w)
    }

    // ------------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------------

    /// Transforms a homogeneous 4-vector.
    #[inline(always)]
    pub fn vec4_mul(&self, v: V) -> V {
        self.x.mul_add(
            v.splat_x(),
            self.y
                .mul_add(v.splat_y(), self.z.mul_add(v.splat_z(), self.w.mul(v.splat_w()))),
        )
    }

    /// Transforms a direction: the W row (translation) is ignored.
    #[inline(always)]
    pub fn vec3_mul(&self, v: V) -> V {
        self.x.mul_add(
            v.splat_x(),
            self.y.mul_add(v.splat_y(), self.z.mul(v.splat_z())),
        )
    }

    /// Transforms a point: the W row is added unscaled.
    #[inline(always)]
    pub fn point3_mul(&self, v: V) -> V {
        self.x.mul_add(
            v.splat_x(),
            self.y
                .mul_add(v.splat_y(), self.z.mul_add(v.splat_z(), self.w)),
        )
    }

    /// Transforms a point by the inverse of this rigid transform.
    ///
    /// The rotation block must be orthonormal; nothing checks it.
    pub fn inverse_orthographic_point3_mul(&self, v: V) -> V {
        let local = v.sub(self.w);
        self.rotation_transposed().point3_mul(local)
    }

    /// Transforms a direction by the inverse of this rigid transform.
    ///
    /// The rotation block must be orthonormal; nothing checks it.
    pub fn inverse_orthographic_vec3_mul(&self, v: V) -> V {
        self.rotation_transposed().vec3_mul(v)
    }

    fn rotation_transposed(&self) -> Self {
        let mut rotation = *self;
        rotation.w = V::zero();
        rotation.transpose_in_place();
        rotation
    }

    /// Matrix product: every row of `rhs` transformed by `self`.
    #[inline(always)]
    pub fn mul(&self, rhs: &Self) -> Self {
        Self::create(
            self.vec4_mul(rhs.x),
            self.vec4_mul(rhs.y),
            self.vec4_mul(rhs.z),
            self.vec4_mul(rhs.w),
        )
    }

    // ------------------------------------------------------------------------
    // Elementwise
    // ------------------------------------------------------------------------

    #[inline(always)]
    fn zip_rows(&self, rhs: &Self, f: impl Fn(V, V) -> V) -> Self {
        Self::create(f(self.x, rhs.x), f(self.y, rhs.y), f(self.z, rhs.z), f(self.w, rhs.w))
    }

    /// Elementwise sum.
    pub fn add(&self, rhs: &Self) -> Self {
        self.zip_rows(rhs, V::add)
    }

    /// Elementwise difference.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.zip_rows(rhs, V::sub)
    }

    /// Elementwise (Hadamard) product.
    pub fn component_mul(&self, rhs: &Self) -> Self {
        self.zip_rows(rhs, V::mul)
    }

    /// Elementwise quotient.
    pub fn component_div(&self, rhs: &Self) -> Self {
        self.zip_rows(rhs, V::div)
    }

    // ------------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------------

    /// Right-handed perspective projection.
    ///
    /// `fov_y` is the full vertical field of view in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let cot = (FRAC_PI_2 - fov_y * 0.5).tan();
        let depth = far - near;
        Self::create(
            V::create(cot / aspect, 0.0, 0.0, 0.0),
            V::create(0.0, cot, 0.0, 0.0),
            V::create(0.0, 0.0, -(far + near) / depth, -1.0),
            V::create(0.0, 0.0, -2.0 * near * far / depth, 0.0),
        )
    }

    /// Orthographic projection of the box `[l, r] x [b, t] x [near, far]`.
    ///
    /// The depth translation term is `-(far + near) / (r - l)`, matching the
    /// long-standing output of this function rather than the textbook
    /// `-(far + near) / (far - near)`. Depth is only correct when the box is
    /// as wide as it is deep.
    pub fn orthographic(l: f32, r: f32, b: f32, t: f32, near: f32, far: f32) -> Self {
        let width = r - l;
        let height = t - b;
        let depth = far - near;
        Self::create(
            V::create(2.0 / width, 0.0, 0.0, 0.0),
            V::create(0.0, 2.0 / height, 0.0, 0.0),
            V::create(0.0, 0.0, 2.0 / depth, 0.0),
            V::create(
                -(r + l) / width,
                -(t + b) / height,
                -(far + near) / width,
                1.0,
            ),
        )
    }

    /// View matrix for a camera at `eye` looking at `center`.
    ///
    /// Inputs use the X/Y/Z lanes; W should be zero.
    pub fn look(eye: V, center: V, up: V) -> Self {
        let forward = normalize::<3, V>(center.sub(eye));
        let side = normalize::<3, V>(forward.cross3(up));
        let upward = side.cross3(forward);
        let back = V::zero().sub(forward);

        let tx = -dot::<3, V>(side, eye).get_x();
        let ty = -dot::<3, V>(upward, eye).get_x();
        let tz = -dot::<3, V>(back, eye).get_x();

        let mut view = Self::create(side, upward, back, V::create(0.0, 0.0, 0.0, 1.0));
        view.transpose_in_place();
        view.w = V::create(tx, ty, tz, 1.0);
        view
    }

    /// Rotation of `radians` about `axis` (Rodrigues' formula).
    ///
    /// The axis is normalized here. Positive angles rotate counter-clockwise
    /// when looking down the axis toward the origin.
    pub fn axis_rotation(radians: f32, axis: V) -> Self {
        let angle = -radians;
        let axis = normalize::<3, V>(axis);
        let (x, y, z) = (axis.get_x(), axis.get_y(), axis.get_z());
        let (s, c) = angle.sin_cos();
        let k = 1.0 - c;

        let xy = x * y * k;
        let yz = y * z * k;
        let zx = z * x * k;
        let xx = x * x;
        let yy = y * y;
        let zz = z * z;

        Self::create(
            V::create(xx + c * (1.0 - xx), xy - z * s, zx + y * s, 0.0),
            V::create(xy + z * s, yy + c * (1.0 - yy), yz - x * s, 0.0),
            V::create(zx - y * s, yz + x * s, zz + c * (1.0 - zz), 0.0),
            V::create(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Pure translation.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::create(
            V::create(1.0, 0.0, 0.0, 0.0),
            V::create(0.0, 1.0, 0.0, 0.0),
            V::create(0.0, 0.0, 1.0, 0.0),
            V::create(x, y, z, 1.0),
        )
    }

    /// Uniform scale.
    pub fn scale_uniform(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    /// Per-axis scale.
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::create(
            V::create(x, 0.0, 0.0, 0.0),
            V::create(0.0, y, 0.0, 0.0),
            V::create(0.0, 0.0, z, 0.0),
            V::create(0.0, 0.0, 0.0, 1.0),
        )
    }

    // ------------------------------------------------------------------------
    // Inverse / transpose
    // ------------------------------------------------------------------------

    /// General inverse by cofactor expansion.
    ///
    /// Cofactors are computed for all four columns at once: with `Rk` the
    /// lane rotation by `k`, lane `j` of `Rk(v)` holds `v[j + k]`, so the
    /// 3x3 minors over columns `j+1, j+2, j+3` become lane-wise products of
    /// rotated rows. No singularity check is made; a singular matrix yields
    /// infinities or NaN.
    pub fn inverse(&self) -> Self {
        let (a, b, c, d) = (self.x, self.y, self.z, self.w);

        // 2x2 determinants of rows z/w over column pairs (j+1, j+2),
        // (j+2, j+3) and (j+3, j+1).
        let cd1 = c.mul(d.shuffle_yzwx());
        let cd2 = c.mul(d.shuffle_zwxy());
        let cd3 = c.mul(d.shuffle_wxyz());
        let low12 = cd1.shuffle_yzwx().sub(cd3.shuffle_zwxy());
        let low23 = cd1.shuffle_zwxy().sub(cd3.shuffle_wxyz());
        let low31 = cd2.shuffle_wxyz().sub(cd2.shuffle_yzwx());

        // Same for rows x/y.
        let ab1 = a.mul(b.shuffle_yzwx());
        let ab2 = a.mul(b.shuffle_zwxy());
        let ab3 = a.mul(b.shuffle_wxyz());
        let high12 = ab1.shuffle_yzwx().sub(ab3.shuffle_zwxy());
        let high23 = ab1.shuffle_zwxy().sub(ab3.shuffle_wxyz());
        let high31 = ab2.shuffle_wxyz().sub(ab2.shuffle_yzwx());

        // Unsigned minors of each row.
        let minor = |row: V, p23: V, p31: V, p12: V| {
            row.shuffle_yzwx()
                .mul_add(p23, row.shuffle_zwxy().mul_add(p31, row.shuffle_wxyz().mul(p12)))
        };
        let sum0 = minor(b, low23, low31, low12);
        let sum1 = minor(a, low23, low31, low12);
        let sum2 = minor(d, high23, high31, high12);
        let sum3 = minor(c, high23, high31, high12);

        // det = (a.x*m.x + a.z*m.z) - (a.y*m.y + a.w*m.w)
        let d0 = a.mul(sum0);
        let d1 = d0.add(d0.merge(d0));
        let det = d1.sub(d1.splat_y());
        let inv_det = det.reciprocal().splat_x();

        let mut out = Self::create(
            flip_sign::<Flip0101, V>(sum0).mul(inv_det),
            flip_sign::<Flip1010, V>(sum1).mul(inv_det),
            flip_sign::<Flip0101, V>(sum2).mul(inv_det),
            flip_sign::<Flip1010, V>(sum3).mul(inv_det),
        );
        out.transpose_in_place();
        out
    }

    /// Transposes this matrix in place.
    #[inline(always)]
    pub fn transpose_in_place(&mut self) {
        V::transpose(self);
    }

    /// Returns the transpose.
    #[inline(always)]
    pub fn transposed(&self) -> Self {
        let mut out = *self;
        V::transpose_into(self, &mut out);
        out
    }
}
