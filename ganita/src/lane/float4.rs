//! Auto-vectorized backend.
//!
//! A 16-byte aligned `[f32; 4]` whose operations are written lane by lane
//! so LLVM can fold them into the target's 128-bit SIMD instructions
//! without any intrinsics. Arithmetic is exact, so on targets without a
//! vector unit this behaves like the scalar backend, except that `mul_add`
//! rounds twice unless the target has hardware FMA.
//!
//! # Instruction Mapping
//!
//! | Operation | SSE | NEON |
//! |-----------|-----|------|
//! | `add` / `sub` / `mul` / `div` | `addps` / `subps` / `mulps` / `divps` | `vaddq_f32` / `vsubq_f32` / `vmulq_f32` / `vdivq_f32` |
//! | `mul_add` | `vfmadd` with `fma`, else `mulps` + `addps` (rounds twice) | `vfmaq_f32` |
//! | `min` / `max` | `minps` / `maxps` | `vcltq_f32` / `vcgtq_f32` + `vbslq_f32` |
//! | `splat_*` / `shuffle_*` | `shufps` | `vdupq_laneq_f32` / `vextq_f32` |

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use super::{Backend, Lane4, Matrix4, Width};

/// A 4-wide f32 vector laid out for auto-vectorization.
///
/// `#[repr(C, align(16))]` keeps the lanes contiguous and register aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C, align(16))]
pub struct Float4(pub [f32; 4]);

impl Float4 {
    /// All lanes zero.
    pub const ZERO: Self = Self([0.0; 4]);

    /// Creates a `Float4` from an array of lanes.
    ///
    /// # Example
    /// ```
    /// use ganita::lane::Float4;
    /// let v = Float4::new([1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(v.0, [1.0, 2.0, 3.0, 4.0]);
    /// ```
    #[inline(always)]
    pub const fn new(lanes: [f32; 4]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    fn permute<const A: usize, const B: usize, const C: usize, const D: usize>(self) -> Self {
        Self([self.0[A], self.0[B], self.0[C], self.0[D]])
    }
}

impl Lane4 for Float4 {
    const BACKEND: Backend = Backend::AutoVec;

    #[inline(always)]
    fn create(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline(always)]
    fn single(s: f32) -> Self {
        Self([s; 4])
    }

    #[inline(always)]
    fn load<const N: usize>(src: &[f32]) -> Self {
        let () = Width::<N>::CHECK;
        let mut lanes = [0.0; 4];
        lanes[..N].copy_from_slice(&src[..N]);
        Self(lanes)
    }

    #[inline(always)]
    fn store<const N: usize>(self, dst: &mut [f32]) {
        let () = Width::<N>::CHECK;
        dst[..N].copy_from_slice(&self.0[..N]);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self / rhs
    }

    #[cfg(any(target_feature = "fma", target_arch = "aarch64"))]
    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self([
            self.0[0].mul_add(b.0[0], c.0[0]),
            self.0[1].mul_add(b.0[1], c.0[1]),
            self.0[2].mul_add(b.0[2], c.0[2]),
            self.0[3].mul_add(b.0[3], c.0[3]),
        ])
    }

    // `f32::mul_add` without hardware FMA is a libm call per lane.
    #[cfg(not(any(target_feature = "fma", target_arch = "aarch64")))]
    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        self * b + c
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        Self::single(1.0) / self
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self([
            self.0[0].sqrt(),
            self.0[1].sqrt(),
            self.0[2].sqrt(),
            self.0[3].sqrt(),
        ])
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        Lane4::sqrt(self).reciprocal()
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| {
            let (a, b) = (self.0[i], rhs.0[i]);
            if a < b { a } else { b }
        }))
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| {
            let (a, b) = (self.0[i], rhs.0[i]);
            if a > b { a } else { b }
        }))
    }

    #[inline(always)]
    fn cross3(self, rhs: Self) -> Self {
        let lhs_yzx = self.permute::<1, 2, 0, 3>();
        let lhs_zxy = self.permute::<2, 0, 1, 3>();
        let rhs_yzx = rhs.permute::<1, 2, 0, 3>();
        let rhs_zxy = rhs.permute::<2, 0, 1, 3>();
        let mut out = lhs_yzx * rhs_zxy - lhs_zxy * rhs_yzx;
        out.0[3] = 0.0;
        out
    }

    #[inline(always)]
    fn get_x(self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    fn get_y(self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    fn get_z(self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    fn get_w(self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    fn splat_x(self) -> Self {
        self.permute::<0, 0, 0, 0>()
    }

    #[inline(always)]
    fn splat_y(self) -> Self {
        self.permute::<1, 1, 1, 1>()
    }

    #[inline(always)]
    fn splat_z(self) -> Self {
        self.permute::<2, 2, 2, 2>()
    }

    #[inline(always)]
    fn splat_w(self) -> Self {
        self.permute::<3, 3, 3, 3>()
    }

    #[inline(always)]
    fn shuffle_wxyz(self) -> Self {
        self.permute::<3, 0, 1, 2>()
    }

    #[inline(always)]
    fn shuffle_zwxy(self) -> Self {
        self.permute::<2, 3, 0, 1>()
    }

    #[inline(always)]
    fn shuffle_yzwx(self) -> Self {
        self.permute::<1, 2, 3, 0>()
    }

    #[inline(always)]
    fn flip_sign_yw(self) -> Self {
        self * Self([1.0, -1.0, 1.0, -1.0])
    }

    #[inline(always)]
    fn flip_sign_xz(self) -> Self {
        self * Self([-1.0, 1.0, -1.0, 1.0])
    }

    #[inline(always)]
    fn merge(self, rhs: Self) -> Self {
        Self([self.0[2], self.0[3], rhs.0[2], rhs.0[3]])
    }

    fn transpose(m: &mut Matrix4<Self>) {
        let rows = [m.x.0, m.y.0, m.z.0, m.w.0];
        m.x = Self([rows[0][0], rows[1][0], rows[2][0], rows[3][0]]);
        m.y = Self([rows[0][1], rows[1][1], rows[2][1], rows[3][1]]);
        m.z = Self([rows[0][2], rows[1][2], rows[2][2], rows[3][2]]);
        m.w = Self([rows[0][3], rows[1][3], rows[2][3], rows[3][3]]);
    }

    #[inline(always)]
    fn from_array(a: [f32; 4]) -> Self {
        Self(a)
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        self.0
    }
}

impl Add for Float4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
        ])
    }
}

impl Sub for Float4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self([
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
            self.0[3] - rhs.0[3],
        ])
    }
}

impl Mul for Float4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self([
            self.0[0] * rhs.0[0],
            self.0[1] * rhs.0[1],
            self.0[2] * rhs.0[2],
            self.0[3] * rhs.0[3],
        ])
    }
}

impl Div for Float4 {
    type Output = Self;

    /// Element-wise IEEE division.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self([
            self.0[0] / rhs.0[0],
            self.0[1] / rhs.0[1],
            self.0[2] / rhs.0[2],
            self.0[3] / rhs.0[3],
        ])
    }
}

impl Neg for Float4 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self([-self.0[0], -self.0[1], -self.0[2], -self.0[3]])
    }
}

impl AddAssign for Float4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
