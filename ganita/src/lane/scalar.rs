//! Portable scalar backend.
//!
//! Four named fields, exact IEEE arithmetic. This is the reference every
//! SIMD backend is checked against.

use super::{Backend, Lane4, Matrix4, Width};

/// Lane-vector stored as four plain `f32` fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScalarVec4 {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl ScalarVec4 {
    #[inline(always)]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
            w: f(self.w),
        }
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            x: f(self.x, rhs.x),
            y: f(self.y, rhs.y),
            z: f(self.z, rhs.z),
            w: f(self.w, rhs.w),
        }
    }
}

impl Lane4 for ScalarVec4 {
    const BACKEND: Backend = Backend::Scalar;

    #[inline(always)]
    fn create(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::default()
    }

    #[inline(always)]
    fn single(s: f32) -> Self {
        Self::create(s, s, s, s)
    }

    #[inline(always)]
    fn load<const N: usize>(src: &[f32]) -> Self {
        let () = Width::<N>::CHECK;
        let src = &src[..N];
        Self {
            x: src[0],
            y: src[1],
            z: if N > 2 { src[2] } else { 0.0 },
            w: if N > 3 { src[3] } else { 0.0 },
        }
    }

    #[inline(always)]
    fn store<const N: usize>(self, dst: &mut [f32]) {
        let () = Width::<N>::CHECK;
        let dst = &mut dst[..N];
        dst[0] = self.x;
        dst[1] = self.y;
        if N > 2 {
            dst[2] = self.z;
        }
        if N > 3 {
            dst[3] = self.w;
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a * b)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self {
            x: self.x.mul_add(b.x, c.x),
            y: self.y.mul_add(b.y, c.y),
            z: self.z.mul_add(b.z, c.z),
            w: self.w.mul_add(b.w, c.w),
        }
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        self.map(|a| 1.0 / a)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        self.map(|a| 1.0 / a.sqrt())
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| if a < b { a } else { b })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| if a > b { a } else { b })
    }

    #[inline(always)]
    fn cross3(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
            w: 0.0,
        }
    }

    #[inline(always)]
    fn get_x(self) -> f32 {
        self.x
    }

    #[inline(always)]
    fn get_y(self) -> f32 {
        self.y
    }

    #[inline(always)]
    fn get_z(self) -> f32 {
        self.z
    }

    #[inline(always)]
    fn get_w(self) -> f32 {
        self.w
    }

    #[inline(always)]
    fn splat_x(self) -> Self {
        Self::single(self.x)
    }

    #[inline(always)]
    fn splat_y(self) -> Self {
        Self::single(self.y)
    }

    #[inline(always)]
    fn splat_z(self) -> Self {
        Self::single(self.z)
    }

    #[inline(always)]
    fn splat_w(self) -> Self {
        Self::single(self.w)
    }

    #[inline(always)]
    fn shuffle_wxyz(self) -> Self {
        Self::create(self.w, self.x, self.y, self.z)
    }

    #[inline(always)]
    fn shuffle_zwxy(self) -> Self {
        Self::create(self.z, self.w, self.x, self.y)
    }

    #[inline(always)]
    fn shuffle_yzwx(self) -> Self {
        Self::create(self.y, self.z, self.w, self.x)
    }

    #[inline(always)]
    fn flip_sign_yw(self) -> Self {
        Self::create(self.x, -self.y, self.z, -self.w)
    }

    #[inline(always)]
    fn flip_sign_xz(self) -> Self {
        Self::create(-self.x, self.y, -self.z, self.w)
    }

    #[inline(always)]
    fn merge(self, rhs: Self) -> Self {
        Self::create(self.z, self.w, rhs.z, rhs.w)
    }

    fn transpose(m: &mut Matrix4<Self>) {
        std::mem::swap(&mut m.x.y, &mut m.y.x);
        std::mem::swap(&mut m.x.z, &mut m.z.x);
        std::mem::swap(&mut m.x.w, &mut m.w.x);
        std::mem::swap(&mut m.y.z, &mut m.z.y);
        std::mem::swap(&mut m.y.w, &mut m.w.y);
        std::mem::swap(&mut m.z.w, &mut m.w.z);
    }

    #[inline(always)]
    fn from_array(a: [f32; 4]) -> Self {
        Self::create(a[0], a[1], a[2], a[3])
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_load_zero_fills() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(ScalarVec4::load::<2>(&data).to_array(), [1.0, 2.0, 0.0, 0.0]);
        assert_eq!(ScalarVec4::load::<3>(&data).to_array(), [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn test_load_short_slice_panics() {
        let _ = ScalarVec4::load::<4>(&[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_store_writes_exactly_n() {
        let mut out = [-1.0; 4];
        ScalarVec4::create(5.0, 6.0, 7.0, 8.0).store::<3>(&mut out);
        assert_eq!(out, [5.0, 6.0, 7.0, -1.0]);
    }

    #[test]
    fn test_cross3_basis() {
        let x = ScalarVec4::create(1.0, 0.0, 0.0, 7.0);
        let y = ScalarVec4::create(0.0, 1.0, 0.0, 7.0);
        assert_eq!(x.cross3(y).to_array(), [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_min_max_unordered_takes_rhs() {
        let a = ScalarVec4::create(f32::NAN, 1.0, f32::NAN, 1.0);
        let b = ScalarVec4::create(1.0, f32::NAN, 2.0, 3.0);
        let min = a.min(b);
        let max = a.max(b);
        assert_eq!((min.x, min.z, min.w), (1.0, 2.0, 1.0));
        assert!(min.y.is_nan());
        assert_eq!((max.x, max.z, max.w), (1.0, 2.0, 3.0));
        assert!(max.y.is_nan());

        let zeros = ScalarVec4::single(-0.0).max(ScalarVec4::zero());
        assert_eq!(zeros.x.to_bits(), 0.0f32.to_bits());
    }

    #[test]
    fn test_divide_by_zero_is_ieee() {
        let v = ScalarVec4::create(1.0, -1.0, 0.0, 2.0).div(ScalarVec4::zero());
        assert_eq!(v.get_x(), f32::INFINITY);
        assert_eq!(v.get_y(), f32::NEG_INFINITY);
        assert!(v.get_z().is_nan());
    }

    #[test]
    fn test_rsqrt_exact() {
        let v = ScalarVec4::single(4.0).rsqrt();
        assert_relative_eq!(v.get_w(), 0.5);
    }
}
