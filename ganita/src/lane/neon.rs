//! NEON backend for aarch64.
//!
//! `vrecpeq_f32` and `vrsqrteq_f32` only give about 8 bits, so both are
//! followed by two Newton-Raphson steps using the dedicated step
//! instructions (`vrecpsq_f32`, `vrsqrtsq_f32`). Division and square root
//! use the exact A64 instructions.
//!
//! `vminq_f32`/`vmaxq_f32` return NaN when either lane is NaN, which
//! differs from `minps`/`maxps`, so `min`/`max` compare and select instead.
//!
//! | Operation | Intrinsic |
//! |-----------|-----------|
//! | `mul_add` | `vfmaq_f32` |
//! | `min` / `max` | `vcltq_f32` / `vcgtq_f32` + `vbslq_f32` |
//! | `splat_*` | `vdupq_laneq_f32` |
//! | `shuffle_*` | `vextq_f32` |
//! | `merge` | `vcombine_f32(vget_high_f32, vget_high_f32)` |
//! | `transpose` | `vzip1q_f32` / `vzip2q_f32` |

#![allow(unused_unsafe)]

use std::arch::aarch64::*;
use std::fmt;

use super::{Backend, Lane4, Matrix4, Width};

/// Lane-vector held in one `float32x4_t` register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct NeonVec4(float32x4_t);

const SIGN_BIT: u32 = 0x8000_0000;

impl NeonVec4 {
    /// Wraps a raw register.
    #[inline(always)]
    pub fn from_raw(v: float32x4_t) -> Self {
        Self(v)
    }

    /// The underlying register.
    #[inline(always)]
    pub fn raw(self) -> float32x4_t {
        self.0
    }

    #[inline(always)]
    fn xor_sign(self, mask: [u32; 4]) -> Self {
        unsafe {
            let mask = vld1q_u32(mask.as_ptr());
            Self(vreinterpretq_f32_u32(veorq_u32(
                vreinterpretq_u32_f32(self.0),
                mask,
            )))
        }
    }

    /// `(y, z, x, _)`
    #[inline(always)]
    fn yzx(self) -> float32x4_t {
        unsafe {
            let yzwx = vextq_f32::<1>(self.0, self.0);
            vsetq_lane_f32::<2>(vgetq_lane_f32::<0>(self.0), yzwx)
        }
    }

    /// `(z, x, y, _)`
    #[inline(always)]
    fn zxy(self) -> float32x4_t {
        unsafe {
            let zwxy = vextq_f32::<2>(self.0, self.0);
            let zxxy = vsetq_lane_f32::<1>(vgetq_lane_f32::<0>(self.0), zwxy);
            vsetq_lane_f32::<2>(vgetq_lane_f32::<1>(self.0), zxxy)
        }
    }
}

impl fmt::Debug for NeonVec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NeonVec4").field(&self.to_array()).finish()
    }
}

impl PartialEq for NeonVec4 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl Lane4 for NeonVec4 {
    const BACKEND: Backend = Backend::Neon;

    #[inline(always)]
    fn create(x: f32, y: f32, z: f32, w: f32) -> Self {
        let lanes = [x, y, z, w];
        Self(unsafe { vld1q_f32(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn zero() -> Self {
        Self(unsafe { vdupq_n_f32(0.0) })
    }

    #[inline(always)]
    fn single(s: f32) -> Self {
        Self(unsafe { vdupq_n_f32(s) })
    }

    #[inline(always)]
    fn load<const N: usize>(src: &[f32]) -> Self {
        let () = Width::<N>::CHECK;
        let src = &src[..N];
        let ptr = src.as_ptr();
        // SAFETY: `src` holds at least N floats; NEON loads have no alignment requirement.
        unsafe {
            match N {
                2 => Self(vcombine_f32(vld1_f32(ptr), vdup_n_f32(0.0))),
                3 => {
                    let xy00 = vcombine_f32(vld1_f32(ptr), vdup_n_f32(0.0));
                    Self(vsetq_lane_f32::<2>(*ptr.add(2), xy00))
                }
                _ => Self(vld1q_f32(ptr)),
            }
        }
    }

    #[inline(always)]
    fn store<const N: usize>(self, dst: &mut [f32]) {
        let () = Width::<N>::CHECK;
        let dst = &mut dst[..N];
        let ptr = dst.as_mut_ptr();
        // SAFETY: `dst` holds at least N floats.
        unsafe {
            match N {
                2 => vst1_f32(ptr, vget_low_f32(self.0)),
                3 => {
                    vst1_f32(ptr, vget_low_f32(self.0));
                    vst1q_lane_f32::<2>(ptr.add(2), self.0);
                }
                _ => vst1q_f32(ptr, self.0),
            }
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { vdivq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self(unsafe { vfmaq_f32(c.0, self.0, b.0) })
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        unsafe {
            let mut estimate = vrecpeq_f32(self.0);
            estimate = vmulq_f32(vrecpsq_f32(self.0, estimate), estimate);
            estimate = vmulq_f32(vrecpsq_f32(self.0, estimate), estimate);
            Self(estimate)
        }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { vsqrtq_f32(self.0) })
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe {
            let mut estimate = vrsqrteq_f32(self.0);
            estimate = vmulq_f32(
                vrsqrtsq_f32(vmulq_f32(self.0, estimate), estimate),
                estimate,
            );
            estimate = vmulq_f32(
                vrsqrtsq_f32(vmulq_f32(self.0, estimate), estimate),
                estimate,
            );
            Self(estimate)
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(unsafe { vbslq_f32(vcltq_f32(self.0, rhs.0), self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { vbslq_f32(vcgtq_f32(self.0, rhs.0), self.0, rhs.0) })
    }

    #[inline(always)]
    fn cross3(self, rhs: Self) -> Self {
        unsafe {
            let cross = vsubq_f32(
                vmulq_f32(self.yzx(), rhs.zxy()),
                vmulq_f32(self.zxy(), rhs.yzx()),
            );
            Self(vsetq_lane_f32::<3>(0.0, cross))
        }
    }

    #[inline(always)]
    fn get_x(self) -> f32 {
        unsafe { vgetq_lane_f32::<0>(self.0) }
    }

    #[inline(always)]
    fn get_y(self) -> f32 {
        unsafe { vgetq_lane_f32::<1>(self.0) }
    }

    #[inline(always)]
    fn get_z(self) -> f32 {
        unsafe { vgetq_lane_f32::<2>(self.0) }
    }

    #[inline(always)]
    fn get_w(self) -> f32 {
        unsafe { vgetq_lane_f32::<3>(self.0) }
    }

    #[inline(always)]
    fn splat_x(self) -> Self {
        Self(unsafe { vdupq_laneq_f32::<0>(self.0) })
    }

    #[inline(always)]
    fn splat_y(self) -> Self {
        Self(unsafe { vdupq_laneq_f32::<1>(self.0) })
    }

    #[inline(always)]
    fn splat_z(self) -> Self {
        Self(unsafe { vdupq_laneq_f32::<2>(self.0) })
    }

    #[inline(always)]
    fn splat_w(self) -> Self {
        Self(unsafe { vdupq_laneq_f32::<3>(self.0) })
    }

    #[inline(always)]
    fn shuffle_wxyz(self) -> Self {
        Self(unsafe { vextq_f32::<3>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_zwxy(self) -> Self {
        Self(unsafe { vextq_f32::<2>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_yzwx(self) -> Self {
        Self(unsafe { vextq_f32::<1>(self.0, self.0) })
    }

    #[inline(always)]
    fn flip_sign_yw(self) -> Self {
        self.xor_sign([0, SIGN_BIT, 0, SIGN_BIT])
    }

    #[inline(always)]
    fn flip_sign_xz(self) -> Self {
        self.xor_sign([SIGN_BIT, 0, SIGN_BIT, 0])
    }

    #[inline(always)]
    fn merge(self, rhs: Self) -> Self {
        Self(unsafe { vcombine_f32(vget_high_f32(self.0), vget_high_f32(rhs.0)) })
    }

    #[inline(always)]
    fn transpose(m: &mut Matrix4<Self>) {
        unsafe {
            let xz_lo = vzip1q_f32(m.x.0, m.z.0);
            let xz_hi = vzip2q_f32(m.x.0, m.z.0);
            let yw_lo = vzip1q_f32(m.y.0, m.w.0);
            let yw_hi = vzip2q_f32(m.y.0, m.w.0);
            m.x = Self(vzip1q_f32(xz_lo, yw_lo));
            m.y = Self(vzip2q_f32(xz_lo, yw_lo));
            m.z = Self(vzip1q_f32(xz_hi, yw_hi));
            m.w = Self(vzip2q_f32(xz_hi, yw_hi));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shuffles() {
        let v = NeonVec4::create(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.shuffle_wxyz().to_array(), [4.0, 1.0, 2.0, 3.0]);
        assert_eq!(v.shuffle_zwxy().to_array(), [3.0, 4.0, 1.0, 2.0]);
        assert_eq!(v.shuffle_yzwx().to_array(), [2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn test_partial_load_store() {
        let v = NeonVec4::load::<3>(&[1.0, 2.0, 3.0]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 0.0]);
        let mut out = [0.0; 4];
        v.store::<2>(&mut out);
        assert_eq!(out, [1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_refined_estimates() {
        let v = NeonVec4::create(1.0, 3.0, 7.5, 100.0);
        let recip = v.reciprocal().to_array();
        let rsqrt = v.rsqrt().to_array();
        for (i, x) in [1.0f32, 3.0, 7.5, 100.0].into_iter().enumerate() {
            assert_relative_eq!(recip[i], 1.0 / x, max_relative = 1e-6);
            assert_relative_eq!(rsqrt[i], 1.0 / x.sqrt(), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_cross3() {
        let a = NeonVec4::create(1.0, 2.0, 3.0, 9.0);
        let b = NeonVec4::create(4.0, 5.0, 6.0, 9.0);
        assert_eq!(a.cross3(b).to_array(), [-3.0, 6.0, -3.0, 0.0]);
    }
}
