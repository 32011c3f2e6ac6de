#![cfg_attr(
    all(feature = "altivec", target_arch = "powerpc64"),
    feature(stdarch_powerpc)
)]
#![warn(missing_docs)]

//! # Ganita: Portable 4-Lane Vector and Matrix Kernel
//!
//! Small-vector math for graphics and geometry code: a 4-wide `f32` vector
//! and a 4x4 matrix built from four of them, with the SIMD backend chosen
//! at compile time.
//!
//! ## Quick Start
//!
//! ```rust
//! use ganita::{Mat4f, Vector3f};
//!
//! let model = Mat4f::translation(0.0, 1.0, 0.0) * Mat4f::scale(2.0);
//! let p = model.transform_point(&Vector3f::new(1.0, 1.0, 1.0));
//! assert_eq!(p.to_array(), [2.0, 3.0, 2.0]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   core      Vector2f / Vector3f / Vector4f / Mat4f   (operators, named ctors)
//!     │
//!   matrix    Matrix4<V>: projections, look, inverse, transforms
//!     │
//!   ops       Sum, Dot<N>, Length<N>, Normalize<N>
//!     │
//!   lane      Lane4 trait + one type per backend
//!             scalar | float4 (auto-vec) | sse | neon | altivec
//! ```
//!
//! Everything above [`lane`] is written once against [`lane::Lane4`]; the
//! alias [`lane::Vec4`] picks the backend for the wrappers in [`core`].
//!
//! ## Backend Selection
//!
//! | Condition | Backend |
//! |-----------|---------|
//! | feature `scalar` | scalar |
//! | feature `autovec` | auto-vectorized `Float4` |
//! | x86 / x86_64 with `sse2` | SSE |
//! | aarch64 with `neon` | NEON |
//! | feature `altivec`, big-endian powerpc64 | AltiVec (nightly) |
//! | otherwise | scalar |
//!
//! SIMD backends use hardware reciprocal and reciprocal-square-root
//! estimates refined by Newton-Raphson, so results differ from the scalar
//! backend in the last few bits.
//!
//! ## Conventions
//!
//! Matrix rows are the transformed X, Y, Z axes and the translation. A
//! vector is transformed as `x * row_x + y * row_y + z * row_z + w * row_w`,
//! and `a * b` applies `b` first.

pub mod config;
pub mod core;
pub mod error;
pub mod lane;
pub mod matrix;
pub mod ops;
pub mod sysinfo;

// Re-export main types at crate root
pub use config::{CameraConfig, ConfigLoadError};
pub use core::{Mat4f, Vector2f, Vector3f, Vector4f};
pub use error::{MathError, Result};
pub use lane::{ACTIVE_BACKEND, Backend, Lane4, Mat4, Matrix4, Vec4};
pub use sysinfo::CpuFeatures;
