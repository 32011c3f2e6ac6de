//! CPU capability report.
//!
//! Backend choice is fixed at compile time; this module only tells you what
//! the running machine could have used, for diagnostics.

use log::info;

use crate::lane::ACTIVE_BACKEND;

/// Instruction-set extensions detected on the running CPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    /// Time-stamp counter
    pub rdtsc: bool,
    /// PowerPC AltiVec (compile-time target feature only)
    pub altivec: bool,
    /// x86 MMX
    pub mmx: bool,
    /// AMD 3DNow! (std has no runtime query, always false)
    pub three_d_now: bool,
    /// x86 SSE
    pub sse: bool,
    /// x86 SSE2
    pub sse2: bool,
    /// x86 SSE3
    pub sse3: bool,
    /// x86 SSE4.1
    pub sse41: bool,
    /// x86 SSE4.2
    pub sse42: bool,
    /// x86 AVX
    pub avx: bool,
    /// Fused multiply-add
    pub fma: bool,
    /// ARM Advanced SIMD
    pub neon: bool,
}

impl CpuFeatures {
    /// Detect features of the running CPU.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub fn detect() -> Self {
        Self {
            rdtsc: is_x86_feature_detected!("tsc"),
            mmx: is_x86_feature_detected!("mmx"),
            sse: is_x86_feature_detected!("sse"),
            sse2: is_x86_feature_detected!("sse2"),
            sse3: is_x86_feature_detected!("sse3"),
            sse41: is_x86_feature_detected!("sse4.1"),
            sse42: is_x86_feature_detected!("sse4.2"),
            avx: is_x86_feature_detected!("avx"),
            fma: is_x86_feature_detected!("fma"),
            ..Self::default()
        }
    }

    /// Detect features of the running CPU.
    #[cfg(target_arch = "aarch64")]
    pub fn detect() -> Self {
        Self {
            neon: std::arch::is_aarch64_feature_detected!("neon"),
            // FMLA is part of the base AArch64 SIMD set
            fma: std::arch::is_aarch64_feature_detected!("neon"),
            ..Self::default()
        }
    }

    /// Detect features of the running CPU.
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    pub fn detect() -> Self {
        Self {
            altivec: cfg!(target_feature = "altivec"),
            neon: cfg!(target_feature = "neon"),
            ..Self::default()
        }
    }

    /// Names of the supported features, in declaration order.
    pub fn supported(&self) -> Vec<&'static str> {
        [
            ("rdtsc", self.rdtsc),
            ("altivec", self.altivec),
            ("mmx", self.mmx),
            ("3dnow", self.three_d_now),
            ("sse", self.sse),
            ("sse2", self.sse2),
            ("sse3", self.sse3),
            ("sse4.1", self.sse41),
            ("sse4.2", self.sse42),
            ("avx", self.avx),
            ("fma", self.fma),
            ("neon", self.neon),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Logs the compiled backend and the detected features.
    pub fn log_report(&self) {
        info!("Math backend: {}", ACTIVE_BACKEND);
        let names = self.supported();
        if names.is_empty() {
            info!("CPU features: none detected");
        } else {
            info!("CPU features: {}", names.join(", "));
        }
    }
}
