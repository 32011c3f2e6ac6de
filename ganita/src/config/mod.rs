//! Camera configuration loading.
//!
//! Loads projection and view parameters from a YAML file with sensible
//! defaults, and turns them into [`Mat4f`](crate::core::Mat4f) matrices.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ganita::config::CameraConfig;
//!
//! // Load from default path (configs/camera.yaml), or built-in defaults
//! let config = CameraConfig::load_default()?;
//! let view_projection = config.view_projection();
//! # Ok::<(), ganita::config::ConfigLoadError>(())
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! projection:
//!   kind: perspective     # or orthographic (left/right/bottom/top/near/far)
//!   fov_y_degrees: 60.0
//!   aspect: 1.7778
//!   near: 0.1
//!   far: 100.0
//!
//! view:
//!   eye: [0.0, 2.0, 5.0]
//!   center: [0.0, 0.0, 0.0]
//!   up: [0.0, 1.0, 0.0]
//! ```

mod camera;
mod defaults;
mod error;

pub use camera::{CameraConfig, DEFAULT_CONFIG_PATH, ProjectionSection, ViewSection};
pub use error::ConfigLoadError;
