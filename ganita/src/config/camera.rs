//! Camera configuration: projection and view.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigLoadError;
use crate::core::{Mat4f, Vector3f};

/// Default config path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/camera.yaml";

/// Smallest accepted |up x forward| relative to |up|.
const MIN_UP_SEPARATION: f32 = 1e-4;

/// Full camera configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct CameraConfig {
    /// Projection settings
    #[serde(default)]
    pub projection: ProjectionSection,

    /// View (eye / target / up) settings
    #[serde(default)]
    pub view: ViewSection,
}

/// Projection kind and parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionSection {
    /// Perspective projection
    Perspective {
        /// Full vertical field of view in degrees
        #[serde(default = "defaults::fov_y_degrees")]
        fov_y_degrees: f32,
        /// Width / height
        #[serde(default = "defaults::aspect")]
        aspect: f32,
        /// Near clip distance (must be positive)
        #[serde(default = "defaults::near")]
        near: f32,
        /// Far clip distance
        #[serde(default = "defaults::far")]
        far: f32,
    },
    /// Orthographic projection
    Orthographic {
        /// Left plane
        #[serde(default = "neg_half_extent")]
        left: f32,
        /// Right plane
        #[serde(default = "defaults::ortho_half_extent")]
        right: f32,
        /// Bottom plane
        #[serde(default = "neg_half_extent")]
        bottom: f32,
        /// Top plane
        #[serde(default = "defaults::ortho_half_extent")]
        top: f32,
        /// Near plane
        #[serde(default = "defaults::near")]
        near: f32,
        /// Far plane
        #[serde(default = "defaults::far")]
        far: f32,
    },
}

fn neg_half_extent() -> f32 {
    -defaults::ortho_half_extent()
}

impl Default for ProjectionSection {
    fn default() -> Self {
        Self::Perspective {
            fov_y_degrees: defaults::fov_y_degrees(),
            aspect: defaults::aspect(),
            near: defaults::near(),
            far: defaults::far(),
        }
    }
}

/// Camera placement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewSection {
    /// Camera position
    #[serde(default = "defaults::eye")]
    pub eye: [f32; 3],

    /// Point the camera looks at
    #[serde(default = "defaults::center")]
    pub center: [f32; 3],

    /// Approximate up direction
    #[serde(default = "defaults::up")]
    pub up: [f32; 3],
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            eye: defaults::eye(),
            center: defaults::center(),
            up: defaults::up(),
        }
    }
}

impl CameraConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        debug!("Loading camera config from {}", path.display());
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/camera.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            debug!("{} not found, using built-in camera defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Reject parameters that would produce a degenerate matrix.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.projection {
            ProjectionSection::Perspective {
                fov_y_degrees,
                aspect,
                near,
                far,
            } => {
                if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
                    return Err(ConfigLoadError::Invalid(format!(
                        "fov_y_degrees must be in (0, 180), got {}",
                        fov_y_degrees
                    )));
                }
                if !(aspect > 0.0) {
                    return Err(ConfigLoadError::Invalid(format!(
                        "aspect must be positive, got {}",
                        aspect
                    )));
                }
                if !(near > 0.0) {
                    return Err(ConfigLoadError::Invalid(format!(
                        "perspective near must be positive, got {}",
                        near
                    )));
                }
                check_depth_range(near, far)?;
            }
            ProjectionSection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                if left == right || bottom == top {
                    return Err(ConfigLoadError::Invalid(format!(
                        "orthographic box is flat: [{}, {}] x [{}, {}]",
                        left, right, bottom, top
                    )));
                }
                check_depth_range(near, far)?;
                if (right - left - (far - near)).abs() > f32::EPSILON * (far - near).abs() {
                    warn!(
                        "Orthographic depth offset divides by width ({}) not depth ({})",
                        right - left,
                        far - near
                    );
                }
            }
        }

        let eye = Vector3f::from(self.view.eye);
        let center = Vector3f::from(self.view.center);
        let up = Vector3f::from(self.view.up);
        let forward = center - eye;
        if forward.dot_squared() == 0.0 {
            return Err(ConfigLoadError::Invalid(
                "view eye and center coincide".to_string(),
            ));
        }
        let up_len = up.length();
        if up_len == 0.0 {
            return Err(ConfigLoadError::Invalid("view up is zero".to_string()));
        }
        if forward.normalize().cross(&up).length() < MIN_UP_SEPARATION * up_len {
            return Err(ConfigLoadError::Invalid(
                "view up is parallel to the viewing direction".to_string(),
            ));
        }
        Ok(())
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> Mat4f {
        match self.projection {
            ProjectionSection::Perspective {
                fov_y_degrees,
                aspect,
                near,
                far,
            } => Mat4f::perspective(fov_y_degrees.to_radians(), aspect, near, far),
            ProjectionSection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4f::orthographic(left, right, bottom, top, near, far),
        }
    }

    /// View matrix
    pub fn view_matrix(&self) -> Mat4f {
        Mat4f::look(
            &Vector3f::from(self.view.eye),
            &Vector3f::from(self.view.center),
            &Vector3f::from(self.view.up),
        )
    }

    /// Projection applied after view
    pub fn view_projection(&self) -> Mat4f {
        self.projection_matrix() * self.view_matrix()
    }
}

fn check_depth_range(near: f32, far: f32) -> Result<(), ConfigLoadError> {
    if !(far > near) {
        return Err(ConfigLoadError::Invalid(format!(
            "far ({}) must be greater than near ({})",
            far, near
        )));
    }
    Ok(())
}
