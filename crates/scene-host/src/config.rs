//! Scene presentation settings: camera, lights, fixed elements, part
//! materials, hover emphasis and idle motion.

use render_backend::{ColorToken, DirectionalLight, LightRig, PointLight, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::SceneError;

/// Orbit camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub enable_pan: bool,
    pub auto_rotate_speed: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 3.0, 4.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
            min_distance: 3.0,
            max_distance: 10.0,
            enable_pan: false,
            auto_rotate_speed: 0.5,
        }
    }
}

/// Material of an always-present scene element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixtureMaterial {
    pub color: ColorToken,
    pub metalness: f64,
    pub roughness: f64,
}

/// The base plate disc under the stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePlateConfig {
    pub radius: f64,
    pub y: f64,
    pub material: FixtureMaterial,
}

/// The central shaft the parts are stacked around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaftConfig {
    pub radius: f64,
    pub height: f64,
    pub y: f64,
    pub material: FixtureMaterial,
}

/// Hover emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Emissive intensity; the emissive color is the part's own color.
    pub emissive_intensity: f64,
    pub scale_factor: f64,
    /// Label height above the part center, before hover scaling.
    pub label_offset_y: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            emissive_intensity: 0.3,
            scale_factor: 1.1,
            label_offset_y: 0.6,
        }
    }
}

/// Idle animation rates. Everything is a pure function of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Per-part spin about Y, rad/s.
    pub part_spin: f64,
    /// Whole-group spin about Y, rad/s.
    pub group_spin: f64,
    pub float_speed: f64,
    pub float_intensity: f64,
    pub wobble_intensity: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            part_spin: 0.1,
            group_spin: 0.15,
            float_speed: 1.5,
            float_intensity: 0.3,
            wobble_intensity: 0.2,
        }
    }
}

impl MotionConfig {
    /// No motion at all.
    pub fn still() -> Self {
        Self {
            part_spin: 0.0,
            group_spin: 0.0,
            float_speed: 0.0,
            float_intensity: 0.0,
            wobble_intensity: 0.0,
        }
    }
}

/// Everything the scene host needs to turn a session into draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub lights: LightRig,
    pub base_plate: BasePlateConfig,
    pub shaft: ShaftConfig,
    pub part_metalness: f64,
    pub part_roughness: f64,
    pub highlight: HighlightConfig,
    pub motion: MotionConfig,
    /// Anchor of the "assembling" progress badge.
    pub overlay_anchor: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            lights: LightRig {
                ambient_intensity: 0.4,
                directional: DirectionalLight {
                    position: Vec3::new(10.0, 10.0, 5.0),
                    intensity: 1.0,
                    cast_shadow: true,
                },
                point: PointLight {
                    position: Vec3::new(-10.0, -10.0, -5.0),
                    intensity: 0.5,
                    color: ColorToken::rgb(0x4a, 0x90, 0xd9),
                },
            },
            base_plate: BasePlateConfig {
                radius: 1.5,
                y: -2.0,
                material: FixtureMaterial {
                    color: ColorToken::rgb(0x1a, 0x36, 0x5d),
                    metalness: 0.8,
                    roughness: 0.2,
                },
            },
            shaft: ShaftConfig {
                radius: 0.08,
                height: 3.0,
                y: -0.5,
                material: FixtureMaterial {
                    color: ColorToken::rgb(0x2d, 0x37, 0x48),
                    metalness: 0.9,
                    roughness: 0.1,
                },
            },
            part_metalness: 0.6,
            part_roughness: 0.3,
            highlight: HighlightConfig::default(),
            motion: MotionConfig::default(),
            overlay_anchor: Vec3::new(0.0, 2.5, 0.0),
        }
    }
}

impl SceneConfig {
    /// Default presentation with all idle motion disabled. Frames become a
    /// function of the session alone, which is what snapshot tests want.
    pub fn still() -> Self {
        Self {
            motion: MotionConfig::still(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(SceneError::InvalidConfig {
                reason: format!("camera.fov_degrees must be in (0, 180), got {}", cam.fov_degrees),
            });
        }
        if !(cam.min_distance > 0.0 && cam.min_distance <= cam.max_distance) {
            return Err(SceneError::InvalidConfig {
                reason: format!(
                    "camera distance range {}..{} is empty or non-positive",
                    cam.min_distance, cam.max_distance
                ),
            });
        }
        if !(self.highlight.scale_factor > 0.0) {
            return Err(SceneError::InvalidConfig {
                reason: "highlight.scale_factor must be positive".to_string(),
            });
        }
        for (name, value) in [
            ("part_metalness", self.part_metalness),
            ("part_roughness", self.part_roughness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SceneError::InvalidConfig {
                    reason: format!("{} must be in [0, 1], got {}", name, value),
                });
            }
        }
        Ok(())
    }
}
