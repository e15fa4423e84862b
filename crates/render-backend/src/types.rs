use serde::{Deserialize, Serialize};

// Re-export shared types from assembly-types
pub use assembly_types::{ColorToken, ShapeKind, Vec3};

/// What a drawn mesh represents. Returned by picking so the host can map
/// pointer events back to parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MeshTag {
    BasePlate,
    Shaft,
    Part { index: usize },
}

/// Parametric mesh primitive. Dimensions are in scene units and already
/// include any per-part scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    /// Cylinder along +Y.
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
    /// Torus in the XY plane.
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Cuboid {
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat disc, facing +Z before rotation.
    Disc { radius: f64, segments: u32 },
}

impl Primitive {
    /// The part shape this primitive renders, if it is a part primitive.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Primitive::Cylinder { .. } => Some(ShapeKind::Cylinder),
            Primitive::Torus { .. } => Some(ShapeKind::Ring),
            Primitive::Cuboid { .. } => Some(ShapeKind::Box),
            Primitive::Sphere { .. } => Some(ShapeKind::Sphere),
            Primitive::Disc { .. } => None,
        }
    }

    /// Radius of a sphere around the primitive's center that encloses it.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => radius_top.max(radius_bottom).hypot(height / 2.0),
            Primitive::Torus { radius, tube, .. } => radius + tube,
            Primitive::Cuboid {
                width,
                height,
                depth,
            } => (width * width + height * height + depth * depth).sqrt() / 2.0,
            Primitive::Sphere { radius, .. } => radius,
            Primitive::Disc { radius, .. } => radius,
        }
    }
}

/// PBR material with optional emissive emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub color: ColorToken,
    /// 0.0 = dielectric, 1.0 = metal.
    pub metalness: f64,
    /// 0.0 = mirror, 1.0 = diffuse.
    pub roughness: f64,
    pub emissive: Option<ColorToken>,
    pub emissive_intensity: f64,
}

impl MaterialParams {
    pub fn new(color: ColorToken, metalness: f64, roughness: f64) -> Self {
        Self {
            color,
            metalness,
            roughness,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        self.emissive.is_some() && self.emissive_intensity > 0.0
    }
}

/// One mesh to draw this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDraw {
    pub tag: MeshTag,
    pub primitive: Primitive,
    pub position: Vec3,
    /// Euler angles in radians, applied X, then Y, then Z.
    pub rotation: [f64; 3],
    /// Uniform scale applied on top of the primitive's dimensions.
    pub scale: f64,
    pub material: MaterialParams,
}

/// A text label anchored to a world-space point and projected to screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDraw {
    pub tag: MeshTag,
    pub anchor: Vec3,
    pub text: String,
}

/// Screen-centered text anchored to a world-space point, e.g. the progress badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayDraw {
    pub anchor: Vec3,
    pub text: String,
}

/// Orbit camera settings, applied every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub enable_pan: bool,
    pub auto_rotate: bool,
    /// Orbit speed in the backend's units; 1.0 is one revolution per 60 s.
    pub auto_rotate_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f64,
    pub cast_shadow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f64,
    pub color: ColorToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    pub ambient_intensity: f64,
    pub directional: DirectionalLight,
    pub point: PointLight,
}

/// Per-frame scene parameters passed to `begin_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Seconds since the scene host was created.
    pub elapsed_secs: f64,
    /// Rotation about Y applied to the whole assembly group.
    pub group_rotation_y: f64,
    pub lights: LightRig,
}

/// Everything submitted between one `begin_frame` / `end_frame` pair, as
/// plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub info: FrameInfo,
    pub camera: Option<CameraSettings>,
    pub meshes: Vec<MeshDraw>,
    pub labels: Vec<LabelDraw>,
    pub overlays: Vec<OverlayDraw>,
}

impl DrawList {
    pub fn new(info: FrameInfo) -> Self {
        Self {
            info,
            camera: None,
            meshes: Vec::new(),
            labels: Vec::new(),
            overlays: Vec::new(),
        }
    }

    /// Indices of the parts drawn, in draw order.
    pub fn part_indices(&self) -> Vec<usize> {
        self.meshes
            .iter()
            .filter_map(|m| match m.tag {
                MeshTag::Part { index } => Some(index),
                _ => None,
            })
            .collect()
    }

    pub fn mesh(&self, tag: MeshTag) -> Option<&MeshDraw> {
        self.meshes.iter().find(|m| m.tag == tag)
    }
}

/// Errors from the rendering backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("shape not supported by backend: {shape:?}")]
    UnsupportedShape { shape: ShapeKind },

    #[error("draw call outside of a frame")]
    FrameNotStarted,

    #[error("begin_frame called while a frame is open")]
    FrameAlreadyStarted,

    #[error("backend error: {message}")]
    Other { message: String },
}
