use render_backend::{BackendError, CameraSettings, FrameInfo, LabelDraw, MeshDraw, OverlayDraw};
use serde::{Deserialize, Serialize};

/// Shown by the host until the first frame has been presented.
pub const LOADING_TEXT: &str = "加载3D场景...";

/// Whether the scene has presented a frame yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneState {
    #[default]
    Loading,
    Ready,
}

/// Everything that will be submitted for one frame, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub info: FrameInfo,
    pub camera: CameraSettings,
    /// Base plate and shaft.
    pub fixtures: Vec<MeshDraw>,
    /// Visible parts, ascending by index.
    pub parts: Vec<MeshDraw>,
    pub labels: Vec<LabelDraw>,
    pub overlay: Option<OverlayDraw>,
}

/// What a call to `SceneHost::render` actually drew.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame_number: u64,
    pub parts_drawn: usize,
    /// Parts the backend refused to draw; their labels are dropped too.
    pub parts_skipped: Vec<usize>,
    pub labels_drawn: usize,
    pub overlay_drawn: bool,
    pub auto_rotate: bool,
}

/// Errors from the scene host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("invalid scene config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}
