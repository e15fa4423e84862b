//! Scene host: renders assembly sessions through a pluggable backend.
//!
//! Draws the fixed base plate and shaft, every revealed part with its
//! archetype primitive and material, hover emphasis with labels, and the
//! progress badge. Camera auto-rotation follows the session status.

pub mod camera;
pub mod config;
pub mod frame;
pub mod host;
pub mod motion;
pub mod types;
pub mod viewer_ext;

pub use camera::OrbitCamera;
pub use config::{CameraConfig, HighlightConfig, MotionConfig, SceneConfig};
pub use frame::{overlay_text, plan_frame};
pub use host::SceneHost;
pub use types::*;
pub use viewer_ext::ViewerBackend;
