use crate::types::*;

/// Immediate-mode scene rendering service. The engine describes each frame;
/// the backend owns meshes, materials, lights, the camera and label projection.
/// Implemented by a host renderer (e.g. a WebGL scene) and by MockBackend.
pub trait RenderBackend {
    /// Open a frame. Every draw call belongs to the most recently opened frame.
    fn begin_frame(&mut self, frame: &FrameInfo) -> Result<(), BackendError>;

    /// Apply orbit camera settings for this frame.
    fn set_camera(&mut self, camera: &CameraSettings) -> Result<(), BackendError>;

    /// Draw a mesh primitive with a material.
    fn draw_mesh(&mut self, mesh: &MeshDraw) -> Result<(), BackendError>;

    /// Draw a world-anchored text label.
    fn draw_label(&mut self, label: &LabelDraw) -> Result<(), BackendError>;

    /// Draw a screen-centered overlay anchored at a world point.
    fn draw_overlay(&mut self, overlay: &OverlayDraw) -> Result<(), BackendError>;

    /// Close and present the frame.
    fn end_frame(&mut self) -> Result<(), BackendError>;
}

/// Pointer picking against the most recently presented frame.
pub trait PointerPicking {
    /// The mesh under the given normalized device coordinate, if any.
    fn pick(&self, ndc: [f64; 2]) -> Option<MeshTag>;
}
