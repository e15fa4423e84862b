//! MockBackend: deterministic test double implementing RenderBackend + PointerPicking.
//!
//! Records every frame as plain data so tests can assert on exactly what the
//! scene host asked to draw. Picking is scripted with `point_at`.

use std::collections::HashSet;

use crate::traits::{PointerPicking, RenderBackend};
use crate::types::*;

/// Frames recorded by the mock are plain draw lists.
pub type RecordedFrame = DrawList;

/// Deterministic test double for the rendering backend.
pub struct MockBackend {
    frames: Vec<DrawList>,
    open: Option<DrawList>,
    unsupported: HashSet<ShapeKind>,
    pointer_target: Option<MeshTag>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            open: None,
            unsupported: HashSet::new(),
            pointer_target: None,
        }
    }

    /// Make `draw_mesh` fail for part meshes of this shape. Fixtures are
    /// always drawn.
    pub fn without_shape(mut self, shape: ShapeKind) -> Self {
        self.unsupported.insert(shape);
        self
    }

    /// Script what the pointer is over. Picking only reports it if the mesh
    /// was drawn in the last presented frame.
    pub fn point_at(&mut self, target: Option<MeshTag>) {
        self.pointer_target = target;
    }

    /// All presented frames, oldest first.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    fn open_frame(&mut self) -> Result<&mut DrawList, BackendError> {
        self.open.as_mut().ok_or(BackendError::FrameNotStarted)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockBackend {
    fn begin_frame(&mut self, frame: &FrameInfo) -> Result<(), BackendError> {
        if self.open.is_some() {
            return Err(BackendError::FrameAlreadyStarted);
        }
        self.open = Some(DrawList::new(*frame));
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraSettings) -> Result<(), BackendError> {
        self.open_frame()?.camera = Some(*camera);
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &MeshDraw) -> Result<(), BackendError> {
        if let (MeshTag::Part { .. }, Some(shape)) = (mesh.tag, mesh.primitive.shape_kind()) {
            if self.unsupported.contains(&shape) {
                return Err(BackendError::UnsupportedShape { shape });
            }
        }
        self.open_frame()?.meshes.push(mesh.clone());
        Ok(())
    }

    fn draw_label(&mut self, label: &LabelDraw) -> Result<(), BackendError> {
        self.open_frame()?.labels.push(label.clone());
        Ok(())
    }

    fn draw_overlay(&mut self, overlay: &OverlayDraw) -> Result<(), BackendError> {
        self.open_frame()?.overlays.push(overlay.clone());
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), BackendError> {
        let frame = self.open.take().ok_or(BackendError::FrameNotStarted)?;
        self.frames.push(frame);
        Ok(())
    }
}

impl PointerPicking for MockBackend {
    fn pick(&self, _ndc: [f64; 2]) -> Option<MeshTag> {
        let target = self.pointer_target?;
        let last = self.frames.last()?;
        last.meshes.iter().any(|m| m.tag == target).then_some(target)
    }
}
