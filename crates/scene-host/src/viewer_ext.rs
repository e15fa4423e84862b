use render_backend::{PointerPicking, RenderBackend};

/// Combined trait for hosts that both draw frames and resolve pointer hits
/// on the same backend object.
pub trait ViewerBackend: RenderBackend + PointerPicking {
    fn as_picking(&self) -> &dyn PointerPicking;
}

impl<T: RenderBackend + PointerPicking> ViewerBackend for T {
    fn as_picking(&self) -> &dyn PointerPicking {
        self
    }
}
