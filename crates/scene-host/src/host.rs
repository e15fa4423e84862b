use assembly_engine::interaction::effective_highlights;
use assembly_engine::SessionView;
use render_backend::{MeshTag, PointerPicking, RenderBackend};
use tracing::{debug, instrument, warn};

use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::frame::plan_frame;
use crate::types::{FramePlan, FrameStats, SceneError, SceneState, LOADING_TEXT};

/// Renders session snapshots through a [`RenderBackend`].
///
/// The host never mutates the session; it reads a [`SessionView`] per frame
/// and owns only presentation state (camera policy, frame counter).
#[derive(Debug, Clone)]
pub struct SceneHost {
    config: SceneConfig,
    camera: OrbitCamera,
    state: SceneState,
    frames_presented: u64,
}

impl SceneHost {
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        Ok(Self {
            camera: OrbitCamera::new(config.camera),
            config,
            state: SceneState::Loading,
            frames_presented: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Replace presentation settings. Applies from the next frame.
    pub fn set_config(&mut self, config: SceneConfig) -> Result<(), SceneError> {
        config.validate()?;
        self.camera = OrbitCamera::new(config.camera);
        self.config = config;
        Ok(())
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Fallback text for the host to show while nothing has been presented.
    pub fn loading_text(&self) -> Option<&'static str> {
        match self.state {
            SceneState::Loading => Some(LOADING_TEXT),
            SceneState::Ready => None,
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Describe the frame for `view` without touching a backend.
    pub fn plan(&self, view: &SessionView, elapsed_secs: f64) -> FramePlan {
        plan_frame(&self.config, &self.camera, view, elapsed_secs)
    }

    /// Draw one frame.
    ///
    /// A part the backend cannot draw is skipped with a warning and its label
    /// dropped; the rest of the frame still goes out. Any other backend
    /// failure aborts the frame.
    #[instrument(skip(self, backend, view), fields(status = ?view.status, revealed = view.revealed_count))]
    pub fn render<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        view: &SessionView,
        elapsed_secs: f64,
    ) -> Result<FrameStats, SceneError> {
        let plan = self.plan(view, elapsed_secs);
        let mut stats = FrameStats {
            frame_number: self.frames_presented + 1,
            auto_rotate: plan.camera.auto_rotate,
            ..FrameStats::default()
        };

        backend.begin_frame(&plan.info)?;
        backend.set_camera(&plan.camera)?;
        for fixture in &plan.fixtures {
            backend.draw_mesh(fixture)?;
        }

        for mesh in &plan.parts {
            match backend.draw_mesh(mesh) {
                Ok(()) => stats.parts_drawn += 1,
                Err(err) => {
                    if let MeshTag::Part { index } = mesh.tag {
                        warn!(index, error = %err, "skipping part the backend could not draw");
                        stats.parts_skipped.push(index);
                    }
                }
            }
        }

        for label in &plan.labels {
            let skipped = matches!(label.tag, MeshTag::Part { index } if stats.parts_skipped.contains(&index));
            if skipped {
                continue;
            }
            backend.draw_label(label)?;
            stats.labels_drawn += 1;
        }

        if let Some(overlay) = &plan.overlay {
            backend.draw_overlay(overlay)?;
            stats.overlay_drawn = true;
        }

        backend.end_frame()?;

        self.frames_presented += 1;
        if self.state == SceneState::Loading {
            debug!("first frame presented");
            self.state = SceneState::Ready;
        }
        Ok(stats)
    }

    /// Resolve a pointer position to a visible part index.
    pub fn pick_part<P: PointerPicking + ?Sized>(
        &self,
        picker: &P,
        view: &SessionView,
        ndc: [f64; 2],
    ) -> Option<usize> {
        match picker.pick(ndc)? {
            MeshTag::Part { index } => view
                .parts
                .get(index)
                .filter(|p| p.visible)
                .map(|p| p.index),
            MeshTag::BasePlate | MeshTag::Shaft => None,
        }
    }

    /// Indices of parts currently drawn with hover emphasis.
    pub fn emphasized_parts(view: &SessionView) -> Vec<usize> {
        effective_highlights(&view.parts).collect()
    }
}
