//! AssemblyRun: fluent driver for scripted viewer sessions.
//!
//! Every step goes through `viewer_bridge::dispatch` against a `MockBackend`,
//! so scenarios exercise the same path a web host does. The clock only moves
//! when the script says so.

use assembly_engine::{EngineConfig, SessionEvent, SessionView};
use assembly_types::{AssemblyStatus, PartSpec};
use render_backend::{MeshTag, MockBackend, RecordedFrame};
use scene_host::{FrameStats, SceneConfig};
use viewer_bridge::messages::{EngineToUi, UiToEngine};
use viewer_bridge::{dispatch, ViewerState};

use crate::helpers::{parts_from_names, HarnessError};

/// Upper bound for `run_to_completion`, in virtual milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10 * 60 * 1000;

/// Scripted viewer session with a full event log.
pub struct AssemblyRun {
    pub state: ViewerState,
    pub backend: MockBackend,
    now_ms: u64,
    events: Vec<SessionEvent>,
    frames: Vec<FrameStats>,
    errors: Vec<String>,
}

impl std::fmt::Debug for AssemblyRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyRun")
            .field("now_ms", &self.now_ms)
            .field("events", &self.events)
            .field("frames", &self.frames)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl AssemblyRun {
    /// Default timing, still scene.
    pub fn mock() -> Result<Self, HarnessError> {
        Self::with_config(EngineConfig::default(), SceneConfig::still())
    }

    pub fn with_config(engine: EngineConfig, scene: SceneConfig) -> Result<Self, HarnessError> {
        let state = ViewerState::with_config(engine, scene).map_err(|e| HarnessError::DispatchError {
            message: e.to_string(),
        })?;
        Ok(Self {
            state,
            backend: MockBackend::new(),
            now_ms: 0,
            events: Vec::new(),
            frames: Vec::new(),
            errors: Vec::new(),
        })
    }

    // ── Sending ─────────────────────────────────────────────────────────

    /// Dispatch one message, logging its events. Error responses are
    /// recorded and returned as `DispatchError`.
    pub fn send(&mut self, msg: UiToEngine) -> Result<EngineToUi, HarnessError> {
        let response = dispatch(&mut self.state, msg, &mut self.backend);
        self.events.extend(response.events().iter().cloned());
        match response {
            EngineToUi::Error { message } => {
                self.errors.push(message.clone());
                Err(HarnessError::DispatchError { message })
            }
            other => Ok(other),
        }
    }

    /// Dispatch a raw JSON message, as a web host would.
    pub fn send_json(&mut self, json: &str) -> Result<EngineToUi, HarnessError> {
        let msg: UiToEngine = serde_json::from_str(json).map_err(|e| HarnessError::Json {
            reason: e.to_string(),
        })?;
        self.send(msg)
    }

    // ── Session ─────────────────────────────────────────────────────────

    pub fn start(&mut self, parts: Vec<PartSpec>) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::StartAssembly {
            parts,
            category: None,
            now_ms: Some(self.now_ms),
        })?;
        Ok(self)
    }

    pub fn start_names(&mut self, names: &[&str]) -> Result<&mut Self, HarnessError> {
        self.start(parts_from_names(names))
    }

    pub fn start_in(
        &mut self,
        parts: Vec<PartSpec>,
        category: &str,
    ) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::StartAssembly {
            parts,
            category: Some(category.to_string()),
            now_ms: Some(self.now_ms),
        })?;
        Ok(self)
    }

    pub fn reset(&mut self) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::ResetAssembly {
            now_ms: Some(self.now_ms),
        })?;
        Ok(self)
    }

    pub fn teardown(&mut self) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::Teardown)?;
        Ok(self)
    }

    // ── Time ────────────────────────────────────────────────────────────

    /// Move the clock to `now_ms` and fire due timers.
    pub fn advance_to(&mut self, now_ms: u64) -> Result<&mut Self, HarnessError> {
        self.now_ms = self.now_ms.max(now_ms);
        self.send(UiToEngine::Tick {
            now_ms: self.now_ms,
        })?;
        Ok(self)
    }

    pub fn advance(&mut self, delta_ms: u64) -> Result<&mut Self, HarnessError> {
        self.advance_to(self.now_ms + delta_ms)
    }

    /// Advance in `step_ms` increments until the run completes.
    pub fn run_to_completion(&mut self, step_ms: u64) -> Result<&mut Self, HarnessError> {
        let deadline = self.now_ms + DEFAULT_TIMEOUT_MS;
        let already = self.completion_times().len();
        while self.completion_times().len() == already {
            if self.now_ms >= deadline {
                return Err(HarnessError::Timeout {
                    limit_ms: DEFAULT_TIMEOUT_MS,
                });
            }
            self.advance(step_ms.max(1))?;
        }
        Ok(self)
    }

    /// Advance to `now_ms` and draw a frame.
    pub fn render_at(&mut self, now_ms: u64) -> Result<FrameStats, HarnessError> {
        self.now_ms = self.now_ms.max(now_ms);
        match self.send(UiToEngine::RenderFrame {
            now_ms: self.now_ms,
        })? {
            EngineToUi::FrameRendered { stats, .. } => {
                self.frames.push(stats.clone());
                Ok(stats)
            }
            other => Err(unexpected("FrameRendered", &other)),
        }
    }

    /// Draw a frame at the current time.
    pub fn render(&mut self) -> Result<FrameStats, HarnessError> {
        self.render_at(self.now_ms)
    }

    // ── Pointer ─────────────────────────────────────────────────────────

    pub fn hover(&mut self, index: usize, hovered: bool) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::HoverPart { index, hovered })?;
        Ok(self)
    }

    /// Put the mock pointer over `target` and send a pointer move.
    pub fn point_at(&mut self, target: Option<MeshTag>) -> Result<Option<usize>, HarnessError> {
        self.backend.point_at(target);
        match self.send(UiToEngine::PointerMove { ndc: [0.0, 0.0] })? {
            EngineToUi::HoverChanged { index, .. } => Ok(index),
            other => Err(unexpected("HoverChanged", &other)),
        }
    }

    pub fn pointer_leave(&mut self) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::PointerLeave)?;
        Ok(self)
    }

    pub fn configure(
        &mut self,
        engine: Option<EngineConfig>,
        scene: Option<SceneConfig>,
    ) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::Configure { engine, scene })?;
        Ok(self)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn status(&self) -> AssemblyStatus {
        self.state.controller.status()
    }

    pub fn progress(&self) -> f64 {
        self.state.controller.progress_pct()
    }

    /// Every event delivered so far, in order.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// `(index, due viewer time)` of every reveal, across all runs.
    pub fn reveal_log(&self) -> Vec<(usize, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::PartRevealed { index, at_ms, .. } => Some((*index, *at_ms)),
                _ => None,
            })
            .collect()
    }

    /// Progress after each reveal, across all runs.
    pub fn progress_log(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::PartRevealed { progress_pct, .. } => Some(*progress_pct),
                _ => None,
            })
            .collect()
    }

    pub fn completion_times(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Completed { at_ms, .. } => Some(*at_ms),
                _ => None,
            })
            .collect()
    }

    pub fn frames(&self) -> &[FrameStats] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.backend.last_frame()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

fn unexpected(expected: &str, got: &EngineToUi) -> HarnessError {
    HarnessError::UnexpectedResponse {
        expected: expected.to_string(),
        got: format!("{:?}", got),
    }
}
