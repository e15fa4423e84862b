use std::cell::RefCell;
use std::rc::Rc;

use assembly_engine::{
    Clock, EngineConfig, EngineError, ManualClock, SessionController, SessionEvent, SessionView,
};
use scene_host::{SceneConfig, SceneError, SceneHost};

/// The viewer state wrapper for the bridge.
///
/// Holds the session controller on a host-driven clock, the scene host, and
/// the events raised since the last response.
pub struct ViewerState {
    /// The assembly session controller.
    pub controller: SessionController,
    /// Clock shared with the controller; set from host timestamps.
    pub clock: ManualClock,
    /// Turns session snapshots into frames.
    pub scene: SceneHost,
    /// Part currently under the pointer, if any.
    pub hover: Option<usize>,
    /// First host timestamp seen. Viewer time counts from here, so a
    /// `performance.now()` origin far from zero does not fire a run at once.
    epoch_ms: Option<u64>,
    pending: Rc<RefCell<Vec<SessionEvent>>>,
}

impl ViewerState {
    /// Create a viewer with default settings.
    pub fn new() -> Result<Self, BridgeError> {
        Self::with_config(EngineConfig::default(), SceneConfig::default())
    }

    pub fn with_config(engine: EngineConfig, scene: SceneConfig) -> Result<Self, BridgeError> {
        let clock = ManualClock::new();
        let mut controller = SessionController::new(engine, clock.clone())?;
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = pending.clone();
        controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Ok(Self {
            controller,
            clock,
            scene: SceneHost::new(scene)?,
            hover: None,
            epoch_ms: None,
            pending,
        })
    }

    /// Move the clock to host time `host_ms` and fire due timers. Earlier
    /// timestamps than the current time leave the clock where it is.
    pub fn advance_to(&mut self, host_ms: u64) -> usize {
        let epoch = *self.epoch_ms.get_or_insert(host_ms);
        self.clock.set(host_ms.saturating_sub(epoch));
        self.controller.pump()
    }

    /// Seconds of viewer time, used for idle animation.
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.now_ms() as f64 / 1000.0
    }

    /// Move hover to `index`, clearing the previously hovered part.
    /// Returns whether the hovered part changed.
    pub fn set_hover(&mut self, index: Option<usize>) -> Result<bool, BridgeError> {
        if index == self.hover {
            return Ok(false);
        }
        if let Some(next) = index {
            // Validate before touching the old highlight.
            if next >= self.controller.parts().len() {
                return Err(EngineError::PartIndexOutOfRange {
                    index: next,
                    count: self.controller.parts().len(),
                }
                .into());
            }
        }
        if let Some(prev) = self.hover.take() {
            if prev < self.controller.parts().len() {
                self.controller.set_highlighted(prev, false)?;
            }
        }
        if let Some(next) = index {
            self.controller.set_highlighted(next, true)?;
        }
        self.hover = index;
        Ok(true)
    }

    /// Events raised since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn view(&self) -> SessionView {
        self.controller.view()
    }
}

/// Errors from the bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error("viewer not initialized")]
    NotInitialized,
}
