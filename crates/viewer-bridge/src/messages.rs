use serde::{Deserialize, Serialize};

use assembly_engine::{EngineConfig, SessionEvent, SessionView};
use assembly_types::{AssemblyStatus, PartSpec};
use scene_host::{FrameStats, SceneConfig};

/// Messages from the UI (JavaScript main thread) to the viewer engine.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    // -- Session --
    /// Start staged assembly of an ordered part list, replacing any run.
    /// `now_ms` is the host timestamp of the request; without one the run is
    /// anchored to the latest host time seen.
    StartAssembly {
        parts: Vec<PartSpec>,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        now_ms: Option<u64>,
    },
    /// Restart the current run from zero.
    ResetAssembly {
        #[serde(default)]
        now_ms: Option<u64>,
    },
    /// Drop the session and cancel all timers.
    Teardown,
    /// Query the session without changing it.
    GetSession,

    // -- Time --
    /// Advance the viewer clock to the host timestamp and fire due reveals.
    Tick { now_ms: u64 },
    /// Advance the clock, then draw a frame.
    RenderFrame { now_ms: u64 },

    // -- Pointer --
    /// Set or clear hover on a part directly.
    HoverPart { index: usize, hovered: bool },
    /// Pointer moved; hover follows whatever part is under it.
    PointerMove { ndc: [f64; 2] },
    /// Pointer left the viewport.
    PointerLeave,

    // -- Settings --
    /// Replace engine and/or scene settings. Omitted parts are unchanged.
    Configure {
        #[serde(default)]
        engine: Option<EngineConfig>,
        #[serde(default)]
        scene: Option<SceneConfig>,
    },
}

/// Messages from the viewer engine to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// Session snapshot plus the events raised since the last response.
    SessionUpdated {
        view: SessionView,
        events: Vec<SessionEvent>,
    },

    /// A frame was drawn.
    FrameRendered {
        stats: FrameStats,
        status: AssemblyStatus,
        progress_pct: f64,
        events: Vec<SessionEvent>,
    },

    /// The hovered part changed (or was confirmed).
    HoverChanged {
        index: Option<usize>,
        events: Vec<SessionEvent>,
    },

    /// Settings now in effect.
    ConfigApplied {
        engine: EngineConfig,
        scene: SceneConfig,
    },

    /// An error occurred handling the message. Session state is unchanged.
    Error { message: String },
}

impl EngineToUi {
    /// Events carried by this response, if any.
    pub fn events(&self) -> &[SessionEvent] {
        match self {
            EngineToUi::SessionUpdated { events, .. }
            | EngineToUi::FrameRendered { events, .. }
            | EngineToUi::HoverChanged { events, .. } => events,
            EngineToUi::ConfigApplied { .. } | EngineToUi::Error { .. } => &[],
        }
    }
}
