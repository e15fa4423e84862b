use serde::{Deserialize, Serialize};

use assembly_types::{AssemblyStatus, SessionId, VisualPart};

/// The mutable state of one assembly run. Owned by the session controller.
#[derive(Debug, Clone)]
pub struct AssemblySession {
    pub id: SessionId,
    /// Optional catalog category the parts were recommended for.
    pub category: Option<String>,
    pub parts: Vec<VisualPart>,
    pub status: AssemblyStatus,
    /// `100 * revealed_count / N`; 100 for an empty run.
    pub progress_pct: f64,
    pub revealed_count: usize,
    /// Clock time of the current (re)start.
    pub started_at_ms: u64,
    /// Whether this run's completion has been signalled.
    pub completion_fired: bool,
}

impl AssemblySession {
    /// An idle session with no parts.
    pub fn idle() -> Self {
        Self {
            id: SessionId::new(),
            category: None,
            parts: Vec::new(),
            status: AssemblyStatus::Idle,
            progress_pct: 0.0,
            revealed_count: 0,
            started_at_ms: 0,
            completion_fired: false,
        }
    }

    pub fn total(&self) -> usize {
        self.parts.len()
    }

    /// Hide every part and zero the counters. Highlight state is untouched.
    pub fn clear_progress(&mut self) {
        for part in &mut self.parts {
            part.visible = false;
        }
        self.revealed_count = 0;
        self.progress_pct = 0.0;
        self.completion_fired = false;
    }

    pub fn recompute_progress(&mut self) {
        self.progress_pct = match self.total() {
            0 => 100.0,
            n => 100.0 * self.revealed_count as f64 / n as f64,
        };
    }

    pub fn visible_parts(&self) -> impl Iterator<Item = &VisualPart> {
        self.parts.iter().filter(|p| p.visible)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            category: self.category.clone(),
            status: self.status,
            progress_pct: self.progress_pct,
            revealed_count: self.revealed_count,
            total: self.total(),
            parts: self.parts.clone(),
        }
    }
}

/// Read-only snapshot of a session, handed to renderers and hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub category: Option<String>,
    pub status: AssemblyStatus,
    pub progress_pct: f64,
    pub revealed_count: usize,
    pub total: usize,
    pub parts: Vec<VisualPart>,
}

impl SessionView {
    pub fn visible_parts(&self) -> impl Iterator<Item = &VisualPart> {
        self.parts.iter().filter(|p| p.visible)
    }
}

/// State changes published to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A run began. Follows `Canceled` when it replaced a run in flight.
    Started {
        session_id: SessionId,
        total: usize,
        category: Option<String>,
    },
    /// A run in flight was abandoned before completing.
    Canceled { session_id: SessionId },
    /// The current run was reset and restarted under a new id.
    Reset { session_id: SessionId },
    PartRevealed {
        session_id: SessionId,
        index: usize,
        progress_pct: f64,
        /// Clock time the reveal was due.
        at_ms: u64,
    },
    Completed { session_id: SessionId, at_ms: u64 },
    HighlightChanged { index: usize, highlighted: bool },
    TornDown,
}

/// Errors from the assembly engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid engine config: {reason}")]
    InvalidConfig { reason: String },

    #[error("part index {index} out of range (session has {count} parts)")]
    PartIndexOutOfRange { index: usize, count: usize },

    #[error("unknown subscription: {id}")]
    UnknownSubscription { id: u64 },
}
