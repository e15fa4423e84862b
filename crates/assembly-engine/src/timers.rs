use assembly_types::SessionId;
use tracing::debug;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Reveal { index: usize },
    Complete,
}

/// A pending timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    /// Absolute clock time at which the timer is due.
    pub due_ms: u64,
    /// The session that scheduled it. Timers from other sessions are stale.
    pub session: SessionId,
    pub action: TimerAction,
}

/// The owned list of outstanding timers.
///
/// Kept sorted by `(due_ms, id)`, so timers due at the same instant fire in
/// scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, session: SessionId, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let pos = self
            .pending
            .partition_point(|t| (t.due_ms, t.id) <= (due_ms, id));
        self.pending.insert(
            pos,
            Timer {
                id,
                due_ms,
                session,
                action,
            },
        );
        debug!(?id, due_ms, ?action, "timer scheduled");
        id
    }

    /// Cancel every pending timer. Safe to call with nothing pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        if count > 0 {
            debug!(count, "timers canceled");
        }
        count
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        match self.pending.first() {
            Some(t) if t.due_ms <= now_ms => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.first().map(|t| t.due_ms)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
