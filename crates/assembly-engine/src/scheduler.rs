//! The reveal scheduler: the state machine that drives staged visibility.
//!
//! Each part gets a reveal timer at `index * reveal_interval_ms` after start.
//! The last reveal schedules completion `trailing_delay_ms` later. Every start
//! and reset cancels all outstanding timers and issues a new session id first.

use assembly_types::{AssemblyStatus, SessionId};
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::timers::{TimerAction, TimerQueue};
use crate::types::AssemblySession;

/// What happened while advancing time.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    Revealed {
        index: usize,
        progress_pct: f64,
        at_ms: u64,
    },
    Completed { at_ms: u64 },
}

/// Owns the timers for the current session and applies them to it.
#[derive(Debug)]
pub struct RevealScheduler {
    config: EngineConfig,
    timers: TimerQueue,
}

impl RevealScheduler {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            timers: TimerQueue::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace timing settings. Applies from the next start.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Begin a run over the session's parts.
    ///
    /// An empty run completes immediately; only its completion signal is
    /// deferred by the trailing delay.
    #[instrument(skip(self, session), fields(total = session.total()))]
    pub fn start(&mut self, session: &mut AssemblySession, now_ms: u64) {
        self.begin(session, now_ms);

        if session.parts.is_empty() {
            session.status = AssemblyStatus::Complete;
            session.recompute_progress();
            self.timers.schedule(
                now_ms + self.config.trailing_delay_ms,
                session.id,
                TimerAction::Complete,
            );
            return;
        }

        session.status = AssemblyStatus::Assembling;
        self.schedule_reveals(session, now_ms);
    }

    /// Abort the current run and immediately restart it from zero.
    ///
    /// Unlike `start`, an empty run passes through `Assembling` at 0% and
    /// completes when its trailing delay elapses.
    #[instrument(skip(self, session), fields(total = session.total()))]
    pub fn reset(&mut self, session: &mut AssemblySession, now_ms: u64) {
        self.begin(session, now_ms);
        session.status = AssemblyStatus::Assembling;

        if session.parts.is_empty() {
            self.timers.schedule(
                now_ms + self.config.trailing_delay_ms,
                session.id,
                TimerAction::Complete,
            );
            return;
        }

        self.schedule_reveals(session, now_ms);
    }

    /// Cancel all timers. The session itself is left as-is.
    pub fn cancel_all(&mut self) -> usize {
        self.timers.cancel_all()
    }

    /// Fire every timer due at or before `now_ms`, in due order.
    pub fn advance(&mut self, session: &mut AssemblySession, now_ms: u64) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();

        while let Some(timer) = self.timers.pop_due(now_ms) {
            if timer.session != session.id {
                warn!(
                    timer_session = %timer.session,
                    current_session = %session.id,
                    "ignoring stale timer"
                );
                continue;
            }

            match timer.action {
                TimerAction::Reveal { index } => {
                    if let Some(event) = self.reveal(session, index, timer.due_ms) {
                        events.push(event);
                    }
                }
                TimerAction::Complete => {
                    if let Some(event) = self.complete(session, timer.due_ms) {
                        events.push(event);
                    }
                }
            }
        }

        events
    }

    /// Clock time of the next pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn begin(&mut self, session: &mut AssemblySession, now_ms: u64) {
        self.timers.cancel_all();
        session.id = SessionId::new();
        session.clear_progress();
        session.started_at_ms = now_ms;
    }

    fn schedule_reveals(&mut self, session: &AssemblySession, now_ms: u64) {
        for part in &session.parts {
            self.timers.schedule(
                now_ms + part.reveal_delay_ms,
                session.id,
                TimerAction::Reveal { index: part.index },
            );
        }
    }

    fn reveal(
        &mut self,
        session: &mut AssemblySession,
        index: usize,
        at_ms: u64,
    ) -> Option<SchedulerEvent> {
        let total = session.total();
        let part = session.parts.get_mut(index)?;
        if part.visible {
            return None;
        }
        part.visible = true;
        session.revealed_count += 1;
        session.recompute_progress();
        debug!(
            index,
            revealed = session.revealed_count,
            progress_pct = session.progress_pct,
            "part revealed"
        );

        if session.revealed_count == total {
            let due = session.started_at_ms + self.config.completion_delay_ms(total);
            self.timers.schedule(due, session.id, TimerAction::Complete);
        }

        Some(SchedulerEvent::Revealed {
            index,
            progress_pct: session.progress_pct,
            at_ms,
        })
    }

    fn complete(&mut self, session: &mut AssemblySession, at_ms: u64) -> Option<SchedulerEvent> {
        if session.completion_fired {
            return None;
        }
        session.status = AssemblyStatus::Complete;
        session.progress_pct = 100.0;
        session.completion_fired = true;
        Some(SchedulerEvent::Completed { at_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_parts;
    use assembly_types::PartSpec;

    fn session_with(names: &[&str]) -> AssemblySession {
        let mut session = AssemblySession::idle();
        session.parts = layout_parts(
            names.iter().map(|n| PartSpec::new(*n)).collect(),
            &EngineConfig::default(),
        );
        session
    }

    #[test]
    fn reveals_fire_on_interval() {
        let mut session = session_with(&["A", "B", "C"]);
        let mut scheduler = RevealScheduler::new(EngineConfig::default());
        scheduler.start(&mut session, 0);
        assert_eq!(session.status, AssemblyStatus::Assembling);
        assert_eq!(scheduler.pending_timers(), 3);

        let events = scheduler.advance(&mut session, 0);
        assert_eq!(events.len(), 1);
        assert_eq!(session.revealed_count, 1);

        assert!(scheduler.advance(&mut session, 599).is_empty());
        assert_eq!(scheduler.advance(&mut session, 600).len(), 1);
        assert_eq!(scheduler.advance(&mut session, 1200).len(), 1);
        assert_eq!(session.progress_pct, 100.0);
        assert_eq!(session.status, AssemblyStatus::Assembling);

        assert!(scheduler.advance(&mut session, 1699).is_empty());
        assert_eq!(
            scheduler.advance(&mut session, 1700),
            vec![SchedulerEvent::Completed { at_ms: 1700 }]
        );
        assert_eq!(session.status, AssemblyStatus::Complete);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn large_jump_fires_everything_in_order() {
        let mut session = session_with(&["A", "B", "C", "D"]);
        let mut scheduler = RevealScheduler::new(EngineConfig::default());
        scheduler.start(&mut session, 100);

        let events = scheduler.advance(&mut session, 10_000);
        let reveal_times: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                SchedulerEvent::Revealed { at_ms, .. } => Some(*at_ms),
                _ => None,
            })
            .collect();
        assert_eq!(reveal_times, vec![100, 700, 1300, 1900]);
        assert_eq!(
            events.last(),
            Some(&SchedulerEvent::Completed { at_ms: 2400 })
        );
    }

    #[test]
    fn empty_start_is_complete_immediately() {
        let mut session = session_with(&[]);
        let mut scheduler = RevealScheduler::new(EngineConfig::default());
        scheduler.start(&mut session, 0);
        assert_eq!(session.status, AssemblyStatus::Complete);
        assert_eq!(session.progress_pct, 100.0);
        assert!(scheduler.advance(&mut session, 499).is_empty());
        assert_eq!(
            scheduler.advance(&mut session, 500),
            vec![SchedulerEvent::Completed { at_ms: 500 }]
        );
    }

    #[test]
    fn reset_clears_and_restarts() {
        let mut session = session_with(&["A", "B"]);
        let mut scheduler = RevealScheduler::new(EngineConfig::default());
        scheduler.start(&mut session, 0);
        scheduler.advance(&mut session, 600);
        let first_id = session.id;

        scheduler.reset(&mut session, 700);
        assert_ne!(session.id, first_id);
        assert_eq!(session.revealed_count, 0);
        assert_eq!(session.progress_pct, 0.0);
        assert!(session.parts.iter().all(|p| !p.visible));
        assert_eq!(session.status, AssemblyStatus::Assembling);
        assert_eq!(scheduler.next_due_ms(), Some(700));
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut session = session_with(&["A"]);
        let mut scheduler = RevealScheduler::new(EngineConfig::default());
        scheduler.start(&mut session, 0);
        // Simulate a session replaced without going through the scheduler.
        session.id = SessionId::new();

        assert!(scheduler.advance(&mut session, 10_000).is_empty());
        assert_eq!(session.revealed_count, 0);
    }
}
