use assembly_types::{AssemblyStatus, PartSpec, SessionId, VisualPart};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::interaction;
use crate::layout::layout_parts;
use crate::scheduler::{RevealScheduler, SchedulerEvent};
use crate::types::{AssemblySession, EngineError, SessionEvent, SessionView};

/// Handle returned by [`SessionController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&SessionEvent)>;
type CompletionHandler = Box<dyn FnMut(SessionId)>;

/// The externally visible assembly controller.
///
/// Owns the single session and its timers. At most one run is active at a
/// time: starting while a run is in flight cancels it first. Time only moves
/// when the host calls [`pump`](Self::pump).
pub struct SessionController {
    clock: Box<dyn Clock>,
    session: AssemblySession,
    scheduler: RevealScheduler,
    observers: Vec<(SubscriptionId, Observer)>,
    completion_handlers: Vec<CompletionHandler>,
    next_subscription: u64,
}

impl SessionController {
    /// Create a controller reading time from `clock`.
    pub fn new(config: EngineConfig, clock: impl Clock + 'static) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            clock: Box::new(clock),
            session: AssemblySession::idle(),
            scheduler: RevealScheduler::new(config),
            observers: Vec::new(),
            completion_handlers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        self.scheduler.config()
    }

    /// Replace the configuration. Takes effect on the next start or reset.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.scheduler.set_config(config);
        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Start a run over `parts`, replacing any run in flight.
    pub fn start_assembly(&mut self, parts: Vec<PartSpec>) {
        self.start_assembly_in(parts, None);
    }

    /// Start a run tagged with the catalog category it was recommended for.
    pub fn start_assembly_in(&mut self, parts: Vec<PartSpec>, category: Option<String>) {
        let now = self.clock.now_ms();
        self.cancel_in_flight();

        self.session.parts = layout_parts(parts, self.scheduler.config());
        self.session.category = category;
        self.scheduler.start(&mut self.session, now);

        info!(
            session = %self.session.id,
            total = self.session.total(),
            category = ?self.session.category,
            "assembly started"
        );
        self.emit(SessionEvent::Started {
            session_id: self.session.id,
            total: self.session.total(),
            category: self.session.category.clone(),
        });
    }

    /// Abort the current run and restart it from zero with the same parts.
    ///
    /// Reset is a restart, not a pause. With no run ever started it only
    /// cancels timers.
    pub fn reset_assembly(&mut self) {
        let now = self.clock.now_ms();
        if self.session.status == AssemblyStatus::Idle {
            self.scheduler.cancel_all();
            return;
        }
        self.cancel_in_flight();
        self.scheduler.reset(&mut self.session, now);

        info!(session = %self.session.id, total = self.session.total(), "assembly reset");
        self.emit(SessionEvent::Reset {
            session_id: self.session.id,
        });
    }

    /// Cancel all timers and drop the session, returning to `Idle`.
    pub fn teardown(&mut self) {
        let canceled = self.scheduler.cancel_all();
        self.session = AssemblySession::idle();
        info!(canceled, "assembly torn down");
        self.emit(SessionEvent::TornDown);
    }

    /// Fire every timer that is due by the clock's current time.
    /// Returns the number of state changes applied.
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now_ms();
        let events = self.scheduler.advance(&mut self.session, now);
        let count = events.len();

        for event in events {
            match event {
                SchedulerEvent::Revealed {
                    index,
                    progress_pct,
                    at_ms,
                } => self.emit(SessionEvent::PartRevealed {
                    session_id: self.session.id,
                    index,
                    progress_pct,
                    at_ms,
                }),
                SchedulerEvent::Completed { at_ms } => {
                    info!(session = %self.session.id, at_ms, "assembly complete");
                    self.emit(SessionEvent::Completed {
                        session_id: self.session.id,
                        at_ms,
                    });
                    let id = self.session.id;
                    for handler in &mut self.completion_handlers {
                        handler(id);
                    }
                }
            }
        }
        count
    }

    fn cancel_in_flight(&mut self) {
        let canceled = self.scheduler.cancel_all();
        if self.session.status == AssemblyStatus::Assembling {
            debug!(session = %self.session.id, canceled, "canceling run in flight");
            self.emit(SessionEvent::Canceled {
                session_id: self.session.id,
            });
        }
    }

    // ── Interaction ─────────────────────────────────────────────────────

    /// Set hover highlight on a part, in any phase.
    pub fn set_highlighted(&mut self, index: usize, value: bool) -> Result<(), EngineError> {
        if interaction::set_highlighted(&mut self.session.parts, index, value)? {
            self.emit(SessionEvent::HighlightChanged {
                index,
                highlighted: value,
            });
        }
        Ok(())
    }

    /// Clear every highlight, e.g. when the pointer leaves the viewport.
    pub fn clear_highlights(&mut self) {
        for index in interaction::clear_highlights(&mut self.session.parts) {
            self.emit(SessionEvent::HighlightChanged {
                index,
                highlighted: false,
            });
        }
    }

    // ── Observation ─────────────────────────────────────────────────────

    /// Register a completion callback. It is invoked once for every run that
    /// completes; canceled runs never invoke it.
    pub fn on_complete(&mut self, callback: impl FnMut(SessionId) + 'static) {
        self.completion_handlers.push(Box::new(callback));
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Result<(), EngineError> {
        let pos = self
            .observers
            .iter()
            .position(|(sid, _)| *sid == id)
            .ok_or(EngineError::UnknownSubscription { id: id.0 })?;
        self.observers.remove(pos);
        Ok(())
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn status(&self) -> AssemblyStatus {
        self.session.status
    }

    pub fn progress_pct(&self) -> f64 {
        self.session.progress_pct
    }

    pub fn revealed_count(&self) -> usize {
        self.session.revealed_count
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id
    }

    pub fn parts(&self) -> &[VisualPart] {
        &self.session.parts
    }

    pub fn session(&self) -> &AssemblySession {
        &self.session
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Clock time of the next pending timer, so hosts can sleep until then.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_timers()
    }
}
