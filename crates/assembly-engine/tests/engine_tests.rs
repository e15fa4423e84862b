use std::cell::RefCell;
use std::rc::Rc;

use assembly_engine::*;
use assembly_types::*;

/// A controller on a manual clock, plus a log of every event it emits.
fn controller() -> (SessionController, ManualClock, Rc<RefCell<Vec<SessionEvent>>>) {
    let clock = ManualClock::new();
    let mut ctl = SessionController::new(EngineConfig::default(), clock.clone()).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    ctl.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    (ctl, clock, log)
}

fn specs(names: &[&str]) -> Vec<PartSpec> {
    names.iter().map(|n| PartSpec::new(*n)).collect()
}

/// Step the clock forward in `step` increments up to `until`, pumping each time.
fn run_until(ctl: &mut SessionController, clock: &ManualClock, until: u64, step: u64) {
    while clock.now_ms() < until {
        clock.advance(step.min(until - clock.now_ms()));
        ctl.pump();
    }
}

fn reveals(log: &[SessionEvent]) -> Vec<(usize, f64, u64)> {
    log.iter()
        .filter_map(|e| match e {
            SessionEvent::PartRevealed {
                index,
                progress_pct,
                at_ms,
                ..
            } => Some((*index, *progress_pct, *at_ms)),
            _ => None,
        })
        .collect()
}

fn completions(log: &[SessionEvent]) -> Vec<u64> {
    log.iter()
        .filter_map(|e| match e {
            SessionEvent::Completed { at_ms, .. } => Some(*at_ms),
            _ => None,
        })
        .collect()
}

// ── Reveal timing ──────────────────────────────────────────────────────────

#[test]
fn three_parts_reveal_on_schedule() {
    let (mut ctl, clock, log) = controller();
    let completed = Rc::new(RefCell::new(0));
    let counter = completed.clone();
    ctl.on_complete(move |_| *counter.borrow_mut() += 1);

    ctl.start_assembly(specs(&["A", "B", "C"]));
    assert_eq!(ctl.status(), AssemblyStatus::Assembling);
    ctl.pump();
    run_until(&mut ctl, &clock, 3000, 50);

    let r = reveals(&log.borrow());
    assert_eq!(r.iter().map(|(i, _, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(r.iter().map(|(_, _, t)| *t).collect::<Vec<_>>(), vec![0, 600, 1200]);
    let pct: Vec<f64> = r.iter().map(|(_, p, _)| *p).collect();
    assert!((pct[0] - 33.3).abs() < 0.05, "got {}", pct[0]);
    assert!((pct[1] - 66.7).abs() < 0.05, "got {}", pct[1]);
    assert_eq!(pct[2], 100.0);

    assert_eq!(completions(&log.borrow()), vec![1700]);
    assert_eq!(*completed.borrow(), 1);
    assert_eq!(ctl.status(), AssemblyStatus::Complete);
    assert_eq!(ctl.revealed_count(), 3);
    assert_eq!(ctl.progress_pct(), 100.0);
}

#[test]
fn completion_waits_for_trailing_delay() {
    let (mut ctl, clock, _log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    clock.set(1699);
    ctl.pump();
    assert_eq!(ctl.status(), AssemblyStatus::Assembling);
    assert_eq!(ctl.progress_pct(), 100.0);
    clock.set(1700);
    ctl.pump();
    assert_eq!(ctl.status(), AssemblyStatus::Complete);
}

#[test]
fn no_reveal_before_its_delay() {
    let (mut ctl, clock, _log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C", "D"]));
    for t in [0, 599, 600, 1199, 1200, 1799, 1800] {
        clock.set(t);
        ctl.pump();
        let expected = (t / 600 + 1).min(4) as usize;
        assert_eq!(ctl.revealed_count(), expected, "at t={}", t);
    }
}

#[test]
fn empty_list_completes_without_reveals() {
    let (mut ctl, clock, log) = controller();
    let completed = Rc::new(RefCell::new(Vec::new()));
    let sink = completed.clone();
    ctl.on_complete(move |id| sink.borrow_mut().push(id));

    ctl.start_assembly(Vec::new());
    assert_eq!(ctl.status(), AssemblyStatus::Complete);
    assert_eq!(ctl.progress_pct(), 100.0);
    assert_eq!(ctl.pending_timers(), 1);

    run_until(&mut ctl, &clock, 499, 10);
    assert!(completed.borrow().is_empty());
    run_until(&mut ctl, &clock, 500, 1);
    assert_eq!(completed.borrow().len(), 1);
    assert!(reveals(&log.borrow()).is_empty());
    assert_eq!(completions(&log.borrow()), vec![500]);
}

// ── Single active session ──────────────────────────────────────────────────

#[test]
fn second_start_cancels_first_run() {
    let (mut ctl, clock, log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    ctl.pump();
    clock.set(300);
    ctl.pump();
    let first = ctl.session_id();

    ctl.start_assembly(specs(&["X", "Y"]));
    let second = ctl.session_id();
    assert_ne!(first, second);
    assert_eq!(ctl.revealed_count(), 0);
    assert_eq!(ctl.pending_timers(), 2);

    run_until(&mut ctl, &clock, 5000, 100);

    let log = log.borrow();
    let cancel_pos = log
        .iter()
        .position(|e| matches!(e, SessionEvent::Canceled { session_id } if *session_id == first))
        .expect("first run canceled");
    for e in &log[cancel_pos..] {
        if let SessionEvent::PartRevealed { session_id, .. } = e {
            assert_eq!(*session_id, second, "reveal from the canceled run");
        }
    }
    assert_eq!(ctl.revealed_count(), 2);
    // 300 + (1 * 600) + 500
    assert_eq!(completions(&log), vec![1400]);
}

#[test]
fn canceled_run_never_completes() {
    let (mut ctl, clock, _log) = controller();
    let completed = Rc::new(RefCell::new(Vec::new()));
    let sink = completed.clone();
    ctl.on_complete(move |id| sink.borrow_mut().push(id));

    ctl.start_assembly(specs(&["A"]));
    ctl.pump();
    let first = ctl.session_id();
    clock.set(400);
    ctl.start_assembly(specs(&["B"]));
    run_until(&mut ctl, &clock, 5000, 100);

    assert_eq!(completed.borrow().len(), 1);
    assert_ne!(completed.borrow()[0], first);
}

// ── Reset ──────────────────────────────────────────────────────────────────

#[test]
fn reset_mid_run_restarts_from_zero() {
    let (mut ctl, clock, log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    run_until(&mut ctl, &clock, 700, 100);
    assert_eq!(ctl.revealed_count(), 2);

    ctl.reset_assembly();
    assert_eq!(ctl.revealed_count(), 0);
    assert_eq!(ctl.progress_pct(), 0.0);
    assert!(ctl.parts().iter().all(|p| !p.visible));
    assert_eq!(ctl.status(), AssemblyStatus::Assembling);

    run_until(&mut ctl, &clock, 5000, 100);
    assert_eq!(ctl.revealed_count(), 3);
    // Restarted at 700: completes at 700 + 1200 + 500.
    assert_eq!(completions(&log.borrow()), vec![2400]);
}

#[test]
fn reset_after_complete_reenters_assembling() {
    let (mut ctl, clock, _log) = controller();
    ctl.start_assembly(specs(&["A", "B"]));
    run_until(&mut ctl, &clock, 2000, 100);
    assert_eq!(ctl.status(), AssemblyStatus::Complete);

    ctl.reset_assembly();
    assert_eq!(ctl.status(), AssemblyStatus::Assembling);
    assert_eq!(ctl.revealed_count(), 0);
    assert_eq!(ctl.progress_pct(), 0.0);
}

#[test]
fn reset_of_empty_run_passes_through_assembling() {
    let (mut ctl, clock, log) = controller();
    ctl.start_assembly(Vec::new());
    run_until(&mut ctl, &clock, 600, 100);

    ctl.reset_assembly();
    assert_eq!(ctl.status(), AssemblyStatus::Assembling);
    assert_eq!(ctl.progress_pct(), 0.0);
    run_until(&mut ctl, &clock, 1100, 100);
    assert_eq!(ctl.status(), AssemblyStatus::Complete);
    assert_eq!(ctl.progress_pct(), 100.0);
    assert_eq!(completions(&log.borrow()), vec![500, 1100]);
}

#[test]
fn reset_is_idempotent_and_safe_when_idle() {
    let (mut ctl, _clock, log) = controller();
    ctl.reset_assembly();
    ctl.reset_assembly();
    assert_eq!(ctl.status(), AssemblyStatus::Idle);
    assert_eq!(ctl.revealed_count(), 0);
    assert_eq!(ctl.pending_timers(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn repeated_reset_leaves_one_timer_set() {
    let (mut ctl, _clock, _log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    ctl.reset_assembly();
    ctl.reset_assembly();
    assert_eq!(ctl.pending_timers(), 3);
}

// ── Teardown ───────────────────────────────────────────────────────────────

#[test]
fn teardown_cancels_everything() {
    let (mut ctl, clock, log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    ctl.pump();
    ctl.teardown();
    assert_eq!(ctl.pending_timers(), 0);
    assert_eq!(ctl.status(), AssemblyStatus::Idle);
    assert!(ctl.parts().is_empty());

    let before = log.borrow().len();
    clock.set(10_000);
    assert_eq!(ctl.pump(), 0);
    assert_eq!(log.borrow().len(), before);
}

// ── Interaction ────────────────────────────────────────────────────────────

#[test]
fn highlight_is_independent_of_phase() {
    let (mut ctl, clock, log) = controller();
    ctl.start_assembly(specs(&["A", "B"]));

    // Not yet visible: accepted.
    ctl.set_highlighted(1, true).unwrap();
    assert!(ctl.parts()[1].highlighted);
    assert!(!ctl.parts()[1].visible);

    run_until(&mut ctl, &clock, 2000, 100);
    ctl.set_highlighted(0, true).unwrap();
    assert!(ctl.parts()[0].highlighted);

    // Reset clears visibility but not hover.
    ctl.reset_assembly();
    assert!(ctl.parts()[0].highlighted);

    let changes = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, SessionEvent::HighlightChanged { .. }))
        .count();
    assert_eq!(changes, 2);
}

#[test]
fn highlight_out_of_range_is_rejected() {
    let (mut ctl, _clock, _log) = controller();
    ctl.start_assembly(specs(&["A"]));
    assert_eq!(
        ctl.set_highlighted(5, true),
        Err(EngineError::PartIndexOutOfRange { index: 5, count: 1 })
    );
}

#[test]
fn clear_highlights_emits_per_part() {
    let (mut ctl, _clock, log) = controller();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    ctl.set_highlighted(0, true).unwrap();
    ctl.set_highlighted(2, true).unwrap();
    log.borrow_mut().clear();

    ctl.clear_highlights();
    assert_eq!(
        *log.borrow(),
        vec![
            SessionEvent::HighlightChanged { index: 0, highlighted: false },
            SessionEvent::HighlightChanged { index: 2, highlighted: false },
        ]
    );
}

// ── Observation & config ───────────────────────────────────────────────────

#[test]
fn unsubscribe_stops_delivery() {
    let clock = ManualClock::new();
    let mut ctl = SessionController::new(EngineConfig::default(), clock.clone()).unwrap();
    let seen = Rc::new(RefCell::new(0));
    let counter = seen.clone();
    let id = ctl.subscribe(move |_| *counter.borrow_mut() += 1);

    ctl.start_assembly(specs(&["A"]));
    assert_eq!(*seen.borrow(), 1);
    ctl.unsubscribe(id).unwrap();
    ctl.pump();
    assert_eq!(*seen.borrow(), 1);
    assert!(matches!(
        ctl.unsubscribe(id),
        Err(EngineError::UnknownSubscription { .. })
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let config = EngineConfig {
        reveal_interval_ms: 0,
        ..EngineConfig::default()
    };
    assert!(SessionController::new(config, ManualClock::new()).is_err());
}

#[test]
fn config_change_applies_to_next_start() {
    let (mut ctl, clock, log) = controller();
    ctl.set_config(EngineConfig {
        reveal_interval_ms: 100,
        trailing_delay_ms: 50,
        ..EngineConfig::default()
    })
    .unwrap();
    ctl.start_assembly(specs(&["A", "B", "C"]));
    run_until(&mut ctl, &clock, 1000, 10);
    let times: Vec<u64> = reveals(&log.borrow()).iter().map(|r| r.2).collect();
    assert_eq!(times, vec![0, 100, 200]);
    assert_eq!(completions(&log.borrow()), vec![250]);
}

#[test]
fn category_is_carried_on_session() {
    let (mut ctl, _clock, log) = controller();
    ctl.start_assembly_in(specs(&["A"]), Some("安全阀".to_string()));
    assert_eq!(ctl.view().category.as_deref(), Some("安全阀"));
    assert!(matches!(
        &log.borrow()[0],
        SessionEvent::Started { category: Some(c), total: 1, .. } if c == "安全阀"
    ));
}

#[test]
fn view_reflects_session() {
    let (mut ctl, clock, _log) = controller();
    ctl.start_assembly(specs(&["垫片", "螺塞"]));
    clock.set(0);
    ctl.pump();
    let view = ctl.view();
    assert_eq!(view.total, 2);
    assert_eq!(view.revealed_count, 1);
    assert_eq!(view.visible_parts().count(), 1);
    assert_eq!(view.parts[0].archetype.shape, ShapeKind::Ring);
    assert_eq!(view.parts[1].archetype.shape, ShapeKind::Sphere);
}
