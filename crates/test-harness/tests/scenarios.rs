//! End-to-end viewer scenarios through AssemblyRun.
//!
//! Each scenario drives the full dispatch pipeline on a virtual clock and
//! checks timing, progress, rendering and hover at each step.

use assembly_engine::{EngineConfig, SessionEvent};
use assembly_types::AssemblyStatus;
use render_backend::MeshTag;
use test_harness::helpers::{ball_valve_kit, safety_valve_kit};
use test_harness::{AssemblyRun, HarnessError};

// ── Scenario 1: Three parts on the reference schedule ───────────────────

#[test]
fn test_three_parts_reference_timing() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start_names(&["A", "B", "C"]).unwrap();
    run.run_to_completion(50).unwrap();

    run.assert_reveal_times(&[0, 600, 1200], "abc").unwrap();
    run.assert_completed_once_at(1700, "abc").unwrap();
    run.assert_status(AssemblyStatus::Complete, "abc").unwrap();
    run.assert_progress(100.0, 0.0, "abc").unwrap();

    let progress = run.progress_log();
    assert_eq!(format!("{:.1}", progress[0]), "33.3");
    assert_eq!(format!("{:.1}", progress[1]), "66.7");
    assert_eq!(progress[2], 100.0);
    run.assert_no_errors().unwrap();
}

// ── Scenario 2: Empty list ──────────────────────────────────────────────

#[test]
fn test_empty_list_completes_after_trailing_delay() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start_names(&[]).unwrap();
    run.assert_status(AssemblyStatus::Complete, "empty").unwrap();
    run.assert_progress(100.0, 0.0, "empty").unwrap();

    run.advance_to(499).unwrap();
    assert!(run.completion_times().is_empty());
    run.advance_to(500).unwrap();
    run.assert_completed_once_at(500, "empty").unwrap();
    assert!(run.reveal_log().is_empty());

    let stats = run.render().unwrap();
    assert_eq!(stats.parts_drawn, 0);
    assert!(!stats.overlay_drawn);
}

// ── Scenario 3: Double start ────────────────────────────────────────────

#[test]
fn test_second_start_cancels_first() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start(safety_valve_kit()).unwrap();
    run.advance_to(650).unwrap();
    run.start(ball_valve_kit()).unwrap();
    run.run_to_completion(100).unwrap();

    // 650 + 3 * 600 + 500
    run.assert_completed_once_at(2950, "double start").unwrap();
    run.assert_reveal_order("double start").unwrap();
    assert_eq!(run.view().total, 4);

    let canceled = run
        .events()
        .iter()
        .filter(|e| matches!(e, SessionEvent::Canceled { .. }))
        .count();
    assert_eq!(canceled, 1);
}

// ── Scenario 4: Reset mid-run ───────────────────────────────────────────

#[test]
fn test_reset_restarts_from_zero() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start_names(&["A", "B", "C"]).unwrap();
    run.advance_to(700).unwrap();
    run.assert_visible(&[0, 1], "before reset").unwrap();

    run.reset().unwrap();
    run.assert_visible(&[], "after reset").unwrap();
    run.assert_progress(0.0, 0.0, "after reset").unwrap();
    run.assert_status(AssemblyStatus::Assembling, "after reset")
        .unwrap();

    run.run_to_completion(100).unwrap();
    run.assert_reveal_times(&[0, 600, 700, 1300, 1900], "reset").unwrap();
    run.assert_completed_once_at(2400, "reset").unwrap();
    run.assert_reveal_order("reset").unwrap();
}

#[test]
fn test_host_clock_far_from_zero() {
    let mut run = AssemblyRun::mock().unwrap();
    run.advance_to(12_000).unwrap();
    run.start_names(&["A", "B", "C"]).unwrap();

    run.advance(0).unwrap();
    run.assert_visible(&[0], "at start").unwrap();
    run.advance(599).unwrap();
    run.assert_visible(&[0], "before second reveal").unwrap();
    run.advance(1).unwrap();
    run.assert_visible(&[0, 1], "second reveal").unwrap();
    run.assert_status(AssemblyStatus::Assembling, "late clock")
        .unwrap();

    run.run_to_completion(100).unwrap();
    run.assert_reveal_times(&[0, 600, 1200], "late clock").unwrap();
    run.assert_completed_once_at(1700, "late clock").unwrap();
}

// ── Scenario 5: Rendering across phases ─────────────────────────────────

#[test]
fn test_frames_follow_session_phase() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start(ball_valve_kit()).unwrap();

    run.render_at(0).unwrap();
    run.assert_drawn(&[0], "t=0").unwrap();
    run.assert_overlay(Some("装配中 25%"), "t=0").unwrap();
    run.assert_auto_rotate(false, "t=0").unwrap();

    run.render_at(1300).unwrap();
    run.assert_drawn(&[0, 1, 2], "t=1300").unwrap();
    run.assert_overlay(Some("装配中 75%"), "t=1300").unwrap();

    run.render_at(1800).unwrap();
    run.assert_drawn(&[0, 1, 2, 3], "t=1800").unwrap();
    run.assert_overlay(None, "t=1800").unwrap();
    run.assert_auto_rotate(false, "t=1800").unwrap();

    run.render_at(2300).unwrap();
    run.assert_status(AssemblyStatus::Complete, "t=2300").unwrap();
    run.assert_auto_rotate(true, "t=2300").unwrap();
    assert_eq!(run.frames().len(), 4);
}

#[test]
fn test_shapes_follow_part_names() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start(ball_valve_kit()).unwrap();
    run.render_at(2000).unwrap();

    let frame = run.last_frame().unwrap();
    let kinds: Vec<_> = (0..4)
        .map(|i| {
            frame
                .mesh(MeshTag::Part { index: i })
                .and_then(|m| m.primitive.shape_kind())
        })
        .collect();
    use assembly_types::ShapeKind::*;
    assert_eq!(kinds, vec![Some(Cylinder), Some(Ring), Some(Box), Some(Sphere)]);
}

// ── Scenario 6: Hover ───────────────────────────────────────────────────

#[test]
fn test_hover_labels_with_quantity() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start(ball_valve_kit()).unwrap();
    run.run_to_completion(100).unwrap();
    run.render().unwrap();

    assert_eq!(run.point_at(Some(MeshTag::Part { index: 3 })).unwrap(), Some(3));
    let stats = run.render().unwrap();
    assert_eq!(stats.labels_drawn, 1);
    let frame = run.last_frame().unwrap();
    assert_eq!(frame.labels[0].text, "连接螺栓 ×4");

    run.pointer_leave().unwrap();
    let stats = run.render().unwrap();
    assert_eq!(stats.labels_drawn, 0);
}

#[test]
fn test_hover_before_reveal_is_silent() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start_names(&["A", "B"]).unwrap();
    run.hover(1, true).unwrap();
    let stats = run.render_at(0).unwrap();
    assert_eq!(stats.labels_drawn, 0);

    let stats = run.render_at(600).unwrap();
    assert_eq!(stats.labels_drawn, 1);
    run.assert_no_errors().unwrap();
}

#[test]
fn test_hover_out_of_range_reports_error() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start_names(&["A"]).unwrap();
    let err = run.hover(4, true).unwrap_err();
    assert!(matches!(err, HarnessError::DispatchError { .. }));
    assert_eq!(run.errors().len(), 1);
    assert!(run.assert_no_errors().is_err());
}

// ── Scenario 7: Configuration & JSON ────────────────────────────────────

#[test]
fn test_instant_config_finishes_fast() {
    let mut run = AssemblyRun::mock().unwrap();
    run.configure(Some(EngineConfig::instant()), None).unwrap();
    run.start(safety_valve_kit()).unwrap();
    run.advance_to(10).unwrap();
    run.assert_status(AssemblyStatus::Complete, "instant").unwrap();
    run.assert_completed_once_at(6, "instant").unwrap();
}

#[test]
fn test_json_start_message() {
    let mut run = AssemblyRun::mock().unwrap();
    run.send_json(
        r#"{"type":"StartAssembly","category":"安全阀","parts":[
            {"partName":"安全阀","models":{"FV型号":"010/144000"}},
            {"partName":"螺塞"}
        ]}"#,
    )
    .unwrap();
    run.run_to_completion(100).unwrap();
    run.assert_completed_once_at(1100, "json").unwrap();
    assert_eq!(run.view().category.as_deref(), Some("安全阀"));

    let err = run.send_json(r#"{"type":"Explode"}"#).unwrap_err();
    assert!(matches!(err, HarnessError::Json { .. }));
}

// ── Scenario 8: Teardown ────────────────────────────────────────────────

#[test]
fn test_teardown_stops_everything() {
    let mut run = AssemblyRun::mock().unwrap();
    run.start_names(&["A", "B", "C"]).unwrap();
    run.advance_to(100).unwrap();
    run.teardown().unwrap();
    run.advance_to(10_000).unwrap();

    run.assert_status(AssemblyStatus::Idle, "teardown").unwrap();
    assert_eq!(run.reveal_log().len(), 1);
    assert!(run.completion_times().is_empty());
    assert!(run.run_to_completion(1000).is_err());
}
