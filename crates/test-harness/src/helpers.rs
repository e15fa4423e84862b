//! Helper functions: error type and part-list fixtures.

use assembly_types::PartSpec;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("dispatch error: {message}")]
    DispatchError { message: String },

    #[error("unexpected response: expected {expected}, got {got}")]
    UnexpectedResponse { expected: String, got: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("run did not complete within {limit_ms} ms")]
    Timeout { limit_ms: u64 },

    #[error("json error: {reason}")]
    Json { reason: String },
}

// ── Part Lists ──────────────────────────────────────────────────────────────

/// Parts with only names, in order.
pub fn parts_from_names(names: &[&str]) -> Vec<PartSpec> {
    names.iter().map(|n| PartSpec::new(*n)).collect()
}

/// A tank safety-valve kit: flange, gaskets, adapter, fasteners, valve, plug.
pub fn safety_valve_kit() -> Vec<PartSpec> {
    vec![
        PartSpec::new("凸缘：切向凸缘")
            .with_model("FV型号", "176/3150")
            .with_model("PL型号", "1291140000"),
        PartSpec::new("垫片：CNAF/PTFE")
            .with_model("FV型号", "5005-398")
            .with_model("PL型号", "1110016000"),
        PartSpec::new("过渡法兰").with_model("FV型号", "176/7050"),
        PartSpec::new("螺固件")
            .with_model("FV型号", "176/7021")
            .with_quantity(6),
        PartSpec::new("安全阀").with_model("FV型号", "010/144000"),
        PartSpec::new("安全阀垫片").with_model("GD型号", "ZAB46501-01-00"),
        PartSpec::new("螺塞").with_model("FV型号", "5128-005"),
    ]
}

/// A DN50 ball-valve kit: body, seal, handle and bolts.
pub fn ball_valve_kit() -> Vec<PartSpec> {
    vec![
        PartSpec::new("球阀主体").with_model("FV型号", "BV50-001"),
        PartSpec::new("密封垫片").with_model("FV型号", "5005-050"),
        PartSpec::new("手柄组件").with_model("FV型号", "HND-50"),
        PartSpec::new("连接螺栓")
            .with_model("FV型号", "176/5050")
            .with_quantity(4),
    ]
}
