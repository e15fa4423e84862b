//! Stack layout: each part's position and scale from its index.

use assembly_types::{PartSpec, Vec3, VisualPart};

use crate::classify::classify;
use crate::config::{EngineConfig, LayoutConfig};

/// Position of part `index` in a centered vertical stack of `total` parts.
///
/// Index 0 is the top of the stack; `y` decreases by `spacing` per index and
/// the stack is symmetric about the origin.
pub fn position_of(index: usize, total: usize, spacing: f64) -> Vec3 {
    let start_y = total.saturating_sub(1) as f64 * spacing / 2.0;
    Vec3::new(0.0, start_y - index as f64 * spacing, 0.0)
}

/// Render scale of part `index`; earlier parts are larger.
pub fn scale_of(index: usize, total: usize, scale_step: f64) -> f64 {
    1.0 + total.saturating_sub(index) as f64 * scale_step
}

/// Classify and place every part, in input order. All parts start hidden.
pub fn layout_parts(specs: Vec<PartSpec>, config: &EngineConfig) -> Vec<VisualPart> {
    let total = specs.len();
    let LayoutConfig {
        spacing,
        scale_step,
    } = config.layout;

    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| VisualPart {
            archetype: classify(&spec.name),
            position: position_of(index, total, spacing),
            reveal_delay_ms: config.reveal_delay_ms(index),
            visible: false,
            highlighted: false,
            scale: scale_of(index, total, scale_step),
            index,
            spec,
        })
        .collect()
}
