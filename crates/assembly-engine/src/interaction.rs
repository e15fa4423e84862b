//! Hover highlighting, independent of reveal progress.

use assembly_types::VisualPart;
use tracing::debug;

use crate::types::EngineError;

/// Set a part's highlight flag.
///
/// Works in any assembly phase. Highlighting a part that is not yet visible is
/// allowed and simply has no visible effect until it is revealed. Returns
/// whether the flag changed.
pub fn set_highlighted(
    parts: &mut [VisualPart],
    index: usize,
    value: bool,
) -> Result<bool, EngineError> {
    let count = parts.len();
    let part = parts
        .get_mut(index)
        .ok_or(EngineError::PartIndexOutOfRange { index, count })?;

    if part.highlighted == value {
        return Ok(false);
    }
    part.highlighted = value;
    debug!(index, highlighted = value, visible = part.visible, "highlight changed");
    Ok(true)
}

/// Clear every highlight. Returns the indices that changed.
pub fn clear_highlights(parts: &mut [VisualPart]) -> Vec<usize> {
    parts
        .iter_mut()
        .filter(|p| p.highlighted)
        .map(|p| {
            p.highlighted = false;
            p.index
        })
        .collect()
}

/// Indices of parts that are both highlighted and visible, i.e. those whose
/// emphasis and label should actually be drawn.
pub fn effective_highlights(parts: &[VisualPart]) -> impl Iterator<Item = usize> + '_ {
    parts
        .iter()
        .filter(|p| p.highlighted && p.visible)
        .map(|p| p.index)
}
