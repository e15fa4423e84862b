//! Timing and layout configuration for the assembly engine.

use serde::{Deserialize, Serialize};

use crate::types::EngineError;

/// Interval between consecutive part reveals.
pub const REVEAL_INTERVAL_MS: u64 = 600;
/// Pause after the last reveal before completion is signalled.
pub const TRAILING_DELAY_MS: u64 = 500;
/// Vertical distance between stacked parts, in scene units.
pub const PART_SPACING: f64 = 0.5;
/// Scale added per position from the top of the stack.
pub const SCALE_STEP: f64 = 0.05;

/// Placement parameters for the vertical part stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical spacing between consecutive parts.
    pub spacing: f64,
    /// Scale increment per part; base parts render largest.
    pub scale_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: PART_SPACING,
            scale_step: SCALE_STEP,
        }
    }
}

/// Configuration for reveal timing and layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub reveal_interval_ms: u64,
    pub trailing_delay_ms: u64,
    pub layout: LayoutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: REVEAL_INTERVAL_MS,
            trailing_delay_ms: TRAILING_DELAY_MS,
            layout: LayoutConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Near-instant reveals, for previews and thumbnails.
    pub fn instant() -> Self {
        Self {
            reveal_interval_ms: 1,
            trailing_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Check the invariants the scheduler and layout rely on.
    pub fn validate(&self) -> Result<(), EngineError> {
        // Equal reveal times would make reveal order depend on timer ties.
        if self.reveal_interval_ms == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "reveal_interval_ms must be greater than zero".to_string(),
            });
        }
        if !self.layout.spacing.is_finite() || self.layout.spacing <= 0.0 {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "layout.spacing must be finite and positive, got {}",
                    self.layout.spacing
                ),
            });
        }
        if !self.layout.scale_step.is_finite() || self.layout.scale_step < 0.0 {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "layout.scale_step must be finite and non-negative, got {}",
                    self.layout.scale_step
                ),
            });
        }
        Ok(())
    }

    /// Reveal offset for the part at `index`, from session start.
    pub fn reveal_delay_ms(&self, index: usize) -> u64 {
        index as u64 * self.reveal_interval_ms
    }

    /// Offset of the completion signal for a run of `total` parts.
    pub fn completion_delay_ms(&self, total: usize) -> u64 {
        match total {
            0 => self.trailing_delay_ms,
            n => self.reveal_delay_ms(n - 1) + self.trailing_delay_ms,
        }
    }
}
