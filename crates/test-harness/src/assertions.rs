//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names the context, expected vs actual, and the current
//! session status for debuggability.

use assembly_types::AssemblyStatus;

use crate::helpers::HarnessError;
use crate::workflow::AssemblyRun;

fn fail(run: &AssemblyRun, ctx: &str, detail: String) -> HarnessError {
    HarnessError::AssertionFailed {
        detail: format!(
            "[{}] {} (status={:?}, progress={:.1}%, t={}ms)",
            ctx,
            detail,
            run.status(),
            run.progress(),
            run.now_ms(),
        ),
    }
}

impl AssemblyRun {
    pub fn assert_status(&self, expected: AssemblyStatus, ctx: &str) -> Result<(), HarnessError> {
        if self.status() == expected {
            Ok(())
        } else {
            Err(fail(self, ctx, format!("expected status {:?}", expected)))
        }
    }

    /// Assert progress within `tol` percentage points.
    pub fn assert_progress(&self, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
        let actual = self.progress();
        if (actual - expected).abs() <= tol {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected progress {:.1}, got {:.3}", expected, actual),
            ))
        }
    }

    /// Assert exactly which parts are visible.
    pub fn assert_visible(&self, expected: &[usize], ctx: &str) -> Result<(), HarnessError> {
        let view = self.view();
        let actual: Vec<usize> = view.visible_parts().map(|p| p.index).collect();
        if actual == expected {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected visible {:?}, got {:?}", expected, actual),
            ))
        }
    }

    /// Assert the due times of every reveal so far, in order.
    pub fn assert_reveal_times(&self, expected: &[u64], ctx: &str) -> Result<(), HarnessError> {
        let actual: Vec<u64> = self.reveal_log().iter().map(|(_, t)| *t).collect();
        if actual == expected {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected reveals at {:?}, got {:?}", expected, actual),
            ))
        }
    }

    /// Assert reveals happened in strictly increasing index order within each run.
    pub fn assert_reveal_order(&self, ctx: &str) -> Result<(), HarnessError> {
        let mut last: Option<usize> = None;
        for event in self.events() {
            match event {
                assembly_engine::SessionEvent::Started { .. }
                | assembly_engine::SessionEvent::Reset { .. } => last = None,
                assembly_engine::SessionEvent::PartRevealed { index, .. } => {
                    if let Some(prev) = last {
                        if *index <= prev {
                            return Err(fail(
                                self,
                                ctx,
                                format!("part {} revealed after part {}", index, prev),
                            ));
                        }
                    }
                    last = Some(*index);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Assert the completion signal fired exactly once, at `at_ms`.
    pub fn assert_completed_once_at(&self, at_ms: u64, ctx: &str) -> Result<(), HarnessError> {
        let actual = self.completion_times();
        if actual == [at_ms] {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected one completion at {}ms, got {:?}", at_ms, actual),
            ))
        }
    }

    /// Assert which parts the last frame drew.
    pub fn assert_drawn(&self, expected: &[usize], ctx: &str) -> Result<(), HarnessError> {
        let actual = self
            .last_frame()
            .map(|f| f.part_indices())
            .ok_or_else(|| fail(self, ctx, "no frame has been rendered".to_string()))?;
        if actual == expected {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected drawn parts {:?}, got {:?}", expected, actual),
            ))
        }
    }

    /// Assert the last frame's progress badge text, or its absence.
    pub fn assert_overlay(&self, expected: Option<&str>, ctx: &str) -> Result<(), HarnessError> {
        let frame = self
            .last_frame()
            .ok_or_else(|| fail(self, ctx, "no frame has been rendered".to_string()))?;
        let actual = frame.overlays.first().map(|o| o.text.as_str());
        if actual == expected {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected overlay {:?}, got {:?}", expected, actual),
            ))
        }
    }

    pub fn assert_auto_rotate(&self, expected: bool, ctx: &str) -> Result<(), HarnessError> {
        let actual = self
            .last_frame()
            .and_then(|f| f.camera)
            .map(|c| c.auto_rotate)
            .ok_or_else(|| fail(self, ctx, "no camera in last frame".to_string()))?;
        if actual == expected {
            Ok(())
        } else {
            Err(fail(
                self,
                ctx,
                format!("expected auto_rotate={}, got {}", expected, actual),
            ))
        }
    }

    pub fn assert_no_errors(&self) -> Result<(), HarnessError> {
        if self.errors().is_empty() {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("expected no errors, got: {:?}", self.errors()),
            })
        }
    }
}
