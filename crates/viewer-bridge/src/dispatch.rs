use scene_host::ViewerBackend;
use tracing::warn;

use crate::messages::{EngineToUi, UiToEngine};
use crate::viewer_state::{BridgeError, ViewerState};

/// Dispatch a UI message to the viewer and return a response.
///
/// This is the main entry point for processing messages from the JavaScript
/// main thread. Failures become an `Error` response and leave the session as
/// it was.
pub fn dispatch(
    state: &mut ViewerState,
    msg: UiToEngine,
    backend: &mut dyn ViewerBackend,
) -> EngineToUi {
    match handle_message(state, msg, backend) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "message failed");
            EngineToUi::Error {
                message: e.to_string(),
            }
        }
    }
}

fn handle_message(
    state: &mut ViewerState,
    msg: UiToEngine,
    backend: &mut dyn ViewerBackend,
) -> Result<EngineToUi, BridgeError> {
    match msg {
        // -- Session --
        UiToEngine::StartAssembly {
            parts,
            category,
            now_ms,
        } => {
            if let Some(now_ms) = now_ms {
                state.advance_to(now_ms);
            }
            state.hover = None;
            state.controller.start_assembly_in(parts, category);
            Ok(session_updated(state))
        }

        UiToEngine::ResetAssembly { now_ms } => {
            if let Some(now_ms) = now_ms {
                state.advance_to(now_ms);
            }
            state.controller.reset_assembly();
            Ok(session_updated(state))
        }

        UiToEngine::Teardown => {
            state.hover = None;
            state.controller.teardown();
            Ok(session_updated(state))
        }

        UiToEngine::GetSession => Ok(session_updated(state)),

        // -- Time --
        UiToEngine::Tick { now_ms } => {
            state.advance_to(now_ms);
            Ok(session_updated(state))
        }

        UiToEngine::RenderFrame { now_ms } => {
            state.advance_to(now_ms);
            let view = state.view();
            let elapsed = state.elapsed_secs();
            let stats = state.scene.render(backend, &view, elapsed)?;
            Ok(EngineToUi::FrameRendered {
                stats,
                status: view.status,
                progress_pct: view.progress_pct,
                events: state.take_events(),
            })
        }

        // -- Pointer --
        UiToEngine::HoverPart { index, hovered } => {
            if hovered {
                state.set_hover(Some(index))?;
            } else if state.hover == Some(index) {
                state.set_hover(None)?;
            } else {
                state.controller.set_highlighted(index, false)?;
            }
            Ok(hover_changed(state))
        }

        UiToEngine::PointerMove { ndc } => {
            let view = state.view();
            let hit = state.scene.pick_part(backend.as_picking(), &view, ndc);
            state.set_hover(hit)?;
            Ok(hover_changed(state))
        }

        UiToEngine::PointerLeave => {
            state.hover = None;
            state.controller.clear_highlights();
            Ok(hover_changed(state))
        }

        // -- Settings --
        UiToEngine::Configure { engine, scene } => {
            // Validate both before applying either.
            if let Some(engine) = &engine {
                engine.validate()?;
            }
            if let Some(scene) = &scene {
                scene.validate()?;
            }
            if let Some(engine) = engine {
                state.controller.set_config(engine)?;
            }
            if let Some(scene) = scene {
                state.scene.set_config(scene)?;
            }
            Ok(EngineToUi::ConfigApplied {
                engine: *state.controller.config(),
                scene: *state.scene.config(),
            })
        }
    }
}

/// Build a SessionUpdated response from the current viewer state.
fn session_updated(state: &mut ViewerState) -> EngineToUi {
    EngineToUi::SessionUpdated {
        view: state.view(),
        events: state.take_events(),
    }
}

fn hover_changed(state: &mut ViewerState) -> EngineToUi {
    EngineToUi::HoverChanged {
        index: state.hover,
        events: state.take_events(),
    }
}
