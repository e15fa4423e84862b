//! WASM entry points for the web host.
//!
//! This module is only compiled for the `wasm32` target. The host calls
//! `process_message` with JSON messages, drives time through `Tick` /
//! `RenderFrame`, and applies the presented draw list to its own scene.

use wasm_bindgen::prelude::*;

use render_backend::{DrawListBackend, Vec3};

use crate::dispatch;
use crate::messages::{EngineToUi, UiToEngine};
use crate::viewer_state::{BridgeError, ViewerState};

// Global viewer state; the browser host is single-threaded.
thread_local! {
    static VIEWER: std::cell::RefCell<Option<WasmViewer>> = std::cell::RefCell::new(None);
}

/// Holds the viewer state and the draw-list backend for the WASM module.
struct WasmViewer {
    state: ViewerState,
    backend: DrawListBackend,
}

/// Initialize the viewer. Must be called once before any other function;
/// calling it again discards the previous session.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let state = ViewerState::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    VIEWER.with(|cell| {
        *cell.borrow_mut() = Some(WasmViewer {
            state,
            backend: DrawListBackend::new(),
        });
    });
    Ok(())
}

/// Process a JSON message from the UI and return a JSON response.
///
/// The input should be a JSON-serialized `UiToEngine` message.
/// Returns a JSON-serialized `EngineToUi` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let response = VIEWER.with(|cell| {
        let mut viewer = cell.borrow_mut();
        let Some(viewer) = viewer.as_mut() else {
            return error_response(BridgeError::NotInitialized);
        };

        let msg: UiToEngine = match serde_json::from_str(json_input) {
            Ok(msg) => msg,
            Err(e) => {
                return error_response(BridgeError::Serialization {
                    reason: format!("failed to parse message: {}", e),
                });
            }
        };

        dispatch::dispatch(&mut viewer.state, msg, &mut viewer.backend)
    });

    to_json(&response)
}

/// Get the current session snapshot as JSON, without consuming events.
#[wasm_bindgen]
pub fn get_session_json() -> String {
    VIEWER.with(|cell| match cell.borrow().as_ref() {
        Some(viewer) => serde_json::to_string(&viewer.state.view()).unwrap_or_default(),
        None => to_json(&error_response(BridgeError::NotInitialized)),
    })
}

/// Get the most recently presented draw list as JSON, or `null` before the
/// first frame.
#[wasm_bindgen]
pub fn get_draw_list_json() -> String {
    VIEWER.with(|cell| {
        let viewer = cell.borrow();
        let presented = viewer.as_ref().and_then(|v| v.backend.presented());
        serde_json::to_string(&presented).unwrap_or_else(|_| "null".to_string())
    })
}

/// Fallback text to show while no frame has been presented.
#[wasm_bindgen]
pub fn get_loading_text() -> Option<String> {
    VIEWER.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|v| v.state.scene.loading_text())
            .map(str::to_string)
    })
}

/// Report the viewport size and current orbit eye position for picking.
#[wasm_bindgen]
pub fn set_view(width: f64, height: f64, eye_x: f64, eye_y: f64, eye_z: f64) {
    VIEWER.with(|cell| {
        if let Some(viewer) = cell.borrow_mut().as_mut() {
            viewer.backend.set_viewport(width, height);
            viewer.backend.set_eye(Some(Vec3::new(eye_x, eye_y, eye_z)));
        }
    });
}

fn error_response(e: BridgeError) -> EngineToUi {
    EngineToUi::Error {
        message: e.to_string(),
    }
}

fn to_json(response: &EngineToUi) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}"}}"#,
            e
        )
    })
}
