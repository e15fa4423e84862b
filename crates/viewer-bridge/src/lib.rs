//! JSON message bridge between a web host and the assembly viewer.

pub mod dispatch;
pub mod messages;
pub mod viewer_state;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::dispatch;
pub use viewer_state::{BridgeError, ViewerState};
