//! Rendering seam for the assembly viewer.
//!
//! The engine describes frames as mesh, label and overlay draw calls; a
//! backend turns them into pixels. `MockBackend` records frames for tests and
//! `DrawListBackend` hands them to a host renderer as data.

pub mod draw_list;
pub mod mock_backend;
pub mod primitives;
pub mod traits;
pub mod types;

pub use draw_list::{DrawListBackend, Ray};
pub use mock_backend::{MockBackend, RecordedFrame};
pub use traits::*;
pub use types::*;
