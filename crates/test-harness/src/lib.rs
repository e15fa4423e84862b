//! Test harness for scripted assembly-viewer sessions.
//!
//! Drives the viewer through the same JSON message dispatch a web host uses,
//! against a recording backend and a virtual clock, and checks what happened.
//!
//! # Key Components
//!
//! - [`AssemblyRun`]: fluent API for scripting sessions
//! - [`assertions`]: assertion helpers with diagnostics
//! - [`report`]: text run reports
//! - [`helpers`]: error type and part-list fixtures

pub mod assertions;
pub mod helpers;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use report::RunReport;
pub use workflow::AssemblyRun;
