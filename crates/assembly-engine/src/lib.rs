//! Staged assembly engine.
//!
//! Takes an ordered part list, classifies and places each part, then reveals
//! the parts one at a time on a timer while tracking progress. The
//! [`SessionController`] is the entry point; everything else is either pure
//! (classification, layout) or owned by it (scheduler, timers, highlights).

pub mod classify;
pub mod clock;
pub mod config;
pub mod interaction;
pub mod layout;
pub mod scheduler;
pub mod session;
pub mod timers;
pub mod types;

pub use classify::classify;
pub use clock::{Clock, ManualClock};
pub use config::{EngineConfig, LayoutConfig};
pub use layout::{layout_parts, position_of, scale_of};
pub use session::{SessionController, SubscriptionId};
pub use types::{AssemblySession, EngineError, SessionEvent, SessionView};
