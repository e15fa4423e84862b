use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one assembly run. A new id is issued on every start or reset,
/// and every scheduled timer carries the id it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of an assembly session.
///
/// Transitions: `Idle -> Assembling -> Complete`, and `Complete -> Assembling`
/// on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssemblyStatus {
    #[default]
    Idle,
    Assembling,
    Complete,
}

impl AssemblyStatus {
    pub fn is_assembling(self) -> bool {
        self == AssemblyStatus::Assembling
    }
}
