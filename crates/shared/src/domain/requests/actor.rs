use serde::{Deserialize, Serialize};

pub const SYSTEM_USERNAME: &str = "อัตโนมัติ";

/// Who performed a transition; recorded on every journal row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub username: String,
}

impl Actor {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Attribution used for automatic matches and auto-confirmations.
    pub fn system() -> Self {
        Self::new(0, SYSTEM_USERNAME)
    }
}
