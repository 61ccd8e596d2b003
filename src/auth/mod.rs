pub mod jwt;

use serde::{Deserialize, Serialize};

/// Session role carried in the token. Managers may edit revenue targets;
/// staff may edit the operational columns only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Staff,
}

impl Role {
    /// Parse the stored/submitted role string. Anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "manager" => Some(Role::Manager),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}
