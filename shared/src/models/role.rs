//! Role Model

use serde::{Deserialize, Serialize};

/// Caller role
///
/// Staff may list, assign, delete and export; customers may only submit
/// reservations and read availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    #[default]
    Customer,
}

impl Role {
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }
}

/// Staff login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Staff login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
}
