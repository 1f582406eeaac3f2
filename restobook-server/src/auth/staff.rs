//! Staff account
//!
//! One shared account whose credentials come from configuration. The check is
//! a plain equality comparison after trimming.

use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

#[derive(Clone)]
pub struct StaffAccount {
    username: String,
    password: String,
}

impl std::fmt::Debug for StaffAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffAccount")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl StaffAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Rename the account; blank names are rejected and leave it unchanged
    pub fn set_username(&mut self, new_username: &str) -> AppResult<()> {
        validate_required_text(new_username, "username", MAX_NAME_LEN)?;
        self.username = new_username.trim().to_string();
        Ok(())
    }

    /// Whether `username` / `password` match this account
    pub fn check(&self, username: &str, password: &str) -> bool {
        username.trim() == self.username && password.trim() == self.password
    }
}
