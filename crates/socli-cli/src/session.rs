//! Login state for the running shell.

use crate::error::{CommandError, Result};

/// The one piece of mutable state the shell keeps: who is logged in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// The logged-in username, or [`CommandError::NotLoggedIn`].
    pub fn require_user(&self) -> Result<&str> {
        self.current_user().ok_or(CommandError::NotLoggedIn)
    }

    /// Whether `username` is the logged-in user.
    pub fn is_self(&self, username: &str) -> bool {
        self.current_user() == Some(username)
    }

    pub fn login(&mut self, username: impl Into<String>) {
        self.user = Some(username.into());
    }

    /// Clear the login, returning who was logged in.
    pub fn logout(&mut self) -> Option<String> {
        self.user.take()
    }

    /// Prompt shown at the command line.
    pub fn prompt(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}> "),
            None => "socli> ".to_string(),
        }
    }
}
