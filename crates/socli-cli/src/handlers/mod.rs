//! One async function per shell command.
//!
//! Handlers receive the store, the session, and the terminal explicitly.
//! Local checks run before any query; a failed check returns
//! [`CommandError::Invalid`](crate::CommandError::Invalid) or
//! [`CommandError::NotLoggedIn`](crate::CommandError::NotLoggedIn).

pub mod account;
pub mod social;

use crate::error::Result;
use crate::terminal::Terminal;

/// The exact answer that confirms a destructive action. Case-sensitive.
pub const CONFIRM_WORD: &str = "yes";

pub(crate) fn confirmed(answer: &str) -> bool {
    answer == CONFIRM_WORD
}

/// Read a visible line and trim it.
pub(crate) fn ask<T: Terminal + ?Sized>(term: &mut T, prompt: &str) -> Result<String> {
    Ok(term.read_line(prompt)?.trim().to_string())
}

/// Use `arg` when given, otherwise prompt for the value.
pub(crate) fn arg_or_ask<T: Terminal + ?Sized>(
    term: &mut T,
    arg: &str,
    prompt: &str,
) -> Result<String> {
    let arg = arg.trim();
    if arg.is_empty() {
        ask(term, prompt)
    } else {
        Ok(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_is_exact() {
        assert!(confirmed("yes"));
        assert!(!confirmed("Yes"));
        assert!(!confirmed("YES"));
        assert!(!confirmed("y"));
        assert!(!confirmed(" yes"));
        assert!(!confirmed(""));
    }
}
