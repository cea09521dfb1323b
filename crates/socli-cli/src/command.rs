//! Command-line parsing: first token is the verb, the rest is one argument.

/// A parsed shell command. Arguments are trimmed and may be empty; each
/// handler decides whether an empty argument is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register,
    Login(String),
    Logout,
    Profile(String),
    EditProfile,
    ChangePassword,
    Delete,
    Follow(String),
    Unfollow(String),
    Followers(String),
    Following(String),
    Recommendations,
    Mutuals(String),
    Search(String),
    Popular,
    MutualPairs,
    Help,
    Clear,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim().to_string()),
            None => (line, String::new()),
        };

        let command = match verb {
            "register" => Self::Register,
            "login" => Self::Login(arg),
            "logout" => Self::Logout,
            "profile" => Self::Profile(arg),
            "edit_profile" => Self::EditProfile,
            "change_password" => Self::ChangePassword,
            "delete" => Self::Delete,
            "follow" => Self::Follow(arg),
            "unfollow" => Self::Unfollow(arg),
            "followers" => Self::Followers(arg),
            "following" => Self::Following(arg),
            "recommendations" => Self::Recommendations,
            "mutuals" => Self::Mutuals(arg),
            "search" => Self::Search(arg),
            "popular" => Self::Popular,
            "mutual_pairs" => Self::MutualPairs,
            "help" | "ls" | "?" => Self::Help,
            "clear" => Self::Clear,
            "exit" | "quit" => Self::Exit,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }

    #[test]
    fn test_verbs_without_arguments() {
        assert_eq!(Command::parse("register"), Some(Command::Register));
        assert_eq!(Command::parse("popular"), Some(Command::Popular));
        assert_eq!(Command::parse("  logout  "), Some(Command::Logout));
        assert_eq!(Command::parse("quit"), Some(Command::Exit));
        assert_eq!(Command::parse("exit"), Some(Command::Exit));
        assert_eq!(Command::parse("ls"), Some(Command::Help));
    }

    #[test]
    fn test_argument_is_rest_of_line_trimmed() {
        assert_eq!(
            Command::parse("follow   bob  "),
            Some(Command::Follow("bob".to_string()))
        );
        assert_eq!(
            Command::parse("search Mary Smith"),
            Some(Command::Search("Mary Smith".to_string()))
        );
        assert_eq!(Command::parse("followers"), Some(Command::Followers(String::new())));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            Command::parse("frobnicate now"),
            Some(Command::Unknown("frobnicate".to_string()))
        );
        // Verbs are case-sensitive.
        assert_eq!(Command::parse("LOGIN"), Some(Command::Unknown("LOGIN".to_string())));
    }
}
