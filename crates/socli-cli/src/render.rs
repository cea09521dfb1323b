//! Plain-text rendering of query results.

use std::fmt::Write;

use socli_core::{MutualPair, PopularUser, Profile, Recommendation, UserSummary};

pub const BANNER: &str = "
    ╔═══════════════════════════════════════════════╗
    ║                    Socli                      ║
    ║           Type 'help' for commands            ║
    ╚═══════════════════════════════════════════════╝
";

pub const HELP: &str = "
=== Socli Network Commands ===

Account Management:
  register          - Create a new user account
  login [user]      - Log in to your account
  logout            - Log out from your account
  profile [user]    - View your profile or another user's profile
  edit_profile      - Edit your profile information
  change_password   - Change your account password
  delete            - Delete your own account

Social Interactions:
  follow <user>     - Follow another user
  unfollow <user>   - Unfollow a user
  followers [user]  - List users following you or another user
  following [user]  - List users you or another user is following
  recommendations   - People you may know
  mutuals <user>    - Users followed by both you and another user

Search & Exploration:
  search [term]     - Search users by name or username
  popular           - Explore the most followed users
  mutual_pairs      - Sample users who follow each other

General Commands:
  clear             - Clear the screen
  help              - Show this help message
  exit              - Exit the application
";

/// A profile card. Email is only included when `show_email` is set.
pub fn profile(profile: &Profile, show_email: bool, followers: i64, following: i64) -> String {
    let mut out = String::from("\n=== User Profile ===\n");
    let _ = writeln!(out, "Username: {}", profile.username);
    let _ = writeln!(out, "Name: {}", profile.name);
    if show_email {
        let _ = writeln!(out, "Email: {}", profile.email);
    }
    let bio = if profile.bio.is_empty() {
        "No bio available"
    } else {
        &profile.bio
    };
    let _ = writeln!(out, "Bio: {bio}");
    if let Some(joined) = profile.join_date {
        let _ = writeln!(out, "Joined: {}", joined.format("%Y-%m-%d %H:%M"));
    }
    let _ = writeln!(out, "Followers: {followers}");
    let _ = write!(out, "Following: {following}");
    out
}

/// A numbered `username (name)` list under a heading.
pub fn user_list(heading: &str, users: &[UserSummary]) -> String {
    let mut out = format!("\n{heading}");
    for (i, user) in users.iter().enumerate() {
        let _ = write!(out, "\n{}. {} ({})", i + 1, user.username, user.name);
    }
    out
}

pub fn recommendations(recs: &[Recommendation]) -> String {
    let mut out = String::from("\nPeople You May Know:");
    for (i, rec) in recs.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {} ({}) - {} mutual connection(s)",
            i + 1,
            rec.username,
            rec.name,
            rec.mutuals
        );
    }
    out
}

pub fn popular(users: &[PopularUser]) -> String {
    let mut out = String::from("\n=== Most Followed Users ===");
    for (i, user) in users.iter().enumerate() {
        let noun = if user.followers == 1 { "follower" } else { "followers" };
        let _ = write!(
            out,
            "\n{}. {} ({}) - {} {noun}",
            i + 1,
            user.username,
            user.name,
            user.followers
        );
    }
    out
}

pub fn mutuals(other: &str, usernames: &[String]) -> String {
    let mut out = format!("\n=== Mutuals with {other} ===");
    for (i, username) in usernames.iter().enumerate() {
        let _ = write!(out, "\n{}. {username}", i + 1);
    }
    out
}

pub fn mutual_pairs(pairs: &[MutualPair]) -> String {
    let mut out = String::from("\n=== Sample Mutual Follower Pairs ===");
    for (i, pair) in pairs.iter().enumerate() {
        let _ = write!(out, "\n{}. {} <-> {}", i + 1, pair.first, pair.second);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Profile {
        Profile {
            username: "alice".to_string(),
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            bio: String::new(),
            join_date: None,
        }
    }

    #[test]
    fn test_profile_hides_email_for_others() {
        let own = profile(&alice(), true, 1, 2);
        assert!(own.contains("Email: alice@x.com"));
        assert!(own.contains("Bio: No bio available"));
        assert!(own.contains("Followers: 1"));
        assert!(own.contains("Following: 2"));

        let other = profile(&alice(), false, 1, 2);
        assert!(!other.contains("alice@x.com"));
    }

    #[test]
    fn test_profile_shows_join_date() {
        let mut p = alice();
        p.join_date = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:30:00Z").ok();
        assert!(profile(&p, false, 0, 0).contains("Joined: 2024-03-01 12:30"));
    }

    #[test]
    fn test_numbered_lists() {
        let users = vec![UserSummary::new("alice", "Alice"), UserSummary::new("bob", "Bob")];
        let out = user_list("Followers of carol:", &users);
        assert!(out.contains("1. alice (Alice)"));
        assert!(out.contains("2. bob (Bob)"));

        let out = popular(&[PopularUser {
            username: "bob".to_string(),
            name: "Bob".to_string(),
            followers: 1,
        }]);
        assert!(out.ends_with("1. bob (Bob) - 1 follower"));
    }
}
