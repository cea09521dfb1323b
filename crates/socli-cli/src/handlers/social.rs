//! Social commands: follow, unfollow, listings, and discovery.

use socli_graph::store::{MUTUAL_PAIR_LIMIT, POPULAR_LIMIT, RECOMMENDATION_LIMIT, SEARCH_LIMIT};
use socli_graph::SocialGraph;

use super::{arg_or_ask, confirmed};
use crate::error::{CommandError, Result};
use crate::render;
use crate::session::Session;
use crate::terminal::Terminal;

pub async fn follow<G, T>(store: &G, session: &Session, term: &mut T, arg: &str) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let me = session.require_user()?;
    let target = arg.trim();
    if target.is_empty() {
        return Err(CommandError::invalid("Please specify a username to follow."));
    }
    if target == me {
        return Err(CommandError::invalid("You cannot follow yourself."));
    }

    if !store.username_exists(target).await? {
        return Err(CommandError::invalid(format!("User '{target}' not found.")));
    }
    if let Some(existing) = store.find_follow(me, target).await? {
        let since = existing
            .since
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "earlier".to_string());
        return Err(CommandError::invalid(format!(
            "You're already following {target} since {since}."
        )));
    }

    store.follow(me, target).await?;
    term.print(&format!("You're now following {target}."));
    Ok(())
}

pub async fn unfollow<G, T>(store: &G, session: &Session, term: &mut T, arg: &str) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let me = session.require_user()?;
    let target = arg.trim();
    if target.is_empty() {
        return Err(CommandError::invalid("Please specify a username to unfollow."));
    }

    if store.find_follow(me, target).await?.is_none() {
        return Err(CommandError::invalid(format!(
            "You are not following {target}."
        )));
    }

    let answer = term.read_line(&format!("Unfollow {target}? Type 'yes' to confirm: "))?;
    if !confirmed(&answer) {
        term.print("Cancelled.");
        return Ok(());
    }

    store.unfollow(me, target).await?;
    term.print(&format!("You've unfollowed {target}."));
    Ok(())
}

/// Which side of the follow edge to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Followers,
    Following,
}

pub async fn list_follows<G, T>(
    store: &G,
    session: &Session,
    term: &mut T,
    arg: &str,
    direction: Direction,
) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let username = match arg.trim() {
        "" => session
            .current_user()
            .ok_or_else(|| CommandError::invalid("Please login or specify a username."))?
            .to_string(),
        other => other.to_string(),
    };

    match direction {
        Direction::Followers => {
            let users = store.followers_of(&username).await?;
            if users.is_empty() {
                term.print(&format!("No one follows {username}."));
            } else {
                term.print(&render::user_list(&format!("Followers of {username}:"), &users));
            }
        }
        Direction::Following => {
            let users = store.followed_by(&username).await?;
            if users.is_empty() {
                term.print(&format!("{username} is not following anyone."));
            } else {
                term.print(&render::user_list(&format!("{username} is following:"), &users));
            }
        }
    }
    Ok(())
}

pub async fn recommendations<G, T>(store: &G, session: &Session, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let me = session.require_user()?;
    let recs = store.recommendations(me, RECOMMENDATION_LIMIT).await?;
    if recs.is_empty() {
        term.print("No recommendations available.");
    } else {
        term.print(&render::recommendations(&recs));
    }
    Ok(())
}

pub async fn mutuals<G, T>(store: &G, session: &Session, term: &mut T, arg: &str) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let me = session.require_user()?;
    let other = arg.trim();
    if other.is_empty() {
        return Err(CommandError::invalid("Usage: mutuals <username>"));
    }
    if other == me {
        return Err(CommandError::invalid("Cannot check mutuals with yourself."));
    }

    let shared = store.mutuals(me, other).await?;
    if shared.is_empty() {
        term.print(&format!("No mutuals found with {other}."));
    } else {
        term.print(&render::mutuals(other, &shared));
    }
    Ok(())
}

pub async fn search<G, T>(store: &G, term: &mut T, arg: &str) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let needle = arg_or_ask(term, arg, "Enter name or username to search: ")?;
    if needle.is_empty() {
        return Err(CommandError::invalid("Search term cannot be empty."));
    }

    let users = store.search_users(&needle, SEARCH_LIMIT).await?;
    if users.is_empty() {
        term.print("No matching users found.");
    } else {
        term.print(&render::user_list("=== Search Results ===", &users));
    }
    Ok(())
}

pub async fn popular<G, T>(store: &G, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let users = store.most_followed(POPULAR_LIMIT).await?;
    if users.is_empty() {
        term.print("No one has any followers yet.");
    } else {
        term.print(&render::popular(&users));
    }
    Ok(())
}

pub async fn mutual_pairs<G, T>(store: &G, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let pairs = store.mutual_pairs(MUTUAL_PAIR_LIMIT).await?;
    if pairs.is_empty() {
        term.print("No mutual follow pairs found.");
    } else {
        term.print(&render::mutual_pairs(&pairs));
    }
    Ok(())
}
