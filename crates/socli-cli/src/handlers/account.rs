//! Account commands: register, login, logout, profile, edit_profile,
//! change_password, delete.

use socli_core::{hash_password, is_valid_email, NewUser, ProfileUpdate};
use socli_graph::{ErrorKind, SocialGraph};

use super::{arg_or_ask, ask, confirmed};
use crate::error::{CommandError, Result};
use crate::render;
use crate::session::Session;
use crate::terminal::Terminal;

pub async fn register<G, T>(store: &G, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    term.print("\n=== User Registration ===\n");

    let username = ask(term, "Username: ")?;
    if username.is_empty() {
        return Err(CommandError::invalid("Username cannot be empty."));
    }
    if store.username_exists(&username).await? {
        return Err(CommandError::invalid(format!(
            "Username '{username}' is already taken."
        )));
    }

    let name = ask(term, "Full Name: ")?;
    let email = ask(term, "Email: ")?;
    if !is_valid_email(&email) {
        return Err(CommandError::invalid("Invalid email format."));
    }
    if store.email_taken(&email, None).await? {
        return Err(CommandError::invalid(format!(
            "Email '{email}' is already registered."
        )));
    }

    let password = term.read_secret("Password: ")?;
    if password.is_empty() {
        return Err(CommandError::invalid("Password cannot be empty."));
    }
    let confirm = term.read_secret("Confirm Password: ")?;
    if password != confirm {
        return Err(CommandError::invalid("Passwords do not match."));
    }

    let user = NewUser {
        username,
        name,
        email,
        password: hash_password(&password),
    };

    // The checks above only improve the message; the store constraints decide.
    match store.create_user(&user).await {
        Ok(()) => {
            term.print(&format!(
                "\nUser '{}' registered successfully! You can now login.",
                user.username
            ));
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::ConstraintViolation => {
            tracing::warn!(username = %user.username, error = %e, "Registration lost a uniqueness race");
            Err(CommandError::invalid(format!(
                "Username '{}' or email '{}' is already taken.",
                user.username, user.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login<G, T>(store: &G, session: &mut Session, term: &mut T, arg: &str) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    if let Some(current) = session.current_user() {
        return Err(CommandError::invalid(format!(
            "You're already logged in as {current}."
        )));
    }

    let username = arg_or_ask(term, arg, "Username: ")?;
    if username.is_empty() {
        return Err(CommandError::invalid("Username cannot be empty."));
    }

    let password = term.read_secret("Password: ")?;
    if !store.check_password(&username, &hash_password(&password)).await? {
        return Err(CommandError::invalid("Invalid username or password."));
    }

    term.print(&format!("Welcome back, {username}!"));
    tracing::debug!(username = %username, "Logged in");
    session.login(username);
    Ok(())
}

pub fn logout<T: Terminal + ?Sized>(session: &mut Session, term: &mut T) -> Result<()> {
    match session.logout() {
        Some(username) => {
            term.print(&format!("Goodbye, {username}!"));
            Ok(())
        }
        None => Err(CommandError::invalid("You're not logged in.")),
    }
}

pub async fn profile<G, T>(store: &G, session: &Session, term: &mut T, arg: &str) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let username = match (arg.trim(), session.current_user()) {
        ("", Some(current)) => current.to_string(),
        ("", None) => {
            return Err(CommandError::invalid(
                "Please login first or specify a username.",
            ))
        }
        (other, _) => other.to_string(),
    };

    let Some(found) = store.get_profile(&username).await? else {
        return Err(CommandError::invalid(format!("User '{username}' not found.")));
    };
    let followers = store.count_followers(&username).await?;
    let following = store.count_following(&username).await?;

    term.print(&render::profile(
        &found,
        session.is_self(&username),
        followers,
        following,
    ));
    Ok(())
}

pub async fn edit_profile<G, T>(store: &G, session: &Session, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let username = session.require_user()?;

    term.print("\n=== Edit Profile ===\n");
    let Some(current) = store.get_profile(username).await? else {
        return Err(CommandError::invalid("Failed to retrieve your profile."));
    };

    term.print(&format!("Current name: {}", current.name));
    let mut name = ask(term, "New name (leave blank to keep current): ")?;
    if name.is_empty() {
        name = current.name.clone();
    }

    term.print(&format!("Current email: {}", current.email));
    let mut email = ask(term, "New email (leave blank to keep current): ")?;
    if email.is_empty() {
        email = current.email.clone();
    } else if !is_valid_email(&email) {
        term.print("Invalid email format. Email not updated.");
        email = current.email.clone();
    } else if store.email_taken(&email, Some(username)).await? {
        term.print(&format!("Email '{email}' is already in use. Email not updated."));
        email = current.email.clone();
    }

    let shown_bio = if current.bio.is_empty() {
        "No bio available"
    } else {
        &current.bio
    };
    term.print(&format!("Current bio: {shown_bio}"));
    let mut bio = ask(term, "New bio (leave blank to keep current): ")?;
    if bio.is_empty() {
        bio = current.bio.clone();
    }

    let update = ProfileUpdate { name, email, bio };
    if !store.update_profile(username, &update).await? {
        return Err(CommandError::invalid("Failed to update profile."));
    }

    term.print("\nProfile updated successfully!");
    Ok(())
}

pub async fn change_password<G, T>(store: &G, session: &Session, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let username = session.require_user()?;

    let current = term.read_secret("Current password: ")?;
    if !store.check_password(username, &hash_password(&current)).await? {
        return Err(CommandError::invalid("Current password is incorrect."));
    }

    let new_password = term.read_secret("New password: ")?;
    if new_password.is_empty() {
        return Err(CommandError::invalid("Password cannot be empty."));
    }
    let confirm = term.read_secret("Confirm new password: ")?;
    if new_password != confirm {
        return Err(CommandError::invalid("Passwords do not match."));
    }

    if !store.set_password(username, &hash_password(&new_password)).await? {
        return Err(CommandError::invalid("Failed to change password."));
    }

    term.print("Password changed successfully!");
    Ok(())
}

pub async fn delete<G, T>(store: &G, session: &mut Session, term: &mut T) -> Result<()>
where
    G: SocialGraph + ?Sized,
    T: Terminal + ?Sized,
{
    let username = session.require_user()?.to_string();

    let password = term.read_secret("Password: ")?;
    let confirm = term.read_secret("Confirm Password: ")?;
    if password != confirm {
        return Err(CommandError::invalid("Passwords didn't match."));
    }
    if !store.check_password(&username, &hash_password(&password)).await? {
        return Err(CommandError::invalid("Incorrect password."));
    }

    let answer = term.read_line("Confirm you want to delete by typing yes: ")?;
    if !confirmed(&answer) {
        term.print("Cancelling user deletion.");
        return Ok(());
    }

    store.delete_user(&username).await?;
    session.logout();
    term.print(&format!("User {username} successfully deleted!"));
    Ok(())
}
