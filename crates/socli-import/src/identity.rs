//! Synthetic identities for imported users.
//!
//! Everything is derived from the dataset id alone, so re-importing a
//! dataset produces exactly the same users.

use socli_core::{hash_password, ImportedUser, PasswordHash};

/// Password given to every imported user.
pub const DEFAULT_PASSWORD: &str = "password123";

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Susan", "Richard", "Jessica", "Joseph", "Sarah", "Thomas", "Karen",
    "Charles", "Nancy", "Ryan", "Bob", "Gerald",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "example.com",
];

/// Username for a dataset id, e.g. `fb107`.
pub fn username(id: i64) -> String {
    format!("fb{id}")
}

/// A stable display name picked from the name lists.
pub fn display_name(id: i64) -> String {
    let first = pick(FIRST_NAMES, id);
    let last = pick(LAST_NAMES, id / FIRST_NAMES.len() as i64);
    format!("{first} {last}")
}

/// `user<id>@<domain>`; unique per id.
pub fn email(id: i64) -> String {
    format!("user{id}@{}", pick(EMAIL_DOMAINS, id))
}

fn pick(list: &[&'static str], n: i64) -> &'static str {
    list[n.rem_euclid(list.len() as i64) as usize]
}

/// Builds [`ImportedUser`] records, hashing the default password once.
pub struct IdentityFactory {
    password: PasswordHash,
}

impl IdentityFactory {
    pub fn new() -> Self {
        Self {
            password: hash_password(DEFAULT_PASSWORD),
        }
    }

    pub fn user(&self, id: i64) -> ImportedUser {
        ImportedUser {
            facebook_id: id,
            username: username(id),
            name: display_name(id),
            email: email(id),
            password: self.password.clone(),
            bio: format!("Imported Facebook user (ID: {id})"),
        }
    }
}

impl Default for IdentityFactory {
    fn default() -> Self {
        Self::new()
    }
}
