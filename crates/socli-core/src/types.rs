//! Record types for the social graph.
//!
//! Each query against the store decodes into one of these structs at the
//! graph boundary; nothing above that layer reads rows by field name.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::credentials::PasswordHash;

// ── Users ─────────────────────────────────────────────────────────

/// A full user profile as shown by the `profile` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub username: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub join_date: Option<DateTime<FixedOffset>>,
}

/// Username plus display name, the shape of every listing query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub name: String,
}

impl UserSummary {
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
        }
    }
}

/// A user to be created at registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: PasswordHash,
}

/// Replacement values for the editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub bio: String,
}

// ── Derived views ─────────────────────────────────────────────────

/// A friend-of-a-friend suggestion with the number of connecting paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub username: String,
    pub name: String,
    pub mutuals: i64,
}

/// A user ranked by inbound follow count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopularUser {
    pub username: String,
    pub name: String,
    pub followers: i64,
}

/// An existing follow edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Follow {
    pub follower: String,
    pub followee: String,
    pub since: Option<DateTime<FixedOffset>>,
}

/// Two users that follow each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutualPair {
    pub first: String,
    pub second: String,
}

// ── Import ────────────────────────────────────────────────────────

/// A synthetic user built from a dataset id by the importer.
#[derive(Debug, Clone)]
pub struct ImportedUser {
    pub facebook_id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: PasswordHash,
    pub bio: String,
}

// ── Circles ───────────────────────────────────────────────────────

/// A named group of users owned by an ego user. Only created by the importer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Circle {
    pub name: String,
    pub owner: String,
    pub members: Vec<String>,
}
