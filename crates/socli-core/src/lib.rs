//! socli-core: Shared types, configuration, and error handling for socli.
//!
//! This crate provides the foundational pieces used by the shell and the importer:
//! - Record types for users, follows, and circles as they come back from the graph
//! - Password hashing and email validation applied at the client boundary
//! - Configuration management for the Neo4j endpoint
//! - Common error types

pub mod config;
pub mod credentials;
pub mod error;
pub mod types;

pub use config::{ConfigFile, Neo4jSettings};
pub use credentials::{hash_password, is_valid_email, PasswordHash};
pub use error::SocliError;
pub use types::{
    Circle, Follow, ImportedUser, MutualPair, NewUser, PopularUser, Profile, ProfileUpdate,
    Recommendation, UserSummary,
};
