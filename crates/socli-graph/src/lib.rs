//! socli-graph — Neo4j client for the social graph.
//!
//! Every read and write the shell and the importer perform goes through this
//! crate. Each operation is a single parameterized Cypher query whose rows are
//! decoded into `socli_core` record types before they leave the crate.

pub mod client;
pub mod import;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{ErrorKind, GraphClient, GraphConfig, GraphError};
pub use store::SocialGraph;
