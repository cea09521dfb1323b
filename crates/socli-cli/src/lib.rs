//! socli-cli: interactive shell for the socli social network.
//!
//! Reads one command per line, checks local preconditions (connection,
//! login, arguments), runs the matching queries through
//! [`socli_graph::SocialGraph`], and prints the rows as text.

pub mod command;
pub mod error;
pub mod handlers;
pub mod render;
pub mod session;
pub mod setup;
pub mod shell;
pub mod terminal;

pub use command::Command;
pub use error::CommandError;
pub use session::Session;
pub use shell::{Flow, Shell};
pub use terminal::{Console, Terminal};
