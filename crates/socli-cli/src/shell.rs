//! The read-eval loop and command dispatch.

use std::io;

use socli_graph::SocialGraph;

use crate::command::Command;
use crate::error::{CommandError, Result};
use crate::handlers::{account, social};
use crate::render;
use crate::session::Session;
use crate::terminal::Terminal;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A shell bound to an optional store and a terminal.
///
/// `store` is `None` when the startup connection failed; every command that
/// needs the database then reports [`CommandError::NoConnection`].
pub struct Shell<G, T> {
    store: Option<G>,
    session: Session,
    term: T,
}

impl<G, T> Shell<G, T>
where
    G: SocialGraph,
    T: Terminal,
{
    pub fn new(store: Option<G>, term: T) -> Self {
        Self {
            store,
            session: Session::new(),
            term,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> Option<&G> {
        self.store.as_ref()
    }

    pub fn terminal(&self) -> &T {
        &self.term
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }

    /// Read and execute commands until `exit`, `quit`, or end of input.
    pub async fn run(&mut self) {
        self.term.print(render::BANNER);

        loop {
            let prompt = self.session.prompt();
            let line = match self.term.read_line(&prompt) {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    self.term.print("");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read command");
                    break;
                }
            };

            if !line.trim().is_empty() {
                self.term.remember(&line);
            }
            if self.execute_line(&line).await == Flow::Exit {
                break;
            }
        }

        self.shutdown();
    }

    /// Parse and execute one line.
    pub async fn execute_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Some(command) => self.execute(command).await,
            None => Flow::Continue,
        }
    }

    /// Execute one command, reporting any failure on the terminal.
    pub async fn execute(&mut self, command: Command) -> Flow {
        let result = match command {
            Command::Exit => return Flow::Exit,
            Command::Help => {
                self.term.print(render::HELP);
                Ok(())
            }
            Command::Clear => {
                self.term.clear();
                if !self.session.is_logged_in() {
                    self.term.print(render::BANNER);
                }
                Ok(())
            }
            Command::Logout => account::logout(&mut self.session, &mut self.term),
            Command::Unknown(verb) => Err(CommandError::invalid(format!(
                "Unknown command: {verb}. Type 'help' for a list of commands."
            ))),
            other => self.execute_with_store(other).await,
        };

        if let Err(e) = result {
            self.report(&e);
        }
        Flow::Continue
    }

    async fn execute_with_store(&mut self, command: Command) -> Result<()> {
        let Some(store) = self.store.as_ref() else {
            return Err(CommandError::NoConnection);
        };
        let session = &mut self.session;
        let term = &mut self.term;

        match command {
            Command::Register => account::register(store, term).await,
            Command::Login(arg) => account::login(store, session, term, &arg).await,
            Command::Profile(arg) => account::profile(store, session, term, &arg).await,
            Command::EditProfile => account::edit_profile(store, session, term).await,
            Command::ChangePassword => account::change_password(store, session, term).await,
            Command::Delete => account::delete(store, session, term).await,
            Command::Follow(arg) => social::follow(store, session, term, &arg).await,
            Command::Unfollow(arg) => social::unfollow(store, session, term, &arg).await,
            Command::Followers(arg) => {
                social::list_follows(store, session, term, &arg, social::Direction::Followers)
                    .await
            }
            Command::Following(arg) => {
                social::list_follows(store, session, term, &arg, social::Direction::Following)
                    .await
            }
            Command::Recommendations => social::recommendations(store, session, term).await,
            Command::Mutuals(arg) => social::mutuals(store, session, term, &arg).await,
            Command::Search(arg) => social::search(store, term, &arg).await,
            Command::Popular => social::popular(store, term).await,
            Command::MutualPairs => social::mutual_pairs(store, term).await,
            Command::Exit
            | Command::Help
            | Command::Clear
            | Command::Logout
            | Command::Unknown(_) => Ok(()),
        }
    }

    fn report(&mut self, err: &CommandError) {
        match err {
            CommandError::Store(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Command failed");
                self.term.print(&format!("Error: {e}"));
                self.term.print(e.kind().hint());
            }
            CommandError::Io(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
                ) =>
            {
                self.term.print("Cancelled.");
            }
            other => self.term.print(&other.to_string()),
        }
    }

    /// Close the store connection and say goodbye.
    fn shutdown(&mut self) {
        if self.store.take().is_some() {
            tracing::debug!("Closed Neo4j connection");
        }
        self.term.print("Thank you for using Socli. Goodbye!");
    }
}
