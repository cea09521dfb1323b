//! Startup: resolve the Neo4j settings and open the store.

use std::path::Path;

use socli_core::config::{DEFAULT_URI, DEFAULT_USER};
use socli_core::{ConfigFile, Neo4jSettings, SocliError};
use socli_graph::{GraphClient, GraphConfig};

use crate::terminal::Terminal;

/// Load settings from `path`, or prompt for them and save them there.
pub fn resolve_settings<T>(path: &Path, term: &mut T) -> Result<Neo4jSettings, SocliError>
where
    T: Terminal + ?Sized,
{
    if let Some(settings) = ConfigFile::load(path)? {
        tracing::debug!(?settings, "Loaded Neo4j settings");
        return Ok(settings);
    }

    term.print("Neo4j database configuration not found.");
    let uri = prompt_or_default(term, &format!("Enter Neo4j URI [{DEFAULT_URI}]: "), DEFAULT_URI)?;
    let user = prompt_or_default(
        term,
        &format!("Enter Neo4j username [{DEFAULT_USER}]: "),
        DEFAULT_USER,
    )?;
    let password = term.read_secret("Enter Neo4j password: ")?;

    let settings = Neo4jSettings {
        uri,
        user,
        password,
    };
    ConfigFile::save(path, &settings)?;
    term.print(&format!("Configuration saved to {}", path.display()));
    Ok(settings)
}

fn prompt_or_default<T>(term: &mut T, prompt: &str, default: &str) -> std::io::Result<String>
where
    T: Terminal + ?Sized,
{
    let answer = term.read_line(prompt)?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

/// Connect and make sure the uniqueness constraints exist.
///
/// A failed connection is reported on the terminal and yields `None`; the
/// shell then runs without a store.
pub async fn connect<T>(settings: &Neo4jSettings, term: &mut T) -> Option<GraphClient>
where
    T: Terminal + ?Sized,
{
    match GraphClient::connect(&GraphConfig::from(settings)).await {
        Ok(client) => {
            if let Err(e) = client.ensure_constraints().await {
                tracing::warn!(error = %e, "Could not create user constraints");
            }
            term.print("Connected to Neo4j database.");
            Some(client)
        }
        Err(e) => {
            tracing::error!(uri = %settings.uri, kind = ?e.kind(), error = %e, "Neo4j connection failed");
            term.print(&format!("Failed to connect to Neo4j: {e}"));
            term.print(e.kind().hint());
            term.print("Continuing without a database connection.");
            None
        }
    }
}
