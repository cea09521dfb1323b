//! Neo4j connection management and shared graph client.

use neo4rs::{query, ConfigBuilder, Graph, Query};

use socli_core::Neo4jSettings;

/// The closed set of store failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server could not be reached or the database is offline.
    Unavailable,
    /// The store rejected the configured credentials.
    Auth,
    /// A uniqueness (or other schema) constraint rejected a write.
    ConstraintViolation,
    /// A temporary server-side condition; the same command may succeed later.
    Transient,
    /// Malformed queries, undecodable rows, and anything unclassified.
    Other,
}

impl ErrorKind {
    /// Classify a Neo4j status code such as
    /// `Neo.ClientError.Schema.ConstraintValidationFailed`.
    pub fn from_status_code(code: &str) -> Self {
        if code.ends_with(".General.DatabaseUnavailable") {
            return Self::Unavailable;
        }
        if code == "Neo.ClientError.Schema.ConstraintValidationFailed" {
            return Self::ConstraintViolation;
        }
        if code.starts_with("Neo.ClientError.Security.") {
            return Self::Auth;
        }
        if code.starts_with("Neo.TransientError.") {
            return Self::Transient;
        }
        Self::Other
    }

    /// A short explanation shown under the error message in the shell.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Unavailable => {
                "Check that Neo4j is running and the URI is right (Aura needs 'neo4j+s://')."
            }
            Self::Auth => "Check the Neo4j user and password in the configuration.",
            Self::ConstraintViolation => "A user with that username or email already exists.",
            Self::Transient => "The database is temporarily unavailable; try the command again.",
            Self::Other => "The query failed; see the message above for details.",
        }
    }
}

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j unavailable: {0}")]
    Unavailable(String),

    #[error("Neo4j authentication failed: {0}")]
    Auth(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Transient Neo4j error: {0}")]
    Transient(String),

    #[error("Neo4j query error: {0}")]
    Other(String),
}

impl GraphError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Unavailable => Self::Unavailable(message),
            ErrorKind::Auth => Self::Auth(message),
            ErrorKind::ConstraintViolation => Self::ConstraintViolation(message),
            ErrorKind::Transient => Self::Transient(message),
            ErrorKind::Other => Self::Other(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::Auth(_) => ErrorKind::Auth,
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::Transient(_) => ErrorKind::Transient,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    pub(crate) fn decode(key: &str, err: impl std::fmt::Display) -> Self {
        Self::Other(format!("Failed to decode `{key}`: {err}"))
    }
}

impl From<neo4rs::Error> for GraphError {
    fn from(err: neo4rs::Error) -> Self {
        let kind = match &err {
            neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
                ErrorKind::Unavailable
            }
            neo4rs::Error::AuthenticationError(_) => ErrorKind::Auth,
            neo4rs::Error::Neo4j(server) => ErrorKind::from_status_code(server.code()),
            _ => ErrorKind::Other,
        };
        Self::new(kind, err.to_string())
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::from(&Neo4jSettings::default())
    }
}

impl From<&Neo4jSettings> for GraphConfig {
    fn from(settings: &Neo4jSettings) -> Self {
        Self {
            uri: settings.uri.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            // One command runs at a time; a couple of spare connections is plenty.
            max_connections: 2,
            fetch_size: 200,
        }
    }
}

/// Neo4j graph client.
///
/// Each query borrows a pooled connection for its own duration and hands it
/// back on every exit path. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j and verify the connection with a trivial query.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Other(format!("Invalid Neo4j configuration: {e}")))?;

        let graph = Graph::connect(neo_config).await?;
        let client = Self { graph };
        client.run(query("RETURN 1")).await?;

        tracing::info!(uri = %config.uri, user = %config.user, "Connected to Neo4j");
        Ok(client)
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a read query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }

    /// Execute a query that returns a single `count(...)` column under `key`.
    pub(crate) async fn query_count(&self, query: Query, key: &str) -> Result<i64, GraphError> {
        match self.query_one(query).await? {
            Some(row) => field(&row, key),
            None => Ok(0),
        }
    }

    /// Create the uniqueness constraints on `User.username` and `User.email`.
    pub async fn ensure_constraints(&self) -> Result<(), GraphError> {
        for cypher in [
            "CREATE CONSTRAINT IF NOT EXISTS FOR (u:User) REQUIRE u.username IS UNIQUE",
            "CREATE CONSTRAINT IF NOT EXISTS FOR (u:User) REQUIRE u.email IS UNIQUE",
        ] {
            self.run(query(cypher)).await?;
        }
        tracing::debug!("User constraints in place");
        Ok(())
    }
}

/// Decode one column of a row.
pub(crate) fn field<'r, T>(row: &'r neo4rs::Row, key: &str) -> Result<T, GraphError>
where
    T: serde::Deserialize<'r>,
{
    row.get::<T>(key).map_err(|e| GraphError::decode(key, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_constraint_violation() {
        assert_eq!(
            ErrorKind::from_status_code("Neo.ClientError.Schema.ConstraintValidationFailed"),
            ErrorKind::ConstraintViolation
        );
    }

    #[test]
    fn test_classify_security_codes_as_auth() {
        for code in [
            "Neo.ClientError.Security.Unauthorized",
            "Neo.ClientError.Security.AuthenticationRateLimit",
            "Neo.ClientError.Security.TokenExpired",
        ] {
            assert_eq!(ErrorKind::from_status_code(code), ErrorKind::Auth, "{code}");
        }
    }

    #[test]
    fn test_classify_transient_codes() {
        for code in [
            "Neo.TransientError.Transaction.DeadlockDetected",
            "Neo.TransientError.Cluster.NotALeader",
        ] {
            assert_eq!(ErrorKind::from_status_code(code), ErrorKind::Transient, "{code}");
        }
    }

    #[test]
    fn test_classify_database_unavailable() {
        assert_eq!(
            ErrorKind::from_status_code("Neo.TransientError.General.DatabaseUnavailable"),
            ErrorKind::Unavailable
        );
        assert_eq!(
            ErrorKind::from_status_code("Neo.ClientError.General.DatabaseUnavailable"),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn test_classify_everything_else_as_other() {
        for code in [
            "Neo.ClientError.Statement.SyntaxError",
            "Neo.DatabaseError.General.UnknownError",
            "",
        ] {
            assert_eq!(ErrorKind::from_status_code(code), ErrorKind::Other, "{code}");
        }
    }

    #[test]
    fn test_kind_roundtrips_through_error() {
        for kind in [
            ErrorKind::Unavailable,
            ErrorKind::Auth,
            ErrorKind::ConstraintViolation,
            ErrorKind::Transient,
            ErrorKind::Other,
        ] {
            let err = GraphError::new(kind, "boom");
            assert_eq!(err.kind(), kind);
            assert!(err.to_string().contains("boom"));
            assert!(!kind.hint().is_empty());
        }
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = GraphError::from(neo4rs::Error::from(io));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_graph_config_from_settings() {
        let settings = Neo4jSettings {
            uri: "bolt://db:7687".to_string(),
            user: "neo".to_string(),
            password: "pw".to_string(),
        };
        let config = GraphConfig::from(&settings);
        assert_eq!(config.uri, "bolt://db:7687");
        assert_eq!(config.user, "neo");
        assert_eq!(config.password, "pw");
        assert_eq!(config.max_connections, 2);
    }
}
