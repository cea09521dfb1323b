//! Write operations for the social graph.
//!
//! Timestamps (`joinDate`, `since`) are assigned by the server with
//! `datetime()`. Uniqueness of usernames and emails is enforced by the
//! constraints from [`GraphClient::ensure_constraints`].

use neo4rs::query;

use socli_core::{NewUser, PasswordHash, ProfileUpdate};

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    // ── Accounts ─────────────────────────────────────────────────

    /// Create a user with an empty bio.
    pub async fn create_user(&self, user: &NewUser) -> Result<(), GraphError> {
        let q = query(
            "CREATE (u:User {
               username: $username, name: $name, email: $email,
               password: $password, joinDate: datetime(), bio: ''
             })",
        )
        .param("username", user.username.clone())
        .param("name", user.name.clone())
        .param("email", user.email.clone())
        .param("password", user.password.as_str().to_string());

        self.run(q).await?;
        tracing::info!(username = %user.username, "Registered user");
        Ok(())
    }

    /// Overwrite name, email, and bio. Returns false if the user is gone.
    pub async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})
             SET u.name = $name, u.email = $email, u.bio = $bio
             RETURN u.username AS username",
        )
        .param("username", username.to_string())
        .param("name", update.name.clone())
        .param("email", update.email.clone())
        .param("bio", update.bio.clone());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Replace the stored password hash. Returns false if the user is gone.
    pub async fn set_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})
             SET u.password = $password
             RETURN u.username AS username",
        )
        .param("username", username.to_string())
        .param("password", password.as_str().to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Delete a user and every incident edge in one query.
    pub async fn delete_user(&self, username: &str) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})
             DETACH DELETE u",
        )
        .param("username", username.to_string());

        self.run(q).await?;
        tracing::info!(username, "Deleted user");
        Ok(())
    }

    // ── Follows ──────────────────────────────────────────────────

    /// Create `follower -> followee` if it does not exist yet.
    pub async fn follow(&self, follower: &str, followee: &str) -> Result<(), GraphError> {
        let q = query(
            "MATCH (a:User {username: $me}), (b:User {username: $them})
             MERGE (a)-[r:FOLLOWS]->(b)
             ON CREATE SET r.since = datetime()",
        )
        .param("me", follower.to_string())
        .param("them", followee.to_string());

        self.run(q).await
    }

    /// Remove `follower -> followee`.
    pub async fn unfollow(&self, follower: &str, followee: &str) -> Result<(), GraphError> {
        let q = query(
            "MATCH (:User {username: $me})-[r:FOLLOWS]->(:User {username: $them})
             DELETE r",
        )
        .param("me", follower.to_string())
        .param("them", followee.to_string());

        self.run(q).await
    }
}
