//! Read operations against the social graph.

use chrono::{DateTime, FixedOffset};
use neo4rs::query;

use socli_core::{
    Follow, MutualPair, PasswordHash, PopularUser, Profile, Recommendation, UserSummary,
};

use crate::client::{field, GraphClient, GraphError};

impl GraphClient {
    // ── Account Lookups ──────────────────────────────────────────

    /// Whether a user with this username exists.
    pub async fn username_exists(&self, username: &str) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})
             RETURN u.username AS username LIMIT 1",
        )
        .param("username", username.to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Whether `email` belongs to a user other than `except`. Usernames are
    /// never empty, so `None` excludes nobody.
    pub async fn email_taken(
        &self,
        email: &str,
        except: Option<&str>,
    ) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {email: $email})
             WHERE u.username <> $except
             RETURN u.username AS username LIMIT 1",
        )
        .param("email", email.to_string())
        .param("except", except.unwrap_or_default().to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Whether (username, password hash) matches a stored user exactly.
    pub async fn check_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username, password: $password})
             RETURN u.username AS username",
        )
        .param("username", username.to_string())
        .param("password", password.as_str().to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Fetch a user's profile fields.
    pub async fn get_profile(&self, username: &str) -> Result<Option<Profile>, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})
             RETURN u.username AS username, u.name AS name, u.email AS email,
                    u.bio AS bio, toString(u.joinDate) AS joinDate",
        )
        .param("username", username.to_string());

        let Some(row) = self.query_one(q).await? else {
            return Ok(None);
        };

        Ok(Some(Profile {
            username: field(&row, "username")?,
            name: field::<Option<String>>(&row, "name")?.unwrap_or_default(),
            email: field::<Option<String>>(&row, "email")?.unwrap_or_default(),
            bio: field::<Option<String>>(&row, "bio")?.unwrap_or_default(),
            join_date: parse_timestamp(field(&row, "joinDate")?),
        }))
    }

    /// Number of users following `username`.
    pub async fn count_followers(&self, username: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (follower:User)-[:FOLLOWS]->(u:User {username: $username})
             RETURN count(follower) AS cnt",
        )
        .param("username", username.to_string());

        self.query_count(q, "cnt").await
    }

    /// Number of users `username` follows.
    pub async fn count_following(&self, username: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})-[:FOLLOWS]->(following:User)
             RETURN count(following) AS cnt",
        )
        .param("username", username.to_string());

        self.query_count(q, "cnt").await
    }

    // ── Follow Edges ─────────────────────────────────────────────

    /// Look up the follow edge `follower -> followee`.
    pub async fn find_follow(
        &self,
        follower: &str,
        followee: &str,
    ) -> Result<Option<Follow>, GraphError> {
        let q = query(
            "MATCH (:User {username: $me})-[r:FOLLOWS]->(:User {username: $them})
             RETURN toString(r.since) AS since
             LIMIT 1",
        )
        .param("me", follower.to_string())
        .param("them", followee.to_string());

        let Some(row) = self.query_one(q).await? else {
            return Ok(None);
        };

        Ok(Some(Follow {
            follower: follower.to_string(),
            followee: followee.to_string(),
            since: parse_timestamp(field(&row, "since")?),
        }))
    }

    /// Users following `username`, ordered by username.
    pub async fn followers_of(&self, username: &str) -> Result<Vec<UserSummary>, GraphError> {
        let q = query(
            "MATCH (f:User)-[:FOLLOWS]->(u:User {username: $username})
             RETURN f.username AS username, f.name AS name
             ORDER BY username",
        )
        .param("username", username.to_string());

        self.summaries(q).await
    }

    /// Users `username` follows, ordered by username.
    pub async fn followed_by(&self, username: &str) -> Result<Vec<UserSummary>, GraphError> {
        let q = query(
            "MATCH (u:User {username: $username})-[:FOLLOWS]->(f:User)
             RETURN f.username AS username, f.name AS name
             ORDER BY username",
        )
        .param("username", username.to_string());

        self.summaries(q).await
    }

    // ── Discovery ────────────────────────────────────────────────

    /// Friends of friends not yet followed, ranked by number of connecting paths.
    pub async fn recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, GraphError> {
        let q = query(
            "MATCH (me:User {username: $me})-[:FOLLOWS]->(:User)-[:FOLLOWS]->(rec:User)
             WHERE rec.username <> $me AND NOT (me)-[:FOLLOWS]->(rec)
             RETURN rec.username AS username, rec.name AS name, count(*) AS mutuals
             ORDER BY mutuals DESC, username
             LIMIT $limit",
        )
        .param("me", username.to_string())
        .param("limit", limit as i64);

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(Recommendation {
                username: field(&row, "username")?,
                name: field::<Option<String>>(&row, "name")?.unwrap_or_default(),
                mutuals: field(&row, "mutuals")?,
            });
        }
        Ok(results)
    }

    /// Users followed by both `username` and `other`.
    pub async fn mutuals(&self, username: &str, other: &str) -> Result<Vec<String>, GraphError> {
        let q = query(
            "MATCH (me:User {username: $user1})-[:FOLLOWS]->(x:User)<-[:FOLLOWS]-(other:User {username: $user2})
             RETURN DISTINCT x.username AS mutual
             ORDER BY mutual",
        )
        .param("user1", username.to_string())
        .param("user2", other.to_string());

        let rows = self.query_rows(q).await?;
        rows.iter().map(|row| field(row, "mutual")).collect()
    }

    /// Case-insensitive substring search over name and username.
    pub async fn search_users(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<UserSummary>, GraphError> {
        let q = query(
            "MATCH (u:User)
             WHERE toLower(u.name) CONTAINS toLower($term)
                OR toLower(u.username) CONTAINS toLower($term)
             RETURN u.username AS username, u.name AS name
             ORDER BY username
             LIMIT $limit",
        )
        .param("term", term.to_string())
        .param("limit", limit as i64);

        self.summaries(q).await
    }

    /// Users ranked by inbound follow count.
    pub async fn most_followed(&self, limit: u32) -> Result<Vec<PopularUser>, GraphError> {
        let q = query(
            "MATCH (u:User)<-[:FOLLOWS]-(f:User)
             RETURN u.username AS username, u.name AS name, count(f) AS followers
             ORDER BY followers DESC, username
             LIMIT $limit",
        )
        .param("limit", limit as i64);

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(PopularUser {
                username: field(&row, "username")?,
                name: field::<Option<String>>(&row, "name")?.unwrap_or_default(),
                followers: field(&row, "followers")?,
            });
        }
        Ok(results)
    }

    /// Pairs of users who follow each other, each pair reported once.
    pub async fn mutual_pairs(&self, limit: u32) -> Result<Vec<MutualPair>, GraphError> {
        let q = query(
            "MATCH (a:User)-[:FOLLOWS]->(b:User), (b)-[:FOLLOWS]->(a)
             WHERE a.username < b.username
             RETURN DISTINCT a.username AS first, b.username AS second
             ORDER BY first, second
             LIMIT $limit",
        )
        .param("limit", limit as i64);

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(MutualPair {
                first: field(&row, "first")?,
                second: field(&row, "second")?,
            });
        }
        Ok(results)
    }

    async fn summaries(&self, q: neo4rs::Query) -> Result<Vec<UserSummary>, GraphError> {
        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(UserSummary {
                username: field(&row, "username")?,
                name: field::<Option<String>>(&row, "name")?.unwrap_or_default(),
            });
        }
        Ok(results)
    }
}

/// Parse the `toString()` form of a Neo4j datetime. Zone-id suffixes such as
/// `[Europe/Berlin]` are dropped.
pub(crate) fn parse_timestamp(raw: Option<String>) -> Option<DateTime<FixedOffset>> {
    let raw = raw?;
    let trimmed = raw.split('[').next().unwrap_or(&raw);
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::debug!(value = %raw, error = %e, "Unparseable timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc_timestamp() {
        let ts = parse_timestamp(Some("2024-03-01T12:30:00.123456789Z".to_string())).unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 12:30");
    }

    #[test]
    fn test_parse_zoned_timestamp() {
        let ts = parse_timestamp(Some("2024-03-01T12:30:00+01:00[Europe/Paris]".to_string()));
        assert!(ts.is_some());
    }

    #[test]
    fn test_parse_missing_or_garbage() {
        assert!(parse_timestamp(None).is_none());
        assert!(parse_timestamp(Some("yesterday".to_string())).is_none());
    }
}
