//! The store contract the shell is written against.
//!
//! [`GraphClient`] is the production implementation. The trait exists so the
//! command layer can be exercised without a running Neo4j.

use async_trait::async_trait;

use socli_core::{
    Follow, MutualPair, NewUser, PasswordHash, PopularUser, Profile, ProfileUpdate,
    Recommendation, UserSummary,
};

use crate::client::{GraphClient, GraphError};

pub const RECOMMENDATION_LIMIT: u32 = 5;
pub const SEARCH_LIMIT: u32 = 10;
pub const POPULAR_LIMIT: u32 = 10;
pub const MUTUAL_PAIR_LIMIT: u32 = 10;

/// Typed queries over the social graph. Each method is exactly one query.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    async fn ensure_constraints(&self) -> Result<(), GraphError>;

    // ── Accounts ─────────────────────────────────────────────────

    async fn username_exists(&self, username: &str) -> Result<bool, GraphError>;

    /// Whether `email` is used by anyone other than `except`.
    async fn email_taken(&self, email: &str, except: Option<&str>) -> Result<bool, GraphError>;

    async fn create_user(&self, user: &NewUser) -> Result<(), GraphError>;

    async fn check_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError>;

    async fn get_profile(&self, username: &str) -> Result<Option<Profile>, GraphError>;

    async fn count_followers(&self, username: &str) -> Result<i64, GraphError>;

    async fn count_following(&self, username: &str) -> Result<i64, GraphError>;

    async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<bool, GraphError>;

    async fn set_password(&self, username: &str, password: &PasswordHash)
        -> Result<bool, GraphError>;

    /// Remove the user and all incident edges atomically.
    async fn delete_user(&self, username: &str) -> Result<(), GraphError>;

    // ── Follows ──────────────────────────────────────────────────

    async fn find_follow(&self, follower: &str, followee: &str)
        -> Result<Option<Follow>, GraphError>;

    async fn follow(&self, follower: &str, followee: &str) -> Result<(), GraphError>;

    async fn unfollow(&self, follower: &str, followee: &str) -> Result<(), GraphError>;

    async fn followers_of(&self, username: &str) -> Result<Vec<UserSummary>, GraphError>;

    async fn followed_by(&self, username: &str) -> Result<Vec<UserSummary>, GraphError>;

    // ── Discovery ────────────────────────────────────────────────

    async fn recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, GraphError>;

    async fn mutuals(&self, username: &str, other: &str) -> Result<Vec<String>, GraphError>;

    async fn search_users(&self, term: &str, limit: u32) -> Result<Vec<UserSummary>, GraphError>;

    async fn most_followed(&self, limit: u32) -> Result<Vec<PopularUser>, GraphError>;

    async fn mutual_pairs(&self, limit: u32) -> Result<Vec<MutualPair>, GraphError>;
}

#[async_trait]
impl SocialGraph for GraphClient {
    async fn ensure_constraints(&self) -> Result<(), GraphError> {
        GraphClient::ensure_constraints(self).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, GraphError> {
        GraphClient::username_exists(self, username).await
    }

    async fn email_taken(&self, email: &str, except: Option<&str>) -> Result<bool, GraphError> {
        GraphClient::email_taken(self, email, except).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), GraphError> {
        GraphClient::create_user(self, user).await
    }

    async fn check_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError> {
        GraphClient::check_password(self, username, password).await
    }

    async fn get_profile(&self, username: &str) -> Result<Option<Profile>, GraphError> {
        GraphClient::get_profile(self, username).await
    }

    async fn count_followers(&self, username: &str) -> Result<i64, GraphError> {
        GraphClient::count_followers(self, username).await
    }

    async fn count_following(&self, username: &str) -> Result<i64, GraphError> {
        GraphClient::count_following(self, username).await
    }

    async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<bool, GraphError> {
        GraphClient::update_profile(self, username, update).await
    }

    async fn set_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError> {
        GraphClient::set_password(self, username, password).await
    }

    async fn delete_user(&self, username: &str) -> Result<(), GraphError> {
        GraphClient::delete_user(self, username).await
    }

    async fn find_follow(
        &self,
        follower: &str,
        followee: &str,
    ) -> Result<Option<Follow>, GraphError> {
        GraphClient::find_follow(self, follower, followee).await
    }

    async fn follow(&self, follower: &str, followee: &str) -> Result<(), GraphError> {
        GraphClient::follow(self, follower, followee).await
    }

    async fn unfollow(&self, follower: &str, followee: &str) -> Result<(), GraphError> {
        GraphClient::unfollow(self, follower, followee).await
    }

    async fn followers_of(&self, username: &str) -> Result<Vec<UserSummary>, GraphError> {
        GraphClient::followers_of(self, username).await
    }

    async fn followed_by(&self, username: &str) -> Result<Vec<UserSummary>, GraphError> {
        GraphClient::followed_by(self, username).await
    }

    async fn recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, GraphError> {
        GraphClient::recommendations(self, username, limit).await
    }

    async fn mutuals(&self, username: &str, other: &str) -> Result<Vec<String>, GraphError> {
        GraphClient::mutuals(self, username, other).await
    }

    async fn search_users(&self, term: &str, limit: u32) -> Result<Vec<UserSummary>, GraphError> {
        GraphClient::search_users(self, term, limit).await
    }

    async fn most_followed(&self, limit: u32) -> Result<Vec<PopularUser>, GraphError> {
        GraphClient::most_followed(self, limit).await
    }

    async fn mutual_pairs(&self, limit: u32) -> Result<Vec<MutualPair>, GraphError> {
        GraphClient::mutual_pairs(self, limit).await
    }
}
