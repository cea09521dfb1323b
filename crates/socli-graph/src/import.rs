//! Batched writes used by the dataset importer.
//!
//! Every statement uses MERGE so a dataset can be replayed onto a graph that
//! already holds some of its users and edges.

use neo4rs::{query, BoltList, BoltMap, BoltString, BoltType};

use socli_core::{Circle, ImportedUser};

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    /// Merge a batch of users by username. Existing users are left untouched.
    /// Returns the number of rows processed.
    pub async fn import_users(&self, users: &[ImportedUser]) -> Result<i64, GraphError> {
        let mut batch = BoltList::new();
        for user in users {
            let mut map = BoltMap::new();
            map.put(BoltString::from("username"), BoltType::from(user.username.clone()));
            map.put(BoltString::from("name"), BoltType::from(user.name.clone()));
            map.put(BoltString::from("email"), BoltType::from(user.email.clone()));
            map.put(
                BoltString::from("password"),
                BoltType::from(user.password.as_str().to_string()),
            );
            map.put(BoltString::from("bio"), BoltType::from(user.bio.clone()));
            map.put(BoltString::from("facebook_id"), BoltType::from(user.facebook_id));
            batch.push(BoltType::Map(map));
        }

        let q = query(
            "UNWIND $users AS user
             MERGE (u:User {username: user.username})
             ON CREATE SET
               u.name = user.name, u.email = user.email,
               u.password = user.password, u.bio = user.bio,
               u.joinDate = datetime(), u.facebook_id = user.facebook_id
             RETURN count(u) AS processed",
        )
        .param("users", BoltType::List(batch));

        self.query_count(q, "processed").await
    }

    /// Merge a batch of follow edges given as (follower, followee) usernames.
    /// Pairs whose endpoints do not exist are skipped by the MATCH.
    pub async fn import_follows(&self, edges: &[(String, String)]) -> Result<i64, GraphError> {
        let mut batch = BoltList::new();
        for (source, target) in edges {
            let mut map = BoltMap::new();
            map.put(BoltString::from("source"), BoltType::from(source.clone()));
            map.put(BoltString::from("target"), BoltType::from(target.clone()));
            batch.push(BoltType::Map(map));
        }

        let q = query(
            "UNWIND $rels AS rel
             MATCH (source:User {username: rel.source})
             MATCH (target:User {username: rel.target})
             MERGE (source)-[f:FOLLOWS]->(target)
             ON CREATE SET f.since = datetime()
             RETURN count(f) AS processed",
        )
        .param("rels", BoltType::List(batch));

        self.query_count(q, "processed").await
    }

    /// Merge a circle owned by an existing user and attach its members.
    /// Returns the number of members found and attached.
    pub async fn import_circle(&self, circle: &Circle) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (owner:User {username: $owner})
             MERGE (c:Circle {name: $name, owner: $owner})
             WITH c
             UNWIND $members AS member_username
             MATCH (m:User {username: member_username})
             MERGE (c)-[:HAS_MEMBER]->(m)
             RETURN count(m) AS added",
        )
        .param("owner", circle.owner.clone())
        .param("name", circle.name.clone())
        .param("members", circle.members.clone());

        self.query_count(q, "added").await
    }
}
