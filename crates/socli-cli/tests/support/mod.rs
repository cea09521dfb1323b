//! Test doubles for the shell: an in-memory graph and a scripted terminal.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use socli_cli::{Shell, Terminal};
use socli_core::{
    hash_password, Follow, MutualPair, NewUser, PasswordHash, PopularUser, Profile,
    ProfileUpdate, Recommendation, UserSummary,
};
use socli_graph::{ErrorKind, GraphError, SocialGraph};

// ── MemoryGraph ───────────────────────────────────────────────────

struct StoredUser {
    name: String,
    email: String,
    password: PasswordHash,
    bio: String,
    join_date: DateTime<FixedOffset>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<String, StoredUser>,
    follows: BTreeSet<(String, String)>,
}

impl State {
    fn following(&self, username: &str) -> BTreeSet<String> {
        self.follows
            .iter()
            .filter(|(a, _)| a == username)
            .map(|(_, b)| b.clone())
            .collect()
    }

    fn summary(&self, username: &str) -> UserSummary {
        let name = self
            .users
            .get(username)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        UserSummary::new(username, name)
    }
}

/// A `SocialGraph` held in memory with the same uniqueness rules as the real
/// store. Every trait call counts as one query.
#[derive(Default)]
pub struct MemoryGraph {
    state: Mutex<State>,
    queries: AtomicUsize,
    failure: Mutex<Option<ErrorKind>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing the shell.
    pub fn with_user(self, username: &str, name: &str, email: &str, password: &str) -> Self {
        self.state.lock().unwrap().users.insert(
            username.to_string(),
            StoredUser {
                name: name.to_string(),
                email: email.to_string(),
                password: hash_password(password),
                bio: String::new(),
                join_date: timestamp(),
            },
        );
        self
    }

    pub fn with_follow(self, follower: &str, followee: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .follows
            .insert((follower.to_string(), followee.to_string()));
        self
    }

    /// Make every subsequent query fail with `kind`.
    pub fn fail_with(&self, kind: ErrorKind) {
        *self.failure.lock().unwrap() = Some(kind);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.state.lock().unwrap().users.contains_key(username)
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().unwrap().follows.len()
    }

    pub fn has_follow(&self, follower: &str, followee: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .follows
            .contains(&(follower.to_string(), followee.to_string()))
    }

    pub fn stored_password(&self, username: &str) -> Option<PasswordHash> {
        self.state
            .lock()
            .unwrap()
            .users
            .get(username)
            .map(|u| u.password.clone())
    }

    pub fn stored_email(&self, username: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .users
            .get(username)
            .map(|u| u.email.clone())
    }

    pub fn stored_bio(&self, username: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .users
            .get(username)
            .map(|u| u.bio.clone())
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, State>, GraphError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = *self.failure.lock().unwrap() {
            return Err(GraphError::new(kind, "injected failure"));
        }
        Ok(self.state.lock().unwrap())
    }
}

fn timestamp() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-01-15T09:30:00+00:00").unwrap()
}

#[async_trait]
impl SocialGraph for MemoryGraph {
    async fn ensure_constraints(&self) -> Result<(), GraphError> {
        drop(self.begin()?);
        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, GraphError> {
        Ok(self.begin()?.users.contains_key(username))
    }

    async fn email_taken(&self, email: &str, except: Option<&str>) -> Result<bool, GraphError> {
        let state = self.begin()?;
        Ok(state
            .users
            .iter()
            .any(|(username, u)| u.email == email && Some(username.as_str()) != except))
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), GraphError> {
        let mut state = self.begin()?;
        if state.users.contains_key(&user.username)
            || state.users.values().any(|u| u.email == user.email)
        {
            return Err(GraphError::new(
                ErrorKind::ConstraintViolation,
                "Node already exists with label `User`",
            ));
        }
        state.users.insert(
            user.username.clone(),
            StoredUser {
                name: user.name.clone(),
                email: user.email.clone(),
                password: user.password.clone(),
                bio: String::new(),
                join_date: timestamp(),
            },
        );
        Ok(())
    }

    async fn check_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError> {
        let state = self.begin()?;
        Ok(state
            .users
            .get(username)
            .is_some_and(|u| &u.password == password))
    }

    async fn get_profile(&self, username: &str) -> Result<Option<Profile>, GraphError> {
        let state = self.begin()?;
        Ok(state.users.get(username).map(|u| Profile {
            username: username.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            bio: u.bio.clone(),
            join_date: Some(u.join_date),
        }))
    }

    async fn count_followers(&self, username: &str) -> Result<i64, GraphError> {
        let state = self.begin()?;
        Ok(state.follows.iter().filter(|(_, b)| b == username).count() as i64)
    }

    async fn count_following(&self, username: &str) -> Result<i64, GraphError> {
        let state = self.begin()?;
        Ok(state.follows.iter().filter(|(a, _)| a == username).count() as i64)
    }

    async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<bool, GraphError> {
        let mut state = self.begin()?;
        if state
            .users
            .iter()
            .any(|(other, u)| other != username && u.email == update.email)
        {
            return Err(GraphError::new(
                ErrorKind::ConstraintViolation,
                "email already exists",
            ));
        }
        Ok(match state.users.get_mut(username) {
            Some(u) => {
                u.name = update.name.clone();
                u.email = update.email.clone();
                u.bio = update.bio.clone();
                true
            }
            None => false,
        })
    }

    async fn set_password(
        &self,
        username: &str,
        password: &PasswordHash,
    ) -> Result<bool, GraphError> {
        let mut state = self.begin()?;
        Ok(match state.users.get_mut(username) {
            Some(u) => {
                u.password = password.clone();
                true
            }
            None => false,
        })
    }

    async fn delete_user(&self, username: &str) -> Result<(), GraphError> {
        let mut state = self.begin()?;
        state.users.remove(username);
        state.follows.retain(|(a, b)| a != username && b != username);
        Ok(())
    }

    async fn find_follow(
        &self,
        follower: &str,
        followee: &str,
    ) -> Result<Option<Follow>, GraphError> {
        let state = self.begin()?;
        let key = (follower.to_string(), followee.to_string());
        Ok(state.follows.contains(&key).then(|| Follow {
            follower: follower.to_string(),
            followee: followee.to_string(),
            since: Some(timestamp()),
        }))
    }

    async fn follow(&self, follower: &str, followee: &str) -> Result<(), GraphError> {
        let mut state = self.begin()?;
        if state.users.contains_key(follower) && state.users.contains_key(followee) {
            state
                .follows
                .insert((follower.to_string(), followee.to_string()));
        }
        Ok(())
    }

    async fn unfollow(&self, follower: &str, followee: &str) -> Result<(), GraphError> {
        let mut state = self.begin()?;
        state
            .follows
            .remove(&(follower.to_string(), followee.to_string()));
        Ok(())
    }

    async fn followers_of(&self, username: &str) -> Result<Vec<UserSummary>, GraphError> {
        let state = self.begin()?;
        Ok(state
            .follows
            .iter()
            .filter(|(_, b)| b == username)
            .map(|(a, _)| a.clone())
            .collect::<BTreeSet<_>>()
            .iter()
            .map(|u| state.summary(u))
            .collect())
    }

    async fn followed_by(&self, username: &str) -> Result<Vec<UserSummary>, GraphError> {
        let state = self.begin()?;
        Ok(state
            .following(username)
            .iter()
            .map(|u| state.summary(u))
            .collect())
    }

    async fn recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, GraphError> {
        let state = self.begin()?;
        let direct = state.following(username);
        let mut paths: HashMap<String, i64> = HashMap::new();
        for friend in &direct {
            for candidate in state.following(friend) {
                if candidate != username && !direct.contains(&candidate) {
                    *paths.entry(candidate).or_default() += 1;
                }
            }
        }

        let mut recs: Vec<Recommendation> = paths
            .into_iter()
            .map(|(candidate, mutuals)| {
                let summary = state.summary(&candidate);
                Recommendation {
                    username: summary.username,
                    name: summary.name,
                    mutuals,
                }
            })
            .collect();
        recs.sort_by(|a, b| b.mutuals.cmp(&a.mutuals).then(a.username.cmp(&b.username)));
        recs.truncate(limit as usize);
        Ok(recs)
    }

    async fn mutuals(&self, username: &str, other: &str) -> Result<Vec<String>, GraphError> {
        let state = self.begin()?;
        let theirs = state.following(other);
        Ok(state
            .following(username)
            .into_iter()
            .filter(|u| theirs.contains(u))
            .collect())
    }

    async fn search_users(&self, term: &str, limit: u32) -> Result<Vec<UserSummary>, GraphError> {
        let state = self.begin()?;
        let needle = term.to_lowercase();
        Ok(state
            .users
            .iter()
            .filter(|(username, u)| {
                username.to_lowercase().contains(&needle) || u.name.to_lowercase().contains(&needle)
            })
            .take(limit as usize)
            .map(|(username, u)| UserSummary::new(username.as_str(), u.name.as_str()))
            .collect())
    }

    async fn most_followed(&self, limit: u32) -> Result<Vec<PopularUser>, GraphError> {
        let state = self.begin()?;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for (_, followee) in &state.follows {
            *counts.entry(followee.clone()).or_default() += 1;
        }

        let mut users: Vec<PopularUser> = counts
            .into_iter()
            .map(|(username, followers)| PopularUser {
                name: state.summary(&username).name,
                username,
                followers,
            })
            .collect();
        users.sort_by(|a, b| b.followers.cmp(&a.followers).then(a.username.cmp(&b.username)));
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn mutual_pairs(&self, limit: u32) -> Result<Vec<MutualPair>, GraphError> {
        let state = self.begin()?;
        Ok(state
            .follows
            .iter()
            .filter(|(a, b)| a < b && state.follows.contains(&(b.clone(), a.clone())))
            .take(limit as usize)
            .map(|(a, b)| MutualPair {
                first: a.clone(),
                second: b.clone(),
            })
            .collect())
    }
}

// ── ScriptedTerminal ──────────────────────────────────────────────

/// A terminal fed from a queue of answers. Running out of answers reads as
/// end of input.
#[derive(Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
    pub history: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: &[&str]) -> Self {
        let mut term = Self::new();
        term.feed(inputs);
        term
    }

    pub fn feed(&mut self, inputs: &[&str]) {
        self.inputs.extend(inputs.iter().map(|s| s.to_string()));
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Return and forget everything printed so far.
    pub fn take_output(&mut self) -> String {
        let out = self.transcript();
        self.output.clear();
        out
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn next(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }

    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn remember(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

// ── Helpers ───────────────────────────────────────────────────────

pub type TestShell = Shell<MemoryGraph, ScriptedTerminal>;

pub fn shell(graph: MemoryGraph) -> TestShell {
    Shell::new(Some(graph), ScriptedTerminal::new())
}

/// Feed `inputs` for the prompts of `line`, run it, and return what it printed.
pub async fn run(shell: &mut TestShell, line: &str, inputs: &[&str]) -> String {
    shell.terminal_mut().feed(inputs);
    shell.execute_line(line).await;
    shell.terminal_mut().take_output()
}

/// Log `username` in with `password`.
pub async fn login(shell: &mut TestShell, username: &str, password: &str) {
    let out = run(shell, &format!("login {username}"), &[password]).await;
    assert!(out.contains(&format!("Welcome back, {username}!")), "{out}");
}

pub fn graph(store: &TestShell) -> &MemoryGraph {
    store.store().expect("shell has a store")
}
