//! In-memory entity store
//!
//! Used by tests and by `rota serve --memory`. Team membership is derived
//! from each user's team reference, the same way the SQLite store does it,
//! and members are always returned sorted by id.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{PullRequestStore, TeamStore, UserStore};
use crate::models::{PullRequest, Team, User};
use crate::Result;

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeSet<String>,
    users: BTreeMap<String, User>,
    pull_requests: BTreeMap<String, PullRequest>,
}

impl Tables {
    fn team(&self, name: &str) -> Option<Team> {
        if !self.teams.contains(name) {
            return None;
        }
        Some(Team {
            name: name.to_string(),
            members: self
                .users
                .values()
                .filter(|u| u.team_name == name)
                .cloned()
                .collect(),
        })
    }
}

/// Entity store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    pull_request_writes: AtomicUsize,
    user_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pull request saves performed so far
    pub fn pull_request_writes(&self) -> usize {
        self.pull_request_writes.load(Ordering::SeqCst)
    }

    /// Number of single-user saves performed so far
    pub fn user_writes(&self) -> usize {
        self.user_writes.load(Ordering::SeqCst)
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn load_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.read().users.get(id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.write().users.insert(user.id.clone(), user.clone());
        self.user_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn load_team(&self, name: &str) -> Result<Option<Team>> {
        Ok(self.read().team(name))
    }

    async fn load_team_for_user(&self, user_id: &str) -> Result<Option<Team>> {
        let tables = self.read();
        Ok(tables
            .users
            .get(user_id)
            .and_then(|u| tables.team(&u.team_name)))
    }

    async fn save_team(&self, team: &Team) -> Result<()> {
        let mut tables = self.write();
        tables.teams.insert(team.name.clone());
        for member in &team.members {
            let mut user = member.clone();
            user.team_name = team.name.clone();
            tables.users.insert(user.id.clone(), user);
        }
        Ok(())
    }
}

#[async_trait]
impl PullRequestStore for MemoryStore {
    async fn load_pull_request(&self, id: &str) -> Result<Option<PullRequest>> {
        Ok(self.read().pull_requests.get(id).cloned())
    }

    async fn save_pull_request(&self, pr: &PullRequest) -> Result<()> {
        self.write().pull_requests.insert(pr.id.clone(), pr.clone());
        self.pull_request_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn pull_requests_for_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let mut prs: Vec<PullRequest> = self
            .read()
            .pull_requests
            .values()
            .filter(|pr| pr.has_reviewer(user_id))
            .cloned()
            .collect();
        prs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(prs)
    }
}
