//! `rota-core` store traits backed by SQLite

use async_trait::async_trait;
use rota_core::store::{PullRequestStore, TeamStore, UserStore};
use rota_core::{PullRequest, Team, User};

use crate::Database;

/// Entity store persisting to a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn logged<T>(op: &'static str, result: crate::Result<T>) -> rota_core::Result<T> {
    result.map_err(|e| {
        tracing::error!(op, error = %e, "Store operation failed");
        e.into()
    })
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn load_user(&self, id: &str) -> rota_core::Result<Option<User>> {
        logged("load_user", self.db.users().find_by_id(id).await)
    }

    async fn save_user(&self, user: &User) -> rota_core::Result<()> {
        logged("save_user", self.db.users().save(user).await)
    }
}

#[async_trait]
impl TeamStore for SqliteStore {
    async fn load_team(&self, name: &str) -> rota_core::Result<Option<Team>> {
        logged("load_team", self.db.teams().find_by_name(name).await)
    }

    async fn load_team_for_user(&self, user_id: &str) -> rota_core::Result<Option<Team>> {
        logged("load_team_for_user", self.db.teams().find_for_user(user_id).await)
    }

    async fn save_team(&self, team: &Team) -> rota_core::Result<()> {
        logged("save_team", self.db.teams().save(team).await)
    }
}

#[async_trait]
impl PullRequestStore for SqliteStore {
    async fn load_pull_request(&self, id: &str) -> rota_core::Result<Option<PullRequest>> {
        logged("load_pull_request", self.db.pull_requests().find_by_id(id).await)
    }

    async fn save_pull_request(&self, pr: &PullRequest) -> rota_core::Result<()> {
        logged("save_pull_request", self.db.pull_requests().save(pr).await)
    }

    async fn pull_requests_for_reviewer(
        &self,
        user_id: &str,
    ) -> rota_core::Result<Vec<PullRequest>> {
        logged(
            "pull_requests_for_reviewer",
            self.db.pull_requests().find_by_reviewer(user_id).await,
        )
    }
}
