//! Review service: pull request lifecycle and team directory
//!
//! Each operation loads the entities it needs fresh from the store, applies
//! the selection rules, and writes the result back while holding the
//! entity's key lock.

use std::sync::Arc;

use crate::locks::KeyedLocks;
use crate::random::{RandomSource, ThreadRandom};
use crate::store::EntityStore;

mod directory;
mod pull_requests;

pub use pull_requests::Reassignment;

/// Entry point for every operation the API exposes
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn EntityStore>,
    rng: Arc<dyn RandomSource>,
    locks: KeyedLocks,
}

impl ReviewService {
    /// Create a service drawing reviewers with the thread-local generator
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            rng: Arc::new(ThreadRandom),
            locks: KeyedLocks::new(),
        }
    }

    /// Replace the randomness used for reviewer draws
    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Store wrappers and fixtures shared by the service tests

    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::models::{PullRequest, Team, User};
    use crate::random::SequenceRandom;
    use crate::store::{MemoryStore, PullRequestStore, TeamStore, UserStore};
    use crate::{Error, Result};

    use super::ReviewService;

    /// Team fixture: `(id, active)` pairs, all in team "backend"
    pub fn team(members: &[(&str, bool)]) -> Team {
        members.iter().fold(Team::new("backend"), |t, (id, active)| {
            t.with_member(User::new(*id, id.to_uppercase(), "backend").with_active(*active))
        })
    }

    pub async fn service_with(team: &Team) -> (ReviewService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store.save_team(team).await.unwrap();
        (ReviewService::new(store.clone()), store)
    }

    pub fn scripted(service: ReviewService, script: impl IntoIterator<Item = usize>) -> ReviewService {
        service.with_random(Arc::new(SequenceRandom::new(script)))
    }

    /// Delays pull request loads so that concurrent operations interleave
    pub struct SlowStore {
        pub inner: MemoryStore,
        pub delay: Duration,
    }

    #[async_trait]
    impl UserStore for SlowStore {
        async fn load_user(&self, id: &str) -> Result<Option<User>> {
            self.inner.load_user(id).await
        }

        async fn save_user(&self, user: &User) -> Result<()> {
            self.inner.save_user(user).await
        }
    }

    #[async_trait]
    impl TeamStore for SlowStore {
        async fn load_team(&self, name: &str) -> Result<Option<Team>> {
            self.inner.load_team(name).await
        }

        async fn load_team_for_user(&self, user_id: &str) -> Result<Option<Team>> {
            self.inner.load_team_for_user(user_id).await
        }

        async fn save_team(&self, team: &Team) -> Result<()> {
            self.inner.save_team(team).await
        }
    }

    #[async_trait]
    impl PullRequestStore for SlowStore {
        async fn load_pull_request(&self, id: &str) -> Result<Option<PullRequest>> {
            let pr = self.inner.load_pull_request(id).await;
            tokio::time::sleep(self.delay).await;
            pr
        }

        async fn save_pull_request(&self, pr: &PullRequest) -> Result<()> {
            self.inner.save_pull_request(pr).await
        }

        async fn pull_requests_for_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
            self.inner.pull_requests_for_reviewer(user_id).await
        }
    }

    /// Store whose every call fails as if the database were unreachable
    pub struct DownStore;

    fn down<T>() -> Result<T> {
        Err(Error::Connection("connection refused".to_string()))
    }

    #[async_trait]
    impl UserStore for DownStore {
        async fn load_user(&self, _id: &str) -> Result<Option<User>> {
            down()
        }

        async fn save_user(&self, _user: &User) -> Result<()> {
            down()
        }
    }

    #[async_trait]
    impl TeamStore for DownStore {
        async fn load_team(&self, _name: &str) -> Result<Option<Team>> {
            down()
        }

        async fn load_team_for_user(&self, _user_id: &str) -> Result<Option<Team>> {
            down()
        }

        async fn save_team(&self, _team: &Team) -> Result<()> {
            down()
        }
    }

    #[async_trait]
    impl PullRequestStore for DownStore {
        async fn load_pull_request(&self, _id: &str) -> Result<Option<PullRequest>> {
            down()
        }

        async fn save_pull_request(&self, _pr: &PullRequest) -> Result<()> {
            down()
        }

        async fn pull_requests_for_reviewer(&self, _user_id: &str) -> Result<Vec<PullRequest>> {
            down()
        }
    }
}
