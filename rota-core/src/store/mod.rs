//! Persistence contracts consumed by the lifecycle manager
//!
//! Reads return `Ok(None)` when the entity does not exist. Technical
//! failures are reported as [`Error::Connection`](crate::Error::Connection)
//! or [`Error::QueryExecution`](crate::Error::QueryExecution) and must never
//! be turned into a missing entity.

use async_trait::async_trait;

use crate::models::{PullRequest, Team, User};
use crate::Result;

pub mod memory;

pub use memory::MemoryStore;

/// Point lookup and upsert of users
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load_user(&self, id: &str) -> Result<Option<User>>;

    /// Insert or overwrite a user
    async fn save_user(&self, user: &User) -> Result<()>;
}

/// Team lookups and registration
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn load_team(&self, name: &str) -> Result<Option<Team>>;

    /// Load the team the given user currently belongs to
    async fn load_team_for_user(&self, user_id: &str) -> Result<Option<Team>>;

    /// Persist the team and upsert all of its members in one atomic write
    async fn save_team(&self, team: &Team) -> Result<()>;
}

/// Pull request lookups and upsert
#[async_trait]
pub trait PullRequestStore: Send + Sync {
    async fn load_pull_request(&self, id: &str) -> Result<Option<PullRequest>>;

    /// Insert or overwrite a pull request, reviewers included
    async fn save_pull_request(&self, pr: &PullRequest) -> Result<()>;

    /// Pull requests on which the user is an assigned reviewer, oldest first
    async fn pull_requests_for_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>>;
}

/// Everything the lifecycle manager needs from persistence
pub trait EntityStore: UserStore + TeamStore + PullRequestStore {}

impl<T: UserStore + TeamStore + PullRequestStore> EntityStore for T {}
