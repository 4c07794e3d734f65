//! Pull request lifecycle: create, merge, reassign
//!
//! A pull request is either open or merged. Merging is terminal; reviewer
//! reassignment is only allowed while open.

use chrono::Utc;

use super::ReviewService;
use crate::error::EntityKind;
use crate::models::{PullRequest, Team};
use crate::selection::{fill_reviewers, pick_one, replace_reviewer, select_candidates};
use crate::{Error, Result};

/// Outcome of a successful reassignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    /// Id of the reviewer that took over the freed slot
    pub replaced_by: String,
}

fn pr_key(id: &str) -> String {
    format!("pr:{id}")
}

impl ReviewService {
    /// Open a pull request and assign up to two reviewers from the author's team
    pub async fn create_pull_request(
        &self,
        id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if id.is_empty() {
            return Err(Error::InvalidInput("pull request id is required".to_string()));
        }

        let _guard = self.locks.lock(pr_key(id)).await;

        if self.store.load_pull_request(id).await?.is_some() {
            return Err(Error::already_exists(EntityKind::PullRequest, id));
        }

        let team = self.author_team(author_id).await?;

        let mut pr = PullRequest::new(id, title, author_id);
        fill_reviewers(&mut pr, &team, self.rng.as_ref());
        self.store.save_pull_request(&pr).await?;

        tracing::info!(
            pr = %pr.id,
            author = %pr.author_id,
            team = %team.name,
            reviewers = ?pr.reviewers,
            "Pull request created"
        );
        Ok(pr)
    }

    /// Mark a pull request as merged
    ///
    /// Merging an already merged pull request returns it unchanged without
    /// writing to the store.
    pub async fn merge_pull_request(&self, id: &str) -> Result<PullRequest> {
        let _guard = self.locks.lock(pr_key(id)).await;

        let mut pr = self
            .store
            .load_pull_request(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::PullRequest, id))?;

        if !pr.merge(Utc::now()) {
            tracing::debug!(pr = %id, "Pull request already merged");
            return Ok(pr);
        }

        self.store.save_pull_request(&pr).await?;
        tracing::info!(pr = %id, merged_at = ?pr.merged_at, "Pull request merged");
        Ok(pr)
    }

    /// Replace `old_reviewer_id` with a freshly drawn eligible team member
    pub async fn reassign_reviewer(&self, id: &str, old_reviewer_id: &str) -> Result<Reassignment> {
        let _guard = self.locks.lock(pr_key(id)).await;

        let mut pr = self
            .store
            .load_pull_request(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::PullRequest, id))?;
        // resolved on every call so membership changes take effect immediately
        let team = self
            .store
            .load_team_for_user(&pr.author_id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Team, format!("of author {}", pr.author_id)))?;

        if pr.is_merged() {
            return Err(Error::PrMerged(pr.id));
        }
        if !pr.has_reviewer(old_reviewer_id) {
            return Err(Error::NotAssigned {
                pr: pr.id,
                reviewer: old_reviewer_id.to_string(),
            });
        }

        let candidates = select_candidates(&team, &pr);
        let replacement = pick_one(&candidates, self.rng.as_ref())
            .ok_or_else(|| Error::NoCandidate(pr.id.clone()))?
            .id
            .clone();

        replace_reviewer(&mut pr, old_reviewer_id, &replacement)?;
        self.store.save_pull_request(&pr).await?;

        tracing::info!(
            pr = %pr.id,
            old = %old_reviewer_id,
            new = %replacement,
            "Reviewer reassigned"
        );
        Ok(Reassignment {
            pull_request: pr,
            replaced_by: replacement,
        })
    }

    async fn author_team(&self, author_id: &str) -> Result<Team> {
        if let Some(team) = self.store.load_team_for_user(author_id).await? {
            return Ok(team);
        }
        if self.store.load_user(author_id).await?.is_none() {
            return Err(Error::not_found(EntityKind::User, author_id));
        }
        Err(Error::not_found(
            EntityKind::Team,
            format!("of author {author_id}"),
        ))
    }
}
