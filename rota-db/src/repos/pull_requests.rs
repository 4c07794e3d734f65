//! Repository for pull requests and their reviewer slots

use chrono::{DateTime, Utc};
use rota_core::{PrStatus, PullRequest};
use sqlx::sqlite::SqlitePool;

use crate::{Error, Result};

#[derive(Debug, sqlx::FromRow)]
struct PullRequestRow {
    id: String,
    title: String,
    author_id: String,
    status: String,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
}

impl PullRequestRow {
    fn into_pull_request(self, reviewers: Vec<String>) -> Result<PullRequest> {
        let status = PrStatus::parse(&self.status).ok_or_else(|| {
            Error::InvalidData(format!(
                "pull request {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(PullRequest {
            id: self.id,
            title: self.title,
            author_id: self.author_id,
            reviewers,
            status,
            created_at: self.created_at,
            merged_at: self.merged_at,
        })
    }
}

/// Repository for managing pull request records
#[derive(Debug, Clone)]
pub struct PullRequestsRepo {
    pool: SqlitePool,
}

impl PullRequestsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a pull request by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            "SELECT id, title, author_id, status, created_at, merged_at
             FROM pull_requests
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let reviewers = self.reviewers(&row.id).await?;
                Ok(Some(row.into_pull_request(reviewers)?))
            }
            None => Ok(None),
        }
    }

    /// Find pull requests the user is assigned to review, oldest first
    pub async fn find_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(
            "SELECT pr.id, pr.title, pr.author_id, pr.status, pr.created_at, pr.merged_at
             FROM pull_requests pr
             JOIN pull_request_reviewers r ON r.pull_request_id = pr.id
             WHERE r.user_id = ?1
             ORDER BY pr.created_at ASC, pr.id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut prs = Vec::with_capacity(rows.len());
        for row in rows {
            let reviewers = self.reviewers(&row.id).await?;
            prs.push(row.into_pull_request(reviewers)?);
        }
        Ok(prs)
    }

    /// Insert or overwrite a pull request and its reviewer slots atomically
    pub async fn save(&self, pr: &PullRequest) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO pull_requests (id, title, author_id, status, created_at, merged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (id) DO UPDATE SET
                title = excluded.title,
                author_id = excluded.author_id,
                status = excluded.status,
                merged_at = excluded.merged_at",
        )
        .bind(&pr.id)
        .bind(&pr.title)
        .bind(&pr.author_id)
        .bind(pr.status.as_str())
        .bind(pr.created_at)
        .bind(pr.merged_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM pull_request_reviewers WHERE pull_request_id = ?1")
            .bind(&pr.id)
            .execute(&mut *tx)
            .await?;

        for (slot, reviewer) in pr.reviewers.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pull_request_reviewers (pull_request_id, slot, user_id)
                 VALUES (?1, ?2, ?3)",
            )
            .bind(&pr.id)
            .bind(slot as i64)
            .bind(reviewer)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(pr = %pr.id, status = pr.status.as_str(), "Saved pull request");
        Ok(())
    }

    #[cfg(test)]
    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pull_requests")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn reviewers(&self, pr_id: &str) -> Result<Vec<String>> {
        let reviewers: Vec<String> = sqlx::query_scalar(
            "SELECT user_id FROM pull_request_reviewers
             WHERE pull_request_id = ?1
             ORDER BY slot",
        )
        .bind(pr_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviewers)
    }
}
