//! Domain models: users, teams and pull requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of reviewers assigned to a pull request
pub const MAX_REVIEWERS: usize = 2;

/// A team member who may author or review pull requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Name of the team this user belongs to
    pub team_name: String,
    /// Only active users are eligible as reviewers
    pub is_active: bool,
}

impl User {
    /// Create a new active user
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team_name: team_name.into(),
            is_active: true,
        }
    }

    /// Set the active flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// A named group of users; reviewers are drawn from the author's team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member, pointing its team reference at this team
    pub fn with_member(mut self, mut user: User) -> Self {
        user.team_name = self.name.clone();
        self.members.push(user);
        self
    }
}

/// Pull request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrStatus::Open => "OPEN",
            PrStatus::Merged => "MERGED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(PrStatus::Open),
            "MERGED" => Some(PrStatus::Merged),
            _ => None,
        }
    }
}

/// A pull request and its assigned reviewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub title: String,
    pub author_id: String,
    /// Assigned reviewer ids, at most [`MAX_REVIEWERS`], ordered by slot
    pub reviewers: Vec<String>,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
    /// Set exactly once, when the pull request is merged
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Create a new open pull request with no reviewers
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author_id: author_id.into(),
            reviewers: Vec::with_capacity(MAX_REVIEWERS),
            status: PrStatus::Open,
            created_at: Utc::now(),
            merged_at: None,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.status == PrStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r == user_id)
    }

    /// Transition to merged at the given time
    ///
    /// Returns `false` without touching anything if the pull request was
    /// already merged.
    pub fn merge(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PrStatus::Merged;
        self.merged_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pull_request_is_open() {
        let pr = PullRequest::new("pr-1", "Add login", "u1");
        assert_eq!(pr.status, PrStatus::Open);
        assert!(pr.reviewers.is_empty());
        assert!(pr.merged_at.is_none());
    }

    #[test]
    fn test_merge_sets_timestamp_once() {
        let mut pr = PullRequest::new("pr-1", "Add login", "u1");
        let first = Utc::now();
        assert!(pr.merge(first));
        assert_eq!(pr.merged_at, Some(first));

        let later = first + chrono::Duration::minutes(5);
        assert!(!pr.merge(later));
        assert_eq!(pr.merged_at, Some(first));
        assert!(pr.is_merged());
    }

    #[test]
    fn test_team_with_member_rewrites_team_name() {
        let team = Team::new("backend").with_member(User::new("u1", "Alice", "frontend"));
        assert_eq!(team.members[0].team_name, "backend");
        assert_eq!(team.members.len(), 1);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(PrStatus::parse(PrStatus::Merged.as_str()), Some(PrStatus::Merged));
        assert_eq!(PrStatus::parse("closed"), None);
        assert_eq!(serde_json::to_string(&PrStatus::Open).unwrap(), "\"OPEN\"");
    }
}
