//! Request and response bodies

use chrono::SecondsFormat;
use rota_core::{PrStatus, PullRequest, Team, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TeamMemberBody {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamRequest {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberBody>,
}

impl AddTeamRequest {
    pub fn into_team(self) -> Team {
        let name = self.team_name;
        self.members
            .into_iter()
            .fold(Team::new(name.clone()), |team, m| {
                team.with_member(User::new(m.user_id, m.username, name.clone()).with_active(m.is_active))
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub team_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreatePullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReassignRequest {
    pub pull_request_id: String,
    pub old_reviewer_id: String,
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct TeamView {
    pub team_name: String,
    pub members: Vec<MemberView>,
}

impl From<Team> for TeamView {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.name,
            members: team
                .members
                .into_iter()
                .map(|u| MemberView {
                    user_id: u.id,
                    username: u.name,
                    is_active: u.is_active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamEnvelope {
    pub team: TeamView,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserView,
}

impl From<User> for UserEnvelope {
    fn from(user: User) -> Self {
        Self {
            user: UserView {
                user_id: user.id,
                username: user.name,
                team_name: user.team_name,
                is_active: user.is_active,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PullRequestView {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,
}

impl From<PullRequest> for PullRequestView {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.title,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.reviewers,
            merged_at: pr
                .merged_at
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestView,
}

#[derive(Debug, Serialize)]
pub struct ReassignResponse {
    pub pr: PullRequestView,
    pub replaced_by: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequestSummary {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestSummary>,
}

impl ReviewsResponse {
    pub fn new(user_id: String, prs: Vec<PullRequest>) -> Self {
        Self {
            user_id,
            pull_requests: prs
                .into_iter()
                .map(|pr| PullRequestSummary {
                    pull_request_id: pr.id,
                    pull_request_name: pr.title,
                    author_id: pr.author_id,
                    status: pr.status,
                })
                .collect(),
        }
    }
}
