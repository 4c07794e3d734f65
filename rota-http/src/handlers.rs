//! Route handlers

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rota_core::ReviewService;
use serde_json::{json, Value};

use crate::dto::{
    AddTeamRequest, CreatePullRequest, MergeRequest, PullRequestEnvelope, ReassignRequest,
    ReassignResponse, ReviewsResponse, SetActiveRequest, TeamEnvelope, TeamQuery, TeamView,
    UserEnvelope, UserQuery,
};
use crate::error::ApiError;

type ApiResult<T> = std::result::Result<T, ApiError>;

fn required(value: Option<String>, name: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_param(name))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn add_team(
    State(service): State<ReviewService>,
    body: Result<Json<AddTeamRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TeamEnvelope>)> {
    let Json(body) = body?;
    let team = service.add_team(body.into_team()).await?;
    Ok((
        StatusCode::CREATED,
        Json(TeamEnvelope {
            team: TeamView::from(team),
        }),
    ))
}

pub async fn get_team(
    State(service): State<ReviewService>,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> ApiResult<Json<TeamView>> {
    let Query(query) = query?;
    let name = required(query.team_name, "team_name")?;
    let team = service.get_team(&name).await?;
    Ok(Json(TeamView::from(team)))
}

pub async fn set_is_active(
    State(service): State<ReviewService>,
    body: Result<Json<SetActiveRequest>, JsonRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let Json(body) = body?;
    let user = service.set_user_active(&body.user_id, body.is_active).await?;
    Ok(Json(UserEnvelope::from(user)))
}

pub async fn get_reviews(
    State(service): State<ReviewService>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<ReviewsResponse>> {
    let Query(query) = query?;
    let user_id = required(query.user_id, "user_id")?;
    let prs = service.reviews_for_user(&user_id).await?;
    Ok(Json(ReviewsResponse::new(user_id, prs)))
}

pub async fn create_pull_request(
    State(service): State<ReviewService>,
    body: Result<Json<CreatePullRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PullRequestEnvelope>)> {
    let Json(body) = body?;
    let pr = service
        .create_pull_request(&body.pull_request_id, &body.pull_request_name, &body.author_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PullRequestEnvelope { pr: pr.into() }),
    ))
}

pub async fn merge_pull_request(
    State(service): State<ReviewService>,
    body: Result<Json<MergeRequest>, JsonRejection>,
) -> ApiResult<Json<PullRequestEnvelope>> {
    let Json(body) = body?;
    let pr = service.merge_pull_request(&body.pull_request_id).await?;
    Ok(Json(PullRequestEnvelope { pr: pr.into() }))
}

pub async fn reassign_reviewer(
    State(service): State<ReviewService>,
    body: Result<Json<ReassignRequest>, JsonRejection>,
) -> ApiResult<Json<ReassignResponse>> {
    let Json(body) = body?;
    let outcome = service
        .reassign_reviewer(&body.pull_request_id, &body.old_reviewer_id)
        .await?;
    Ok(Json(ReassignResponse {
        pr: outcome.pull_request.into(),
        replaced_by: outcome.replaced_by,
    }))
}
