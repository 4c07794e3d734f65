//! Team registration and user activity

use std::collections::HashSet;

use super::ReviewService;
use crate::error::EntityKind;
use crate::models::{PullRequest, Team, User};
use crate::{Error, Result};

impl ReviewService {
    /// Register a new team and upsert its members
    ///
    /// Members already registered in another team are moved to this one.
    pub async fn add_team(&self, team: Team) -> Result<Team> {
        validate_team(&team)?;

        let _guard = self.locks.lock(format!("team:{}", team.name)).await;

        if self.store.load_team(&team.name).await?.is_some() {
            return Err(Error::already_exists(EntityKind::Team, team.name));
        }

        let Team { name, members } = team;
        let team = members
            .into_iter()
            .fold(Team::new(name), |team, member| team.with_member(member));
        self.store.save_team(&team).await?;

        tracing::info!(team = %team.name, members = team.members.len(), "Team registered");
        Ok(team)
    }

    pub async fn get_team(&self, name: &str) -> Result<Team> {
        self.store
            .load_team(name)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Team, name))
    }

    /// Toggle whether a user may be picked as a reviewer
    ///
    /// Pull requests the user already reviews are left untouched.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        let _guard = self.locks.lock(format!("user:{user_id}")).await;

        let mut user = self
            .store
            .load_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::User, user_id))?;

        if user.is_active == is_active {
            return Ok(user);
        }

        user.is_active = is_active;
        self.store.save_user(&user).await?;
        tracing::info!(user = %user_id, is_active, "User activity changed");
        Ok(user)
    }

    /// Pull requests the user is currently assigned to review
    pub async fn reviews_for_user(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        self.store.pull_requests_for_reviewer(user_id).await
    }
}

fn validate_team(team: &Team) -> Result<()> {
    if team.name.trim().is_empty() {
        return Err(Error::InvalidInput("team_name is required".to_string()));
    }

    let mut seen = HashSet::new();
    for member in &team.members {
        if member.id.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "member of team '{}' has an empty user_id",
                team.name
            )));
        }
        if !seen.insert(member.id.as_str()) {
            return Err(Error::InvalidInput(format!(
                "user '{}' listed twice in team '{}'",
                member.id, team.name
            )));
        }
    }
    Ok(())
}
