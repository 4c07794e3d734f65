//! Repository for teams
//!
//! Membership is not stored separately: a team's members are the users whose
//! `team_name` points at it.

use rota_core::Team;
use sqlx::sqlite::SqlitePool;

use super::users::{self, UsersRepo};
use crate::Result;

/// Repository for managing teams
#[derive(Debug, Clone)]
pub struct TeamsRepo {
    pool: SqlitePool,
}

impl TeamsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a team and its members by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>> {
        let exists: Option<String> =
            sqlx::query_scalar("SELECT team_name FROM teams WHERE team_name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        let Some(name) = exists else {
            return Ok(None);
        };
        let members = UsersRepo::new(self.pool.clone()).find_by_team(&name).await?;
        Ok(Some(Team { name, members }))
    }

    /// Find the team a user belongs to
    pub async fn find_for_user(&self, user_id: &str) -> Result<Option<Team>> {
        let name: Option<String> = sqlx::query_scalar(
            "SELECT t.team_name
             FROM teams t
             JOIN users u ON u.team_name = t.team_name
             WHERE u.id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match name {
            Some(name) => self.find_by_name(&name).await,
            None => Ok(None),
        }
    }

    /// Insert the team and upsert every member in one transaction
    pub async fn save(&self, team: &Team) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO teams (team_name) VALUES (?1) ON CONFLICT (team_name) DO NOTHING")
            .bind(&team.name)
            .execute(&mut *tx)
            .await?;

        for member in &team.members {
            let mut user = member.clone();
            user.team_name = team.name.clone();
            users::upsert(&mut *tx, &user).await?;
        }

        tx.commit().await?;
        tracing::debug!(team = %team.name, members = team.members.len(), "Saved team");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rota_core::User;

    use crate::test_support::temp_database;

    #[tokio::test]
    async fn test_save_and_find_team() {
        let (_dir, db) = temp_database().await;
        let repo = db.teams();

        let team = rota_core::Team::new("backend")
            .with_member(User::new("u2", "Bob", ""))
            .with_member(User::new("u1", "Alice", "").with_active(false));
        repo.save(&team).await.unwrap();

        let loaded = repo.find_by_name("backend").await.unwrap().unwrap();
        let ids: Vec<_> = loaded.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
        assert!(!loaded.members[0].is_active);
        assert!(loaded.members.iter().all(|m| m.team_name == "backend"));

        assert!(repo.find_by_name("frontend").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_for_user_follows_moves() {
        let (_dir, db) = temp_database().await;
        let repo = db.teams();

        repo.save(&rota_core::Team::new("backend").with_member(User::new("u1", "Alice", "")))
            .await
            .unwrap();
        assert_eq!(
            repo.find_for_user("u1").await.unwrap().unwrap().name,
            "backend"
        );

        repo.save(&rota_core::Team::new("frontend").with_member(User::new("u1", "Alice", "")))
            .await
            .unwrap();
        assert_eq!(
            repo.find_for_user("u1").await.unwrap().unwrap().name,
            "frontend"
        );
        assert!(repo
            .find_by_name("backend")
            .await
            .unwrap()
            .unwrap()
            .members
            .is_empty());
        assert!(repo.find_for_user("ghost").await.unwrap().is_none());
    }
}
