//! Repository for users

use rota_core::User;
use sqlx::sqlite::{SqliteConnection, SqlitePool};

use crate::Result;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub user_name: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.user_name,
            team_name: row.team_name,
            is_active: row.is_active,
        }
    }
}

/// Insert or overwrite a user on an open connection or transaction
pub(crate) async fn upsert(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    sqlx::query(
        "INSERT INTO users (id, user_name, team_name, is_active)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (id) DO UPDATE SET
            user_name = excluded.user_name,
            team_name = excluded.team_name,
            is_active = excluded.is_active",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.team_name)
    .bind(user.is_active)
    .execute(conn)
    .await?;
    Ok(())
}

/// Repository for managing user records
#[derive(Debug, Clone)]
pub struct UsersRepo {
    pool: SqlitePool,
}

impl UsersRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, user_name, team_name, is_active FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    /// Find all members of a team, ordered by ID
    pub async fn find_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, user_name, team_name, is_active
             FROM users
             WHERE team_name = ?1
             ORDER BY id",
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Insert or overwrite a user
    pub async fn save(&self, user: &User) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        upsert(&mut *conn, user).await
    }
}
