//! User identity records

use crate::db::is_unique_violation;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// A registered account. The raw password is never stored, only its hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_code: i32,
    pub user_id: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Create a user inside a single transaction so the uniqueness check and
/// the insert observe a consistent snapshot. Of two concurrent sign-ups for
/// the same user id, exactly one commits; the loser surfaces the unique
/// constraint as a conflict.
pub async fn create(pool: &PgPool, user_id: &str, password_hash: &str, name: &str) -> Result<User> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
        .execute(&mut *tx)
        .await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
    if exists {
        return Err(Error::UserIdTaken(user_id.to_string()));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (user_id, password_hash, name)
        VALUES ($1, $2, $3)
        RETURNING user_code, user_id, password_hash, name, created_at
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .bind(name)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::UserIdTaken(user_id.to_string())
        } else {
            e.into()
        }
    })?;

    tx.commit().await?;

    Ok(user)
}

/// Look up an account by its login handle
pub async fn find_by_user_id(pool: &PgPool, user_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT user_code, user_id, password_hash, name, created_at FROM users WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Look up an account by its numeric code
pub async fn find_by_code(pool: &PgPool, user_code: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT user_code, user_id, password_hash, name, created_at FROM users WHERE user_code = $1",
    )
    .bind(user_code)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}
