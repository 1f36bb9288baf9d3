//! Server-side session records
//!
//! Sessions are durable rows in Postgres keyed by an opaque id, distinct
//! from the stateless bearer token used for route authorization. Expired
//! rows are treated as absent on read and swept by a background purge.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Session information
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Session ID
    pub session_id: String,
    /// Account this session belongs to
    pub user_code: i32,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has passed its expiration timestamp
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Durable session store backed by the shared connection pool
#[derive(Clone)]
pub struct SessionStore {
    pool: PgPool,
    ttl: Duration,
}

impl SessionStore {
    /// Create a new session store with the given time-to-live
    pub fn new(pool: PgPool, ttl_hours: i64) -> Self {
        Self {
            pool,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Create the sessions table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                session_id TEXT PRIMARY KEY,
                user_code  INTEGER NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                expires_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Create a new session for a user, returning its id
    pub async fn create(&self, user_code: i32) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;

        sqlx::query("INSERT INTO sessions (session_id, user_code, expires_at) VALUES ($1, $2, $3)")
            .bind(&session_id)
            .bind(user_code)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(session_id)
    }

    /// Get a session by id; expired sessions read as absent
    pub async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT session_id, user_code, created_at, expires_at FROM sessions WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session.filter(|s| !s.is_expired()))
    }

    /// Delete a session
    pub async fn delete(&self, session_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove expired sessions, returning how many were dropped
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count sessions that have not yet expired
    pub async fn active_count(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE expires_at > now()")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry_check() {
        let now = Utc::now();
        let live = Session {
            session_id: "a".to_string(),
            user_code: 1,
            created_at: now,
            expires_at: now + Duration::hours(24),
        };
        let dead = Session {
            session_id: "b".to_string(),
            user_code: 1,
            created_at: now - Duration::hours(25),
            expires_at: now - Duration::hours(1),
        };

        assert!(!live.is_expired());
        assert!(dead.is_expired());
    }
}
