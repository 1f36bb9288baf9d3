//! Postgres access: pool setup, schema provisioning, and repositories

pub mod characters;
pub mod items;
pub mod users;

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect a pool using the configured url and size
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    Ok(pool)
}

/// Create the record tables if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_code     SERIAL PRIMARY KEY,
            user_id       TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name          TEXT NOT NULL,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            character_code SERIAL PRIMARY KEY,
            character_name TEXT NOT NULL UNIQUE,
            user_code      INTEGER NOT NULL REFERENCES users (user_code) ON DELETE CASCADE,
            health         INTEGER NOT NULL DEFAULT 500,
            power          INTEGER NOT NULL DEFAULT 100,
            money          INTEGER NOT NULL DEFAULT 10000,
            created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            item_code  SERIAL PRIMARY KEY,
            item_name  TEXT NOT NULL,
            health     INTEGER NOT NULL DEFAULT 0,
            power      INTEGER NOT NULL DEFAULT 0,
            item_price INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Whether an error is a unique-constraint violation, i.e. the losing side
/// of a concurrent insert race
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
