//! Character records

use crate::db::is_unique_violation;
use crate::error::{Error, Result};
use sqlx::PgPool;

/// A character owned by exactly one user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Character {
    pub character_code: i32,
    pub character_name: String,
    pub user_code: i32,
    pub health: i32,
    pub power: i32,
    pub money: i32,
}

/// Create a character owned by the given user. Character names are unique
/// across all users; the constraint settles concurrent creates.
pub async fn create(pool: &PgPool, character_name: &str, user_code: i32) -> Result<Character> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM characters WHERE character_name = $1)")
            .bind(character_name)
            .fetch_one(pool)
            .await?;
    if exists {
        return Err(Error::CharacterNameTaken(character_name.to_string()));
    }

    let character = sqlx::query_as::<_, Character>(
        r#"
        INSERT INTO characters (character_name, user_code)
        VALUES ($1, $2)
        RETURNING character_code, character_name, user_code, health, power, money
        "#,
    )
    .bind(character_name)
    .bind(user_code)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::CharacterNameTaken(character_name.to_string())
        } else {
            e.into()
        }
    })?;

    Ok(character)
}

/// Look up a character by its code
pub async fn find(pool: &PgPool, character_code: i32) -> Result<Option<Character>> {
    let character = sqlx::query_as::<_, Character>(
        r#"
        SELECT character_code, character_name, user_code, health, power, money
        FROM characters WHERE character_code = $1
        "#,
    )
    .bind(character_code)
    .fetch_optional(pool)
    .await?;
    Ok(character)
}

/// Delete a character. Ownership is checked by the caller.
pub async fn delete(pool: &PgPool, character_code: i32) -> Result<()> {
    sqlx::query("DELETE FROM characters WHERE character_code = $1")
        .bind(character_code)
        .execute(pool)
        .await?;
    Ok(())
}
