//! Item catalog records. Items have no ownership semantics.

use crate::error::{Error, Result};
use sqlx::PgPool;

/// A catalog item with its stat block and price
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Item {
    pub item_code: i32,
    pub item_name: String,
    pub health: i32,
    pub power: i32,
    pub item_price: i32,
}

/// Listing projection: code, name, and price only
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemSummary {
    pub item_code: i32,
    pub item_name: String,
    pub item_price: i32,
}

/// Create a catalog item
pub async fn create(
    pool: &PgPool,
    item_name: &str,
    health: i32,
    power: i32,
    item_price: i32,
) -> Result<Item> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (item_name, health, power, item_price)
        VALUES ($1, $2, $3, $4)
        RETURNING item_code, item_name, health, power, item_price
        "#,
    )
    .bind(item_name)
    .bind(health)
    .bind(power)
    .bind(item_price)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

/// Update an item's name and stat block. Price is not updatable.
pub async fn update(
    pool: &PgPool,
    item_code: i32,
    item_name: &str,
    health: i32,
    power: i32,
) -> Result<Item> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        UPDATE items SET item_name = $2, health = $3, power = $4
        WHERE item_code = $1
        RETURNING item_code, item_name, health, power, item_price
        "#,
    )
    .bind(item_code)
    .bind(item_name)
    .bind(health)
    .bind(power)
    .fetch_optional(pool)
    .await?;

    item.ok_or(Error::ItemNotFound(item_code))
}

/// List the catalog
pub async fn list(pool: &PgPool) -> Result<Vec<ItemSummary>> {
    let items = sqlx::query_as::<_, ItemSummary>(
        "SELECT item_code, item_name, item_price FROM items ORDER BY item_code",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Look up an item by its code
pub async fn find(pool: &PgPool, item_code: i32) -> Result<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        "SELECT item_code, item_name, health, power, item_price FROM items WHERE item_code = $1",
    )
    .bind(item_code)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}
