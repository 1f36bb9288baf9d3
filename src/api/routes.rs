//! API route handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::server::SharedState;
use crate::auth::{self, CurrentUser, Viewer};
use crate::authz;
use crate::db;
use crate::error::{Error, Result};

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub user_id: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    pub character_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemStat {
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub power: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub item_name: String,
    #[serde(default)]
    pub item_stat: ItemStat,
    #[serde(default)]
    pub item_price: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub item_name: String,
    #[serde(default)]
    pub item_stat: ItemStat,
}

// Response types

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCreatedResponse {
    pub character_code: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInfoResponse {
    pub character_info: authz::CharacterView,
}

#[derive(Debug, Serialize)]
pub struct ItemStatView {
    pub health: i32,
    pub power: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInfo {
    pub item_code: i32,
    pub item_name: String,
    pub item_stat: ItemStatView,
    pub item_price: i32,
}

impl From<db::items::Item> for ItemInfo {
    fn from(item: db::items::Item) -> Self {
        Self {
            item_code: item.item_code,
            item_name: item.item_name,
            item_stat: ItemStatView {
                health: item.health,
                power: item.power,
            },
            item_price: item.item_price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreatedResponse {
    pub new_item: ItemInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdatedResponse {
    pub message: String,
    pub update_item: ItemInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummaryView {
    pub item_code: i32,
    pub item_name: String,
    pub item_price: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListResponse {
    pub item_list: Vec<ItemSummaryView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailResponse {
    pub message: String,
    pub item_info: ItemInfo,
}

// Health check

pub async fn health(State(state): State<SharedState>) -> Result<Json<HealthResponse>> {
    let active_sessions = state.sessions.active_count().await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        active_sessions,
    }))
}

// Account routes

pub async fn sign_up(
    State(state): State<SharedState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    auth::password::validate_user_id(&req.user_id)?;
    auth::password::validate_new_password(&req.password, &req.confirm_password)?;

    let password_hash = auth::hash_password(&req.password, state.config.auth.bcrypt_cost)?;
    let user = db::users::create(&state.pool, &req.user_id, &password_hash, &req.name).await?;

    tracing::info!("registered account '{}'", user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("account '{}' registered for {}", user.user_id, user.name),
        }),
    ))
}

pub async fn sign_in(
    State(state): State<SharedState>,
    Json(req): Json<SignInRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<MessageResponse>)> {
    let user = db::users::find_by_user_id(&state.pool, &req.user_id)
        .await?
        .ok_or(Error::UnknownUserId)?;

    if !auth::verify_password(&req.password, &user.password_hash)? {
        return Err(Error::WrongPassword);
    }

    let token = auth::token::issue(user.user_code, state.config.auth.token_secret.as_bytes())?;
    let session_id = state.sessions.create(user.user_code).await?;
    tracing::debug!("created session {} for '{}'", session_id, user.user_id);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, auth::middleware::auth_cookie(&token))],
        Json(MessageResponse {
            message: "signed in".to_string(),
        }),
    ))
}

// Character routes

pub async fn create_character(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterCreatedResponse>)> {
    let character = db::characters::create(&state.pool, &req.character_name, user.user_code).await?;

    tracing::info!(
        "'{}' created character '{}'",
        user.user_id,
        character.character_name
    );

    Ok((
        StatusCode::CREATED,
        Json(CharacterCreatedResponse {
            character_code: character.character_code,
        }),
    ))
}

pub async fn delete_character(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    Path(character_code): Path<i32>,
) -> Result<Json<MessageResponse>> {
    let character = db::characters::find(&state.pool, character_code)
        .await?
        .ok_or(Error::CharacterNotFound(character_code))?;

    if !authz::can_mutate(user.user_code, character.user_code) {
        return Err(Error::Forbidden);
    }

    db::characters::delete(&state.pool, character_code).await?;

    Ok(Json(MessageResponse {
        message: format!("character '{}' deleted", character.character_name),
    }))
}

pub async fn get_character(
    State(state): State<SharedState>,
    Extension(viewer): Extension<Viewer>,
    Path(character_code): Path<i32>,
) -> Result<Json<CharacterInfoResponse>> {
    let character = db::characters::find(&state.pool, character_code)
        .await?
        .ok_or(Error::CharacterNotFound(character_code))?;

    let character_info = authz::project_character(viewer.user_code(), &character);

    Ok(Json(CharacterInfoResponse { character_info }))
}

// Item routes

pub async fn create_item(
    State(state): State<SharedState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>)> {
    let item = db::items::create(
        &state.pool,
        &req.item_name,
        req.item_stat.health,
        req.item_stat.power,
        req.item_price,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemCreatedResponse {
            new_item: item.into(),
        }),
    ))
}

pub async fn update_item(
    State(state): State<SharedState>,
    Path(item_code): Path<i32>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemUpdatedResponse>> {
    let item = db::items::update(
        &state.pool,
        item_code,
        &req.item_name,
        req.item_stat.health,
        req.item_stat.power,
    )
    .await?;

    Ok(Json(ItemUpdatedResponse {
        message: format!("item '{}' updated", item.item_name),
        update_item: item.into(),
    }))
}

pub async fn list_items(State(state): State<SharedState>) -> Result<Json<ItemListResponse>> {
    let items = db::items::list(&state.pool).await?;

    Ok(Json(ItemListResponse {
        item_list: items
            .into_iter()
            .map(|item| ItemSummaryView {
                item_code: item.item_code,
                item_name: item.item_name,
                item_price: item.item_price,
            })
            .collect(),
    }))
}

pub async fn get_item(
    State(state): State<SharedState>,
    Path(item_code): Path<i32>,
) -> Result<Json<ItemDetailResponse>> {
    let item = db::items::find(&state.pool, item_code)
        .await?
        .ok_or(Error::ItemNotFound(item_code))?;

    Ok(Json(ItemDetailResponse {
        message: format!("details for item '{}'", item.item_name),
        item_info: item.into(),
    }))
}
