//! Error types for Armory

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("user id may only contain lowercase letters and digits")]
    InvalidUserId,

    #[error("password must be at least 6 characters long")]
    WeakPassword,

    #[error("password and confirmation do not match")]
    PasswordMismatch,

    #[error("user id '{0}' is already taken")]
    UserIdTaken(String),

    #[error("character name '{0}' is already taken")]
    CharacterNameTaken(String),

    #[error("no account with that user id")]
    UnknownUserId,

    #[error("password does not match")]
    WrongPassword,

    #[error("authentication required")]
    Unauthenticated,

    #[error("no permission to modify this resource")]
    Forbidden,

    #[error("character {0} not found")]
    CharacterNotFound(i32),

    #[error("item {0} not found")]
    ItemNotFound(i32),

    #[error("Config file not found. Run 'armory init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status classification for the client-facing response.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidUserId | Error::WeakPassword | Error::PasswordMismatch => {
                StatusCode::BAD_REQUEST
            }
            Error::UserIdTaken(_) | Error::CharacterNameTaken(_) => StatusCode::CONFLICT,
            Error::UnknownUserId | Error::WrongPassword | Error::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::CharacterNotFound(_) | Error::ItemNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store and config failures must not leak internals to the client.
        let message = if status.is_server_error() {
            tracing::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
