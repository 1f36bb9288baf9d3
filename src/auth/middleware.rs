//! Authentication middleware
//!
//! Each protected request goes through the same chain: extract the bearer
//! token from the `authorization` cookie, verify its signature, resolve the
//! embedded user against the users table, and attach the identity to the
//! request extensions. Any failure short-circuits with 401 before the
//! handler runs. Nothing is cached across requests.

use crate::api::server::SharedState;
use crate::auth::token;
use crate::db;
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// Cookie carrying the bearer token
pub const AUTH_COOKIE: &str = "authorization";

const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved from a valid bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_code: i32,
    pub user_id: String,
}

/// Viewer identity for routes readable without signing in
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<CurrentUser>);

impl Viewer {
    pub fn user_code(&self) -> Option<i32> {
        self.0.as_ref().map(|u| u.user_code)
    }
}

/// Extract the bearer token from the request's cookies
pub fn bearer_token(req: &Request) -> Option<&str> {
    let cookies = req.headers().get(header::COOKIE)?.to_str().ok()?;

    cookies
        .split(';')
        .find_map(|cookie| cookie.trim().strip_prefix(AUTH_COOKIE)?.strip_prefix('='))
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Format the Set-Cookie value delivered at sign-in
pub fn auth_cookie(token: &str) -> String {
    format!("{}={}{}", AUTH_COOKIE, BEARER_PREFIX, token)
}

/// Run the full extract-validate-resolve chain for a request
async fn resolve_identity(state: &SharedState, token: &str) -> Result<CurrentUser> {
    let claims = token::validate(token, state.config.auth.token_secret.as_bytes())
        .map_err(|_| Error::Unauthenticated)?;

    // The token may outlive the account; an unknown user_code is no identity.
    let user = db::users::find_by_code(&state.pool, claims.user_code)
        .await?
        .ok_or(Error::Unauthenticated)?;

    Ok(CurrentUser {
        user_code: user.user_code,
        user_id: user.user_id,
    })
}

/// Middleware for routes that require a signed-in user
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let token = bearer_token(&req).ok_or(Error::Unauthenticated)?;
    let user = resolve_identity(&state, token).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Middleware for routes viewable by anyone; attaches the identity when a
/// valid token is present and an anonymous viewer otherwise
pub async fn optional_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let viewer = match bearer_token(&req) {
        Some(token) => match resolve_identity(&state, token).await {
            Ok(user) => Viewer(Some(user)),
            Err(_) => Viewer(None),
        },
        None => Viewer(None),
    };
    req.extensions_mut().insert(viewer);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_cookie(cookie: &str) -> Request {
        axum::http::Request::builder()
            .method("GET")
            .uri("/")
            .header(header::COOKIE, cookie)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[test]
    fn test_bearer_token_from_cookie() {
        let req = request_with_cookie("authorization=Bearer abc.def.ghi");
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_among_other_cookies() {
        let req = request_with_cookie("theme=dark; authorization=Bearer tok; lang=en");
        assert_eq!(bearer_token(&req), Some("tok"));
    }

    #[test]
    fn test_missing_cookie_yields_none() {
        let req = axum::http::Request::builder()
            .method("GET")
            .uri("/")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_missing_bearer_prefix_yields_none() {
        let req = request_with_cookie("authorization=abc.def.ghi");
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_other_cookie_names_ignored() {
        let req = request_with_cookie("auth=Bearer tok");
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_cookie_round_trips_through_extractor() {
        let cookie = auth_cookie("abc.def.ghi");
        let req = request_with_cookie(&cookie);
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_viewer_user_code() {
        let anonymous = Viewer(None);
        assert_eq!(anonymous.user_code(), None);

        let signed_in = Viewer(Some(CurrentUser {
            user_code: 7,
            user_id: "alice1".to_string(),
        }));
        assert_eq!(signed_in.user_code(), Some(7));
    }
}
