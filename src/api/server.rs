//! HTTP API server

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, SessionStore};
use crate::config::Config;
use crate::db;
use crate::error::Result;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub pool: sqlx::PgPool,
    pub sessions: SessionStore,
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let pool = db::connect(&config.database).await?;
    db::ensure_schema(&pool).await?;

    let sessions = SessionStore::new(pool.clone(), config.session.ttl_hours);
    sessions.ensure_schema().await?;
    spawn_session_purge(sessions.clone());

    let state = Arc::new(AppState {
        config,
        pool,
        sessions,
    });

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    // Owner-gated mutations: the auth middleware must resolve an identity
    // before the handler runs.
    let protected = Router::new()
        .route("/api/character", post(routes::create_character))
        .route(
            "/api/character/{character_code}",
            delete(routes::delete_character),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    // Readable by anyone; the viewer identity only widens the field set.
    let viewable = Router::new()
        .route("/api/character/{character_code}", get(routes::get_character))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_auth,
        ));

    let open = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/sign-up", post(routes::sign_up))
        .route("/api/sign-in", post(routes::sign_in))
        .route("/api/item", post(routes::create_item))
        .route("/api/item/{item_code}", put(routes::update_item))
        .route("/api/items", get(routes::list_items))
        .route("/api/items/{item_code}", get(routes::get_item));

    Router::new()
        .merge(protected)
        .merge(viewable)
        .merge(open)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Sweep expired sessions on an hourly tick
fn spawn_session_purge(sessions: SessionStore) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(3600));
        loop {
            tick.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::debug!("purged {} expired sessions", n),
                Err(e) => tracing::warn!("session purge failed: {}", e),
            }
        }
    });
}
