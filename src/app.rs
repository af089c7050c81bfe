use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::catalog::{CatalogApi, CatalogClient, CatalogError, Discovery};
use crate::config::Config;
use crate::models::{Episode, MediaType, Show};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogApi>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let catalog: Arc<dyn CatalogApi> = Arc::new(CatalogClient::new(config.api_key)?);
    let state = AppState { catalog };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 4170));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trending", get(trending))
        .route("/movies", get(movies))
        .route("/tv", get(tv_shows))
        .route("/anime", get(anime))
        .route("/search", get(search))
        .route("/shows/:media_type/:id", get(show_details))
        .route("/tv/:id/season/:season_number", get(season_episodes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Maps catalog failures onto facade responses: unknown ids stay 404,
/// everything else is the upstream's fault and becomes 502.
struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_GATEWAY
        };
        error!("catalog request failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn trending(State(state): State<AppState>) -> Result<Json<Vec<Show>>, ApiError> {
    Ok(Json(state.catalog.fetch_trending().await?))
}

async fn movies(State(state): State<AppState>) -> Result<Json<Discovery>, ApiError> {
    Ok(Json(state.catalog.fetch_movies().await?))
}

async fn tv_shows(State(state): State<AppState>) -> Result<Json<Discovery>, ApiError> {
    Ok(Json(state.catalog.fetch_tv_shows().await?))
}

async fn anime(State(state): State<AppState>) -> Result<Json<Discovery>, ApiError> {
    Ok(Json(state.catalog.fetch_anime().await?))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Show>>, ApiError> {
    let query = params.q.trim();
    if query.is_empty() {
        // The UI never issues a blank search; keep that contract here
        // instead of bothering the upstream.
        return Ok(Json(Vec::new()));
    }
    Ok(Json(state.catalog.search_shows(query).await?))
}

async fn show_details(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(MediaType, i32)>,
) -> Result<Json<Show>, ApiError> {
    Ok(Json(state.catalog.fetch_show_details(media_type, id).await?))
}

async fn season_episodes(
    State(state): State<AppState>,
    Path((id, season_number)): Path<(i32, i32)>,
) -> Result<Json<Vec<Episode>>, ApiError> {
    Ok(Json(
        state.catalog.fetch_season_episodes(id, season_number).await?,
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
