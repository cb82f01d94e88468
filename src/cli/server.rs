//! HTTP server for the OAuth authorization flow
//!
//! `/initiate` redirects to the consent screen, `/oauth/callback` exchanges
//! the returned code for a token bundle.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::OAuthClient;
use crate::error::{Error, Result};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub oauth: OAuthClient,
}

/// App state shared across handlers
#[derive(Debug, Clone)]
struct AppState {
    config: ServerConfig,
}

/// Query of the OAuth redirect
#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Routes of the OAuth server
pub fn router(config: ServerConfig) -> Router {
    let state = AppState { config };

    Router::new()
        .route("/health", get(health))
        .route("/initiate", get(initiate))
        .route("/oauth/callback", get(callback))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting OAuth server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Redirect to the consent screen
async fn initiate(State(state): State<Arc<AppState>>) -> Response {
    match state.config.oauth.authorize_url() {
        Ok(url) => Redirect::temporary(url.as_str()).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

/// Exchange the authorization code
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if let Some(error) = query.error {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format!("Authorization denied: {error}"))),
        )
            .into_response();
    }

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Missing code parameter")),
        )
            .into_response();
    };

    match state.config.oauth.exchange_code(&code).await {
        Ok(credentials) => {
            tracing::info!(
                location_id = credentials.location_id.as_deref().unwrap_or(""),
                "Authorization code exchanged"
            );
            Json(ApiResponse::success(credentials)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Code exchange failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response()
        }
    }
}
