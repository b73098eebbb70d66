// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP surface of the bot.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rota_api::{
    Action, ActionOutcome, ApiError, ListRotasResponse, RotaCommands, RotaDetails, dispatch,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{error, info};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The command handlers, backed by the configured store and notifier.
    pub commands: Arc<RotaCommands>,
}

/// Query parameters for listing rotas.
#[derive(Debug, Deserialize)]
pub struct ListRotasQuery {
    /// The channel to list.
    pub channel_id: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is serving.
    pub status: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::PreconditionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RotaNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.user_message(),
        }
    }
}

/// Handler for POST `/actions`.
///
/// Routes an interaction through the dispatch table. Rejections have already
/// been shown to the acting user by the time the error response is built.
async fn handle_action(
    AxumState(app_state): AxumState<AppState>,
    Json(action): Json<Action>,
) -> Result<Json<ActionOutcome>, HttpError> {
    info!(action = action.action_id(), "Handling action");

    let outcome: ActionOutcome =
        dispatch(&app_state.commands, action, OffsetDateTime::now_utc()).await?;

    Ok(Json(outcome))
}

/// Handler for GET `/rotas`.
async fn handle_list_rotas(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListRotasQuery>,
) -> Result<Json<ListRotasResponse>, HttpError> {
    let rota_names: Vec<String> = app_state
        .commands
        .list_rota_names(&query.channel_id)
        .await
        .inspect_err(|e| {
            error!(channel_id = %query.channel_id, error = %e, "Failed to list rotas");
        })?;

    Ok(Json(ListRotasResponse {
        channel_id: query.channel_id,
        rota_names,
    }))
}

/// Handler for GET `/rotas/{channel_id}/{rota_name}`.
async fn handle_get_rota(
    AxumState(app_state): AxumState<AppState>,
    Path((channel_id, rota_name)): Path<(String, String)>,
) -> Result<Json<RotaDetails>, HttpError> {
    let details: RotaDetails = app_state
        .commands
        .get_rota_details(&channel_id, &rota_name, OffsetDateTime::now_utc())
        .await?;

    Ok(Json(details))
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/actions", post(handle_action))
        .route("/rotas", get(handle_list_rotas))
        .route("/rotas/{channel_id}/{rota_name}", get(handle_get_rota))
        .route("/health", get(handle_health))
        .with_state(app_state)
}
