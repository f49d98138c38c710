//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests to the tutor.
//! It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{Instrument, error, info_span, warn};
use tutor_core::{AskError, ValidationError};
use uuid::Uuid;

use crate::{
    models::{AnswerResponse, AskPayload, CurriculumResponse, ErrorResponse, HealthResponse},
    state::AppState,
};

/// Returned to callers when the completion service fails; the cause is only logged.
pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "Unable to reach the tutor service right now. Please try again later.";

pub const LIVENESS_MESSAGE: &str = "Board tutor API is running";

pub enum ApiError {
    BadRequest(String),
    Validation(ValidationError),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::message(message))).into_response()
            }
            ApiError::Validation(err) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&err))).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::message(UPSTREAM_FAILURE_MESSAGE)),
                )
                    .into_response()
            }
        }
    }
}

impl From<AskError> for ApiError {
    fn from(err: AskError) -> Self {
        match err {
            AskError::Validation(reason) => ApiError::Validation(reason),
            AskError::Upstream(cause) => ApiError::InternalServerError(cause.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Liveness probe returning a plain string.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = String))
)]
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Ask the tutor a question about a subject and chapter of the active board.
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskPayload,
    responses(
        (status = 200, description = "Answer generated", body = AnswerResponse),
        (status = 400, description = "Question, subject or chapter rejected", body = ErrorResponse),
        (status = 500, description = "Completion service unavailable", body = ErrorResponse)
    )
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskPayload>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed ask payload");
        ApiError::from(rejection)
    })?;

    let span = info_span!("ask_request", request_id = %Uuid::new_v4());
    let response = state.pipeline.ask(payload.into()).instrument(span).await?;
    Ok(Json(response.into()))
}

/// List the subjects and chapters of the active board.
#[utoipa::path(
    get,
    path = "/api/curriculum",
    responses((status = 200, description = "Active board curriculum", body = CurriculumResponse))
)]
pub async fn curriculum(State(state): State<Arc<AppState>>) -> Json<CurriculumResponse> {
    let pipeline = &state.pipeline;
    Json(CurriculumResponse::new(
        pipeline.board(),
        pipeline.policy(),
        pipeline.registry(),
    ))
}
