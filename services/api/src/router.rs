//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AnswerMetaBody, AnswerResponse, AskPayload, CurriculumResponse, ErrorResponse,
        HealthResponse, SubjectBody,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health,
        handlers::ask,
        handlers::curriculum,
    ),
    components(
        schemas(AskPayload, AnswerResponse, AnswerMetaBody, CurriculumResponse, SubjectBody, ErrorResponse, HealthResponse)
    ),
    tags(
        (name = "Board Tutor API", description = "Curriculum-aware question answering for school-board students")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/ask", post(handlers::ask))
        .route("/api/curriculum", get(handlers::curriculum))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}

