use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::data::{Catalog, GenerateRequest, GeneratedTimetable, ValidationReport};
use crate::error::{GenerationError, Result};
use crate::{solver, validation};

#[derive(Debug, Clone)]
struct AppState {
    default_actor: Arc<str>,
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> std::result::Result<Json<GeneratedTimetable>, (StatusCode, String)> {
    match solver::solve(&input, &state.default_actor) {
        Ok(output) => Ok(Json(output)),
        Err(e @ GenerationError::DivisionNotFound(_)) => Err((StatusCode::NOT_FOUND, e.to_string())),
        Err(e @ GenerationError::NoSubjects(_)) => {
            Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}

async fn validate_handler(Json(catalog): Json<Catalog>) -> Json<ValidationReport> {
    Json(validation::report(&catalog))
}

async fn health_handler() -> &'static str {
    "ok"
}

pub fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        default_actor: Arc::from(config.default_actor.as_str()),
    };
    Router::new()
        .route("/v1/timetable/generate", post(generate_handler))
        .route("/v1/catalog/validate", post(validate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
