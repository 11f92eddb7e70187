//! `charter serve` command: HTTP API for the planner.
//!
//! Endpoints mirror the planner's one logical operation plus two
//! conveniences: `POST /generate-plan`, `GET /health`, `GET /models`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use charter_core::generator::Generator;
use charter_core::{PlanError, PlanRequest, Planner};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    error: String,
    details: String,
    raw_response: Option<String>,
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::MissingGoal => Self {
                status: StatusCode::BAD_REQUEST,
                error: "Goal is required".to_string(),
                details: "Please provide a goal".to_string(),
                raw_response: None,
            },
            PlanError::MalformedResponse { details, raw } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Failed to parse LLM response as JSON".to_string(),
                details,
                raw_response: raw,
            },
            PlanError::GenerationFailure { details } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Failed to generate plan".to_string(),
                details,
                raw_response: None,
            },
        }
    }
}

impl AppError {
    fn internal(error: impl Into<String>, err: &anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            details: format!("{err:#}"),
            raw_response: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let mut body = serde_json::json!({
            "error": self.error,
            "details": self.details,
        });
        if let Some(raw) = self.raw_response {
            body["raw_response"] = serde_json::Value::String(raw);
        }
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub constraints: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub current: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(planner: Arc<Planner>) -> Router {
    Router::new()
        .route("/generate-plan", post(generate_plan))
        .route("/health", get(health))
        .route("/models", get(list_models))
        .layer(CorsLayer::permissive())
        .with_state(planner)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(planner: Arc<Planner>, bind: &str, port: u16) -> Result<()> {
    let app = build_router(planner);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("charter serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("charter serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn generate_plan(
    State(planner): State<Arc<Planner>>,
    Json(body): Json<GenerateBody>,
) -> Result<axum::response::Response, AppError> {
    let goal = match body.goal {
        Some(goal) if !goal.trim().is_empty() => goal,
        _ => return Err(PlanError::MissingGoal.into()),
    };

    let request = PlanRequest {
        goal,
        deadline: body.deadline,
        constraints: body.constraints.unwrap_or_default(),
    };

    let plan = planner.generate_plan(&request).await?;
    Ok(Json(plan).into_response())
}

async fn health(State(planner): State<Arc<Planner>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: planner.model().to_string(),
    })
}

async fn list_models(
    State(planner): State<Arc<Planner>>,
) -> Result<axum::response::Response, AppError> {
    let models = planner
        .generator()
        .list_models()
        .await
        .map_err(|e| AppError::internal("Failed to list models", &e))?;

    Ok(Json(ModelsResponse {
        models,
        current: planner.model().to_string(),
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
