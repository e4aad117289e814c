//! HTTP surface.
//!
//! | route               | purpose                                  |
//! |---------------------|------------------------------------------|
//! | `GET /`             | empty page                               |
//! | `POST /`            | form submit, page with result or warning |
//! | `POST /api/analyze` | JSON in, JSON out                        |
//! | `GET /healthz`      | liveness                                 |

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use tonal_core::{Analysis, AnalyzeError, SentimentPipeline};
use tonal_types::{Severity, Variant};

use crate::presenter::{render_page, Outcome};

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<SentimentPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<SentimentPipeline>) -> Self {
        Self { pipeline }
    }

    fn variant(&self) -> Variant {
        self.pipeline.variant()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("variant", &self.variant())
            .finish()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/analyze", axum::routing::post(analyze_json))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct FormInput {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct ApiAnalysis {
    #[serde(flatten)]
    analysis: Analysis,
    severity: Severity,
}

#[derive(Debug, Serialize)]
struct ApiWarning {
    severity: Severity,
    warning: &'static str,
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(state.variant(), "", Outcome::Idle))
}

async fn submit(State(state): State<AppState>, Form(input): Form<FormInput>) -> Response {
    let variant = state.variant();
    let outcome = match state.pipeline.analyze(&input.text) {
        Ok(analysis) => Outcome::Labeled(analysis.label),
        Err(AnalyzeError::Input(_)) => Outcome::Warning(variant.empty_input_warning()),
        Err(err @ AnalyzeError::Backend(_)) => return backend_unavailable(err),
    };
    Html(render_page(variant, &input.text, outcome)).into_response()
}

async fn analyze_json(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let text = body.get("text").unwrap_or(&Value::Null);
    match state.pipeline.analyze_raw(text) {
        Ok(analysis) => {
            let severity = analysis.label.severity();
            Json(ApiAnalysis { analysis, severity }).into_response()
        }
        Err(AnalyzeError::Input(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiWarning {
                severity: Severity::Warning,
                warning: state.variant().empty_input_warning(),
            }),
        )
            .into_response(),
        Err(err @ AnalyzeError::Backend(_)) => backend_unavailable(err),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

fn backend_unavailable(err: AnalyzeError) -> Response {
    error!(error = %err, "analysis failed");
    (StatusCode::SERVICE_UNAVAILABLE, "scoring backend unavailable").into_response()
}
