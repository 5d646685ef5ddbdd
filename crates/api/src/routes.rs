use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use extract::Extractor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::{Cache, CacheStats};
use crate::config::AppConfig;
use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};
use crate::report::{AnalysisReport, EXAMPLE_TEXT};

pub struct AppState {
    pub extractor: Extractor<'static>,
    pub cache: Option<Cache>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            extractor: Extractor::with_config(config.builder),
            cache: config
                .cache
                .enabled
                .then(|| Cache::new(config.cache.max_entries)),
            metrics: Metrics::new(),
        }
    }
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    success: bool,
    #[serde(flatten)]
    report: AnalysisReport,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

#[derive(Serialize)]
struct ExampleResponse {
    text: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct StatsResponse {
    metrics: MetricsSnapshot,
    cache: Option<CacheStats>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check).post(health_check))
        .route("/example", get(get_example))
        .route("/analyze", post(analyze_text))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_example() -> Json<ExampleResponse> {
    Json(ExampleResponse { text: EXAMPLE_TEXT })
}

fn error_response(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn analyze_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            state.metrics.record_request(false);
            warn!(error = %rejection.body_text(), "Malformed analysis request");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    if let Some(report) = state.cache.as_ref().and_then(|c| c.get_report(&req.text)) {
        state.metrics.record_request(true);
        state.metrics.record_cache_hit();
        info!(chars = req.text.len(), "Served analysis from cache");
        return Json(AnalyzeResponse {
            success: true,
            report,
        })
        .into_response();
    }

    let timer = TimedOperation::start();
    match AnalysisReport::build(&state.extractor, &req.text) {
        Ok(report) => {
            state
                .metrics
                .record_analysis(timer.elapsed(), report.spans.len(), report.structure.len());
            state.metrics.record_request(true);

            if let Some(cache) = &state.cache {
                cache.set_report(&req.text, report.clone());
            }

            Json(AnalyzeResponse {
                success: true,
                report,
            })
            .into_response()
        }
        Err(e) => {
            state.metrics.record_request(false);
            warn!(error = %e, "Rejected analysis request");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        metrics: state.metrics.snapshot(),
        cache: state.cache.as_ref().map(Cache::stats),
    })
}
