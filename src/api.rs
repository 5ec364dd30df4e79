use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use crate::config::PredictorConfig;
use crate::debug::anon_hash;
use crate::display::{format_price, success_message};
use crate::error::{PredictError, PredictResult};
use crate::features::{FeatureEncoder, FeatureRow, FEATURE_COLUMNS};
use crate::form::{FormSchema, RawRecord};
use crate::metrics;
use crate::model::{score_row, SharedScorer};

/// Shared, read-only state built once before serving.
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<FeatureEncoder>,
    pub model: SharedScorer,
    pub config: Arc<PredictorConfig>,
}

impl AppState {
    pub fn new(encoder: FeatureEncoder, model: SharedScorer, config: PredictorConfig) -> Self {
        Self {
            encoder: Arc::new(encoder),
            model,
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/form", get(form_schema))
        .route("/api/encode", post(encode))
        .route("/api/predict", post(predict))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn form_schema(State(state): State<AppState>) -> Json<FormSchema> {
    Json(FormSchema::new(state.encoder.tables()))
}

#[derive(Debug, Serialize)]
pub struct EncodeResp {
    pub columns: [&'static str; 10],
    pub row: FeatureRow,
}

async fn encode(
    State(state): State<AppState>,
    body: Result<Json<RawRecord>, JsonRejection>,
) -> PredictResult<Json<EncodeResp>> {
    let raw = read_body(body)?;
    let row = state.encoder.build_feature_row(&raw)?;
    Ok(Json(EncodeResp {
        columns: FEATURE_COLUMNS,
        row,
    }))
}

#[derive(Debug, Serialize)]
pub struct PredictResp {
    pub price: f64,
    pub formatted: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<[&'static str; 10]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<FeatureRow>,
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<RawRecord>, JsonRejection>,
) -> PredictResult<Json<PredictResp>> {
    let started = Instant::now();
    let out = run_prediction(&state, body);
    match &out {
        Ok(resp) => {
            let ms = started.elapsed().as_secs_f64() * 1000.0;
            metrics::record_success(ms);
            info!(target: "predict", price = resp.price, ms, "prediction served");
        }
        Err(e) => {
            metrics::record_error(e.kind());
            info!(target: "predict", kind = e.kind(), field = ?e.field(), "prediction rejected");
        }
    }
    out.map(Json)
}

/// collect → encode → score → format, for one submission.
pub fn run_prediction(
    state: &AppState,
    body: Result<Json<RawRecord>, JsonRejection>,
) -> PredictResult<PredictResp> {
    let raw = read_body(body)?;
    let id = anon_hash(&format!("{}|{}|{}", raw.month, raw.block, raw.street_name));
    tracing::debug!(target: "predict", %id, "submission received");

    let row = state.encoder.build_feature_row(&raw)?;
    let price = score_row(state.model.as_ref(), &row)?;

    let formatted = format_price(price, &state.config.currency);
    let echo = state.config.debug_echo;
    Ok(PredictResp {
        price,
        message: success_message(&formatted),
        formatted,
        columns: echo.then_some(FEATURE_COLUMNS),
        row: echo.then_some(row),
    })
}

fn read_body(body: Result<Json<RawRecord>, JsonRejection>) -> PredictResult<RawRecord> {
    body.map(|Json(raw)| raw)
        .map_err(|rej| PredictError::validation("body", rej.body_text()))
}
