use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    app_state::AppState,
    pipeline::{self, Analysis},
};

// --- Payloads y Respuestas de la API ---

#[derive(Deserialize)]
pub struct AnalyzePayload {
    #[serde(default)]
    medicines: String,
    #[serde(default)]
    foods: String,
}

#[derive(Serialize)]
pub struct DatasetStatus {
    dataset_path: String,
    records: usize,
    loaded_at: DateTime<Utc>,
}

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/api/status", get(status_handler))
        .route("/api/shutdown", post(shutdown_handler))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePayload>,
) -> Json<Analysis> {
    // Una entrada vacía no es un error: el análisis la devuelve como `no_match`.
    Json(pipeline::analyze(&state.store, &payload.medicines, &payload.foods))
}

#[axum::debug_handler]
async fn status_handler(State(state): State<AppState>) -> Json<DatasetStatus> {
    Json(DatasetStatus {
        dataset_path: state.config.dataset_path.display().to_string(),
        records: state.store.len(),
        loaded_at: state.store.loaded_at(),
    })
}

// --- Handler de Apagado ---

#[axum::debug_handler]
async fn shutdown_handler(
    State(state): State<AppState>,
) -> impl IntoResponse {
    info!("Petición de apagado recibida.");
    let sender = state
        .shutdown_sender
        .lock()
        .ok()
        .and_then(|mut guard| guard.take());
    if let Some(sender) = sender {
        let _ = sender.send(());
    }
    StatusCode::OK
}
