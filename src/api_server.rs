// Axum API Server Module
//
// Purpose: REST API over the ranking pipeline and the analysis store
// Scoring runs on the blocking pool (Rayon for large batches); stored analyses
// are served from a Moka cache once fetched.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::data::parse_inventory_csv;
use crate::error::StoreError;
use crate::scorer::process;
use crate::storage::{AnalysisStore, InMemoryStore, JsonFileStore};
use crate::summary::summarize;
use crate::types::{InventoryRecord, Thresholds};

// ============================================================================
// Application State
// ============================================================================

/// Request body budget per inventory item (a JSON item is ~210 bytes)
pub const BODY_BYTES_PER_ITEM: usize = 1024;

/// Floor for the request body limit
pub const MIN_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnalysisStore>,
    /// Analysis id → `GET /api/analyses/:id` response body
    pub cache: Cache<String, serde_json::Value>,
    pub max_items: usize,
    /// Largest accepted request body in bytes
    pub body_limit: usize,
}

impl AppState {
    /// Build state from configuration: JSON file store when `DATA_DIR` is set, memory otherwise
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn AnalysisStore> = match &config.data_dir {
            Some(dir) => {
                tracing::info!("Using JSON analysis store at {}", dir.display());
                Arc::new(JsonFileStore::open(dir)?)
            }
            None => {
                tracing::info!("Using in-memory analysis store");
                Arc::new(InMemoryStore::new())
            }
        };
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: Arc<dyn AnalysisStore>, config: &ServerConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            store,
            cache,
            max_items: config.max_items,
            body_limit: body_limit_for(config.max_items),
        }
    }
}

/// Body limit large enough for a batch of `max_items`
pub fn body_limit_for(max_items: usize) -> usize {
    max_items.saturating_mul(BODY_BYTES_PER_ITEM).max(MIN_BODY_LIMIT)
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Analyses
        .route("/api/analyses", post(create_analysis).get(list_analyses))
        .route("/api/analyses/csv", post(create_analysis_from_csv))
        .route("/api/analyses/:id", get(get_analysis))

        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub data: Vec<InventoryRecord>,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CsvThresholdParams {
    pub a: Option<f64>,
    pub b: Option<f64>,
}

impl CsvThresholdParams {
    fn thresholds(&self) -> Thresholds {
        let default = Thresholds::default();
        Thresholds::new(self.a.unwrap_or(default.a), self.b.unwrap_or(default.b))
    }
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn create_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let thresholds = payload.thresholds.unwrap_or_default();
    run_analysis(state, payload.data, thresholds).await
}

async fn create_analysis_from_csv(
    State(state): State<AppState>,
    Query(params): Query<CsvThresholdParams>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let thresholds = params.thresholds();
    thresholds.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let items = tokio::task::spawn_blocking(move || parse_inventory_csv(&body))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::BadRequest(format!("Invalid CSV: {:#}", e)))?;

    run_analysis(state, items, thresholds).await
}

/// Validate, score on the blocking pool, store, respond
async fn run_analysis(
    state: AppState,
    items: Vec<InventoryRecord>,
    thresholds: Thresholds,
) -> Result<Json<serde_json::Value>, AppError> {
    // Reject before any pipeline work starts
    thresholds.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;
    if items.len() > state.max_items {
        return Err(AppError::BadRequest(format!(
            "Batch of {} items exceeds the limit of {}",
            items.len(),
            state.max_items
        )));
    }

    tracing::info!("Analyzing {} items (A={}, B={})", items.len(), thresholds.a, thresholds.b);

    let store = state.store.clone();
    let (result, stored) = tokio::task::spawn_blocking(move || {
        let result = process(&items, thresholds);
        let stored = store.save(thresholds, &result);
        (result, stored)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;
    let stored = stored?;

    tracing::info!("Stored analysis {}", stored.id());

    Ok(Json(serde_json::json!({
        "success": true,
        "analysisId": stored.header.id,
        "processedItems": result.scored,
        "crispWeights": result.crisp_weights,
        "fuzzyWeights": result.fuzzy_weights,
        "totalItems": result.len(),
        "summary": summarize(&result),
    })))
}

async fn list_analyses(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = state.store.clone();
    let analyses = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(serde_json::json!({
        "success": true,
        "analyses": analyses,
    })))
}

async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(cached) = state.cache.get(&id).await {
        tracing::debug!("Cache hit for analysis {}", id);
        return Ok(Json(cached));
    }

    let store = state.store.clone();
    let lookup_id = id.clone();
    let analysis = tokio::task::spawn_blocking(move || store.get(&lookup_id))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let response = serde_json::json!({
        "success": true,
        "analysis": analysis.header,
        "items": analysis.items,
    });
    state.cache.insert(id, response.clone()).await;

    Ok(Json(response))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::InvalidId(_) => AppError::BadRequest(err.to_string()),
            other => {
                tracing::error!("Storage failure: {}", other);
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_params_default_thresholds() {
        let params = CsvThresholdParams::default();
        assert_eq!(params.thresholds(), Thresholds::default());

        let params = CsvThresholdParams { a: Some(10.0), b: None };
        assert_eq!(params.thresholds(), Thresholds::new(10.0, 50.0));
    }

    #[test]
    fn test_body_limit_scales_with_max_items() {
        assert_eq!(body_limit_for(0), MIN_BODY_LIMIT);
        assert_eq!(body_limit_for(100_000), 100_000 * BODY_BYTES_PER_ITEM);
        assert_eq!(body_limit_for(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_store_errors_map_to_status() {
        let not_found: AppError = StoreError::NotFound("x".into()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let invalid: AppError = StoreError::InvalidId("x".into()).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
