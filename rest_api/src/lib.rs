// rest_api/src/lib.rs

use anyhow::{Context, Error as AnyhowError};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use models::{ParticipantRecord, TrialError, VasDataPoint};
use trial_lib::analytics::{vas_timeline, DatasetStats, VasPeriod};
use trial_lib::config::RestApiConfig;
use trial_lib::insights::{SummaryError, SummaryRequest, SummaryResponse, Summarizer, TrialInsightsService};
use trial_lib::query_engine::{filters_from_query, options_for, FilterField, FilterOptions};
use trial_lib::storage_engine::TrialStore;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    Storage(#[from] TrialError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RestApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "status": "error", "message": msg }),
            ),
            RestApiError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "error", "message": format!("Invalid input: {}", msg) }),
            ),
            RestApiError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "status": "error", "message": format!("Storage error: {}", e) }),
            ),
            RestApiError::Summary(e) => {
                let (status, message) = match &e {
                    SummaryError::PatientNotFound(_) => (StatusCode::NOT_FOUND, "Patient not found".to_string()),
                    SummaryError::Upstream(_) => {
                        (StatusCode::BAD_GATEWAY, "Summarization service failed".to_string())
                    }
                    SummaryError::EmptyOutput => {
                        (StatusCode::BAD_GATEWAY, "Summarization service returned no summary".to_string())
                    }
                    SummaryError::Storage(inner) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", inner))
                    }
                };
                (status, json!({ "status": "error", "message": message, "summary": e.to_string() }))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Shared state for the Axum application.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn TrialStore>,
    pub insights: Arc<TrialInsightsService>,
}

impl AppState {
    pub fn new(store: Arc<dyn TrialStore>, summarizer: Arc<dyn Summarizer>, max_records: usize) -> Self {
        let insights = TrialInsightsService::new(store.clone(), summarizer).with_max_records(max_records);
        AppState { store, insights: Arc::new(insights) }
    }
}

async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "REST API is healthy" })))
}

async fn version_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "version": API_VERSION, "api_level": 1 })))
}

// GET /api/v1/filters/:field
async fn filter_options_handler(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<FilterOptions>, RestApiError> {
    debug!("Listing filter options for {}", field);
    let field: FilterField = field
        .parse()
        .map_err(|_| RestApiError::NotFound(format!("Unknown filter field: {}", field)))?;
    let records = state.store.all_records().await?;
    Ok(Json(options_for(&records, field)))
}

// GET /api/v1/patients/:patient_id
async fn patient_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<ParticipantRecord>, RestApiError> {
    debug!("Fetching patient {}", patient_id);
    state
        .store
        .get_record(&patient_id)
        .await?
        .map(Json)
        .ok_or_else(|| RestApiError::NotFound("Patient not found".to_string()))
}

// GET /api/v1/patients/:patient_id/vas?period=
async fn vas_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<VasDataPoint>>, RestApiError> {
    let period = match params.get("period").map(|p| p.trim()).filter(|p| !p.is_empty()) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid VAS period {:?}", raw);
            VasPeriod::All
        }),
        None => VasPeriod::All,
    };
    debug!("Fetching VAS timeline for {} over {}", patient_id, period);

    let record = state
        .store
        .get_record(&patient_id)
        .await?
        .ok_or_else(|| RestApiError::NotFound("Patient not found".to_string()))?;
    Ok(Json(vas_timeline(&record, period)))
}

// GET /api/v1/trials
async fn trials_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<ParticipantRecord>>, RestApiError> {
    let filters = filters_from_query(&params);
    let records = state.store.query(&filters).await?;
    debug!("Query [{}] matched {} records", filters, records.len());
    Ok(Json(records))
}

// GET /api/v1/trials/stats
async fn stats_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<DatasetStats>, RestApiError> {
    let filters = filters_from_query(&params);
    let records = state.store.query(&filters).await?;
    debug!("Computing distributions for {} records", records.len());
    Ok(Json(DatasetStats::from_records(&records)))
}

// POST /api/v1/ai/summarize-insights
async fn summarize_insights_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SummaryResponse>, RestApiError> {
    let Json(body) = payload.map_err(|rejection| RestApiError::InvalidInput(rejection.body_text()))?;
    let request =
        SummaryRequest::from_json(&body).map_err(|e| RestApiError::InvalidInput(e.to_string()))?;
    debug!(
        "Summary requested (patient: {:?}, study: {:?})",
        request.patient_id, request.study_id
    );
    Ok(Json(state.insights.summarize(&request).await?))
}

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api/v1/health", get(health_check_handler))
        .route("/api/v1/version", get(version_handler))
        .route("/api/v1/filters/:field", get(filter_options_handler))
        .route("/api/v1/patients/:patient_id", get(patient_handler))
        .route("/api/v1/patients/:patient_id/vas", get(vas_handler))
        .route("/api/v1/trials", get(trials_handler))
        .route("/api/v1/trials/stats", get(stats_handler))
        .route("/api/v1/ai/summarize-insights", post(summarize_insights_handler))
        .with_state(state)
        .layer(cors)
}

/// Serves the API until ctrl-c or `shutdown_rx` fires.
pub async fn start_server(
    config: &RestApiConfig,
    state: AppState,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    info!("REST API server listening on {}", addr);

    let combined_shutdown_signal = async {
        tokio::select! {
            _ = shutdown_rx => {
                info!("Received external shutdown signal.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received ctrl-c, shutting down.");
            }
        }
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(combined_shutdown_signal)
        .await
        .context("REST API server failed to start or run")?;

    info!("REST API server stopped.");
    Ok(())
}
