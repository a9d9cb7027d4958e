use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use log::debug;
use serde::Serialize;

use super::routes::{route_catalog, AppState};
use crate::climate_store::ClimateStore;
use crate::error::ClimateError;
use crate::types::records::{
    PrecipitationRecord, StationRecord, TemperatureObservation, TemperatureSummary,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Runs a store query on the blocking pool; Polars collection is CPU-bound.
async fn run_query<T, F>(store: AppState, query: F) -> Result<T, ClimateError>
where
    T: Send + 'static,
    F: FnOnce(&ClimateStore) -> Result<T, ClimateError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || query(store.as_ref())).await?
}

pub async fn home() -> Html<String> {
    Html(route_catalog())
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn precipitations(
    State(store): State<AppState>,
) -> Result<Json<Vec<PrecipitationRecord>>, ClimateError> {
    let records = run_query(store, ClimateStore::precipitation).await?;
    debug!("precipitations: {} records", records.len());
    Ok(Json(records))
}

pub async fn stations(
    State(store): State<AppState>,
) -> Result<Json<Vec<StationRecord>>, ClimateError> {
    let records = run_query(store, ClimateStore::stations).await?;
    Ok(Json(records))
}

pub async fn tobs(
    State(store): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, ClimateError> {
    let records = run_query(store, ClimateStore::observations).await?;
    debug!("tobs: {} records", records.len());
    Ok(Json(records))
}

pub async fn start_summary(
    State(store): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureSummary>>, ClimateError> {
    let summary = run_query(store, move |s| s.summary_since(&start)).await?;
    Ok(Json(vec![summary]))
}

pub async fn start_end_summary(
    State(store): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureSummary>>, ClimateError> {
    let summary = run_query(store, move |s| s.summary_between(&start, &end)).await?;
    Ok(Json(vec![summary]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"ok","version":"0.1.0"}"#);
    }

    #[tokio::test]
    async fn test_home_lists_routes() {
        let Html(body) = home().await;
        assert!(body.starts_with("Available Routes:"));
        assert!(body.contains("/api/v1.0/start_date/end_date"));
    }
}
