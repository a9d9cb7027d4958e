//! The routing table.
//!
//! Every endpoint is listed once in [`Endpoint::ALL`]. The router and the
//! route catalog served at `/` are both built from that list, in order.

use axum::routing::{get, MethodRouter};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    health_handler, home, precipitations, start_end_summary, start_summary, stations, tobs,
};
use crate::climate_store::ClimateStore;

pub type AppState = Arc<ClimateStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Home,
    Precipitations,
    Stations,
    Tobs,
    StartSummary,
    StartEndSummary,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::Home,
        Endpoint::Precipitations,
        Endpoint::Stations,
        Endpoint::Tobs,
        Endpoint::StartSummary,
        Endpoint::StartEndSummary,
    ];

    /// Path pattern in router syntax.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Home => "/",
            Endpoint::Precipitations => "/api/v1.0/precipitations",
            Endpoint::Stations => "/api/v1.0/stations",
            Endpoint::Tobs => "/api/v1.0/tobs",
            Endpoint::StartSummary => "/api/v1.0/:start",
            Endpoint::StartEndSummary => "/api/v1.0/:start/:end",
        }
    }

    /// Path as shown in the route catalog, `None` for endpoints not listed there.
    pub fn catalog_path(&self) -> Option<&'static str> {
        match self {
            Endpoint::Home => None,
            Endpoint::Precipitations => Some("/api/v1.0/precipitations"),
            Endpoint::Stations => Some("/api/v1.0/stations"),
            Endpoint::Tobs => Some("/api/v1.0/tobs"),
            Endpoint::StartSummary => Some("/api/v1.0/start_date"),
            Endpoint::StartEndSummary => Some("/api/v1.0/start_date/end_date"),
        }
    }

    fn method_router(&self) -> MethodRouter<AppState> {
        match self {
            Endpoint::Home => get(home),
            Endpoint::Precipitations => get(precipitations),
            Endpoint::Stations => get(stations),
            Endpoint::Tobs => get(tobs),
            Endpoint::StartSummary => get(start_summary),
            Endpoint::StartEndSummary => get(start_end_summary),
        }
    }
}

/// Text served at `/`: the catalog paths joined by `<br/>`.
pub fn route_catalog() -> String {
    let mut catalog = String::from("Available Routes:");
    for path in Endpoint::ALL.iter().filter_map(Endpoint::catalog_path) {
        catalog.push_str("<br/>");
        catalog.push_str(path);
    }
    catalog
}

pub fn create_router(store: AppState) -> Router {
    let router = Endpoint::ALL
        .iter()
        .fold(Router::new(), |router, endpoint| {
            router.route(endpoint.path(), endpoint.method_router())
        })
        .route("/health", get(health_handler));

    router.layer(TraceLayer::new_for_http()).with_state(store)
}
