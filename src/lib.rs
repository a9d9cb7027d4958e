mod api;
mod climate_store;
mod config;
mod dataset;
mod error;
mod filtering;
mod frames;
mod logging;
mod types;
mod utils;

pub use climate_store::*;
pub use error::ClimateError;

pub use api::routes::{create_router, route_catalog, AppState, Endpoint};
pub use api::server::HttpServer;
pub use config::ServerConfig;
pub use logging::{init_logging, LogFormat};

pub use dataset::error::StoreError;
pub use filtering::{window_predicate, ObservationFrameFilterExt};
pub use frames::measurement_frame::MeasurementLazyFrame;

pub use types::measurement::Measurement;
pub use types::records::{
    PrecipitationRecord, StationRecord, TemperatureObservation, TemperatureSummary,
};
pub use types::station::Station;
pub use types::table::Table;
pub use types::window::{DateWindow, ANCHOR_DATE, TRAILING_WINDOW_DAYS};
