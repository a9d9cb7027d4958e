//! This module provides the read-only handle over the climate dataset.
//! It loads the `measurement` and `station` tables once and answers the
//! fixed-shape window and aggregate queries served by the HTTP layer.

use crate::dataset::data_loader::{normalize_frame, DatasetLoader};
use crate::dataset::error::StoreError;
use crate::dataset::extractor::extract_stations;
use crate::error::ClimateError;
use crate::frames::measurement_frame::MeasurementLazyFrame;
use crate::types::measurement::Measurement;
use crate::types::records::{
    PrecipitationRecord, StationRecord, TemperatureObservation, TemperatureSummary,
};
use crate::types::station::Station;
use crate::types::table::{
    Table, COL_DATE, COL_ELEVATION, COL_LATITUDE, COL_LONGITUDE, COL_NAME, COL_PRCP, COL_STATION,
    COL_TOBS,
};
use crate::types::window::DateWindow;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use log::info;
use polars::prelude::{col, Column, DataFrame, IntoLazy, LazyFrame};
use std::path::PathBuf;

/// Default location of the measurement table.
pub const DEFAULT_MEASUREMENTS_PATH: &str = "Resources/hawaii_measurements.csv";
/// Default location of the station table.
pub const DEFAULT_STATIONS_PATH: &str = "Resources/hawaii_stations.csv";

/// The read-only climate dataset.
///
/// Both tables live in memory for the lifetime of the store. Queries never
/// mutate it, so a single instance (usually behind an `Arc`) serves every
/// request concurrently.
///
/// Create one with [`ClimateStore::open()`] to load CSV files, or with
/// [`ClimateStore::from_rows()`] for an in-memory dataset.
///
/// # Examples
///
/// ```rust
/// use climate_api::{ClimateStore, Measurement, Station};
///
/// let store = ClimateStore::from_rows(
///     &[
///         Measurement::new("USC1", "2017-08-20", 75.0),
///         Measurement::new("USC1", "2017-08-22", 79.0),
///     ],
///     &[Station::new("USC1", "Waikiki")],
/// )?;
///
/// let summary = store.summary_between("2017-08-20", "2017-08-22")?;
/// assert_eq!(summary.avg, Some(77.0));
/// # Ok::<(), climate_api::ClimateError>(())
/// ```
#[derive(Clone)]
pub struct ClimateStore {
    measurements: MeasurementLazyFrame,
    stations: LazyFrame,
}

#[bon]
impl ClimateStore {
    /// Loads the dataset from CSV files.
    ///
    /// Parsed tables are cached as parquet in `cache_dir` (default: the
    /// platform cache directory, e.g. `~/.cache/climate_api_cache` on Linux).
    ///
    /// # Arguments
    ///
    /// * `.measurements(path)`: Optional. Measurement CSV, defaults to [`DEFAULT_MEASUREMENTS_PATH`].
    /// * `.stations(path)`: Optional. Station CSV, defaults to [`DEFAULT_STATIONS_PATH`].
    /// * `.cache_dir(path)`: Optional. Directory for the parquet cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::CacheDirResolution`] or [`ClimateError::CacheDirCreation`]
    /// when the cache directory is unusable, and [`ClimateError::Store`] when a
    /// source file is missing, unreadable, or lacks a declared column.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use climate_api::{ClimateStore, ClimateError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ClimateError> {
    /// let store = ClimateStore::open()
    ///     .measurements("data/measurements.csv")
    ///     .stations("data/stations.csv")
    ///     .call()
    ///     .await?;
    /// println!("{} stations", store.stations()?.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn open(
        #[builder(into)] measurements: Option<PathBuf>,
        #[builder(into)] stations: Option<PathBuf>,
        #[builder(into)] cache_dir: Option<PathBuf>,
    ) -> Result<Self, ClimateError> {
        let measurements =
            measurements.unwrap_or_else(|| PathBuf::from(DEFAULT_MEASUREMENTS_PATH));
        let stations = stations.unwrap_or_else(|| PathBuf::from(DEFAULT_STATIONS_PATH));
        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => get_cache_dir()?,
        };
        ensure_cache_dir_exists(&cache_dir).await?;

        let loader = DatasetLoader::new(&cache_dir);
        let measurement_df = loader.load(Table::Measurement, &measurements).await?;
        let station_df = loader.load(Table::Station, &stations).await?;

        info!(
            "Loaded {} measurements from {:?} and {} stations from {:?}",
            measurement_df.height(),
            measurements,
            station_df.height(),
            stations
        );
        Ok(Self::from_frames(measurement_df, station_df))
    }
}

impl ClimateStore {
    /// Wraps already-normalized tables.
    fn from_frames(measurements: DataFrame, stations: DataFrame) -> Self {
        Self {
            measurements: MeasurementLazyFrame::new(measurements.lazy()),
            stations: stations.lazy(),
        }
    }

    /// Builds a store from typed rows, keeping their order.
    pub fn from_rows(
        measurements: &[Measurement],
        stations: &[Station],
    ) -> Result<Self, ClimateError> {
        let measurement_df = DataFrame::new(vec![
            Column::new(
                COL_STATION.into(),
                measurements.iter().map(|m| m.station.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_DATE.into(),
                measurements.iter().map(|m| m.date.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_PRCP.into(),
                measurements.iter().map(|m| m.prcp).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_TOBS.into(),
                measurements.iter().map(|m| m.tobs).collect::<Vec<_>>(),
            ),
        ])
        .map_err(StoreError::from)?;

        let station_df = DataFrame::new(vec![
            Column::new(
                COL_STATION.into(),
                stations.iter().map(|s| s.station.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_NAME.into(),
                stations.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_LATITUDE.into(),
                stations.iter().map(|s| s.latitude).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_LONGITUDE.into(),
                stations.iter().map(|s| s.longitude).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_ELEVATION.into(),
                stations.iter().map(|s| s.elevation).collect::<Vec<_>>(),
            ),
        ])
        .map_err(StoreError::from)?;

        Ok(Self::from_frames(
            normalize_frame(Table::Measurement, &measurement_df)?,
            normalize_frame(Table::Station, &station_df)?,
        ))
    }

    /// Precipitation readings of the trailing year before the anchor date,
    /// one `{date: prcp}` record per row.
    pub fn precipitation(&self) -> Result<Vec<PrecipitationRecord>, ClimateError> {
        Ok(self
            .measurements
            .get_window(&DateWindow::trailing_year())
            .precipitation()?)
    }

    /// Every station identifier, in storage order.
    pub fn stations(&self) -> Result<Vec<StationRecord>, ClimateError> {
        let df = self
            .stations
            .clone()
            .select([col(COL_STATION)])
            .collect()
            .map_err(StoreError::from)?;
        Ok(extract_stations(&df)?)
    }

    /// Temperature observations of the trailing year before the anchor date.
    pub fn observations(&self) -> Result<Vec<TemperatureObservation>, ClimateError> {
        Ok(self
            .measurements
            .get_window(&DateWindow::trailing_year())
            .observations()?)
    }

    /// TMIN/TAVG/TMAX of every reading with `date >= start`.
    ///
    /// `start` is compared as text and never validated.
    pub fn summary_since(&self, start: &str) -> Result<TemperatureSummary, ClimateError> {
        Ok(self.measurements.get_since(start).summary()?)
    }

    /// TMIN/TAVG/TMAX of every reading with `start <= date <= end`.
    pub fn summary_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureSummary, ClimateError> {
        Ok(self.measurements.get_range(start, end).summary()?)
    }
}
