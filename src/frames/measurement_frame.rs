//! Contains the `MeasurementLazyFrame` structure for lazy window queries over
//! the `measurement` table.

use crate::dataset::error::StoreError;
use crate::dataset::extractor::{
    extract_observations, extract_precipitation, extract_summary, COL_TAVG, COL_TMAX, COL_TMIN,
};
use crate::filtering::ObservationFrameFilterExt;
use crate::types::records::{PrecipitationRecord, TemperatureObservation, TemperatureSummary};
use crate::types::table::{COL_DATE, COL_PRCP, COL_STATION, COL_TOBS};
use crate::types::window::DateWindow;
use polars::prelude::{col, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding measurement rows.
///
/// Filtering methods return a *new* frame and leave the receiver untouched, so a
/// single frame can be shared by every request. Nothing is computed until one
/// of the collecting methods (`precipitation`, `observations`, `summary`) runs.
///
/// # Errors
///
/// The collecting methods return [`StoreError`] when Polars fails to compute
/// the frame or a key column holds an unexpected null.
#[derive(Clone)]
pub struct MeasurementLazyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl MeasurementLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Keeps only the rows whose date lies inside `window`.
    pub fn get_window(&self, window: &DateWindow) -> MeasurementLazyFrame {
        MeasurementLazyFrame::new(self.frame.clone().filter_window(window))
    }

    /// Rows with `start <= date <= end`.
    pub fn get_range(&self, start: &str, end: &str) -> MeasurementLazyFrame {
        self.get_window(&DateWindow::between(start, end))
    }

    /// Rows with `date >= start`.
    pub fn get_since(&self, start: &str) -> MeasurementLazyFrame {
        self.get_window(&DateWindow::since(start))
    }

    /// Collects `{date: prcp}` records, one per row.
    pub fn precipitation(&self) -> Result<Vec<PrecipitationRecord>, StoreError> {
        let df = self
            .frame
            .clone()
            .select([col(COL_DATE), col(COL_PRCP)])
            .collect()?;
        extract_precipitation(&df)
    }

    /// Collects `{station, date, tobs}` records, one per row.
    pub fn observations(&self) -> Result<Vec<TemperatureObservation>, StoreError> {
        let df = self
            .frame
            .clone()
            .select([col(COL_STATION), col(COL_DATE), col(COL_TOBS)])
            .collect()?;
        extract_observations(&df)
    }

    /// Aggregates `tobs` into minimum, mean and maximum.
    ///
    /// An empty frame yields a summary whose fields are all `None`; the
    /// aggregation itself produces nulls, nothing here special-cases it.
    pub fn summary(&self) -> Result<TemperatureSummary, StoreError> {
        let df = self
            .frame
            .clone()
            .select([
                col(COL_TOBS).min().alias(COL_TMIN),
                col(COL_TOBS).mean().alias(COL_TAVG),
                col(COL_TOBS).max().alias(COL_TMAX),
            ])
            .collect()?;
        extract_summary(&df)
    }
}
