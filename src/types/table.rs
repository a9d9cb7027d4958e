//! Declares the two tables of the observation dataset and the typed columns
//! each of them is expected to carry.

use polars::prelude::DataType;
use std::fmt;

pub(crate) const COL_STATION: &str = "station";
pub(crate) const COL_DATE: &str = "date";
pub(crate) const COL_PRCP: &str = "prcp"; // Precipitation
pub(crate) const COL_TOBS: &str = "tobs"; // Observed temperature
pub(crate) const COL_NAME: &str = "name";
pub(crate) const COL_LATITUDE: &str = "latitude";
pub(crate) const COL_LONGITUDE: &str = "longitude";
pub(crate) const COL_ELEVATION: &str = "elevation";

/// One of the read-only tables making up the climate dataset.
///
/// The column layout of each table is fixed at compile time. Source files may
/// carry extra columns, but every column listed by [`Table::columns`] must be
/// present, and it is cast to the declared [`DataType`] when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Daily per-station readings: `station`, `date`, `prcp`, `tobs`.
    Measurement,
    /// Station metadata: `station`, `name`, `latitude`, `longitude`, `elevation`.
    Station,
}

impl Table {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Table::Measurement => "measurement",
            Table::Station => "station",
        }
    }

    pub(crate) fn cache_file_prefix(&self) -> String {
        format!("{}-", self.name())
    }

    /// Declared columns, in output order, with the type each is cast to.
    ///
    /// `date` stays a string: window filters compare it lexicographically so
    /// that unvalidated request input behaves exactly like a text comparison.
    pub(crate) fn columns(&self) -> Vec<(&'static str, DataType)> {
        match self {
            Table::Measurement => vec![
                (COL_STATION, DataType::String),
                (COL_DATE, DataType::String),
                (COL_PRCP, DataType::Float64),
                (COL_TOBS, DataType::Float64),
            ],
            Table::Station => vec![
                (COL_STATION, DataType::String),
                (COL_NAME, DataType::String),
                (COL_LATITUDE, DataType::Float64),
                (COL_LONGITUDE, DataType::Float64),
                (COL_ELEVATION, DataType::Float64),
            ],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
