//! JSON records produced by the query endpoints.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One precipitation reading, serialized as a single-key object
/// `{ "<date>": <prcp or null> }`.
///
/// Readings that share a date are never merged; each row of the window
/// becomes its own record.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationRecord {
    pub date: String,
    pub prcp: Option<f64>,
}

impl Serialize for PrecipitationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.prcp)?;
        map.end()
    }
}

/// `{"station": <id>}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub station: String,
}

/// A temperature observation within the trailing-year window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    pub station: String,
    pub date: String,
    pub tobs: Option<f64>,
}

/// Minimum, mean and maximum of `tobs` over a date window.
///
/// All three fields are `None` (serialized as `null`) when the window
/// contains no readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}
