//! Station metadata as stored in the `station` table.

/// A weather station of the dataset.
///
/// Only [`Station::station`] is exposed over HTTP; the remaining fields are
/// loaded so the table keeps its full declared shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station identifier (e.g. "USC00519397").
    pub station: String,
    /// Human readable station name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Elevation above sea level.
    pub elevation: f64,
}

impl Station {
    pub fn new(station: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            name: name.into(),
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64, elevation: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self.elevation = elevation;
        self
    }
}
