/// A single daily reading from the `measurement` table.
#[derive(Debug, PartialEq, Clone)]
pub struct Measurement {
    pub station: String,    // station
    pub date: String,       // date, ISO "YYYY-MM-DD"
    pub prcp: Option<f64>,  // prcp (may be missing)
    pub tobs: f64,          // tobs
}

impl Measurement {
    pub fn new(station: impl Into<String>, date: impl Into<String>, tobs: f64) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp: None,
            tobs,
        }
    }

    pub fn with_prcp(mut self, prcp: f64) -> Self {
        self.prcp = Some(prcp);
        self
    }
}
