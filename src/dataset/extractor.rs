use crate::dataset::error::StoreError;
use crate::types::records::{
    PrecipitationRecord, StationRecord, TemperatureObservation, TemperatureSummary,
};
use crate::types::table::{Table, COL_DATE, COL_PRCP, COL_STATION, COL_TOBS};
use polars::prelude::*;

pub(crate) const COL_TMIN: &str = "TMIN";
pub(crate) const COL_TAVG: &str = "TAVG";
pub(crate) const COL_TMAX: &str = "TMAX";

/// Retrieves a column by name from a DataFrame.
fn get_column<'a>(df: &'a DataFrame, col: &str) -> Result<&'a Column, StoreError> {
    df.column(col)
        .map_err(|e| StoreError::ColumnNotFound(col.to_string(), e))
}

fn get_str<'a>(df: &'a DataFrame, col: &str) -> Result<&'a StringChunked, StoreError> {
    Ok(get_column(df, col)?.str()?)
}

fn get_f64<'a>(df: &'a DataFrame, col: &str) -> Result<&'a Float64Chunked, StoreError> {
    Ok(get_column(df, col)?.f64()?)
}

/// Key columns (`station`, `date`) must never be null.
fn required(table: Table, col: &str, value: Option<&str>) -> Result<String, StoreError> {
    value
        .map(str::to_string)
        .ok_or_else(|| StoreError::UnexpectedData {
            table,
            message: format!("null value in key column '{}'", col),
        })
}

/// One record per row, in frame order.
pub fn extract_precipitation(df: &DataFrame) -> Result<Vec<PrecipitationRecord>, StoreError> {
    let dates = get_str(df, COL_DATE)?;
    let prcp = get_f64(df, COL_PRCP)?;

    dates
        .into_iter()
        .zip(prcp)
        .map(|(date, prcp)| {
            Ok(PrecipitationRecord {
                date: required(Table::Measurement, COL_DATE, date)?,
                prcp,
            })
        })
        .collect()
}

pub fn extract_stations(df: &DataFrame) -> Result<Vec<StationRecord>, StoreError> {
    get_str(df, COL_STATION)?
        .into_iter()
        .map(|station| {
            Ok(StationRecord {
                station: required(Table::Station, COL_STATION, station)?,
            })
        })
        .collect()
}

pub fn extract_observations(df: &DataFrame) -> Result<Vec<TemperatureObservation>, StoreError> {
    let stations = get_str(df, COL_STATION)?;
    let dates = get_str(df, COL_DATE)?;
    let tobs = get_f64(df, COL_TOBS)?;

    stations
        .into_iter()
        .zip(dates)
        .zip(tobs)
        .map(|((station, date), tobs)| {
            Ok(TemperatureObservation {
                station: required(Table::Measurement, COL_STATION, station)?,
                date: required(Table::Measurement, COL_DATE, date)?,
                tobs,
            })
        })
        .collect()
}

/// Reads the single-row result of the TMIN/TAVG/TMAX aggregation.
pub fn extract_summary(df: &DataFrame) -> Result<TemperatureSummary, StoreError> {
    if df.height() != 1 {
        return Err(StoreError::UnexpectedData {
            table: Table::Measurement,
            message: format!("aggregate produced {} rows instead of 1", df.height()),
        });
    }
    Ok(TemperatureSummary {
        min: get_f64(df, COL_TMIN)?.get(0),
        avg: get_f64(df, COL_TAVG)?.get(0),
        max: get_f64(df, COL_TMAX)?.get(0),
    })
}
