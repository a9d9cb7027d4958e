//! Command line configuration of the server binary.

use crate::climate_store::{DEFAULT_MEASUREMENTS_PATH, DEFAULT_STATIONS_PATH};
use crate::logging::LogFormat;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Read-only JSON API over a station climate dataset
#[derive(Parser, Debug, Clone)]
#[command(name = "climate_api")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind to
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Measurement table (CSV with header station,date,prcp,tobs)
    #[arg(long, default_value = DEFAULT_MEASUREMENTS_PATH)]
    pub measurements: PathBuf,

    /// Station table (CSV with header station,name,latitude,longitude,elevation)
    #[arg(long, default_value = DEFAULT_STATIONS_PATH)]
    pub stations: PathBuf,

    /// Directory for the parquet cache of parsed tables [default: platform cache dir]
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(long)]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["climate_api"]);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.measurements, PathBuf::from(DEFAULT_MEASUREMENTS_PATH));
        assert_eq!(config.stations, PathBuf::from(DEFAULT_STATIONS_PATH));
        assert_eq!(config.cache_dir, None);
        assert!(!config.debug);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::parse_from([
            "climate_api",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--cache-dir",
            "/tmp/climate",
            "--debug",
            "--log-format",
            "json",
        ]);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/climate")));
        assert!(config.debug);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let result = ServerConfig::try_parse_from(["climate_api", "--log-format", "xml"]);
        assert!(result.is_err());
    }
}
