//! Log output for the server binary.
//!
//! Library code logs through the `log` facade. The subscriber installed here
//! also captures those records, alongside the request spans emitted by
//! `tower-http`.

use clap::ValueEnum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How log lines are rendered on stderr.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, colored, with source locations
    #[default]
    Pretty,
    /// Newline-delimited JSON, for log shippers
    Json,
    /// One short line per event
    Compact,
}

/// Level used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(format: LogFormat, debug: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
    }

    log::info!("Logging initialized ({:?}, debug: {})", format, debug);
    Ok(())
}
