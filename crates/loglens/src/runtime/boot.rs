//! Boot — logging init and config load.

use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::LensConfig;

/// Initialise the tracing / logging subsystem.
///
/// Diagnostics go to stderr so stdout stays clean for JSON output.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loglens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load configuration, preferring an explicit path over `LOGLENS_CONFIG_FILE`.
pub fn load_config(explicit: Option<&Path>) -> Result<LensConfig, Box<dyn std::error::Error>> {
    info!("Starting loglens v{}", env!("CARGO_PKG_VERSION"));

    let config = match explicit {
        Some(path) => LensConfig::load_from(path)?,
        None => LensConfig::load()?,
    };

    info!(
        "Parser: strip_ansi={}, stitch_details={}, max_detail_lines={:?}",
        config.parser.strip_ansi, config.parser.stitch_details, config.parser.max_detail_lines
    );
    info!(
        "Analyzer: window_months={}, recent_errors_limit={}",
        config.analyzer.window_months, config.analyzer.recent_errors_limit
    );

    Ok(config)
}
