use std::io::IsTerminal;

use thiserror::Error;
use tracing_subscriber::{
    filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

use crate::config::log_config::LogConfig;
use crate::prettyprint::PrettyFormatter;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log configuration: {0}")]
    InvalidLevel(String),
    #[error("Failed to install the tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber: the crate and `tower_http` at the configured
/// level, written either as JSON lines or through [`PrettyFormatter`].
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let level = config.level_filter().map_err(LoggingError::InvalidLevel)?;

    let targets = Targets::new()
        .with_target("order_confirmation", level)
        .with_target("tower_http", level);

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
    });

    let pretty_layer = (!config.json).then(|| {
        let ansi = std::io::stdout().is_terminal();
        tracing_subscriber::fmt::layer()
            .event_format(PrettyFormatter::new(ansi))
            .with_ansi(ansi)
    });

    Registry::default()
        .with(targets)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|error| LoggingError::Install(error.to_string()))
}
