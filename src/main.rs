use std::{process::ExitCode, sync::Arc, time::Duration};

use error_stack::{Report, ResultExt};
use thiserror::Error;
use tokio::signal;
use tracing::{info, instrument};

use order_confirmation::{
    adapters::{
        http::{router, AppState},
        orders::spreadsheet_order_repository::SpreadsheetOrderRepository,
        qr::PngQrRenderer,
        sheets::connector::GoogleSheetsConnector,
    },
    config::app_config::AppConfig,
    domain::confirmation_link::SchemePolicy,
    logging,
};

#[derive(Error, Debug)]
enum StartupError {
    #[error("Failed to build the Google Sheets client")]
    SheetsClient,
    #[error("Failed to bind {0}")]
    Bind(String),
    #[error("Server stopped unexpectedly")]
    Serve,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the normal case outside development.
    let _ = dotenvy::dotenv();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            eprintln!("{report:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = logging::init(&config.log) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            tracing::error!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

#[instrument(skip_all)]
async fn serve(config: AppConfig) -> error_stack::Result<(), StartupError> {
    let connector = Arc::new(
        GoogleSheetsConnector::new(config.sheets.clone())
            .change_context(StartupError::SheetsClient)?,
    );
    let orders = Arc::new(SpreadsheetOrderRepository::new(
        connector,
        config.sheets.range.clone(),
        Duration::from_secs(config.sheets.request_timeout_secs),
    ));
    let state = AppState::new(
        orders,
        Arc::new(PngQrRenderer),
        SchemePolicy::from_configured(config.qr.scheme),
    );
    let app = router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|error| Report::new(error).change_context(StartupError::Bind(address.clone())))?;
    info!(%address, spreadsheet = %config.sheets.spreadsheet_id, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .change_context(StartupError::Serve)?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to listen for SIGTERM: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
