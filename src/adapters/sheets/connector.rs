use std::fmt::Debug;

use tracing::instrument;

use super::http_client::{http_client, HttpClientError, HttpsClient};
use super::spreadsheet_manager::SpreadsheetManager;
use crate::config::sheets_config::SpreadsheetConfig;
use crate::domain::credentials::CredentialSource;
use crate::ports::spreadsheet::{AuthenticationError, SpreadsheetConnector, SpreadsheetRead};

/// Resolves credentials and authenticates against Google Sheets on every call.
/// The HTTPS client is built once and shared.
#[derive(Clone)]
pub struct GoogleSheetsConnector {
    config: SpreadsheetConfig,
    client: HttpsClient,
}

impl Debug for GoogleSheetsConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GoogleSheetsConnector {
    pub fn new(config: SpreadsheetConfig) -> error_stack::Result<Self, HttpClientError> {
        Ok(Self::with_client(config, http_client()?))
    }

    pub fn with_client(config: SpreadsheetConfig, client: HttpsClient) -> Self {
        Self { config, client }
    }
}

#[async_trait::async_trait]
impl SpreadsheetConnector for GoogleSheetsConnector {
    #[instrument(skip(self))]
    async fn connect(
        &self,
    ) -> error_stack::Result<Box<dyn SpreadsheetRead>, AuthenticationError> {
        let source = CredentialSource::resolve(&self.config.credentials);
        tracing::debug!(credentials = source.kind(), "credential source resolved");

        let manager = SpreadsheetManager::connect(
            &self.config.spreadsheet_id,
            &source,
            self.client.clone(),
        )
        .await?;
        Ok(Box::new(manager))
    }
}
