use std::fmt::Debug;

use google_sheets4::Sheets;
use tracing::instrument;

use super::{
    auth,
    http_client::{HttpsClient, HttpsConnector},
};
use crate::domain::credentials::CredentialSource;
use crate::ports::spreadsheet::AuthenticationError;

/// One authenticated session against a single spreadsheet. Built per request and
/// dropped with it.
pub struct SpreadsheetManager {
    pub spreadsheet_id: String,
    pub(super) hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {:?} }}",
            self.spreadsheet_id
        )
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::connect", skip(source, client), fields(credentials = source.kind()))]
    pub async fn connect(
        spreadsheet_id: &str,
        source: &CredentialSource,
        client: HttpsClient,
    ) -> error_stack::Result<Self, AuthenticationError> {
        let auth = auth::auth(source, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager {
            spreadsheet_id: spreadsheet_id.to_owned(),
            hub,
        })
    }
}
