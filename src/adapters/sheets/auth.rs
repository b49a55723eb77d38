use base64::{engine::general_purpose::STANDARD, Engine as _};
use error_stack::report;
use google_sheets4::oauth2::{self, authenticator::Authenticator, ServiceAccountKey};
use tracing::instrument;

use super::http_client::{HttpsClient, HttpsConnector};
use crate::domain::credentials::CredentialSource;
use crate::ports::spreadsheet::AuthenticationError;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Builds the service account key for `source`. Only the file variant touches disk.
pub async fn service_account_key(
    source: &CredentialSource,
) -> error_stack::Result<ServiceAccountKey, AuthenticationError> {
    match source {
        CredentialSource::Inline { base64_json } => {
            let json = STANDARD.decode(base64_json.trim()).map_err(|error| {
                report!(AuthenticationError::InvalidInlineCredentials(format!(
                    "invalid base64: {}",
                    error
                )))
            })?;

            serde_json::from_slice(&json).map_err(|error| {
                report!(AuthenticationError::InvalidInlineCredentials(format!(
                    "invalid key JSON: {}",
                    error
                )))
            })
        }
        CredentialSource::Split {
            client_email,
            private_key,
        } => serde_json::from_value(serde_json::json!({
            "type": "service_account",
            "client_email": client_email,
            "private_key": private_key,
            "token_uri": GOOGLE_TOKEN_URI,
        }))
        .map_err(|error| report!(AuthenticationError::InvalidSplitCredentials(error.to_string()))),
        CredentialSource::File { path } => oauth2::read_service_account_key(path)
            .await
            .map_err(|error| {
                report!(AuthenticationError::KeyFileUnreadable {
                    path: path.clone(),
                    reason: error.to_string(),
                })
            }),
    }
}

/// Authenticates as the service account and fetches a first token, so a rejected
/// key fails here instead of on the first API call.
#[instrument(skip_all, fields(credentials = source.kind()))]
pub async fn auth(
    source: &CredentialSource,
    client: HttpsClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, AuthenticationError> {
    let secret = service_account_key(source).await?;

    let authenticator = oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .map_err(|error| report!(AuthenticationError::Handshake(error.to_string())))?;

    authenticator
        .token(&[SPREADSHEETS_SCOPE])
        .await
        .map_err(|error| report!(AuthenticationError::Handshake(error.to_string())))?;

    tracing::debug!("service account authenticated");
    Ok(authenticator)
}
