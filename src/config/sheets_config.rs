use std::path::PathBuf;

use crate::domain::sheets::a1_notation::A1Notation;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: String,
    #[serde(default = "default_range")]
    pub range: A1Notation,
    /// Bounds authentication plus the range read of a single request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub credentials: CredentialSettings,
}

/// Raw credential inputs. Which one is used is decided per request by
/// [`CredentialSource::resolve`](crate::domain::credentials::CredentialSource::resolve).
#[derive(serde::Deserialize, Clone)]
pub struct CredentialSettings {
    #[serde(default)]
    pub credentials_base64: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            credentials_base64: None,
            client_email: None,
            private_key: None,
            key_file: default_key_file(),
        }
    }
}

impl std::fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("credentials_base64", &self.credentials_base64.as_ref().map(|_| "<redacted>"))
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("key_file", &self.key_file)
            .finish()
    }
}

fn default_range() -> A1Notation {
    A1Notation::from("Sheet1!A:C")
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_key_file() -> PathBuf {
    PathBuf::from("credentials.json")
}
