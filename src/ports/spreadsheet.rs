use std::path::PathBuf;

use thiserror::Error;

use crate::domain::sheets::a1_notation::A1Notation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Could not decode inline credentials: {0}")]
    InvalidInlineCredentials(String),
    #[error("Could not build credentials from client email and private key: {0}")]
    InvalidSplitCredentials(String),
    #[error("Could not read service account key file '{}': {reason}", .path.display())]
    KeyFileUnreadable { path: PathBuf, reason: String },
    #[error("Could not authenticate with Google: {0}")]
    Handshake(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetReadError {
    #[error("Failed to fetch range {range}: {reason}")]
    FailedToFetchRange { range: String, reason: String },
}

/// Read access to one spreadsheet through an already authenticated session.
#[async_trait::async_trait]
pub trait SpreadsheetRead: Send + Sync {
    /// Rows of the range as strings, in sheet order. Trailing empty cells are not
    /// returned by the API, so rows may have different lengths.
    async fn read_rows(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetReadError>;
}

/// Opens a fresh authenticated session. Called once per request; nothing is reused.
#[async_trait::async_trait]
pub trait SpreadsheetConnector: Send + Sync {
    async fn connect(
        &self,
    ) -> error_stack::Result<Box<dyn SpreadsheetRead>, AuthenticationError>;
}
