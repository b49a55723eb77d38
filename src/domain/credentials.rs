use std::path::PathBuf;

use strum::IntoStaticStr;

use crate::config::sheets_config::CredentialSettings;

/// Where the service account key material comes from on a given request.
#[derive(Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CredentialSource {
    /// Base64 encoded service account JSON.
    Inline { base64_json: String },
    /// Client email plus PEM private key, with `\n` escapes already expanded.
    Split {
        client_email: String,
        private_key: String,
    },
    /// Service account JSON on disk.
    File { path: PathBuf },
}

impl CredentialSource {
    /// Picks the first usable source: inline blob, then the email/key pair, then the
    /// key file. Blank values count as unset.
    pub fn resolve(settings: &CredentialSettings) -> Self {
        if let Some(base64_json) = non_blank(&settings.credentials_base64) {
            return CredentialSource::Inline {
                base64_json: base64_json.to_owned(),
            };
        }

        if let (Some(client_email), Some(private_key)) = (
            non_blank(&settings.client_email),
            non_blank(&settings.private_key),
        ) {
            return CredentialSource::Split {
                client_email: client_email.trim().to_owned(),
                private_key: normalize_private_key(private_key),
            };
        }

        CredentialSource::File {
            path: settings.key_file.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Inline { .. } => f.write_str("CredentialSource::Inline { .. }"),
            CredentialSource::Split { client_email, .. } => f
                .debug_struct("CredentialSource::Split")
                .field("client_email", client_email)
                .finish_non_exhaustive(),
            CredentialSource::File { path } => f
                .debug_struct("CredentialSource::File")
                .field("path", path)
                .finish(),
        }
    }
}

/// Keys pasted into env files usually carry literal `\n` sequences instead of line breaks.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}
