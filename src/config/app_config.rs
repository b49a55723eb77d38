use ::config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Track};
use thiserror::Error;

use super::{
    log_config::LogConfig, qr_config::QrConfig, server_config::ServerConfig,
    sheets_config::SpreadsheetConfig,
};

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const ENV_PREFIX: &str = "ORDER_CONFIRMATION";

/// Variable names the service has always been deployed with, mapped onto config keys.
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("GOOGLE_SHEET_ID", "sheets.spreadsheet_id"),
    (
        "GOOGLE_CREDENTIALS_BASE64",
        "sheets.credentials.credentials_base64",
    ),
    ("GOOGLE_CLIENT_EMAIL", "sheets.credentials.client_email"),
    ("GOOGLE_PRIVATE_KEY", "sheets.credentials.private_key"),
    (
        "GOOGLE_APPLICATION_CREDENTIALS_FILE",
        "sheets.credentials.key_file",
    ),
];

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub qr: QrConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Error reading configuration sources")]
    Read,
    #[error("Failed to deserialize config at '{path}': {message}")]
    Deserialize { path: String, message: String },
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl AppConfig {
    /// Reads the optional `CONFIG_PATH` file (default `Config`), then
    /// `ORDER_CONFIRMATION__*` variables, then the legacy `GOOGLE_*`/`PORT` names.
    pub fn load() -> error_stack::Result<Self, ConfigLoadError> {
        let config_path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "Config".to_string());

        let builder = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        let builder = with_legacy_overrides(builder, |name| std::env::var(name).ok())?;

        Self::from_builder(builder)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> error_stack::Result<Self, ConfigLoadError> {
        // Deserialized from `Config` itself so env values coerce to each field's type.
        let config = builder.build().change_context(ConfigLoadError::Read)?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(config, &mut track);
        let config = AppConfig::deserialize(path_de).map_err(|error| {
            report!(ConfigLoadError::Deserialize {
                path: track.path().to_string(),
                message: error.to_string(),
            })
            .attach_printable("Make sure all required fields are present in the configuration")
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> error_stack::Result<(), ConfigLoadError> {
        if self.sheets.spreadsheet_id.trim().is_empty() {
            return Err(report!(ConfigLoadError::Invalid {
                key: "sheets.spreadsheet_id",
                message: "must not be empty".to_string(),
            }));
        }

        self.sheets
            .range
            .validate_sheet_range()
            .change_context(ConfigLoadError::Invalid {
                key: "sheets.range",
                message: format!("'{}' is not a sheet range", self.sheets.range),
            })?;

        if self.sheets.request_timeout_secs == 0 {
            return Err(report!(ConfigLoadError::Invalid {
                key: "sheets.request_timeout_secs",
                message: "must be greater than zero".to_string(),
            }));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(report!(ConfigLoadError::Invalid {
                key: "server.request_timeout_secs",
                message: "must be greater than zero".to_string(),
            }));
        }

        self.log
            .level_filter()
            .map_err(|message| report!(ConfigLoadError::Invalid { key: "log.level", message }))?;

        Ok(())
    }
}

/// Applies the legacy variable names on top of `builder`. `lookup` stands in for
/// `std::env::var` so the mapping can be exercised without touching the process
/// environment.
pub fn with_legacy_overrides<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> error_stack::Result<ConfigBuilder<DefaultState>, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    for (variable, key) in LEGACY_ENV_OVERRIDES {
        builder = builder
            .set_override_option(*key, lookup(*variable))
            .change_context(ConfigLoadError::Read)
            .attach_printable_lazy(|| format!("Failed to apply {}", variable))?;
    }

    if let Some(port) = lookup("PORT") {
        let parsed: u16 = port.trim().parse().map_err(|_| {
            report!(ConfigLoadError::Invalid {
                key: "PORT",
                message: format!("'{}' is not a valid port", port),
            })
        })?;
        builder = builder
            .set_override("server.port", i64::from(parsed))
            .change_context(ConfigLoadError::Read)?;
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::FileFormat;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use crate::domain::confirmation_link::Scheme;

    fn builder_from(toml: &str) -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(toml, FileFormat::Toml))
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_builder(builder_from(
            r#"
            [sheets]
            spreadsheet_id = "sheet-123"
            "#,
        ))
        .unwrap();

        assert_eq!(config.sheets.spreadsheet_id, "sheet-123");
        assert_eq!(config.sheets.range.as_ref(), "Sheet1!A:C");
        assert_eq!(config.sheets.request_timeout_secs, 20);
        assert_eq!(
            config.sheets.credentials.key_file,
            PathBuf::from("credentials.json")
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.qr.scheme, None);
        assert_eq!(config.log.level, "info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_builder(builder_from(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 5

            [sheets]
            spreadsheet_id = "sheet-123"
            range = "'Order Log'!A1:D500"
            request_timeout_secs = 3

            [sheets.credentials]
            client_email = "svc@example.iam.gserviceaccount.com"
            private_key = "key"
            key_file = "/etc/secrets/sa.json"

            [qr]
            scheme = "https"

            [log]
            level = "debug"
            json = true
            "#,
        ))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.sheets.range.as_ref(), "'Order Log'!A1:D500");
        assert_eq!(
            config.sheets.credentials.client_email.as_deref(),
            Some("svc@example.iam.gserviceaccount.com")
        );
        assert_eq!(
            config.sheets.credentials.key_file,
            PathBuf::from("/etc/secrets/sa.json")
        );
        assert_eq!(config.qr.scheme, Some(Scheme::Https));
        assert!(config.log.json);
    }

    #[test]
    fn test_missing_spreadsheet_id_reports_path() {
        let error = AppConfig::from_builder(builder_from(
            r#"
            [sheets]
            range = "Sheet1!A:C"
            "#,
        ))
        .unwrap_err();

        match error.current_context() {
            ConfigLoadError::Deserialize { path, message } => {
                assert!(path.starts_with("sheets"), "unexpected path {path}");
                assert!(message.contains("spreadsheet_id"), "unexpected message {message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_range_is_rejected() {
        let error = AppConfig::from_builder(builder_from(
            r#"
            [sheets]
            spreadsheet_id = "sheet-123"
            range = "A:C"
            "#,
        ))
        .unwrap_err();

        assert!(matches!(
            error.current_context(),
            ConfigLoadError::Invalid {
                key: "sheets.range",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let error = AppConfig::from_builder(builder_from(
            r#"
            [sheets]
            spreadsheet_id = "sheet-123"

            [qr]
            scheme = "gopher"
            "#,
        ))
        .unwrap_err();

        assert!(matches!(
            error.current_context(),
            ConfigLoadError::Deserialize { .. }
        ));
    }

    #[test]
    fn test_legacy_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GOOGLE_SHEET_ID", "from-env"),
            ("GOOGLE_CREDENTIALS_BASE64", "eyJ9"),
            ("GOOGLE_CLIENT_EMAIL", "svc@example.iam.gserviceaccount.com"),
            ("GOOGLE_PRIVATE_KEY", "line1\\nline2"),
            ("PORT", "4000"),
        ]);

        let builder = with_legacy_overrides(
            builder_from(
                r#"
                [sheets]
                spreadsheet_id = "from-file"
                "#,
            ),
            |name| env.get(name).map(|value| value.to_string()),
        )
        .unwrap();
        let config = AppConfig::from_builder(builder).unwrap();

        assert_eq!(config.sheets.spreadsheet_id, "from-env");
        assert_eq!(
            config.sheets.credentials.credentials_base64.as_deref(),
            Some("eyJ9")
        );
        assert_eq!(
            config.sheets.credentials.private_key.as_deref(),
            Some("line1\\nline2")
        );
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_legacy_overrides_supply_missing_sheet_id() {
        let builder =
            with_legacy_overrides(Config::builder(), |name| match name {
                "GOOGLE_SHEET_ID" => Some("only-env".to_string()),
                _ => None,
            })
            .unwrap();
        let config = AppConfig::from_builder(builder).unwrap();

        assert_eq!(config.sheets.spreadsheet_id, "only-env");
    }

    #[test]
    fn test_env_values_coerce_to_field_types() {
        let builder = builder_from(
            r#"
            [sheets]
            spreadsheet_id = "from-file"
            "#,
        )
        .set_override("sheets.spreadsheet_id", 12345_i64)
        .unwrap()
        .set_override("server.port", "8080")
        .unwrap()
        .set_override("log.json", "true")
        .unwrap();

        let config = AppConfig::from_builder(builder).unwrap();

        assert_eq!(config.sheets.spreadsheet_id, "12345");
        assert_eq!(config.server.port, 8080);
        assert!(config.log.json);
    }

    #[test]
    fn test_numeric_env_spreadsheet_id_stays_a_string() {
        std::env::set_var("ORDER_CONFIRMATION__SHEETS__SPREADSHEET_ID", "12345");
        let builder = Config::builder().add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        let config = AppConfig::from_builder(builder);
        std::env::remove_var("ORDER_CONFIRMATION__SHEETS__SPREADSHEET_ID");

        assert_eq!(config.unwrap().sheets.spreadsheet_id, "12345");
    }

    #[test]
    fn test_invalid_port_override() {
        let error = with_legacy_overrides(Config::builder(), |name| match name {
            "PORT" => Some("eighty".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(
            error.current_context(),
            ConfigLoadError::Invalid { key: "PORT", .. }
        ));
    }
}
