#[derive(serde::Deserialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<tracing_subscriber::filter::LevelFilter, String> {
        self.level
            .trim()
            .parse()
            .map_err(|_| format!("unknown log level '{}'", self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_level_filter() {
        let config = LogConfig {
            level: "debug".to_string(),
            json: false,
        };
        assert_eq!(config.level_filter(), Ok(LevelFilter::DEBUG));

        let config = LogConfig {
            level: "chatty".to_string(),
            json: false,
        };
        assert!(config.level_filter().is_err());
    }
}
