// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration: backend base URL, request timeout, and the
/// simulated-data toggle for running without a backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub use_simulated: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            use_simulated: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: ClientSettings,
    production: ClientSettings,
}

impl ClientSettings {
    /// Load configuration: the matching `config.yaml` section when the file
    /// exists, then environment variable overrides on top.
    pub fn load() -> Result<Self> {
        let environment = Self::environment_name();
        info!("Loading configuration for environment: {}", environment);

        let mut settings = Self::load_from_file(&environment)?.unwrap_or_default();
        settings.apply_env_overrides()?;
        Ok(settings)
    }

    fn environment_name() -> String {
        std::env::var("JOBSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Option<Self>> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;
        let config_file: ConfigFile =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        Ok(Some(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        }))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("JOBSCOUT_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(secs) = std::env::var("JOBSCOUT_TIMEOUT_SECS") {
            self.timeout_secs = secs
                .parse()
                .context("JOBSCOUT_TIMEOUT_SECS must be a number of seconds")?;
        }
        if let Ok(flag) = std::env::var("JOBSCOUT_USE_SIMULATED") {
            self.use_simulated = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(settings.timeout_secs, 30);
        assert!(!settings.use_simulated);
    }

    #[test]
    fn test_parse_config_file() {
        let yaml = r#"
local:
  api_base_url: "http://localhost:9000"
  use_simulated: true
production:
  api_base_url: "https://api.example.com"
  timeout_secs: 60
"#;
        let config: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.local.api_base_url, "http://localhost:9000");
        assert!(config.local.use_simulated);
        // Omitted keys fall back to defaults per section.
        assert_eq!(config.local.timeout_secs, 30);
        assert_eq!(config.production.timeout_secs, 60);
        assert!(!config.production.use_simulated);
    }
}
