use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use anyhow::{Result, anyhow};

/// Shipped endpoint value; treated as "not yet configured" but still used.
pub const DEFAULT_WEBHOOK_URL: &str = "https://hook.eu1.make.com/your-webhook-id";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub webhook_url: Option<String>,
    pub use_mock: Option<bool>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            webhook_url: Some(DEFAULT_WEBHOOK_URL.to_string()),
            // Mock by default so the tool works before an endpoint is set up.
            use_mock: Some(true),
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        Ok(())
    }

    pub fn save_use_mock(use_mock: bool) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.use_mock = Some(use_mock);
        config.save()
    }

    pub fn webhook_url(&self) -> String {
        self.webhook_url
            .clone()
            .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("mindshift").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_mock_and_placeholder_endpoint() {
        let config = Config::new();
        assert_eq!(config.use_mock, Some(true));
        assert_eq!(config.webhook_url(), DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_missing_endpoint_falls_back_to_default() {
        let config = Config {
            webhook_url: None,
            use_mock: Some(false),
        };
        assert_eq!(config.webhook_url(), DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = Config {
            webhook_url: Some("https://hook.eu1.make.com/x9f2".to_string()),
            use_mock: Some(false),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.webhook_url(), "https://hook.eu1.make.com/x9f2");
        assert_eq!(back.use_mock, Some(false));
    }
}
