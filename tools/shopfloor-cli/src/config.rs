//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "SHOPFLOOR_API_URL";

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["shopfloor.toml", ".shopfloor.toml", "shopfloor.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopfloorConfig {
    /// Backend API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

impl ShopfloorConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Where the session token lives.
    pub fn token_path(&self) -> PathBuf {
        match &self.session.token_file {
            Some(path) => PathBuf::from(path),
            None => data_dir().join("shopfloor").join("session.json"),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Backend API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token file (default: ~/.local/share/shopfloor/session.json).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<String>,

    /// Local token lifetime in seconds. Unset means the token never expires
    /// locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<i64>,
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

/// Generate a default shopfloor.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shopfloor console configuration

[api]
base_url = "{base_url}"

[session]
# token_file = "/var/lib/shopfloor/session.json"
# Tokens are dropped locally after this many seconds.
ttl_secs = 28800
"#,
        base_url = default_base_url()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShopfloorConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3001/api");
        assert!(config.session.ttl_secs.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: ShopfloorConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3001/api");
        assert_eq!(config.session.ttl_secs, Some(28800));
    }

    #[test]
    fn test_toml_and_json_round() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShopfloorConfig {
            api: ApiConfig {
                base_url: "http://pos.local/api".to_string(),
            },
            session: SessionConfig {
                token_file: Some("/tmp/t.json".to_string()),
                ttl_secs: Some(60),
            },
        };

        for name in ["shopfloor.toml", "shopfloor.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(ShopfloorConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ShopfloorConfig = toml::from_str("[session]\nttl_secs = 5\n").unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.session.ttl_secs, Some(5));
    }

    #[test]
    fn test_api_url_override() {
        let config = ShopfloorConfig::default()
            .with_api_url_override(Some(" http://10.0.0.5:3001/api ".to_string()));
        assert_eq!(config.api.base_url, "http://10.0.0.5:3001/api");

        let config = ShopfloorConfig::default().with_api_url_override(Some("  ".to_string()));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_token_path() {
        let mut config = ShopfloorConfig::default();
        assert!(config.token_path().ends_with("shopfloor/session.json"));

        config.session.token_file = Some("/srv/token.json".to_string());
        assert_eq!(config.token_path(), PathBuf::from("/srv/token.json"));
    }
}
