//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use shopfloor_auth::{SessionClient, TokenStore};
use shopfloor_data::HttpClient;

use crate::config::{ShopfloorConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: ShopfloorConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (ShopfloorConfig::load(&path)?, Some(path))
        } else {
            match find_config(&cwd) {
                Some(path) => (ShopfloorConfig::load(&path)?, Some(path)),
                None => (ShopfloorConfig::default(), None),
            }
        };

        Ok(Self {
            config: config.with_env_overrides(),
            config_path,
            output,
            cwd,
        })
    }

    /// Transport against the configured backend.
    pub fn http_client(&self) -> HttpClient {
        HttpClient::new(self.config.api.base_url.clone())
    }

    pub fn token_store(&self) -> TokenStore {
        TokenStore::new(self.config.token_path())
    }

    /// Client carrying the stored session. Fails early when there is none.
    pub fn session_client(&self) -> Result<SessionClient<HttpClient>> {
        let session = self
            .token_store()
            .load()
            .context("Failed to read stored session")?;

        if let shopfloor_auth::SessionContext::Unauthenticated(reason) = &session {
            bail!("Not logged in ({}). Run `shopfloor login` first.", reason);
        }

        self.output
            .debug(&format!("Using API at {}", self.config.api.base_url));
        Ok(SessionClient::new(self.http_client(), session))
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("shopfloor.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("shopfloor.toml")));
    }

    #[test]
    fn test_nearest_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("store");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("shopfloor.toml"), "").unwrap();
        std::fs::write(nested.join("shopfloor.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("shopfloor.json")));
    }
}
