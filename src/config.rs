use std::env;
use std::path::PathBuf;
use std::time::Duration;

use xeriwo_sdk::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Explicit session file; the platform data directory is used otherwise
    pub storage_path: Option<PathBuf>,
    /// Open download and preview links in the browser instead of printing them
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            storage_path: None,
            open_browser: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let timeout_secs: u64 = env::var("XERIWO_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.timeout_secs);

        let open_browser = env::var("XERIWO_OPEN_BROWSER")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(defaults.open_browser);

        Self {
            api_url: env::var("XERIWO_API_URL").unwrap_or(defaults.api_url),
            timeout_secs,
            storage_path: env::var("XERIWO_STORAGE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            open_browser,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
