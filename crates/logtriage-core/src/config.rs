use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_LOG_DIR: &str = "LOGTRIAGE_LOG_DIR";
pub const ENV_API_URL: &str = "LOGTRIAGE_API_URL";
pub const ENV_API_KEY: &str = "LOGTRIAGE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_scan")]
    pub scan: ScanConfig,
    #[serde(default = "default_api")]
    pub api: ApiConfig,
    #[serde(default = "default_analysis")]
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: default_scan(),
            api: default_api(),
            analysis: default_analysis(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    /// Request timeout. When unset the HTTP client's own default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Treat non-2xx responses as transport failures instead of handing
    /// the body to the parser.
    #[serde(default)]
    pub strict_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_prompt_prefix")]
    pub prompt_prefix: String,
}

fn default_scan() -> ScanConfig {
    ScanConfig {
        log_dir: default_log_dir(),
    }
}

fn default_api() -> ApiConfig {
    ApiConfig {
        url: default_url(),
        api_key: String::new(),
        timeout_secs: None,
        strict_status: false,
    }
}

fn default_analysis() -> AnalysisConfig {
    AnalysisConfig {
        max_tokens: default_max_tokens(),
        prompt_prefix: default_prompt_prefix(),
    }
}

fn default_log_dir() -> String {
    "/var/log".to_string()
}
fn default_url() -> String {
    "https://api.llama.com/v1/analysis".to_string()
}
fn default_max_tokens() -> u32 {
    crate::analysis::prompts::DEFAULT_MAX_TOKENS
}
fn default_prompt_prefix() -> String {
    crate::analysis::prompts::THREAT_PROMPT_PREFIX.to_string()
}

impl Config {
    /// Load config from the given path, or return defaults if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CoreError::Config(format!("reading {}: {e}", path.display())))?;
            let config: Config =
                toml::from_str(&contents).map_err(|e| CoreError::Config(e.to_string()))?;

            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write config to the given path.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Io(format!("creating config dir: {e}")))?;
        }
        std::fs::write(path, contents)
            .map_err(|e| CoreError::Io(format!("writing config: {e}")))?;
        Ok(())
    }

    /// Override fields from `LOGTRIAGE_*` variables looked up via `lookup`.
    /// Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = get(ENV_LOG_DIR) {
            self.scan.log_dir = dir;
        }
        if let Some(url) = get(ENV_API_URL) {
            self.api.url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api.api_key = key;
        }
    }

    /// Reject configs that cannot reach the endpoint.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api.url.trim().is_empty() {
            return Err(CoreError::Config("api.url is empty".to_string()));
        }
        if self.api.api_key.trim().is_empty() {
            return Err(CoreError::Config(format!(
                "api.api_key is empty (set it in the config file or via {ENV_API_KEY})"
            )));
        }
        Ok(())
    }

    /// Resolve the log directory, expanding ~ to home directory.
    pub fn log_dir(&self) -> PathBuf {
        expand_tilde(&self.scan.log_dir)
    }
}

/// Get the logtriage data directory (~/.logtriage/).
pub fn logtriage_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".logtriage")
}

/// Expand ~ at the start of a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else if path == "~" {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
    } else {
        PathBuf::from(path)
    }
}
