pub mod init;
pub mod scan;

use logtriage_core::config::logtriage_dir;
use std::path::PathBuf;

/// Default config file location (~/.logtriage/config.toml).
pub fn default_config_path() -> PathBuf {
    logtriage_dir().join("config.toml")
}
