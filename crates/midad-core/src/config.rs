//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/midad/config.toml)
//! 3. Environment variables (MIDAD_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "MIDAD";

/// Cover image used when the admin form leaves the field empty
pub const DEFAULT_COVER_IMAGE: &str =
    "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?auto=format&fit=crop&w=800&q=80";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the blog store file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Admin login email (the credential check is deliberately this simple)
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Admin login password
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Cover image applied to posts created without one
    #[serde(default = "default_cover_image")]
    pub default_cover_image: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            default_cover_image: default_cover_image(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (MIDAD_DATA_DIR, MIDAD_ADMIN_EMAIL,
    ///    MIDAD_ADMIN_PASSWORD)
    /// 2. Config file (~/.config/midad/config.toml or MIDAD_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_ADMIN_EMAIL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.admin_email = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_ADMIN_PASSWORD", ENV_PREFIX)) {
            if !val.is_empty() {
                self.admin_password = val;
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the MIDAD_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("midad")
            .join("config.toml")
    }

    /// Get the path to the blog store file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("blog.json")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("midad")
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_admin_password() -> String {
    "password123".to_string()
}

fn default_cover_image() -> String {
    DEFAULT_COVER_IMAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["MIDAD_DATA_DIR", "MIDAD_ADMIN_EMAIL", "MIDAD_ADMIN_PASSWORD"];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data_dir.ends_with("midad"));
        assert_eq!(config.admin_email, "admin@example.com");
        assert_eq!(config.admin_password, "password123");
        assert!(config.default_cover_image.starts_with("https://"));
    }

    #[test]
    fn test_store_path() {
        let config = Config::default();
        assert!(config.store_path().ends_with("blog.json"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("MIDAD_DATA_DIR", "/tmp/midad-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/midad-test"));
    }

    #[test]
    fn test_env_override_credentials() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("MIDAD_ADMIN_EMAIL", "me@blog.example");
        env::set_var("MIDAD_ADMIN_PASSWORD", "s3cret");
        config.apply_env_overrides();

        assert_eq!(config.admin_email, "me@blog.example");
        assert_eq!(config.admin_password, "s3cret");

        // Empty values don't wipe the configured credential
        env::set_var("MIDAD_ADMIN_EMAIL", "");
        config.apply_env_overrides();
        assert_eq!(config.admin_email, "me@blog.example");
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            admin_email = "owner@blog.example"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.admin_email, "owner@blog.example");
        // Unspecified fields keep their defaults
        assert_eq!(config.admin_password, "password123");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("MIDAD_DATA_DIR", temp_dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.admin_email, "admin@example.com");
        // ensure_data_dir ran
        assert!(config.data_dir.exists());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/midad"),
            admin_email: "owner@blog.example".to_string(),
            admin_password: "pw".to_string(),
            default_cover_image: "https://example.com/cover.jpg".to_string(),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.admin_email, config.admin_email);
        assert_eq!(parsed.default_cover_image, config.default_cover_image);
    }
}
