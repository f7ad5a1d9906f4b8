//! Config command handlers

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use midad_core::Config;

use crate::output::{Output, OutputFormat};

/// Show the active configuration
pub fn show(config: &Config, output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": Config::config_file_path(),
                    "data_dir": config.data_dir,
                    "admin_email": config.admin_email,
                    "default_cover_image": config.default_cover_image,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", Config::config_file_path().display());
        }
        OutputFormat::Human => {
            println!("Config file:         {}", Config::config_file_path().display());
            println!("Data directory:      {}", config.data_dir.display());
            println!("Admin email:         {}", config.admin_email);
            println!("Default cover image: {}", config.default_cover_image);
        }
    }
    Ok(())
}

/// Set a configuration value and persist it
pub fn set(config: &mut Config, key: &str, value: &str, output: &Output) -> Result<()> {
    match key {
        "data_dir" => config.data_dir = PathBuf::from(value),
        "admin_email" => config.admin_email = value.to_string(),
        "admin_password" => config.admin_password = value.to_string(),
        "default_cover_image" => config.default_cover_image = value.to_string(),
        _ => bail!(
            "Unknown config key: {} (expected data_dir, admin_email, admin_password, or default_cover_image)",
            key
        ),
    }

    config.save().context("Failed to save config")?;
    output.success(&format!("Set {}", key));
    Ok(())
}
