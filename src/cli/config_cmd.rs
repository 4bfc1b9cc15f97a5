//! Configuration management CLI commands
//!
//! Provides commands for managing ~/.credhub/config.toml

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use super::config::CliConfig;
use super::output;

const MASK: &str = "********";

const CONFIG_KEYS: &str =
    "url, token, client_id, client_secret, token_uri, ca_cert, client_cert, client_key, timeout";

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize configuration file with default values
    Init {
        /// Overwrite existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Show {
        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get configuration file path
    Path,
}

/// Handle config commands
pub async fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => init_config(force)?,
        ConfigCommands::Show { output } => show_config(&output)?,
        ConfigCommands::Set { key, value } => set_config(&key, &value)?,
        ConfigCommands::Path => println!("{}", CliConfig::config_path()?.display()),
    }

    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let path = CliConfig::config_path()?;

    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite",
            path.display()
        );
    }

    CliConfig::default().save()?;

    println!("Configuration file created at: {}", path.display());
    println!("\nYou can now set values using:");
    println!("  credhub-cli config set url https://credhub.example.com:8844");
    println!("  credhub-cli config set client_id <client-id>");
    println!("  credhub-cli config set client_secret <client-secret>");
    println!("  credhub-cli config set token_uri https://uaa.example.com/oauth/token");

    Ok(())
}

fn show_config(output_format: &str) -> Result<()> {
    let path = CliConfig::config_path()?;

    if !path.exists() {
        println!("No configuration file found at: {}", path.display());
        println!("\nRun 'credhub-cli config init' to create one");
        return Ok(());
    }

    let config = masked(CliConfig::load()?);
    output::print_output(&config, output_format, print_config_table)
}

/// Copy of the configuration with the token and client secret hidden
pub fn masked(mut config: CliConfig) -> CliConfig {
    for secret in [&mut config.token, &mut config.client_secret] {
        if secret.is_some() {
            *secret = Some(MASK.to_string());
        }
    }
    config
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let path = CliConfig::config_path()?;
    set_config_at(&path, key, value)?;
    println!("Configuration saved to: {}", path.display());

    Ok(())
}

/// Update one key in the file at `path`. A file that fails to parse is left untouched.
pub fn set_config_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = CliConfig::load_from_path(path)
        .context("Refusing to update a configuration file that cannot be read")?;
    apply_setting(&mut config, key, value)?;
    config.save_to_path(path)
}

/// Update one key of the configuration
pub fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "url" => config.url = Some(value.to_string()),
        "token" => config.token = Some(value.to_string()),
        "client_id" => config.client_id = Some(value.to_string()),
        "client_secret" => config.client_secret = Some(value.to_string()),
        "token_uri" => config.token_uri = Some(value.to_string()),
        "ca_cert" => config.ca_cert = Some(PathBuf::from(value)),
        "client_cert" => config.client_cert = Some(PathBuf::from(value)),
        "client_key" => config.client_key = Some(PathBuf::from(value)),
        "timeout" => {
            let timeout: u64 =
                value.parse().context("Invalid timeout value. Must be a number in seconds")?;
            config.timeout = Some(timeout);
        }
        _ => {
            anyhow::bail!("Unknown configuration key: '{}'. Valid keys: {}", key, CONFIG_KEYS);
        }
    }
    Ok(())
}

fn print_config_table(config: &CliConfig) {
    let masked = |value: &Option<String>| {
        value.as_ref().map(|_| MASK.to_string()).unwrap_or_else(|| "<not set>".to_string())
    };
    let plain = |value: Option<String>| value.unwrap_or_else(|| "<not set>".to_string());
    let path = |value: &Option<PathBuf>| plain(value.as_ref().map(|p| p.display().to_string()));

    output::print_table_header(&[("Key", 15), ("Value", 50)]);
    println!("{:<15} {}", "url", plain(config.url.clone()));
    println!("{:<15} {}", "token", masked(&config.token));
    println!("{:<15} {}", "client_id", plain(config.client_id.clone()));
    println!("{:<15} {}", "client_secret", masked(&config.client_secret));
    println!("{:<15} {}", "token_uri", plain(config.token_uri.clone()));
    println!("{:<15} {}", "ca_cert", path(&config.ca_cert));
    println!("{:<15} {}", "client_cert", path(&config.client_cert));
    println!("{:<15} {}", "client_key", path(&config.client_key));
    println!(
        "{:<15} {}",
        "timeout",
        config.timeout.map(|t| format!("{} seconds", t)).unwrap_or_else(|| "<not set>".to_string())
    );
    println!();
}
