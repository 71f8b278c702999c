//! Config command implementation.
//!
//! The config file holds the service-level connection defaults (portal URL and
//! token) used whenever a call does not pass `--portal`/`--token`.
//! It lives at ~/.config/hs/config.toml unless `HS_CONFIG` points elsewhere.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use search_query_rs::options::{Credential, ServiceContext};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Minimum token length to apply masking (show first and last N characters).
const TOKEN_MASK_MIN_LENGTH: usize = 8;

/// Number of characters to show at start/end of a masked token.
const TOKEN_MASK_VISIBLE_CHARS: usize = 4;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default portal sharing URL, e.g. `https://www.arcgis.com/sharing/rest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal: Option<String>,

    /// Default portal token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// HTTP client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            portal: None,
            token: None,
            client: ClientConfig::default(),
        }
    }
}

impl Config {
    /// Returns the service-level connection defaults.
    pub fn service_context(&self) -> ServiceContext {
        ServiceContext::new(self.portal.clone(), self.token.clone().map(Credential::new))
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Retries on rate limiting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("hs"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("hs"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("HS_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    Ok(get_config_dir()?.join("config.toml"))
}

/// Loads the configuration from disk. A missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to the current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }

    // Version 1 is the initial schema; later versions migrate here.
    config.version = CONFIG_VERSION;
    Ok(config)
}

fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Masks a token for display.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < TOKEN_MASK_MIN_LENGTH {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..TOKEN_MASK_VISIBLE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - TOKEN_MASK_VISIBLE_CHARS..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "portal": config.portal,
            "token": config.token.as_deref().map(mask_token),
            "client": config.client,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());
        println!("  portal: {}", config.portal.as_deref().unwrap_or("(not set)"));
        println!(
            "  token: {}",
            config.token.as_deref().map(mask_token).unwrap_or_else(|| "(not set)".to_string())
        );
        if let Some(timeout) = config.client.timeout_secs {
            println!("  client.timeout_secs: {}", timeout);
        }
        if let Some(retries) = config.client.max_retries {
            println!("  client.max_retries: {}", retries);
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    if ctx.json_output {
        println!("{}", serde_json::json!({ "path": path.display().to_string() }));
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

/// Applies `key = value` to a config.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parse_err = |e: std::num::ParseIntError| {
        CommandError::Config(format!("Invalid value for {}: {}", key, e))
    };

    match key {
        "portal" => config.portal = Some(value.trim_end_matches('/').to_string()),
        "token" => config.token = Some(value.to_string()),
        "client.timeout_secs" => {
            config.client.timeout_secs = Some(value.parse().map_err(parse_err)?)
        }
        "client.max_retries" => {
            config.client.max_retries = Some(value.parse().map_err(parse_err)?)
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key: {} (expected portal, token, client.timeout_secs, client.max_retries)",
                key
            )))
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, key: &str, value: &str) -> Result<()> {
    let mut config = load_config()?;
    apply_setting(&mut config, key, value)?;
    save_config(&config)?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "status": "success", "key": key }));
    } else if !ctx.quiet {
        println!("Set {}", key);
    }
    Ok(())
}
