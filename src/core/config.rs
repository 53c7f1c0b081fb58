//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.certctl/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::Mode;
use crate::dispatch::ResponseFields;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CertctlConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub body: BodyConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub mode: Option<Mode>,
    pub server_url: Option<String>,
}

/// Settings for body mode (one shared endpoint).
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BodyConfig {
    pub endpoint: Option<String>,
    pub action_field: Option<String>,
}

/// Response field names. Defaults depend on the mode; an empty `success`
/// string opts out of the flag entirely.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FieldsConfig {
    pub success: Option<String>,
    pub message: Option<String>,
}

/// One routing entry for table mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionEntry {
    pub name: String,
    pub endpoint: String,
    pub description: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BODY_ENDPOINT: &str = "/action";
pub const DEFAULT_ACTION_FIELD: &str = "action";
pub const DEFAULT_BODY_MESSAGE_FIELD: &str = "message";
pub const DEFAULT_TABLE_SUCCESS_FIELD: &str = "success";
pub const DEFAULT_TABLE_MESSAGE_FIELD: &str = "output";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub mode: Mode,
    pub server_url: String,
    pub body_endpoint: String,
    pub action_field: String,
    pub fields: ResponseFields,
    pub actions: Vec<ActionEntry>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.certctl/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".certctl").join("config.toml"))
}

/// Load config from `~/.certctl/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CertctlConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CertctlConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CertctlConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CertctlConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: CertctlConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Certctl Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# mode = "body"                        # "body" or "table"
# server_url = "http://127.0.0.1:5000" # Or set CERTCTL_SERVER_URL env var

# Body mode: every action is POSTed to one shared endpoint.
# [body]
# endpoint = "/action"
# action_field = "action"

# Response field names. Defaults: "message" in body mode,
# "success" + "output" in table mode. Set success = "" if the server
# sends no flag at all.
# [fields]
# success = "success"
# message = "output"

# Table mode: one endpoint per action.
# [[actions]]
# name = "run_dashboard"
# endpoint = "/api/run_dashboard"
# description = "Start the admin dashboard"

# [[actions]]
# name = "run_validation_portal"
# endpoint = "/api/run_validation_portal"
# description = "Start the certificate validation portal"

# [[actions]]
# name = "generate_certificates"
# endpoint = "/api/generate_certificates"
# description = "Render certificate PDFs for all pending recipients"

# [[actions]]
# name = "send_certificates"
# endpoint = "/api/send_certificates"
# description = "Email generated certificates to their recipients"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_mode` and `cli_server` are from CLI flags (None = not specified).
pub fn resolve(
    config: &CertctlConfig,
    cli_mode: Option<Mode>,
    cli_server: Option<&str>,
) -> ResolvedConfig {
    // Mode: CLI → env → config → default
    let mode = cli_mode
        .or_else(|| std::env::var("CERTCTL_MODE").ok().and_then(|s| parse_mode(&s)))
        .or(config.general.mode)
        .unwrap_or_default();

    // Server URL: CLI → env → config → default
    let server_url = cli_server
        .map(|s| s.to_string())
        .or_else(|| std::env::var("CERTCTL_SERVER_URL").ok())
        .or_else(|| config.general.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    ResolvedConfig {
        mode,
        server_url,
        body_endpoint: config
            .body
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_BODY_ENDPOINT.to_string()),
        action_field: config
            .body
            .action_field
            .clone()
            .unwrap_or_else(|| DEFAULT_ACTION_FIELD.to_string()),
        fields: resolve_fields(&config.fields, mode),
        actions: config.actions.clone(),
    }
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s.to_ascii_lowercase().as_str() {
        "body" => Some(Mode::Body),
        "table" => Some(Mode::Table),
        other => {
            warn!("Unrecognized mode '{}', ignoring", other);
            None
        }
    }
}

/// Collapses the `[fields]` section against the per-mode defaults.
fn resolve_fields(fields: &FieldsConfig, mode: Mode) -> ResponseFields {
    let success = match fields.success.as_deref() {
        // Explicit opt-out: every decoded response counts as success.
        Some("") => None,
        Some(name) => Some(name.to_string()),
        None => match mode {
            Mode::Body => None,
            Mode::Table => Some(DEFAULT_TABLE_SUCCESS_FIELD.to_string()),
        },
    };

    let message = fields.message.clone().unwrap_or_else(|| {
        match mode {
            Mode::Body => DEFAULT_BODY_MESSAGE_FIELD,
            Mode::Table => DEFAULT_TABLE_MESSAGE_FIELD,
        }
        .to_string()
    });

    ResponseFields { success, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CertctlConfig::default();
        assert!(config.actions.is_empty());
        assert!(config.general.mode.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = CertctlConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.mode, Mode::Body);
        assert_eq!(resolved.server_url, DEFAULT_SERVER_URL);
        assert_eq!(resolved.body_endpoint, DEFAULT_BODY_ENDPOINT);
        assert_eq!(resolved.action_field, DEFAULT_ACTION_FIELD);
        // Body-mode defaults: no success flag, "message" as the text field.
        assert!(resolved.fields.success.is_none());
        assert_eq!(resolved.fields.message, DEFAULT_BODY_MESSAGE_FIELD);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CertctlConfig {
            general: GeneralConfig {
                mode: Some(Mode::Table),
                server_url: Some("http://10.0.0.7:8080".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.mode, Mode::Table);
        assert_eq!(resolved.server_url, "http://10.0.0.7:8080");
        // Table-mode defaults kick in for the fields.
        assert_eq!(
            resolved.fields.success.as_deref(),
            Some(DEFAULT_TABLE_SUCCESS_FIELD)
        );
        assert_eq!(resolved.fields.message, DEFAULT_TABLE_MESSAGE_FIELD);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = CertctlConfig {
            general: GeneralConfig {
                mode: Some(Mode::Table),
                server_url: Some("http://configured:1".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(Mode::Body), Some("http://flag:2"));
        assert_eq!(resolved.mode, Mode::Body);
        assert_eq!(resolved.server_url, "http://flag:2");
    }

    #[test]
    fn test_explicit_field_names_override_mode_defaults() {
        let config = CertctlConfig {
            general: GeneralConfig {
                mode: Some(Mode::Body),
                server_url: None,
            },
            fields: FieldsConfig {
                success: Some("ok".to_string()),
                message: Some("detail".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.fields.success.as_deref(), Some("ok"));
        assert_eq!(resolved.fields.message, "detail");
    }

    #[test]
    fn test_empty_success_field_opts_out() {
        let config = CertctlConfig {
            general: GeneralConfig {
                mode: Some(Mode::Table),
                server_url: None,
            },
            fields: FieldsConfig {
                success: Some(String::new()),
                message: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, None);
        assert!(resolved.fields.success.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
mode = "table"
server_url = "http://127.0.0.1:5000"

[fields]
success = "success"
message = "output"

[[actions]]
name = "generate_certificates"
endpoint = "/api/generate_certificates"
description = "Render certificate PDFs"

[[actions]]
name = "send_certificates"
endpoint = "/api/send_certificates"
"#;
        let config: CertctlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.mode, Some(Mode::Table));
        assert_eq!(config.actions.len(), 2);
        assert_eq!(config.actions[0].name, "generate_certificates");
        assert_eq!(config.actions[1].description, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
server_url = "http://192.168.1.40:5000"
"#;
        let config: CertctlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.server_url.as_deref(),
            Some("http://192.168.1.40:5000")
        );
        assert!(config.general.mode.is_none());
        assert!(config.body.endpoint.is_none());
        assert!(config.actions.is_empty());
    }

    #[test]
    fn test_parse_mode_strings() {
        assert_eq!(parse_mode("body"), Some(Mode::Body));
        assert_eq!(parse_mode("TABLE"), Some(Mode::Table));
        assert_eq!(parse_mode("router"), None);
    }
}
