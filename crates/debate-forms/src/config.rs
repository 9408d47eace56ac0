// File: src/config.rs
// Purpose: Configuration parsing from debate-forms.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub motivation: MotivationConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Local storage layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Prefix of every registration key (default: "registration_")
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

/// Submit handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Prefix of generated registration identifiers (default: "MIT-DB-")
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Simulated round-trip before the submission is stored
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

/// Motivation text rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotivationConfig {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Shown in the character counter only, never enforced
    #[serde(default = "default_display_max_chars")]
    pub display_max_chars: usize,
}

/// Admin panel
///
/// The credentials are compared in plaintext on the client. This mirrors the
/// page being replaced and is not access control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,

    #[serde(default = "default_login_error_ms")]
    pub login_error_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_ms")]
    pub duration_ms: u64,
}

// Default values
fn default_key_prefix() -> String {
    "registration_".to_string()
}

fn default_id_prefix() -> String {
    "MIT-DB-".to_string()
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_min_chars() -> usize {
    50
}

fn default_display_max_chars() -> usize {
    500
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_login_error_ms() -> u64 {
    3000
}

fn default_file_stem() -> String {
    "debate_registrations".to_string()
}

fn default_notification_ms() -> u64 {
    3000
}

// Default implementations
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for MotivationConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            display_max_chars: default_display_max_chars(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
            login_error_ms: default_login_error_ms(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_stem: default_file_stem(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_ms(),
        }
    }
}

impl SubmissionConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AdminConfig {
    pub fn login_error_duration(&self) -> Duration {
        Duration::from_millis(self.login_error_ms)
    }
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./debate-forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("debate-forms.toml")
    }

    /// Parse configuration text; blank input yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(content).context("Invalid TOML configuration")?;
        Ok(config)
    }
}
