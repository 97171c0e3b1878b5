//! Layered settings: defaults, an optional TOML file, then `WPGM_*`
//! environment variables (`WPGM_SERVER__PORT=8080`).

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::visualization::RenderStyle;

pub const DEFAULT_CONFIG_PATH: &str = "wpgm-editor.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub render: RenderStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Request body limit for the upload form.
    pub max_upload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load settings. An explicit `path` must exist; otherwise
/// [`DEFAULT_CONFIG_PATH`] is read if present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false),
    };

    let settings: Settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("WPGM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    info!("Loaded settings: {:?}", settings);
    Ok(settings)
}

/// Parse settings from a TOML string, without the environment layer.
pub fn settings_from_toml(toml: &str) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
