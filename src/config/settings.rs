use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::editor::EditorOptions;
use crate::util::paths::config_path;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address the web server binds to
    pub host: String,
    /// Port the web server listens on
    pub port: u16,
    /// How long the simulated screen recording runs
    pub recording_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            recording_delay: Duration::from_secs(2),
        }
    }
}

/// Partial config as parsed from config.toml; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    server: Option<TomlServerConfig>,
    editor: Option<TomlEditorConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlEditorConfig {
    recording_delay_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default location
    /// (~/.tourforge/config.toml), falling back to defaults for anything
    /// missing or unparsable.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load configuration from a specific path, defaults first.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return config,
        };

        let parsed: TomlConfig = match toml::from_str(&contents) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unparsable config file");
                return config;
            }
        };

        if let Some(server) = parsed.server {
            if let Some(host) = server.host {
                config.host = host;
            }
            if let Some(port) = server.port {
                config.port = port;
            }
        }

        if let Some(editor) = parsed.editor {
            if let Some(ms) = editor.recording_delay_ms {
                config.recording_delay = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Editor tunables derived from this configuration
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            recording_delay: self.recording_delay,
        }
    }
}
