//! TOML-based settings for the style editor.
//!
//! Reads `EditorConfig` from `config.toml` in the platform config
//! directory, unless a directory is given explicitly:
//! - Windows:  `%APPDATA%\WebDemangler\config.toml`
//! - Linux:    `~/.config/web-demangler/config.toml`
//! - macOS:    `~/Library/Application Support/WebDemangler/config.toml`
//!
//! ```toml
//! [general]
//! log_level = "info"
//! default_preset = "Mozilla"
//!
//! [storage]
//! state_file = "state.toml"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]`, so a missing file, a
//! missing section or a missing key all fall back to the same defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use style_core::Preset;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `default_preset` does not name a known preset.
    #[error("unknown default preset {0:?}")]
    UnknownPreset(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level editor configuration stored on disk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EditorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// General behaviour settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Preset used when no style has been stored yet.
    #[serde(default = "default_preset")]
    pub default_preset: String,
}

/// Where editor state lives between runs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// State file name, relative to the config directory unless absolute.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_preset() -> String {
    Preset::Mozilla.name().to_string()
}
fn default_state_file() -> PathBuf {
    PathBuf::from("state.toml")
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_preset: default_preset(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

impl EditorConfig {
    /// The configured first-run preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] when `default_preset` is not a
    /// preset name.
    pub fn first_run_preset(&self) -> Result<Preset, ConfigError> {
        Preset::from_name(&self.general.default_preset)
            .ok_or_else(|| ConfigError::UnknownPreset(self.general.default_preset.clone()))
    }

    /// Absolute location of the state file for a given config directory.
    pub fn state_file_path(&self, config_dir: &Path) -> PathBuf {
        if self.storage.state_file.is_absolute() {
            self.storage.state_file.clone()
        } else {
            config_dir.join(&self.storage.state_file)
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the directory holding `config.toml` and the state file.
///
/// An explicit directory wins over the platform default.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when no override is given and
/// the platform config base directory cannot be determined.
pub fn config_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(dir) => Ok(dir),
        None => platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir),
    }
}

/// Resolves the full path to the config file inside `dir`.
pub fn config_file_path(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

/// Loads `EditorConfig` from `dir`, returning `EditorConfig::default()` if
/// the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(dir: &Path) -> Result<EditorConfig, ConfigError> {
    let path = config_file_path(dir);

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: EditorConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EditorConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Resolves the platform config directory for the editor.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("WebDemangler"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("web-demangler"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("WebDemangler"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("style-editor-config-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_editor_config_default_values() {
        // Arrange / Act
        let cfg = EditorConfig::default();

        // Assert
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.general.default_preset, "Mozilla");
        assert_eq!(cfg.storage.state_file, PathBuf::from("state.toml"));
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let cfg: EditorConfig = toml::from_str("[general]\nlog_level = \"debug\"\n").unwrap();

        assert_eq!(cfg.general.log_level, "debug");
        assert_eq!(cfg.general.default_preset, "Mozilla");
        assert_eq!(cfg.storage, StorageConfig::default());
    }

    #[test]
    fn test_first_run_preset_parses_configured_name() {
        let mut cfg = EditorConfig::default();
        cfg.general.default_preset = "webkit".to_string();
        assert_eq!(cfg.first_run_preset().unwrap(), Preset::WebKit);

        cfg.general.default_preset = "Linux".to_string();
        assert!(matches!(cfg.first_run_preset(), Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn test_state_file_path_is_relative_to_config_dir() {
        let cfg = EditorConfig::default();
        assert_eq!(
            cfg.state_file_path(Path::new("/tmp/editor")),
            PathBuf::from("/tmp/editor/state.toml")
        );
    }

    #[test]
    fn test_config_dir_prefers_override() {
        let dir = config_dir(Some(PathBuf::from("/opt/editor"))).unwrap();
        assert_eq!(dir, PathBuf::from("/opt/editor"));
    }

    #[test]
    fn test_load_config_returns_default_when_file_missing() {
        let dir = scratch_dir("missing");
        assert_eq!(load_config(&dir).unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_load_config_reads_file_in_dir() {
        // Arrange
        let dir = scratch_dir("present");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            config_file_path(&dir),
            "[general]\ndefault_preset = \"Google\"\n\n[storage]\nstate_file = \"data/state.toml\"\n",
        )
        .unwrap();

        // Act
        let cfg = load_config(&dir).unwrap();

        // Assert
        assert_eq!(cfg.general.default_preset, "Google");
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.first_run_preset().unwrap(), Preset::Google);
        assert_eq!(
            cfg.state_file_path(&dir),
            dir.join("data").join("state.toml")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let dir = scratch_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(config_file_path(&dir), "[general\n").unwrap();

        assert!(matches!(load_config(&dir), Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
