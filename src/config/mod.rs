// SPDX-License-Identifier: MPL-2.0
//! Toaster configuration persisted as TOML.
//!
//! The file is named `toaster.toml` and lives in the application config
//! directory. It is organized in sections:
//!
//! - `[toaster]` - Container placement and stacking
//! - `[defaults]` - Options applied to every toast
//! - `[blank]`, `[success]`, `[error]`, `[loading]`, `[custom]` - Per-type
//!   overrides of `[defaults]`
//!
//! Every field is optional; missing fields fall back to the constants in
//! [`defaults`].
//!
//! # Example
//!
//! ```toml
//! [toaster]
//! position = "bottom-right"
//! gutter = 12.0
//!
//! [toaster.style]
//! color = "#202020"
//!
//! [defaults]
//! duration_ms = 3000
//!
//! [loading]
//! persistent = true
//!
//! [error.style]
//! background = "#b00020"
//! ```

pub mod defaults;

use crate::error::{Error, Result};
use crate::toast::{
    AriaProps, DefaultToastOptions, IconTheme, Lifetime, Style, ToastOptions, ToastPosition,
    ToastType, ToasterOptions,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "toaster.toml";
const APP_NAME: &str = "IcedToast";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_TOAST_CONFIG_DIR";

// =============================================================================
// Sections
// =============================================================================

/// `[toaster]` section: where and how the stack is drawn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToasterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ToastPosition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_order: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gutter: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_offset: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_motion: Option<bool>,

    /// Overlay container style, e.g. `background`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

/// Options shared by `[defaults]` and the per-type sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToastDefaults {
    /// Lifetime in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Never auto-dismiss. Takes precedence over `duration_ms`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ToastPosition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_theme: Option<IconTheme>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria: Option<AriaProps>,
}

impl ToastDefaults {
    #[must_use]
    pub fn lifetime(&self) -> Option<Lifetime> {
        if self.persistent == Some(true) {
            Some(Lifetime::Infinite)
        } else {
            self.duration_ms.map(Lifetime::from_millis)
        }
    }

    #[must_use]
    pub fn to_options<M>(&self) -> ToastOptions<M> {
        ToastOptions {
            duration: self.lifetime(),
            aria: self.aria,
            class_name: self.class_name.clone(),
            style: self.style.clone(),
            position: self.position,
            icon_theme: self.icon_theme.clone(),
            ..ToastOptions::default()
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub toaster: ToasterConfig,

    #[serde(default)]
    pub defaults: ToastDefaults,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank: Option<ToastDefaults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<ToastDefaults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToastDefaults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<ToastDefaults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<ToastDefaults>,
}

impl Config {
    /// Per-type section for `kind`, if present.
    #[must_use]
    pub fn for_type(&self, kind: ToastType) -> Option<&ToastDefaults> {
        match kind {
            ToastType::Blank => self.blank.as_ref(),
            ToastType::Success => self.success.as_ref(),
            ToastType::Error => self.error.as_ref(),
            ToastType::Loading => self.loading.as_ref(),
            ToastType::Custom => self.custom.as_ref(),
        }
    }

    #[must_use]
    pub fn toast_options<M: Clone>(&self) -> DefaultToastOptions<M> {
        ToastType::ALL.into_iter().fold(
            DefaultToastOptions::new(self.defaults.to_options()),
            |options, kind| match self.for_type(kind) {
                Some(typed) => options.with_type(kind, typed.to_options()),
                None => options,
            },
        )
    }

    /// Builds toaster options, filling unset fields with the defaults.
    #[must_use]
    pub fn toaster_options<M: Clone>(&self) -> ToasterOptions<M> {
        let fallback = ToasterOptions::<M>::default();
        ToasterOptions {
            position: self.toaster.position.unwrap_or(fallback.position),
            reverse_order: self.toaster.reverse_order.unwrap_or(fallback.reverse_order),
            gutter: self.toaster.gutter.unwrap_or(fallback.gutter),
            container_offset: self
                .toaster
                .container_offset
                .unwrap_or(fallback.container_offset),
            reduce_motion: self.toaster.reduce_motion.unwrap_or(fallback.reduce_motion),
            toast_options: self.toast_options(),
            container_style: self.toaster.style.clone().unwrap_or_default(),
            ..fallback
        }
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Returns the config directory.
///
/// Priority: `override_path`, then [`ENV_CONFIG_DIR`] (if set and non-empty),
/// then the platform config directory.
#[must_use]
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns `(config, warning)`. A missing file yields the defaults silently;
/// an unreadable or invalid file yields the defaults and a warning.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    match config_path_with_override(base_dir) {
        Some(path) => load_or_default(&path),
        None => (Config::default(), None),
    }
}

/// Loads a specific file with the same fallback rules as [`load`].
pub fn load_or_default(path: &Path) -> (Config, Option<String>) {
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(path) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "falling back to default toaster config");
            (Config::default(), Some(err.to_string()))
        }
    }
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
/// if it is not a valid configuration.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{DEFAULT_CONTAINER_OFFSET, DEFAULT_GUTTER};
    use crate::toast::AriaRole;
    use tempfile::tempdir;

    fn sample() -> Config {
        Config {
            toaster: ToasterConfig {
                position: Some(ToastPosition::BottomRight),
                reverse_order: Some(true),
                gutter: Some(12.0),
                ..ToasterConfig::default()
            },
            defaults: ToastDefaults {
                duration_ms: Some(3000),
                class_name: Some("toast".to_string()),
                ..ToastDefaults::default()
            },
            loading: Some(ToastDefaults {
                persistent: Some(true),
                ..ToastDefaults::default()
            }),
            error: Some(ToastDefaults {
                style: Some(Style::new().with("background", "#b00020")),
                aria: Some(AriaProps {
                    role: AriaRole::Alert,
                    ..AriaProps::default()
                }),
                ..ToastDefaults::default()
            }),
            ..Config::default()
        }
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = sample();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(
            load_from_path(&config_path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn invalid_file_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[toaster]\nposition = \"middle\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn missing_file_yields_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_writes_into_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&sample(), Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[toaster]\ngutter = 4.0\n").expect("valid toml");
        let options = config.toaster_options::<String>();

        assert_eq!(options.gutter, 4.0);
        assert_eq!(options.position, ToastPosition::TopCenter);
        assert_eq!(options.container_offset, DEFAULT_CONTAINER_OFFSET);
        assert!(!options.reverse_order);
    }

    #[test]
    fn toaster_style_table_becomes_container_style() {
        let config: Config =
            toml::from_str("[toaster.style]\nbackground = \"#101010\"\n").expect("valid toml");
        let options = config.toaster_options::<String>();

        assert_eq!(options.container_style.get("background"), Some("#101010"));
        assert!(Config::default()
            .toaster_options::<String>()
            .container_style
            .is_empty());
    }

    #[test]
    fn default_config_maps_to_default_toaster_options() {
        let options = Config::default().toaster_options::<String>();
        assert_eq!(options.gutter, DEFAULT_GUTTER);
        assert!(options.toast_options.per_type.is_empty());
    }

    #[test]
    fn per_type_sections_become_type_options() {
        let options = sample().toaster_options::<String>();
        let defaults = &options.toast_options;

        assert_eq!(defaults.base.duration, Some(Lifetime::from_millis(3000)));
        assert_eq!(
            defaults.for_type(ToastType::Loading).and_then(|o| o.duration),
            Some(Lifetime::Infinite)
        );
        assert_eq!(
            defaults
                .for_type(ToastType::Error)
                .and_then(|o| o.aria)
                .map(|aria| aria.role),
            Some(AriaRole::Alert)
        );
        assert!(defaults.for_type(ToastType::Success).is_none());
        assert_eq!(options.position, ToastPosition::BottomRight);
        assert!(options.reverse_order);
    }

    #[test]
    fn persistent_wins_over_duration() {
        let defaults = ToastDefaults {
            duration_ms: Some(1000),
            persistent: Some(true),
            ..ToastDefaults::default()
        };
        assert_eq!(defaults.lifetime(), Some(Lifetime::Infinite));

        let finite = ToastDefaults {
            duration_ms: Some(1000),
            persistent: Some(false),
            ..ToastDefaults::default()
        };
        assert_eq!(finite.lifetime(), Some(Lifetime::from_millis(1000)));
    }

    #[test]
    fn override_path_takes_precedence_for_config_dir() {
        let custom = PathBuf::from("/custom/config");
        assert_eq!(config_dir_with_override(Some(custom.clone())), Some(custom));
    }
}
