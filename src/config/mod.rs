use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::{
    EditorSettings, DEFAULT_GRID_SIZE, DEFAULT_MAX_GRID_SIZE, DEFAULT_PIXEL_SIZE, GRID_SIZE_LIMIT,
    MAX_HISTORY_CAPACITY, MAX_PIXEL_SIZE, MIN_PIXEL_SIZE,
};
use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "pixgrid";
const APP_CONFIG_FILE: &str = "config.json";

/// Editor settings from `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub grid_size: Option<u32>,
    #[serde(default)]
    pub pixel_size: Option<u32>,
    #[serde(default)]
    pub max_grid_size: Option<u32>,
    #[serde(default)]
    pub default_color: Option<String>,
    #[serde(default)]
    pub grid_line_color: Option<String>,
    #[serde(default)]
    pub history_capacity: Option<usize>,
}

impl AppConfig {
    /// Resolves into editor settings, replacing out-of-range or malformed
    /// values with defaults.
    pub fn editor_settings(&self) -> EditorSettings {
        let defaults = EditorSettings::default();
        let max_grid_size = config_bounded(
            "max_grid_size",
            self.max_grid_size,
            1..=GRID_SIZE_LIMIT,
            DEFAULT_MAX_GRID_SIZE,
        );
        let grid_size = config_bounded(
            "grid_size",
            self.grid_size,
            1..=max_grid_size,
            DEFAULT_GRID_SIZE.min(max_grid_size),
        );

        EditorSettings {
            grid_size,
            pixel_size: config_bounded(
                "pixel_size",
                self.pixel_size,
                MIN_PIXEL_SIZE..=MAX_PIXEL_SIZE,
                DEFAULT_PIXEL_SIZE,
            ),
            max_grid_size,
            default_color: config_color(self.default_color.as_deref(), defaults.default_color),
            grid_line_color: config_color(
                self.grid_line_color.as_deref(),
                defaults.grid_line_color,
            ),
            history_capacity: config_bounded(
                "history_capacity",
                self.history_capacity,
                1..=MAX_HISTORY_CAPACITY,
                defaults.history_capacity,
            ),
        }
    }
}

fn config_bounded<T>(field: &str, value: Option<T>, range: RangeInclusive<T>, fallback: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Debug,
{
    match value {
        Some(value) if range.contains(&value) => value,
        Some(value) => {
            tracing::warn!(field, ?value, ?range, "config value out of range; using default");
            fallback
        }
        None => fallback,
    }
}

fn config_color(value: Option<&str>, fallback: Color) -> Color {
    let Some(value) = value else {
        return fallback;
    };
    Color::parse_hex(value).unwrap_or_else(|| {
        tracing::warn!(value, "invalid color in config.json; using default");
        fallback
    })
}

/// Directories the config file is looked up in, captured from the environment
/// once so lookups stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ConfigDirs {
    pub xdg_config_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl ConfigDirs {
    pub fn from_env() -> Self {
        Self {
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// `$XDG_CONFIG_HOME/pixgrid/config.json`, or under `$HOME/.config` when
    /// the XDG variable is unset or empty.
    pub fn config_file(&self) -> Result<PathBuf, ConfigPathError> {
        let root = match self.xdg_config_home.as_deref() {
            Some(xdg) if !xdg.as_os_str().is_empty() => xdg.to_path_buf(),
            _ => self
                .home
                .as_deref()
                .map(|home| home.join(".config"))
                .ok_or(ConfigPathError::MissingHomeDirectory)?,
        };
        Ok(root.join(APP_DIR).join(APP_CONFIG_FILE))
    }
}

pub fn load_app_config() -> AppConfig {
    load_app_config_with(&ConfigDirs::from_env())
}

fn load_app_config_with(dirs: &ConfigDirs) -> AppConfig {
    match dirs.config_file() {
        Ok(path) => load_app_config_from(&path),
        Err(err) => {
            tracing::debug!(?err, "no config directory; using defaults");
            AppConfig::default()
        }
    }
}

pub fn load_app_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}
