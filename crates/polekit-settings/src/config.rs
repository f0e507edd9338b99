//! Configuration and settings management for PoleKit
//!
//! Configuration is organized into logical sections:
//! - Snap settings (anchor spacing, catch radius, hit box)
//! - Bridge between the 2D world and the 3D scene
//! - Pole defaults
//! - Grid display and snapping
//! - UI preferences (initial view, surface size)
//!
//! Files are JSON or TOML. Missing keys fall back to their defaults, so a
//! config file only needs the values it changes.

use std::path::{Path, PathBuf};

use polekit_core::constants::{BRIDGE_OFFSET, BRIDGE_SCALE, DEFAULT_POLE_HEIGHT};
use polekit_designer::{
    CoordinateBridge, EditorOptions, GridSettings, SnapConfig, SurfaceSize, ViewMode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

const APP_DIR: &str = "polekit";
const CONFIG_FILE: &str = "config.toml";

/// Mapping between the 2D world and the 3D scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// World x that maps to scene x = 0
    pub offset: f64,
    /// World units per scene unit
    pub scale: f64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            offset: BRIDGE_OFFSET,
            scale: BRIDGE_SCALE,
        }
    }
}

/// Defaults applied to new poles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoleSettings {
    /// Height of a newly placed pole, in metres
    pub default_height: f64,
}

impl Default for PoleSettings {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_POLE_HEIGHT,
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// View shown at startup
    pub initial_view: ViewMode,
    /// 2D surface width in pixels
    pub surface_width: f64,
    /// 2D surface height in pixels
    pub surface_height: f64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            initial_view: ViewMode::TwoD,
            surface_width: 1200.0,
            surface_height: 800.0,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub snap: SnapConfig,
    pub bridge: BridgeSettings,
    pub poles: PoleSettings,
    pub grid: GridSettings,
    pub ui: UiSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration directory for PoleKit
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; a present but invalid file is an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(err) => {
                    debug!(%err, "No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        positive("snap.spacing_px", self.snap.spacing_px)?;
        positive("snap.max_distance", self.snap.max_distance)?;
        positive("snap.hit_half_width", self.snap.hit_half_width)?;
        if !(self.snap.ground_margin_px.is_finite() && self.snap.ground_margin_px >= 0.0) {
            return Err(ConfigError::out_of_range(
                "snap.ground_margin_px",
                self.snap.ground_margin_px,
            ));
        }

        if !self.bridge.offset.is_finite() {
            return Err(ConfigError::out_of_range("bridge.offset", self.bridge.offset));
        }
        positive("bridge.scale", self.bridge.scale)?;

        positive("poles.default_height", self.poles.default_height)?;
        positive("grid.size", self.grid.size)?;
        positive("ui.surface_width", self.ui.surface_width)?;
        positive("ui.surface_height", self.ui.surface_height)?;
        Ok(())
    }

    /// Builds the options for a new editing session.
    pub fn editor_options(&self) -> ConfigResult<EditorOptions> {
        self.validate()?;
        let bridge = CoordinateBridge::new(self.bridge.offset, self.bridge.scale)
            .map_err(|_| ConfigError::out_of_range("bridge.scale", self.bridge.scale))?;
        let surface = SurfaceSize::new(self.ui.surface_width, self.ui.surface_height)
            .map_err(|_| ConfigError::out_of_range("ui.surface_width", self.ui.surface_width))?;
        Ok(EditorOptions {
            snap: self.snap,
            bridge,
            default_height: self.poles.default_height,
            grid: self.grid,
            initial_view: self.ui.initial_view,
            surface: Some(surface),
        })
    }
}
