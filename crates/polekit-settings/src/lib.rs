//! PoleKit Settings Crate
//!
//! Handles editor configuration: snapping, the 2D/3D bridge, pole defaults,
//! grid, and initial view. Files are JSON or TOML, chosen by extension.

pub mod config;
pub mod error;

pub use config::{BridgeSettings, Config, PoleSettings, UiSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
