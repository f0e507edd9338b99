//! # PoleKit
//!
//! Place structural poles on a pannable, zoomable 2D schematic or in an
//! orbit-controlled 3D scene. Both views edit one pole collection and agree
//! on every position through a single coordinate bridge.
//!
//! ## Architecture
//!
//! PoleKit is organized as a workspace with multiple crates:
//!
//! 1. **polekit-core** - Error taxonomy, sharing aliases, shared constants
//! 2. **polekit-designer** - Viewport, snapping, placement state machine, 3D view, renderer
//! 3. **polekit-settings** - JSON/TOML configuration
//! 4. **polekit** - This crate: logging setup, session replay, headless binary

pub mod session;

pub use polekit_designer as designer;
pub use polekit_settings as settings;

pub use polekit_core::{Error, InputError, PoleError, ProfileError, Result};

pub use polekit_designer::{
    CanvasFrame, Confirm, CoordinateBridge, CursorMode, Editor, EditorOptions, InputEvent,
    PlacementController, PlacementEvent, PlacementState, Point, Pole, PoleId, PoleInfo, PoleStore,
    Profile, ProfileCatalog, SceneView, SnapKind, SnapPoint, ViewMode, Viewport,
};

pub use polekit_settings::Config;

pub use session::{Session, SessionReport, SessionStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for command output
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
