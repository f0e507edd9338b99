//! # PoleKit Core
//!
//! Core types and utilities shared by the PoleKit crates.
//! Provides the error taxonomy, the single-threaded sharing aliases used to
//! hand one pole collection to several views, and the numeric constants both
//! views must agree on.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, InputError, PoleError, ProfileError, Result};

pub use types::{shared, Shared};
