//! Configuration loading and management for the duty compliance engine.
//!
//! This module loads injected policy from YAML files: per-location attendance
//! windows and tolerances, and the per-role standards table.
//!
//! # Example
//!
//! ```no_run
//! use duty_compliance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default location: {}", config.config().settings().default_location);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_LOCATION_CODE, LocationPolicy, PolicyConfig, PolicySettings, StandardsTable,
};
