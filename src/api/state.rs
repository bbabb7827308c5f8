//! Application state for the Duty Compliance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::ComplianceEngine;

/// Shared application state.
///
/// Holds the compliance engine built from the loaded policy. The engine is
/// immutable, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ComplianceEngine>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self::from_engine(ComplianceEngine::new(config.config().clone()))
    }

    /// Creates a new application state around an existing engine.
    pub fn from_engine(engine: ComplianceEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &ComplianceEngine {
        &self.engine
    }

    /// Returns a shared handle to the engine for use on worker tasks.
    pub fn shared_engine(&self) -> Arc<ComplianceEngine> {
        Arc::clone(&self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_state_shares_one_engine() {
        let state = AppState::new(ConfigLoader::from_config(PolicyConfig::default()));
        let other = state.clone();
        assert!(Arc::ptr_eq(&state.shared_engine(), &other.shared_engine()));
    }
}
