//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::calculation::AttendanceEngine;
use crate::config::ConfigLoader;
use crate::storage::{AttendanceRepository, InMemoryStore};

/// Shared application state.
///
/// Holds the loaded configuration, an engine built from its policy, and the
/// repository backing timesheet and leave records.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    engine: Arc<AttendanceEngine>,
    repository: Arc<RwLock<AttendanceRepository<InMemoryStore>>>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, InMemoryStore::new())
    }

    /// Creates a new application state over an existing store.
    pub fn with_store(config: ConfigLoader, store: InMemoryStore) -> Self {
        let engine = AttendanceEngine::new(config.policy().clone());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            repository: Arc::new(RwLock::new(AttendanceRepository::new(store))),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the attendance engine.
    pub fn engine(&self) -> &AttendanceEngine {
        &self.engine
    }

    /// Returns the shared repository.
    pub fn repository(&self) -> &RwLock<AttendanceRepository<InMemoryStore>> {
        &self.repository
    }
}
