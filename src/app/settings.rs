use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::domain::{AppConfig, Endpoint, ValidationError};
use crate::ports::ConfigStore;

/// Persisted holder of the host endpoint.
///
/// Reads are fail-soft: anything unreadable falls back to the default
/// endpoint. Writes are synchronous and complete before `set` returns, so a
/// status check issued afterwards sees the new value on disk and in memory.
pub struct Settings {
    store: Arc<dyn ConfigStore>,
    config: RwLock<AppConfig>,
    endpoint: RwLock<Endpoint>,
}

impl Settings {
    /// Load settings from the store, falling back to defaults on any error.
    pub fn load(store: Arc<dyn ConfigStore>) -> Self {
        let mut config = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not load configuration, using defaults");
            AppConfig::new()
        });

        let endpoint = Endpoint::parse(&config.remote.endpoint).unwrap_or_else(|e| {
            warn!(error = %e, "Stored endpoint is invalid, using default");
            Endpoint::default()
        });
        config.remote.endpoint = endpoint.to_string();

        Self {
            store,
            config: RwLock::new(config),
            endpoint: RwLock::new(endpoint),
        }
    }

    /// Current endpoint.
    pub fn get(&self) -> Endpoint {
        self.endpoint.read().clone()
    }

    /// Validate, normalize and persist a new endpoint.
    ///
    /// Blank or unparsable input leaves the stored endpoint untouched.
    pub fn set(&self, url: &str) -> Result<Endpoint, ValidationError> {
        let endpoint = Endpoint::parse(url)?;

        let snapshot = {
            let mut config = self.config.write();
            config.remote.endpoint = endpoint.to_string();
            config.clone()
        };
        *self.endpoint.write() = endpoint.clone();

        match self.store.save(&snapshot) {
            Ok(()) => info!(endpoint = %endpoint, "Endpoint saved"),
            Err(e) => warn!(endpoint = %endpoint, error = %e, "Endpoint changed but could not be saved"),
        }

        Ok(endpoint)
    }

    /// Snapshot of the full configuration.
    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }
}
