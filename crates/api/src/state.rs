//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::DataSource;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The data source is fixed for the lifetime of
/// the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    data: DataSource,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `data` - Data source selected at startup
    #[must_use]
    pub fn new(config: ApiConfig, data: DataSource) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, data }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the data source.
    #[must_use]
    pub fn data(&self) -> &DataSource {
        &self.inner.data
    }
}
