//! Shared application state for the HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::cli::LocalStorage;
use crate::config::settings::ServiceSettings;
use crate::core::service::ConverterService;

pub struct AppState {
    pub service: ConverterService<LocalStorage>,

    /// Server start time (for uptime reporting).
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: ConverterService<LocalStorage>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }

    pub fn from_settings(settings: &ServiceSettings) -> Self {
        let storage = LocalStorage::new(settings.output_path.clone());
        Self::new(ConverterService::from_config(storage, settings))
    }
}

/// Type alias used in axum handlers.
pub type SharedState = Arc<AppState>;
