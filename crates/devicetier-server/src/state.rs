//! Shared application state.

use devicetier_core::DeviceTierConfig;

/// Shared application state accessible from all route handlers.
///
/// Classification is stateless; only the immutable configuration is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: DeviceTierConfig,
}

impl AppState {
    pub fn new(config: DeviceTierConfig) -> Self {
        Self { config }
    }
}
