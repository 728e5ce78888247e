//! Shared application state for request handlers.

use std::sync::Arc;

use coordinator::Coordinator;
use platform_core::CallPlatform;

/// Shared state available to all routes.
#[derive(Clone)]
pub struct AppState {
    /// Event coordinator for the meeting lifecycle.
    pub coordinator: Arc<Coordinator>,
    /// Call platform, used directly for webhook signature checks.
    pub calls: Arc<dyn CallPlatform>,
}

impl AppState {
    pub fn new(coordinator: Arc<Coordinator>, calls: Arc<dyn CallPlatform>) -> Self {
        Self { coordinator, calls }
    }
}
