//! Engine configuration

use serde::{Deserialize, Serialize};

/// Lifecycle engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout budget for one store call, in seconds
    pub submit_timeout_secs: u64,
    /// Re-fetch the full record after a completion (stage 6) submission to
    /// pick up the server-derived equipment status
    pub refetch_on_completion: bool,
    /// Capacity of each subscriber's stage-event channel
    pub event_buffer: usize,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With submit timeout
    #[inline]
    #[must_use]
    pub fn with_submit_timeout_secs(mut self, secs: u64) -> Self {
        self.submit_timeout_secs = secs;
        self
    }

    /// With completion re-fetch toggled
    #[inline]
    #[must_use]
    pub fn with_refetch_on_completion(mut self, refetch: bool) -> Self {
        self.refetch_on_completion = refetch;
        self
    }

    /// With event channel capacity
    #[inline]
    #[must_use]
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            submit_timeout_secs: 30,
            refetch_on_completion: true,
            event_buffer: 64,
        }
    }
}
