//! Stage-transition event fan-out
//!
//! The notification collaborator learns only that a stage transition
//! happened: which request, which stage. Content and delivery are out of
//! scope. Subscribers that fall behind or disappear never fail a
//! submission.

use labtrack_record::{RequestId, StageId};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// A stage submission was accepted by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEvent {
    /// Request the transition belongs to
    pub request_id: RequestId,
    /// Stage that was submitted
    pub stage_id: StageId,
}

/// Fan-out of [`StageEvent`]s to any number of subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Mutex<Vec<mpsc::Sender<StageEvent>>>,
}

impl EventBus {
    /// Create new empty bus
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber with the given channel capacity
    #[must_use]
    pub fn subscribe(&self, capacity: usize) -> mpsc::Receiver<StageEvent> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.senders.lock().unwrap_or_else(|e| e.into_inner()).push(tx);
        rx
    }

    /// Publish an event to all live subscribers
    ///
    /// Best effort: full or closed channels are skipped, closed ones are
    /// pruned.
    pub fn publish(&self, event: StageEvent) {
        let mut senders = self.senders.lock().unwrap_or_else(|e| e.into_inner());
        senders.retain(|tx| match tx.try_send(event) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }

    /// Number of live subscribers
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
