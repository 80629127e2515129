//! Error types for the lifecycle engine
//!
//! Three recoverable-vs-fatal classes, per the engine's failure model:
//! - [`ValidationError`]: missing required fields, caught locally before any
//!   persistence call; recoverable inline
//! - [`SyncError`]: transport/store failure during a stage update; local
//!   state stays intact and the caller decides whether to resubmit
//! - [`TransitionError`]: attempts to enter or edit a stage outside the
//!   caller's reach; should be unreachable through a well-behaved UI but
//!   fails closed rather than silently succeeding
//!
//! No error is fatal to the process; all are scoped to one request.

use labtrack_record::{FieldKey, RequestId, Role, StageId};

/// Umbrella error for every engine operation
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Required fields missing for the submitted stage
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Transport or store failure during a stage update
    #[error("sync failed: {0}")]
    Sync(#[from] SyncError),

    /// Stage not reachable, not owned, or locked for this caller
    #[error("illegal transition: {0}")]
    Transition(#[from] TransitionError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Whether resubmitting the same stage may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Sync(SyncError::Transport { .. }) | Self::Sync(SyncError::Timeout { .. })
        )
    }
}

/// Missing required fields for a stage submission
///
/// Raised client-side before any persistence call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} is missing required fields: {}", join_fields(missing))]
pub struct ValidationError {
    /// The stage that failed validation
    pub stage: StageId,
    /// Every required field found blank
    pub missing: Vec<FieldKey>,
}

fn join_fields(fields: &[FieldKey]) -> String {
    fields
        .iter()
        .map(FieldKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Transport/store failure during a stage update
///
/// Carries the attempted stage and field payload so the caller can
/// re-present the form for resubmission. The engine never retries on its
/// own and never persists a partial field set.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The store reported a failure
    #[error("transport failure submitting {stage}: {reason}")]
    Transport {
        stage: StageId,
        reason: String,
        payload: serde_json::Map<String, serde_json::Value>,
    },

    /// The store did not answer within the configured budget
    #[error("{stage} submission timed out after {secs}s")]
    Timeout {
        stage: StageId,
        secs: u64,
        payload: serde_json::Map<String, serde_json::Value>,
    },

    /// No record with this id
    #[error("request {0} not found")]
    NotFound(RequestId),
}

impl SyncError {
    /// The stage whose submission failed, when one was in flight
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Option<StageId> {
        match self {
            Self::Transport { stage, .. } | Self::Timeout { stage, .. } => Some(*stage),
            Self::NotFound(_) => None,
        }
    }
}

/// Attempt to enter or edit a stage outside the caller's reach
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Stage excluded from this record's active sequence
    #[error("{stage} is not in this record's active sequence")]
    NotInSequence { stage: StageId },

    /// Stage lies beyond the record's current progress
    #[error("{stage} is not reachable yet (record is at {current})")]
    OutOfOrder { stage: StageId, current: StageId },

    /// Caller's role does not own the stage
    #[error("{role} cannot edit {stage} (owned by {owner})")]
    RoleMismatch {
        stage: StageId,
        role: Role,
        owner: Role,
    },

    /// Stages 1-2 are read-only once the request is endorsed
    #[error("{stage} is locked; only the original author may edit it")]
    Locked { stage: StageId },

    /// The record is closed
    #[error("record is closed; no transitions are defined past {stage}")]
    Terminal { stage: StageId },

    /// A submission is already awaiting the store's answer
    #[error("a submission is in flight; navigation is blocked until it resolves")]
    SubmissionInFlight,
}
