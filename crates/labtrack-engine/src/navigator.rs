//! Stage navigation over one record snapshot
//!
//! A [`Navigator`] holds the client's view of a single request: the record
//! snapshot, the active sequence resolved from it, and a review pointer.
//! Forward movement requires the current stage to be complete; backward
//! movement is always allowed and read-only. Edit rights are checked here,
//! before any submission leaves the client.
//!
//! The navigator never decides progress on its own. After every accepted
//! submission [`Navigator::sync_with`] adopts the store's echoed record,
//! including `current_step` and `completed_steps`, wholesale.

use crate::error::TransitionError;
use labtrack_record::{Caller, Request, Role, StageId};
use labtrack_stages::{completed_stage_count, ActiveSequence, StageRegistry};

/// Stage-to-stage movement and edit gating for one request
#[derive(Debug, Clone)]
pub struct Navigator {
    registry: StageRegistry,
    record: Request,
    sequence: ActiveSequence,
    position: StageId,
    in_flight: bool,
}

impl Navigator {
    /// Build a navigator positioned at the record's server-reported stage
    #[must_use]
    pub fn new(record: Request, registry: StageRegistry) -> Self {
        let sequence = ActiveSequence::for_record(&record, &registry);
        let position = clamp_into(record.current_step, &sequence);
        Self {
            registry,
            record,
            sequence,
            position,
            in_flight: false,
        }
    }

    /// The record snapshot being navigated
    #[inline]
    #[must_use]
    pub fn record(&self) -> &Request {
        &self.record
    }

    /// Stage the review pointer is on
    #[inline]
    #[must_use]
    pub fn position(&self) -> StageId {
        self.position
    }

    /// Active sequence resolved from the current snapshot
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> &ActiveSequence {
        &self.sequence
    }

    /// Whether a submission is awaiting the store's answer
    #[inline]
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Locally recomputed completed-stage count
    ///
    /// Evaluates the snapshot from stage 1 upward; a skipped approval stage
    /// counts as satisfied. Matches the server's count except in the window
    /// between a local edit and its accepted echo.
    #[inline]
    #[must_use]
    pub fn completed(&self) -> u8 {
        completed_stage_count(&self.record, &self.registry)
    }

    /// Whether the record has reached its terminal stage and satisfied it
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.registry
            .get(StageId::COMPLETION)
            .is_some_and(|s| s.is_satisfied_by(&self.record))
    }

    /// Move the pointer one stage forward
    ///
    /// Requires the pointed-at stage to be complete on the current snapshot
    /// and no submission in flight. Stepping past the terminal stage is not
    /// defined.
    pub fn advance(&mut self) -> Result<StageId, TransitionError> {
        if self.in_flight {
            return Err(TransitionError::SubmissionInFlight);
        }
        let here = self.position;
        let satisfied = self
            .registry
            .get(here)
            .is_some_and(|s| s.is_satisfied_by(&self.record));
        if !satisfied {
            return Err(TransitionError::OutOfOrder {
                stage: self
                    .sequence
                    .successor(here)
                    .unwrap_or(StageId::COMPLETION),
                current: here,
            });
        }
        match self.sequence.successor(here) {
            Some(next) => {
                self.position = next;
                Ok(next)
            }
            None => Err(TransitionError::Terminal { stage: here }),
        }
    }

    /// Move the pointer one stage back for review
    ///
    /// Always allowed; earlier stages are read-only for non-owners and the
    /// pointer at the first stage simply stays put.
    pub fn retreat(&mut self) -> Option<StageId> {
        let prev = self.sequence.predecessor(self.position)?;
        self.position = prev;
        Some(prev)
    }

    /// Whether the caller may edit the given stage on this snapshot
    ///
    /// Checks, in order: no submission in flight, the stage is part of the
    /// active sequence, the record is still open, the stage is not beyond
    /// the server-reported frontier, the caller's role owns the stage, and
    /// the stage-1/2 author lock.
    pub fn can_edit(&self, stage: StageId, caller: &Caller) -> Result<(), TransitionError> {
        if self.in_flight {
            return Err(TransitionError::SubmissionInFlight);
        }
        if !self.sequence.contains(stage) {
            return Err(TransitionError::NotInSequence { stage });
        }
        if self.is_closed() {
            return Err(TransitionError::Terminal {
                stage: StageId::COMPLETION,
            });
        }
        if stage.ordinal() > self.record.current_step.ordinal() {
            return Err(TransitionError::OutOfOrder {
                stage,
                current: self.record.current_step,
            });
        }
        let owner = self
            .registry
            .owner(stage)
            .ok_or(TransitionError::NotInSequence { stage })?;
        if caller.role != owner {
            return Err(TransitionError::RoleMismatch {
                stage,
                role: caller.role,
                owner,
            });
        }
        // Once endorsed, stages 1-2 are read-only for everyone but the author
        if stage.ordinal() <= StageId::ENDORSEMENT.ordinal()
            && self.record.completed_steps >= StageId::ENDORSEMENT.ordinal()
            && caller.staff_id != self.record.created_by
        {
            return Err(TransitionError::Locked { stage });
        }
        Ok(())
    }

    /// Mark a submission as awaiting the store
    ///
    /// A second submission while one is pending is rejected rather than
    /// queued.
    pub fn begin_submission(&mut self) -> Result<(), TransitionError> {
        if self.in_flight {
            return Err(TransitionError::SubmissionInFlight);
        }
        self.in_flight = true;
        Ok(())
    }

    /// Clear the in-flight flag after the store answered, either way
    pub fn finish_submission(&mut self) {
        self.in_flight = false;
    }

    /// Adopt the store's echoed record as the new snapshot
    ///
    /// The echo's `current_step` and `completed_steps` win over anything
    /// computed locally. The active sequence is re-resolved, so an in-house
    /// resolution moves the pointer straight from stage 4 to stage 6.
    pub fn sync_with(&mut self, echo: Request) {
        self.sequence = ActiveSequence::for_record(&echo, &self.registry);
        self.position = clamp_into(echo.current_step, &self.sequence);
        self.record = echo;
    }
}

/// Nearest sequence member at or after the given stage
fn clamp_into(stage: StageId, sequence: &ActiveSequence) -> StageId {
    if sequence.contains(stage) {
        return stage;
    }
    sequence
        .ids()
        .iter()
        .copied()
        .find(|s| s.ordinal() > stage.ordinal())
        .unwrap_or(StageId::COMPLETION)
}

/// Stages the given role may ever edit, in ordinal order
#[must_use]
pub fn editable_stages(role: Role, registry: &StageRegistry) -> Vec<StageId> {
    registry
        .stages()
        .iter()
        .filter(|s| s.owner == role)
        .map(|s| s.id)
        .collect()
}
