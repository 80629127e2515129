//! Branch resolution
//!
//! Decides whether Admin approval (stage 5) is part of a record's active
//! stage sequence. A request resolved in-house never reaches the Admin: the
//! active sequence becomes `[1, 2, 3, 4, 6]` and stage 4's successor is
//! stage 6.
//!
//! The decision is fixed at the moment the resolution stage is finalized.
//! Editing `resolved_inhouse` afterwards does not re-route a record the
//! server has already jumped; the echoed `current_step` stays authoritative.
//! That is a deliberate decision, not an oversight (see DESIGN.md).

use crate::registry::StageRegistry;
use labtrack_record::{Request, StageId};

/// Whether the given stage drops out of the record's active sequence
///
/// Only Admin approval can be skipped, and only once the resolution stage
/// has been finalized with `resolved_inhouse` set.
#[must_use]
pub fn is_skipped(stage_id: StageId, record: &Request, registry: &StageRegistry) -> bool {
    if stage_id != StageId::APPROVAL {
        return false;
    }
    if record.resolved_inhouse != Some(true) {
        return false;
    }
    // The branch is decided when stage 4 is submitted complete, not before
    registry
        .get(StageId::RESOLUTION)
        .is_some_and(|s| s.is_satisfied_by(record))
}

/// The ordered subset of stages applicable to a specific record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSequence {
    ids: Vec<StageId>,
}

impl ActiveSequence {
    /// Resolve the active sequence for a record snapshot
    #[must_use]
    pub fn for_record(record: &Request, registry: &StageRegistry) -> Self {
        let ids = registry
            .stages()
            .iter()
            .map(|s| s.id)
            .filter(|&id| !is_skipped(id, record, registry))
            .collect();
        Self { ids }
    }

    /// Stage ids in ordinal order
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[StageId] {
        &self.ids
    }

    /// Whether the stage participates in this record's lifecycle
    #[inline]
    #[must_use]
    pub fn contains(&self, id: StageId) -> bool {
        self.ids.contains(&id)
    }

    /// Next stage in the sequence, if any
    ///
    /// With Admin approval skipped, stage 4's successor is stage 6.
    #[must_use]
    pub fn successor(&self, id: StageId) -> Option<StageId> {
        let pos = self.ids.iter().position(|&s| s == id)?;
        self.ids.get(pos + 1).copied()
    }

    /// Previous stage in the sequence, if any
    #[must_use]
    pub fn predecessor(&self, id: StageId) -> Option<StageId> {
        let pos = self.ids.iter().position(|&s| s == id)?;
        pos.checked_sub(1).and_then(|p| self.ids.get(p)).copied()
    }

    /// First stage of the sequence
    #[inline]
    #[must_use]
    pub fn first(&self) -> StageId {
        // The sequence always contains the non-skippable stages 1-4 and 6
        self.ids[0]
    }

    /// Number of stages in the sequence
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Never true for a lifecycle sequence
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
