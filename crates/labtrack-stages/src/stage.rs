//! Stage definition
//!
//! A [`Stage`] is static configuration, not per-request state: its ordinal,
//! owning role, required fields, and whether it terminates the lifecycle or
//! can be skipped by branch resolution.

use labtrack_record::{FieldKey, Request, Role, StageId};

/// One ordinal phase of the maintenance-request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// Ordinal id (1-6)
    pub id: StageId,
    /// Role whose members may edit this stage
    pub owner: Role,
    /// Fields that must be populated for the stage to count as complete
    pub required: &'static [FieldKey],
    /// Stage 6 ends the lifecycle; no transitions are defined past it
    pub terminal: bool,
    /// Only Admin approval can drop out of the active sequence
    pub skippable: bool,
}

impl Stage {
    /// Whether this stage's completion rule holds for the record
    ///
    /// Admin approval is the one exception to the all-required-fields rule:
    /// it is complete on any decision (approved or rejected), regardless of
    /// the other stage-5 fields.
    #[must_use]
    pub fn is_satisfied_by(&self, record: &Request) -> bool {
        if self.id == StageId::APPROVAL {
            return record
                .admin_approval_status
                .is_some_and(|s| s.is_decided());
        }
        self.required.iter().all(|&k| record.field_is_populated(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StageRegistry;
    use labtrack_record::{ApprovalStatus, RequestId, StaffId};

    #[test]
    fn approval_satisfied_on_decision_alone() {
        let registry = StageRegistry::with_defaults();
        let approval = registry.get(StageId::APPROVAL).unwrap();

        let mut record = Request::new(RequestId::new(), StaffId::new("LI-01"));
        assert!(!approval.is_satisfied_by(&record));

        record.admin_approval_status = Some(ApprovalStatus::Pending);
        assert!(!approval.is_satisfied_by(&record));

        // Decision counts even with the approval date blank
        record.admin_approval_status = Some(ApprovalStatus::Rejected);
        assert!(approval.is_satisfied_by(&record));
        assert!(record.admin_approval_date.is_none());
    }
}
