//! Stage registry
//!
//! Provides [`StageRegistry`], the shared configuration every other
//! component consumes: the six stage definitions in fixed ordinal order.

use crate::stage::Stage;
use labtrack_record::{FieldKey, Role, StageId};

/// Required fields, stage 1: problem report
pub const REPORT_REQUIRED: &[FieldKey] = &[
    FieldKey::TypeOfProblem,
    FieldKey::Date,
    FieldKey::Department,
    FieldKey::Location,
    FieldKey::ComplaintDetails,
    FieldKey::EquipmentId,
];

/// Required fields, stage 2: endorsement signatures
pub const ENDORSEMENT_REQUIRED: &[FieldKey] = &[
    FieldKey::LabAssistant,
    FieldKey::LabAssistantDate,
    FieldKey::Hod,
    FieldKey::HodDate,
];

/// Required fields, stage 3: verification
pub const VERIFICATION_REQUIRED: &[FieldKey] = &[
    FieldKey::AssignedPerson,
    FieldKey::InChargeDate,
    FieldKey::VerificationRemarks,
];

/// Required fields, stage 4: resolution
pub const RESOLUTION_REQUIRED: &[FieldKey] = &[
    FieldKey::MaterialsUsed,
    FieldKey::ResolvedInhouse,
    FieldKey::ResolvedRemark,
];

/// Required fields, stage 5: admin approval
///
/// Listed for form rendering; completion is decided by
/// [`Stage::is_satisfied_by`]'s approval exception, not this list.
pub const APPROVAL_REQUIRED: &[FieldKey] = &[
    FieldKey::AdminApprovalStatus,
    FieldKey::AdminApprovalDate,
];

/// Required fields, stage 6: completion
pub const COMPLETION_REQUIRED: &[FieldKey] = &[
    FieldKey::CompletionRemarkLab,
    FieldKey::LabCompletionName,
    FieldKey::LabCompletionDate,
    FieldKey::CompletionRemarkMaintenance,
    FieldKey::MaintenanceClosedDate,
];

const STAGES: [Stage; 6] = [
    Stage {
        id: StageId::REPORT,
        owner: Role::LabIncharge,
        required: REPORT_REQUIRED,
        terminal: false,
        skippable: false,
    },
    Stage {
        id: StageId::ENDORSEMENT,
        owner: Role::LabIncharge,
        required: ENDORSEMENT_REQUIRED,
        terminal: false,
        skippable: false,
    },
    Stage {
        id: StageId::VERIFICATION,
        owner: Role::Maintenance,
        required: VERIFICATION_REQUIRED,
        terminal: false,
        skippable: false,
    },
    Stage {
        id: StageId::RESOLUTION,
        owner: Role::Maintenance,
        required: RESOLUTION_REQUIRED,
        terminal: false,
        skippable: false,
    },
    Stage {
        id: StageId::APPROVAL,
        owner: Role::Admin,
        required: APPROVAL_REQUIRED,
        terminal: false,
        skippable: true,
    },
    Stage {
        id: StageId::COMPLETION,
        owner: Role::Maintenance,
        required: COMPLETION_REQUIRED,
        terminal: true,
        skippable: false,
    },
];

/// Registry of the six stage definitions
///
/// Pure and stateless; acts as shared configuration for the evaluator,
/// branch resolution, the navigator and the synchronizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageRegistry;

impl StageRegistry {
    /// Registry with the standard six-stage lifecycle
    #[inline]
    #[must_use]
    pub fn with_defaults() -> Self {
        Self
    }

    /// All stages in fixed ordinal order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &'static [Stage] {
        &STAGES
    }

    /// Look up one stage definition
    #[inline]
    #[must_use]
    pub fn get(&self, id: StageId) -> Option<&'static Stage> {
        STAGES.iter().find(|s| s.id == id)
    }

    /// Role that owns (may edit) the given stage
    #[inline]
    #[must_use]
    pub fn owner(&self, id: StageId) -> Option<Role> {
        self.get(id).map(|s| s.owner)
    }

    /// Number of stages in the full lifecycle
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        STAGES.len()
    }

    /// Never true; present for registry-surface symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        STAGES.is_empty()
    }
}
