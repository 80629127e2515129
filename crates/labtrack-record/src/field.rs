//! Declarative field keys
//!
//! Every record field has a stable wire name. Required-field lists in the
//! stage registry are expressed over these keys, so validation stays
//! declarative instead of ad hoc per-stage conditionals.

use serde::{Deserialize, Serialize};

/// Stable key for every field on a [`crate::Request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    // Stage 1: problem report
    TypeOfProblem,
    Date,
    Department,
    Location,
    ComplaintDetails,
    RecurringComplaint,
    RecurringTimes,
    EquipmentId,

    // Stage 2: endorsement signatures
    LabAssistant,
    LabAssistantDate,
    Hod,
    HodDate,

    // Stage 3: verification
    AssignedPerson,
    InChargeDate,
    VerificationRemarks,

    // Stage 4: resolution
    MaterialsUsed,
    ResolvedInhouse,
    ResolvedRemark,
    ConsumablesNeeded,
    ConsumableDetails,
    ExternalAgencyNeeded,
    AgencyName,
    ApproxExpenditure,

    // Stage 5: admin approval
    AdminApprovalStatus,
    AdminApprovalDate,

    // Stage 6: completion
    CompletionRemarkLab,
    LabCompletionName,
    LabCompletionDate,
    CompletionRemarkMaintenance,
    MaintenanceClosedDate,
    EquipmentStatus,

    // Derived bookkeeping
    CurrentStep,
    CompletedSteps,
}

impl FieldKey {
    /// Stable wire name for this field
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::TypeOfProblem => "type_of_problem",
            FieldKey::Date => "date",
            FieldKey::Department => "department",
            FieldKey::Location => "location",
            FieldKey::ComplaintDetails => "complaint_details",
            FieldKey::RecurringComplaint => "recurring_complaint",
            FieldKey::RecurringTimes => "recurring_times",
            FieldKey::EquipmentId => "equipment_id",
            FieldKey::LabAssistant => "lab_assistant",
            FieldKey::LabAssistantDate => "lab_assistant_date",
            FieldKey::Hod => "hod",
            FieldKey::HodDate => "hod_date",
            FieldKey::AssignedPerson => "assigned_person",
            FieldKey::InChargeDate => "in_charge_date",
            FieldKey::VerificationRemarks => "verification_remarks",
            FieldKey::MaterialsUsed => "materials_used",
            FieldKey::ResolvedInhouse => "resolved_inhouse",
            FieldKey::ResolvedRemark => "resolved_remark",
            FieldKey::ConsumablesNeeded => "consumables_needed",
            FieldKey::ConsumableDetails => "consumable_details",
            FieldKey::ExternalAgencyNeeded => "external_agency_needed",
            FieldKey::AgencyName => "agency_name",
            FieldKey::ApproxExpenditure => "approx_expenditure",
            FieldKey::AdminApprovalStatus => "admin_approval_status",
            FieldKey::AdminApprovalDate => "admin_approval_date",
            FieldKey::CompletionRemarkLab => "completion_remark_lab",
            FieldKey::LabCompletionName => "lab_completion_name",
            FieldKey::LabCompletionDate => "lab_completion_date",
            FieldKey::CompletionRemarkMaintenance => "completion_remark_maintenance",
            FieldKey::MaintenanceClosedDate => "maintenance_closed_date",
            FieldKey::EquipmentStatus => "equipment_status",
            FieldKey::CurrentStep => "current_step",
            FieldKey::CompletedSteps => "completed_steps",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
