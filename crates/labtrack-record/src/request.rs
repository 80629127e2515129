//! The maintenance request record
//!
//! A [`Request`] carries every role-owned field as an explicit optional,
//! keyed on the wire by the stable names in [`crate::FieldKey`]. The record
//! itself knows nothing about stage ordering or ownership; it only answers
//! whether a given field is populated.

use crate::field::FieldKey;
use crate::ids::{RequestId, StaffId, StageId};
use crate::status::{ApprovalStatus, EquipmentStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Central record of one maintenance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique id, assigned by the backing store at creation
    pub id: RequestId,
    /// Originating Lab In-charge; drives the stage-1/2 locking rule
    pub created_by: StaffId,

    // Stage 1: problem report (Lab In-charge)
    pub type_of_problem: Option<String>,
    pub date: Option<NaiveDate>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub complaint_details: Option<String>,
    pub recurring_complaint: Option<bool>,
    pub recurring_times: Option<u32>,
    pub equipment_id: Option<String>,

    // Stage 2: endorsement signatures (Lab In-charge)
    pub lab_assistant: Option<String>,
    pub lab_assistant_date: Option<NaiveDate>,
    pub hod: Option<String>,
    pub hod_date: Option<NaiveDate>,

    // Stage 3: verification (Maintenance)
    pub assigned_person: Option<String>,
    pub in_charge_date: Option<NaiveDate>,
    pub verification_remarks: Option<String>,

    // Stage 4: resolution (Maintenance)
    pub materials_used: Option<String>,
    pub resolved_inhouse: Option<bool>,
    pub resolved_remark: Option<String>,
    pub consumables_needed: Option<bool>,
    pub consumable_details: Option<String>,
    pub external_agency_needed: Option<bool>,
    pub agency_name: Option<String>,
    pub approx_expenditure: Option<f64>,

    // Stage 5: admin approval (Admin)
    pub admin_approval_status: Option<ApprovalStatus>,
    pub admin_approval_date: Option<NaiveDate>,

    // Stage 6: completion (Maintenance)
    pub completion_remark_lab: Option<String>,
    pub lab_completion_name: Option<String>,
    pub lab_completion_date: Option<NaiveDate>,
    pub completion_remark_maintenance: Option<String>,
    pub maintenance_closed_date: Option<NaiveDate>,
    /// Resulting equipment status; derived server-side
    pub equipment_status: Option<EquipmentStatus>,

    // Server-owned bookkeeping
    pub current_step: StageId,
    pub completed_steps: u8,
}

impl Request {
    /// Create a blank record at stage 1 for the given author
    #[must_use]
    pub fn new(id: RequestId, created_by: StaffId) -> Self {
        Self {
            id,
            created_by,
            type_of_problem: None,
            date: None,
            department: None,
            location: None,
            complaint_details: None,
            recurring_complaint: None,
            recurring_times: None,
            equipment_id: None,
            lab_assistant: None,
            lab_assistant_date: None,
            hod: None,
            hod_date: None,
            assigned_person: None,
            in_charge_date: None,
            verification_remarks: None,
            materials_used: None,
            resolved_inhouse: None,
            resolved_remark: None,
            consumables_needed: None,
            consumable_details: None,
            external_agency_needed: None,
            agency_name: None,
            approx_expenditure: None,
            admin_approval_status: None,
            admin_approval_date: None,
            completion_remark_lab: None,
            lab_completion_name: None,
            lab_completion_date: None,
            completion_remark_maintenance: None,
            maintenance_closed_date: None,
            equipment_status: None,
            current_step: StageId::REPORT,
            completed_steps: 0,
        }
    }

    /// Whether the field is present and non-blank
    ///
    /// Whitespace-only strings count as blank; bookkeeping fields
    /// (`current_step`, `completed_steps`) are always present.
    #[must_use]
    pub fn field_is_populated(&self, key: FieldKey) -> bool {
        fn text(v: &Option<String>) -> bool {
            v.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        match key {
            FieldKey::TypeOfProblem => text(&self.type_of_problem),
            FieldKey::Date => self.date.is_some(),
            FieldKey::Department => text(&self.department),
            FieldKey::Location => text(&self.location),
            FieldKey::ComplaintDetails => text(&self.complaint_details),
            FieldKey::RecurringComplaint => self.recurring_complaint.is_some(),
            FieldKey::RecurringTimes => self.recurring_times.is_some(),
            FieldKey::EquipmentId => text(&self.equipment_id),
            FieldKey::LabAssistant => text(&self.lab_assistant),
            FieldKey::LabAssistantDate => self.lab_assistant_date.is_some(),
            FieldKey::Hod => text(&self.hod),
            FieldKey::HodDate => self.hod_date.is_some(),
            FieldKey::AssignedPerson => text(&self.assigned_person),
            FieldKey::InChargeDate => self.in_charge_date.is_some(),
            FieldKey::VerificationRemarks => text(&self.verification_remarks),
            FieldKey::MaterialsUsed => text(&self.materials_used),
            FieldKey::ResolvedInhouse => self.resolved_inhouse.is_some(),
            FieldKey::ResolvedRemark => text(&self.resolved_remark),
            FieldKey::ConsumablesNeeded => self.consumables_needed.is_some(),
            FieldKey::ConsumableDetails => text(&self.consumable_details),
            FieldKey::ExternalAgencyNeeded => self.external_agency_needed.is_some(),
            FieldKey::AgencyName => text(&self.agency_name),
            FieldKey::ApproxExpenditure => self.approx_expenditure.is_some(),
            FieldKey::AdminApprovalStatus => self.admin_approval_status.is_some(),
            FieldKey::AdminApprovalDate => self.admin_approval_date.is_some(),
            FieldKey::CompletionRemarkLab => text(&self.completion_remark_lab),
            FieldKey::LabCompletionName => text(&self.lab_completion_name),
            FieldKey::LabCompletionDate => self.lab_completion_date.is_some(),
            FieldKey::CompletionRemarkMaintenance => text(&self.completion_remark_maintenance),
            FieldKey::MaintenanceClosedDate => self.maintenance_closed_date.is_some(),
            FieldKey::EquipmentStatus => self.equipment_status.is_some(),
            FieldKey::CurrentStep | FieldKey::CompletedSteps => true,
        }
    }

    /// Read-only field view for the document-export collaborator
    ///
    /// Serializes the whole record under its wire names. Export has no write
    /// access and no influence on stage logic.
    #[must_use]
    pub fn export_view(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blank() -> Request {
        Request::new(RequestId::new(), StaffId::new("LI-01"))
    }

    #[test]
    fn new_record_starts_at_stage_one() {
        let r = blank();
        assert_eq!(r.current_step, StageId::REPORT);
        assert_eq!(r.completed_steps, 0);
    }

    #[test]
    fn blank_and_whitespace_fields_are_unpopulated() {
        let mut r = blank();
        assert!(!r.field_is_populated(FieldKey::Department));

        r.department = Some("   ".to_string());
        assert!(!r.field_is_populated(FieldKey::Department));

        r.department = Some("Physics".to_string());
        assert!(r.field_is_populated(FieldKey::Department));
    }

    #[test]
    fn flags_count_as_populated_when_set_either_way() {
        let mut r = blank();
        assert!(!r.field_is_populated(FieldKey::ResolvedInhouse));
        r.resolved_inhouse = Some(false);
        assert!(r.field_is_populated(FieldKey::ResolvedInhouse));
    }

    #[test]
    fn export_view_uses_wire_names() {
        let mut r = blank();
        r.type_of_problem = Some("Electrical".to_string());
        let view = r.export_view();
        assert_eq!(
            view.get("type_of_problem").and_then(|v| v.as_str()),
            Some("Electrical")
        );
        assert_eq!(view.get("completed_steps").and_then(|v| v.as_u64()), Some(0));
    }

    #[test]
    fn record_round_trips_through_wire_format() {
        let mut r = blank();
        r.admin_approval_status = Some(ApprovalStatus::Approved);
        r.equipment_status = Some(EquipmentStatus::Active);
        let json = serde_json::to_string(&r).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
