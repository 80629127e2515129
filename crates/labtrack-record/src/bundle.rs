//! Per-stage field bundles
//!
//! Each role submits exactly the fields its stage owns; a submission is one
//! of these bundles, never a whole-record write. [`StageFields`] wraps the
//! six bundles so the synchronizer can treat a submission uniformly:
//! resolve its stage, apply it to a record, or serialize it as the payload
//! echoed back on a failed sync.
//!
//! Field names match the wire names so a serialized bundle is exactly the
//! field-scoped patch sent to the store.

use crate::ids::StageId;
use crate::request::Request;
use crate::status::{ApprovalStatus, EquipmentStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stage 1: problem report (Lab In-charge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemReport {
    pub type_of_problem: String,
    pub date: NaiveDate,
    pub department: String,
    pub location: String,
    pub complaint_details: String,
    pub equipment_id: String,
    /// Recurrence flag; legitimately absent for a first complaint
    pub recurring_complaint: Option<bool>,
    pub recurring_times: Option<u32>,
}

/// Stage 2: endorsement signatures (Lab In-charge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endorsements {
    pub lab_assistant: String,
    pub lab_assistant_date: NaiveDate,
    pub hod: String,
    pub hod_date: NaiveDate,
}

/// Stage 3: verification and assignment (Maintenance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub assigned_person: String,
    pub in_charge_date: NaiveDate,
    pub verification_remarks: String,
}

/// Stage 4: resolution details (Maintenance)
///
/// `resolved_inhouse` decides the branch: when true the server routes the
/// request past Admin approval straight to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub materials_used: String,
    pub resolved_inhouse: bool,
    pub resolved_remark: String,
    pub consumables_needed: Option<bool>,
    pub consumable_details: Option<String>,
    pub external_agency_needed: Option<bool>,
    pub agency_name: Option<String>,
    pub approx_expenditure: Option<f64>,
}

/// Stage 5: admin approval (Admin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub admin_approval_status: ApprovalStatus,
    pub admin_approval_date: Option<NaiveDate>,
}

/// Stage 6: completion and closure (Maintenance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub completion_remark_lab: String,
    pub lab_completion_name: String,
    pub lab_completion_date: NaiveDate,
    pub completion_remark_maintenance: String,
    pub maintenance_closed_date: NaiveDate,
    /// Proposed resulting status; the server has the final word
    pub equipment_status: Option<EquipmentStatus>,
}

/// Stages 1+2 submitted together at record creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationBundle {
    pub report: ProblemReport,
    pub endorsements: Endorsements,
}

/// One stage submission, field-scoped to its owning stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageFields {
    Report(ProblemReport),
    Endorsement(Endorsements),
    Verification(Verification),
    Resolution(Resolution),
    Approval(Approval),
    Completion(Completion),
}

impl StageFields {
    /// Stage this bundle belongs to
    #[inline]
    #[must_use]
    pub fn stage_id(&self) -> StageId {
        match self {
            StageFields::Report(_) => StageId::REPORT,
            StageFields::Endorsement(_) => StageId::ENDORSEMENT,
            StageFields::Verification(_) => StageId::VERIFICATION,
            StageFields::Resolution(_) => StageId::RESOLUTION,
            StageFields::Approval(_) => StageId::APPROVAL,
            StageFields::Completion(_) => StageId::COMPLETION,
        }
    }

    /// Overwrite exactly the fields this stage owns
    ///
    /// Resubmission with identical fields is a no-op beyond the overwrite,
    /// which keeps stage updates idempotent.
    pub fn apply_to(&self, record: &mut Request) {
        match self {
            StageFields::Report(r) => {
                record.type_of_problem = Some(r.type_of_problem.clone());
                record.date = Some(r.date);
                record.department = Some(r.department.clone());
                record.location = Some(r.location.clone());
                record.complaint_details = Some(r.complaint_details.clone());
                record.equipment_id = Some(r.equipment_id.clone());
                record.recurring_complaint = r.recurring_complaint;
                record.recurring_times = r.recurring_times;
            }
            StageFields::Endorsement(e) => {
                record.lab_assistant = Some(e.lab_assistant.clone());
                record.lab_assistant_date = Some(e.lab_assistant_date);
                record.hod = Some(e.hod.clone());
                record.hod_date = Some(e.hod_date);
            }
            StageFields::Verification(v) => {
                record.assigned_person = Some(v.assigned_person.clone());
                record.in_charge_date = Some(v.in_charge_date);
                record.verification_remarks = Some(v.verification_remarks.clone());
            }
            StageFields::Resolution(r) => {
                record.materials_used = Some(r.materials_used.clone());
                record.resolved_inhouse = Some(r.resolved_inhouse);
                record.resolved_remark = Some(r.resolved_remark.clone());
                record.consumables_needed = r.consumables_needed;
                record.consumable_details = r.consumable_details.clone();
                record.external_agency_needed = r.external_agency_needed;
                record.agency_name = r.agency_name.clone();
                record.approx_expenditure = r.approx_expenditure;
            }
            StageFields::Approval(a) => {
                record.admin_approval_status = Some(a.admin_approval_status);
                record.admin_approval_date = a.admin_approval_date;
            }
            StageFields::Completion(c) => {
                record.completion_remark_lab = Some(c.completion_remark_lab.clone());
                record.lab_completion_name = Some(c.lab_completion_name.clone());
                record.lab_completion_date = Some(c.lab_completion_date);
                record.completion_remark_maintenance =
                    Some(c.completion_remark_maintenance.clone());
                record.maintenance_closed_date = Some(c.maintenance_closed_date);
                if let Some(status) = c.equipment_status {
                    record.equipment_status = Some(status);
                }
            }
        }
    }

    /// Wire-named field payload, as echoed back in sync failures
    #[must_use]
    pub fn payload(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("stage");
                map
            }
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{RequestId, StaffId};
    use crate::FieldKey;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn verification() -> Verification {
        Verification {
            assigned_person: "R. Kumar".to_string(),
            in_charge_date: date("2024-03-04"),
            verification_remarks: "Loose HT cable".to_string(),
        }
    }

    #[test]
    fn apply_is_scoped_to_owning_stage() {
        let mut record = Request::new(RequestId::new(), StaffId::new("LI-01"));
        record.department = Some("Physics".to_string());

        StageFields::Verification(verification()).apply_to(&mut record);

        // Stage-3 fields landed, stage-1 fields untouched
        assert!(record.field_is_populated(FieldKey::AssignedPerson));
        assert_eq!(record.department.as_deref(), Some("Physics"));
        assert!(record.materials_used.is_none());
    }

    #[test]
    fn reapply_is_idempotent() {
        let mut once = Request::new(RequestId::new(), StaffId::new("LI-01"));
        let fields = StageFields::Verification(verification());
        fields.apply_to(&mut once);

        let mut twice = once.clone();
        fields.apply_to(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn payload_uses_wire_names_without_tag() {
        let payload = StageFields::Verification(verification()).payload();
        assert_eq!(
            payload.get("assigned_person").and_then(|v| v.as_str()),
            Some("R. Kumar")
        );
        assert!(payload.get("stage").is_none());
    }

    #[test]
    fn completion_without_status_leaves_server_value() {
        let mut record = Request::new(RequestId::new(), StaffId::new("LI-01"));
        record.equipment_status = Some(EquipmentStatus::Maintenance);

        let completion = Completion {
            completion_remark_lab: "Verified working".to_string(),
            lab_completion_name: "A. Rao".to_string(),
            lab_completion_date: date("2024-03-20"),
            completion_remark_maintenance: "Replaced fuse".to_string(),
            maintenance_closed_date: date("2024-03-21"),
            equipment_status: None,
        };
        StageFields::Completion(completion).apply_to(&mut record);
        assert_eq!(record.equipment_status, Some(EquipmentStatus::Maintenance));
    }
}
