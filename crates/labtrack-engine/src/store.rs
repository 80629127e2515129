//! Record store seam and reference implementation
//!
//! [`RecordStore`] is the engine's only view of persistence: create one
//! record, fetch one record, apply one field-scoped stage update. Transport
//! details live behind this trait.
//!
//! [`MemoryStore`] is the in-process reference store. It plays the server's
//! part faithfully: after every write it recomputes `completed_steps` and
//! `current_step` from the raw record, performs the stage-4 skip jump, and
//! derives the equipment status, so the echo the synchronizer treats as
//! authoritative behaves exactly like the real backend's.

use crate::error::SyncError;
use async_trait::async_trait;
use labtrack_record::{
    CreationBundle, EquipmentStatus, Request, RequestId, StaffId, StageFields, StageId,
};
use labtrack_stages::{completed_stage_count, ActiveSequence, StageRegistry};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Store-side failure, before the synchronizer attaches stage context
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("request {0} not found")]
    NotFound(RequestId),

    /// Transport failure between client and store
    #[error("transport failure: {0}")]
    Transport(String),
}

impl StoreError {
    /// Attach the attempted stage and payload for the caller
    #[must_use]
    pub fn into_sync_error(self, stage: StageId, fields: &StageFields) -> SyncError {
        match self {
            StoreError::NotFound(id) => SyncError::NotFound(id),
            StoreError::Transport(reason) => SyncError::Transport {
                stage,
                reason,
                payload: fields.payload(),
            },
        }
    }
}

/// Persistence seam for maintenance-request records
///
/// One update call per stage submission, scoped to exactly the fields that
/// stage owns; a full-record overwrite is deliberately not expressible.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a record from the combined stage-1/2 bundle
    async fn create(
        &self,
        bundle: CreationBundle,
        created_by: StaffId,
    ) -> Result<Request, StoreError>;

    /// Fetch the current record
    async fn fetch(&self, id: RequestId) -> Result<Request, StoreError>;

    /// Apply one stage's field set and return the updated record
    async fn update_stage(
        &self,
        id: RequestId,
        fields: StageFields,
    ) -> Result<Request, StoreError>;
}

/// In-process reference store
///
/// Cross-user writes are last-write-wins, matching the backing store's
/// (lack of) arbitration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: StageRegistry,
    records: Mutex<HashMap<RequestId, Request>>,
}

impl MemoryStore {
    /// Create new empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Server-side reconciliation after any write
    ///
    /// Recomputes the derived fields from the raw record: completed count
    /// (clamped monotonic), current stage (first unsatisfied stage of the
    /// active sequence, which lands on stage 6 directly when approval is
    /// skipped), and the equipment status.
    fn reconcile(&self, record: &mut Request) {
        let recomputed = completed_stage_count(record, &self.registry);
        record.completed_steps = record.completed_steps.max(recomputed);

        let sequence = ActiveSequence::for_record(record, &self.registry);
        let next_open = sequence
            .ids()
            .iter()
            .copied()
            .find(|&id| {
                self.registry
                    .get(id)
                    .is_some_and(|s| !s.is_satisfied_by(record))
            })
            .unwrap_or(StageId::COMPLETION);
        if next_open.ordinal() > record.current_step.ordinal() {
            record.current_step = next_open;
        }

        record.equipment_status = if record.completed_steps >= StageId::COUNT {
            record.equipment_status.or(Some(EquipmentStatus::Active))
        } else {
            Some(EquipmentStatus::Maintenance)
        };
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(
        &self,
        bundle: CreationBundle,
        created_by: StaffId,
    ) -> Result<Request, StoreError> {
        let mut record = Request::new(RequestId::new(), created_by);
        StageFields::Report(bundle.report).apply_to(&mut record);
        StageFields::Endorsement(bundle.endorsements).apply_to(&mut record);
        self.reconcile(&mut record);

        let mut records = self.records.lock().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: RequestId) -> Result<Request, StoreError> {
        let records = self.records.lock().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update_stage(
        &self,
        id: RequestId,
        fields: StageFields,
    ) -> Result<Request, StoreError> {
        let mut records = self.records.lock().await;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        fields.apply_to(record);
        let mut updated = record.clone();
        self.reconcile(&mut updated);
        *record = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labtrack_record::{Endorsements, ProblemReport, Resolution};
    use pretty_assertions::assert_eq;

    fn bundle() -> CreationBundle {
        CreationBundle {
            report: ProblemReport {
                type_of_problem: "Electrical".to_string(),
                date: "2024-03-01".parse().unwrap(),
                department: "Physics".to_string(),
                location: "Lab 2".to_string(),
                complaint_details: "Oscilloscope will not power on".to_string(),
                equipment_id: "EQ-1042".to_string(),
                recurring_complaint: None,
                recurring_times: None,
            },
            endorsements: Endorsements {
                lab_assistant: "S. Iyer".to_string(),
                lab_assistant_date: "2024-03-02".parse().unwrap(),
                hod: "Dr. Menon".to_string(),
                hod_date: "2024-03-02".parse().unwrap(),
            },
        }
    }

    fn resolution(inhouse: bool) -> Resolution {
        Resolution {
            materials_used: "Fuse".to_string(),
            resolved_inhouse: inhouse,
            resolved_remark: "Replaced fuse".to_string(),
            consumables_needed: None,
            consumable_details: None,
            external_agency_needed: None,
            agency_name: None,
            approx_expenditure: None,
        }
    }

    #[tokio::test]
    async fn create_reconciles_to_stage_three() {
        let store = MemoryStore::new();
        let record = store
            .create(bundle(), StaffId::new("LI-01"))
            .await
            .unwrap();

        assert_eq!(record.completed_steps, 2);
        assert_eq!(record.current_step, StageId::VERIFICATION);
        assert_eq!(record.equipment_status, Some(EquipmentStatus::Maintenance));
    }

    #[tokio::test]
    async fn update_unknown_record_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_stage(RequestId::new(), StageFields::Resolution(resolution(true)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn completed_steps_never_regress() {
        let store = MemoryStore::new();
        let record = store
            .create(bundle(), StaffId::new("LI-01"))
            .await
            .unwrap();

        // Author blanks an endorsement field they own
        let mut endorsements = bundle().endorsements;
        endorsements.hod = "  ".to_string();
        let echoed = store
            .update_stage(record.id, StageFields::Endorsement(endorsements))
            .await
            .unwrap();

        assert_eq!(echoed.completed_steps, 2);
        assert_eq!(echoed.current_step, StageId::VERIFICATION);
    }
}
