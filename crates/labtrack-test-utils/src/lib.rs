//! Shared fixtures and store doubles for lifecycle tests
//!
//! Field bundles for every stage of a plausible repair, caller identities
//! for each role, and [`RecordStore`] doubles that fail or stall on demand.
//! Nothing here asserts; tests own their expectations.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::NaiveDate;
use labtrack_engine::{MemoryStore, RecordStore, StoreError};
use labtrack_record::{
    Approval, ApprovalStatus, Caller, Completion, CreationBundle, Endorsements, ProblemReport,
    Request, RequestId, Resolution, StaffId, StageFields, Verification,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Staff id of the fixture author; matches [`lab_incharge`]
pub const AUTHOR_ID: &str = "LI-01";

/// Lab In-charge caller who authors the fixture records
#[must_use]
pub fn lab_incharge() -> Caller {
    Caller::lab_incharge(AUTHOR_ID)
}

/// A second Lab In-charge, not the author
#[must_use]
pub fn other_lab_incharge() -> Caller {
    Caller::lab_incharge("LI-02")
}

/// Maintenance caller
#[must_use]
pub fn maintenance() -> Caller {
    Caller::maintenance("MT-07")
}

/// Admin caller
#[must_use]
pub fn admin() -> Caller {
    Caller::admin("AD-01")
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap_or_default()
}

/// Stage-1/2 creation bundle for a broken oscilloscope
#[must_use]
pub fn creation_bundle() -> CreationBundle {
    CreationBundle {
        report: ProblemReport {
            type_of_problem: "Electrical".to_string(),
            date: date("2024-03-01"),
            department: "Physics".to_string(),
            location: "Lab 2, Bench 4".to_string(),
            complaint_details: "Oscilloscope will not power on".to_string(),
            equipment_id: "EQ-1042".to_string(),
            recurring_complaint: Some(false),
            recurring_times: None,
        },
        endorsements: Endorsements {
            lab_assistant: "S. Iyer".to_string(),
            lab_assistant_date: date("2024-03-02"),
            hod: "Dr. Menon".to_string(),
            hod_date: date("2024-03-02"),
        },
    }
}

/// Stage-3 verification fields
#[must_use]
pub fn verification() -> Verification {
    Verification {
        assigned_person: "R. Kumar".to_string(),
        in_charge_date: date("2024-03-04"),
        verification_remarks: "Loose HT cable confirmed on inspection".to_string(),
    }
}

/// Stage-4 resolution fields, branching on `inhouse`
#[must_use]
pub fn resolution(inhouse: bool) -> Resolution {
    Resolution {
        materials_used: "HT cable, fuse".to_string(),
        resolved_inhouse: inhouse,
        resolved_remark: if inhouse {
            "Re-seated cable and replaced fuse".to_string()
        } else {
            "Requires OEM service visit".to_string()
        },
        consumables_needed: Some(true),
        consumable_details: Some("2A ceramic fuse".to_string()),
        external_agency_needed: Some(!inhouse),
        agency_name: (!inhouse).then(|| "Scientific Services Ltd".to_string()),
        approx_expenditure: (!inhouse).then_some(12_500.0),
    }
}

/// Stage-5 approval fields with the given decision
#[must_use]
pub fn approval(status: ApprovalStatus) -> Approval {
    Approval {
        admin_approval_status: status,
        admin_approval_date: Some(date("2024-03-12")),
    }
}

/// Stage-6 completion fields; equipment status left to the server
#[must_use]
pub fn completion() -> Completion {
    Completion {
        completion_remark_lab: "Equipment verified working".to_string(),
        lab_completion_name: "A. Rao".to_string(),
        lab_completion_date: date("2024-03-20"),
        completion_remark_maintenance: "Closed after burn-in test".to_string(),
        maintenance_closed_date: date("2024-03-21"),
        equipment_status: None,
    }
}

/// Store double that fails on demand
///
/// Delegates to a [`MemoryStore`] until `fail_next` is armed; the next
/// write then returns a transport error without touching stored state,
/// which is exactly the failed-sync contract the engine must honor.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_next: AtomicBool,
}

impl FailingStore {
    /// New store with failures disarmed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a transport failure for the next write
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(StoreError::Transport("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn create(
        &self,
        bundle: CreationBundle,
        created_by: StaffId,
    ) -> Result<Request, StoreError> {
        self.take_failure()?;
        self.inner.create(bundle, created_by).await
    }

    async fn fetch(&self, id: RequestId) -> Result<Request, StoreError> {
        self.inner.fetch(id).await
    }

    async fn update_stage(
        &self,
        id: RequestId,
        fields: StageFields,
    ) -> Result<Request, StoreError> {
        self.take_failure()?;
        self.inner.update_stage(id, fields).await
    }
}

/// Store double that stalls every write past any timeout budget
///
/// Reads pass through so a navigator can still be loaded. Pair with
/// `tokio::time::pause` to exercise the timeout path without waiting.
#[derive(Debug)]
pub struct StallingStore {
    inner: MemoryStore,
    stall: Duration,
}

impl StallingStore {
    /// New store stalling writes for the given duration
    #[must_use]
    pub fn new(stall: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            stall,
        }
    }

    /// Seed a record directly, bypassing the stall
    pub async fn seed(
        &self,
        bundle: CreationBundle,
        created_by: StaffId,
    ) -> Result<Request, StoreError> {
        self.inner.create(bundle, created_by).await
    }
}

#[async_trait]
impl RecordStore for StallingStore {
    async fn create(
        &self,
        bundle: CreationBundle,
        created_by: StaffId,
    ) -> Result<Request, StoreError> {
        tokio::time::sleep(self.stall).await;
        self.inner.create(bundle, created_by).await
    }

    async fn fetch(&self, id: RequestId) -> Result<Request, StoreError> {
        self.inner.fetch(id).await
    }

    async fn update_stage(
        &self,
        id: RequestId,
        fields: StageFields,
    ) -> Result<Request, StoreError> {
        tokio::time::sleep(self.stall).await;
        self.inner.update_stage(id, fields).await
    }
}
