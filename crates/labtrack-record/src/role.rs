//! Role vocabulary and caller identity
//!
//! Every navigator and synchronizer call takes an explicit [`Caller`]
//! rather than reading ambient session state.

use crate::ids::StaffId;
use serde::{Deserialize, Serialize};

/// Institutional role hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Lab In-charge: reports problems and endorses them (stages 1-2)
    LabIncharge,
    /// Maintenance staff: verification, resolution, closure (stages 3, 4, 6)
    Maintenance,
    /// Admin: approves expenditure for externally-resolved work (stage 5)
    Admin,
    /// Super Admin: oversight; views everything, owns no stage
    SuperAdmin,
}

impl Role {
    /// Stable snake_case name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::LabIncharge => "lab_incharge",
            Role::Maintenance => "maintenance",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit caller identity threaded through every engine call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Role the caller is acting under
    pub role: Role,
    /// The caller's staff identifier
    pub staff_id: StaffId,
}

impl Caller {
    /// Create new caller
    #[inline]
    #[must_use]
    pub fn new(role: Role, staff_id: impl Into<StaffId>) -> Self {
        Self {
            role,
            staff_id: staff_id.into(),
        }
    }

    /// Lab In-charge caller
    #[inline]
    #[must_use]
    pub fn lab_incharge(staff_id: impl Into<StaffId>) -> Self {
        Self::new(Role::LabIncharge, staff_id)
    }

    /// Maintenance caller
    #[inline]
    #[must_use]
    pub fn maintenance(staff_id: impl Into<StaffId>) -> Self {
        Self::new(Role::Maintenance, staff_id)
    }

    /// Admin caller
    #[inline]
    #[must_use]
    pub fn admin(staff_id: impl Into<StaffId>) -> Self {
        Self::new(Role::Admin, staff_id)
    }
}
