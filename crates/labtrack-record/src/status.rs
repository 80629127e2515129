//! Status enums carried on the record

use serde::{Deserialize, Serialize};

/// Admin decision on an externally-resolved request (stage 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting the Admin's decision
    Pending,
    /// Expenditure approved
    Approved,
    /// Expenditure rejected
    Rejected,
}

impl ApprovalStatus {
    /// Whether the Admin has decided either way
    ///
    /// Stage 5 counts as complete on any decision, approved or rejected;
    /// `pending` leaves the stage open.
    #[inline]
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::Rejected)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Equipment status resulting from a maintenance cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    /// Back in service
    Active,
    /// Taken out of service
    Damaged,
    /// Under maintenance
    Maintenance,
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Damaged => "damaged",
            EquipmentStatus::Maintenance => "maintenance",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_decided() {
        assert!(!ApprovalStatus::Pending.is_decided());
        assert!(ApprovalStatus::Approved.is_decided());
        assert!(ApprovalStatus::Rejected.is_decided());
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&EquipmentStatus::Maintenance).unwrap(),
            "\"maintenance\""
        );
        assert_eq!(
            serde_json::from_str::<ApprovalStatus>("\"approved\"").unwrap(),
            ApprovalStatus::Approved
        );
    }
}
