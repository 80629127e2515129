//! Identity newtypes
//!
//! Requests are identified by UUIDs assigned at creation; staff by the
//! institution's identifier string; stages by their ordinal 1-6.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique maintenance-request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate new request ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Institutional staff identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub String);

impl StaffId {
    /// Create staff ID from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StaffId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lifecycle stage ordinal (1-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(u8);

impl StageId {
    /// Problem report (Lab In-charge)
    pub const REPORT: StageId = StageId(1);
    /// Endorsement signatures (Lab In-charge)
    pub const ENDORSEMENT: StageId = StageId(2);
    /// Verification and assignment (Maintenance)
    pub const VERIFICATION: StageId = StageId(3);
    /// Resolution details (Maintenance)
    pub const RESOLUTION: StageId = StageId(4);
    /// Admin approval (Admin)
    pub const APPROVAL: StageId = StageId(5);
    /// Completion and closure (Maintenance)
    pub const COMPLETION: StageId = StageId(6);

    /// Number of stages in the full lifecycle
    pub const COUNT: u8 = 6;

    /// Construct from an ordinal if it falls within the lifecycle
    #[inline]
    #[must_use]
    pub fn from_ordinal(n: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&n).then_some(Self(n))
    }

    /// Get ordinal value (1-6)
    #[inline]
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self.0
    }

    /// All stage ids in ordinal order
    #[inline]
    pub fn all() -> impl Iterator<Item = StageId> {
        (1..=Self::COUNT).map(StageId)
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn stage_id_from_ordinal_bounds() {
        assert_eq!(StageId::from_ordinal(1), Some(StageId::REPORT));
        assert_eq!(StageId::from_ordinal(6), Some(StageId::COMPLETION));
        assert_eq!(StageId::from_ordinal(0), None);
        assert_eq!(StageId::from_ordinal(7), None);
    }

    #[test]
    fn stage_id_all_is_ordered() {
        let ordinals: Vec<u8> = StageId::all().map(StageId::ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn staff_id_display() {
        let id = StaffId::new("LI-007");
        assert_eq!(id.to_string(), "LI-007");
    }
}
