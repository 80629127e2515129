//! Record model for the maintenance-request lifecycle
//!
//! Defines the foundational data the rest of the workspace operates on:
//! - The [`Request`] record with its stable wire field names
//! - Identity newtypes ([`RequestId`], [`StaffId`], [`StageId`])
//! - The role vocabulary and explicit [`Caller`] identity
//! - Declarative [`FieldKey`]s used for required-field validation
//! - Per-stage field bundles submitted by each role
//!
//! Nothing here performs I/O or holds lifecycle logic; completion and
//! branching rules live in `labtrack-stages`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod bundle;
pub mod field;
pub mod ids;
pub mod request;
pub mod role;
pub mod status;

// Re-exports for convenience
pub use bundle::{
    Approval, Completion, CreationBundle, Endorsements, ProblemReport, Resolution, StageFields,
    Verification,
};
pub use field::FieldKey;
pub use ids::{RequestId, StaffId, StageId};
pub use request::Request;
pub use role::{Caller, Role};
pub use status::{ApprovalStatus, EquipmentStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
