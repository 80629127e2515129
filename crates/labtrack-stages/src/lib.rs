//! Stage definitions and derived lifecycle state
//!
//! Pure, synchronous layer between the record model and the engine:
//! - [`StageRegistry`]: the six stage definitions in fixed ordinal order,
//!   each with its owning role and declarative required-field list
//! - [`progress`]: prefix-based completed-stage evaluation
//! - [`branching`]: whether Admin approval is part of a record's lifecycle
//!
//! Everything here is a function of a record snapshot; nothing performs I/O
//! and nothing is authoritative; the server echo always wins.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod branching;
pub mod progress;
pub mod registry;
pub mod stage;

// Re-exports for convenience
pub use branching::{is_skipped, ActiveSequence};
pub use progress::completed_stage_count;
pub use registry::StageRegistry;
pub use stage::Stage;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
