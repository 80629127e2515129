//! Navigation, synchronization and orchestration for the maintenance
//! lifecycle
//!
//! This crate hosts the stateful half of the workspace:
//! - [`Navigator`]: stage-to-stage movement and edit gating over one record
//! - [`RecordStore`]: the async persistence seam, with [`MemoryStore`] as
//!   the in-process reference implementation
//! - [`LifecycleEngine`]: validation, store pushes under a timeout budget,
//!   echo adoption and stage-event fan-out
//!
//! The client never decides progress: `current_step` and `completed_steps`
//! from the store's echoed record are adopted wholesale after every
//! accepted submission.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod navigator;
pub mod store;

// Re-exports for convenience
pub use config::EngineConfig;
pub use engine::LifecycleEngine;
pub use error::{EngineError, SyncError, TransitionError, ValidationError};
pub use events::{EventBus, StageEvent};
pub use navigator::{editable_stages, Navigator};
pub use store::{MemoryStore, RecordStore, StoreError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
