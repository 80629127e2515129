//! Completion evaluation
//!
//! Computes the completed-stage count from a raw record snapshot. The count
//! is prefix-based: a stage counts only if every stage before it counts, so
//! out-of-order or partial data never inflates progress. The client uses
//! this for immediate UI feedback only; after any write the server's echoed
//! `completed_steps` is authoritative.

use crate::branching::is_skipped;
use crate::registry::StageRegistry;
use labtrack_record::Request;

/// Length of the longest satisfied prefix of the lifecycle (0-6)
///
/// Walks stages in ordinal order and stops at the first unsatisfied one.
/// A stage skipped by branch resolution is treated as automatically
/// satisfied so the walk continues to completion; a fully-closed record
/// therefore evaluates to 6 on either branch.
#[must_use]
pub fn completed_stage_count(record: &Request, registry: &StageRegistry) -> u8 {
    let mut count = 0;
    for stage in registry.stages() {
        let satisfied =
            is_skipped(stage.id, record, registry) || stage.is_satisfied_by(record);
        if !satisfied {
            break;
        }
        count += 1;
    }
    count
}
