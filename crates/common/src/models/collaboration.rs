//! Collaboration upsert row emitted by the ledger

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable pairwise collaboration aggregate for one project
///
/// Invariant: `author1_id < author2_id`, giving exactly one record per
/// unordered author pair per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationRecord {
    pub project_id: Uuid,

    pub author1_id: Uuid,

    pub author2_id: Uuid,

    /// Distinct papers co-authored by the pair within the project
    pub collaboration_count: u32,

    /// Earliest year among backing papers that carry one
    pub first_collaboration_year: Option<i32>,

    /// Latest year among backing papers that carry one
    pub last_collaboration_year: Option<i32>,

    /// Currently a 1:1 function of the count; placeholder for recency decay
    pub collaboration_strength: f64,
}

/// Order an author pair canonically (ascending id)
pub fn canonical_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
