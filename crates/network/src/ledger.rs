//! Durable pairwise collaboration aggregates
//!
//! The ledger is the only engine output that survives across runs: one
//! record per unordered author pair per project. Applying a snapshot
//! overwrites each pair's count and strength with the freshly computed
//! values (never increments stored state) and carries the year range
//! derived from the backing papers, skipping papers without a year. The
//! caller commits the returned batch to durable storage.

use crate::graph::NetworkGraph;
use scholarnet_common::models::{canonical_pair, CollaborationRecord};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Strength is currently a 1:1 function of the collaboration count; the
/// field exists so recency decay can land without a schema change.
fn collaboration_strength(weight: u32) -> f64 {
    f64::from(weight)
}

/// Project-scoped collaboration aggregate store
#[derive(Debug, Clone)]
pub struct CollaborationLedger {
    project_id: Uuid,
    records: BTreeMap<(Uuid, Uuid), CollaborationRecord>,
}

impl CollaborationLedger {
    /// Create an empty ledger for one project
    pub fn new(project_id: Uuid) -> Self {
        Self {
            project_id,
            records: BTreeMap::new(),
        }
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    /// Upsert aggregates for every edge in the snapshot
    ///
    /// Returns the upsert batch in canonical pair order for the caller to
    /// commit.
    pub fn apply(&mut self, graph: &NetworkGraph) -> Vec<CollaborationRecord> {
        let mut batch = Vec::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            let author1_id = graph.node(edge.a).id;
            let author2_id = graph.node(edge.b).id;
            let weight = edge.weight();

            let record = CollaborationRecord {
                project_id: self.project_id,
                author1_id,
                author2_id,
                collaboration_count: weight,
                first_collaboration_year: edge.first_year,
                last_collaboration_year: edge.last_year,
                collaboration_strength: collaboration_strength(weight),
            };

            self.records
                .insert((author1_id, author2_id), record.clone());
            batch.push(record);
        }

        tracing::debug!(
            project_id = %self.project_id,
            upserts = batch.len(),
            "collaboration aggregates applied"
        );
        batch
    }

    /// Stored record for an author pair, in either order
    pub fn get(&self, a: &Uuid, b: &Uuid) -> Option<&CollaborationRecord> {
        self.records.get(&canonical_pair(*a, *b))
    }

    /// Iterate stored records in canonical pair order
    pub fn records(&self) -> impl Iterator<Item = &CollaborationRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
