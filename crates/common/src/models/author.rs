//! Author profile row written back by the caller after analysis

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-author statistics and network metrics for one analysis run
///
/// This is the row shape the persistence layer upserts onto its stored
/// author records; the engine never writes it anywhere itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,

    pub name: String,

    /// Distinct papers within the analyzed project
    pub total_papers: usize,

    pub total_citations: i64,

    pub first_author_count: u32,

    pub corresponding_author_count: u32,

    pub first_publication_year: Option<i32>,

    pub last_publication_year: Option<i32>,

    /// Distinct collaborators in the coauthorship graph
    pub degree: usize,

    pub degree_centrality: f64,

    pub betweenness_centrality: f64,

    pub closeness_centrality: f64,

    pub pagerank: f64,

    /// Composite heuristic in [0, 100]; not a centrality measure
    pub influence_score: f64,

    pub is_key_person: bool,
}
