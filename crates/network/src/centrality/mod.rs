//! Structural importance metrics for the coauthorship graph
//!
//! One `compute` call produces every per-author metric for a snapshot:
//! degree and degree centrality, betweenness and closeness over weighted
//! shortest paths, PageRank, and the composite influence heuristic.
//! Everything is a pure function of the snapshot, so a rebuilt graph over
//! the same papers reproduces the report exactly.

mod betweenness;
mod closeness;
mod pagerank;
mod paths;

pub use pagerank::PageRankConfig;

use crate::graph::{AuthorNode, NetworkGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-author structural metrics for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityMetrics {
    /// Distinct collaborators
    pub degree: usize,

    pub degree_centrality: f64,

    pub betweenness_centrality: f64,

    pub closeness_centrality: f64,

    pub pagerank: f64,

    /// Composite heuristic in [0, 100]; a ranking aid, not a centrality
    pub influence_score: f64,
}

/// Metrics for every author in a snapshot, keyed by author id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CentralityReport {
    metrics: BTreeMap<Uuid, CentralityMetrics>,
}

impl CentralityReport {
    /// Metrics for one author
    pub fn get(&self, author_id: &Uuid) -> Option<&CentralityMetrics> {
        self.metrics.get(author_id)
    }

    /// Iterate in ascending author id order
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &CentralityMetrics)> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Computes all centrality metrics for a graph snapshot
#[derive(Debug, Default)]
pub struct CentralityEngine {
    pagerank: PageRankConfig,
}

impl CentralityEngine {
    /// Create an engine with default PageRank settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the PageRank settings
    pub fn with_pagerank(mut self, config: PageRankConfig) -> Self {
        self.pagerank = config;
        self
    }

    /// Compute every metric for every author in one invocation
    ///
    /// Degenerate graphs (0 or 1 authors) yield well-defined zeros; the
    /// influence score still reflects non-graph attributes for authors
    /// with no collaborators.
    pub fn compute(&self, graph: &NetworkGraph) -> CentralityReport {
        let n = graph.node_count();
        let betweenness = betweenness::betweenness_centrality(graph);
        let closeness = closeness::closeness_centrality(graph);
        let pagerank = pagerank::pagerank(graph, &self.pagerank);

        let mut metrics = BTreeMap::new();
        for (idx, node) in graph.nodes().iter().enumerate() {
            let degree = graph.degree(idx);
            let degree_centrality = if n > 1 {
                degree as f64 / (n - 1) as f64
            } else {
                0.0
            };

            metrics.insert(
                node.id,
                CentralityMetrics {
                    degree,
                    degree_centrality,
                    betweenness_centrality: betweenness[idx],
                    closeness_centrality: closeness[idx],
                    pagerank: pagerank[idx],
                    influence_score: influence_score(node, degree),
                },
            );
        }

        CentralityReport { metrics }
    }
}

/// Composite influence heuristic
///
/// `2*papers + min(citations/100, 50) + 1.5*collaborators +
/// 10*first_author_ratio`, clipped to [0, 100].
pub fn influence_score(node: &AuthorNode, collaborators: usize) -> f64 {
    let paper_count = node.paper_count() as f64;
    let citations = node.citation_sum as f64;
    let first_author_ratio = f64::from(node.first_author_count) / paper_count.max(1.0);

    let score = paper_count * 2.0
        + (citations / 100.0).min(50.0)
        + collaborators as f64 * 1.5
        + first_author_ratio * 10.0;

    score.clamp(0.0, 100.0)
}
