//! Key-person ranking
//!
//! Orders authors by influence score with a fixed tie-break chain so the
//! ranking is a total order: citations descending, then earliest first
//! publication year (authors with no recorded year sort last), then
//! author id. An author whose influence exceeds the configured threshold
//! is flagged as a key person.

use crate::centrality::CentralityReport;
use crate::graph::NetworkGraph;
use scholarnet_common::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// One ranked author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPerson {
    pub author_id: Uuid,

    pub name: String,

    pub influence_score: f64,

    pub total_citations: i64,

    pub first_publication_year: Option<i32>,

    pub is_key_person: bool,
}

/// Ranks authors by influence and flags key people
#[derive(Debug, Clone)]
pub struct KeyPersonSelector {
    threshold: f64,
}

impl KeyPersonSelector {
    /// Create a selector with an explicit threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.key_person_threshold)
    }

    /// Whether a score clears the key-person threshold
    pub fn is_key_person(&self, influence_score: f64) -> bool {
        influence_score > self.threshold
    }

    /// Rank every author, most influential first
    pub fn rank(&self, graph: &NetworkGraph, report: &CentralityReport) -> Vec<KeyPerson> {
        let mut ranked: Vec<KeyPerson> = graph
            .nodes()
            .iter()
            .map(|node| {
                let influence_score = report
                    .get(&node.id)
                    .map(|metrics| metrics.influence_score)
                    .unwrap_or(0.0);
                KeyPerson {
                    author_id: node.id,
                    name: node.name.clone(),
                    influence_score,
                    total_citations: node.citation_sum,
                    first_publication_year: node.first_publication_year,
                    is_key_person: self.is_key_person(influence_score),
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.influence_score
                .total_cmp(&a.influence_score)
                .then_with(|| b.total_citations.cmp(&a.total_citations))
                .then_with(|| cmp_first_year(a.first_publication_year, b.first_publication_year))
                .then_with(|| a.author_id.cmp(&b.author_id))
        });
        ranked
    }

    /// The top `top_n` ranked authors
    pub fn identify_key_people(
        &self,
        graph: &NetworkGraph,
        report: &CentralityReport,
        top_n: usize,
    ) -> Vec<KeyPerson> {
        let mut ranked = self.rank(graph, report);
        ranked.truncate(top_n);
        ranked
    }
}

/// Earlier debut ranks first; unknown years rank after any known year
fn cmp_first_year(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::CentralityEngine;
    use crate::graph::GraphBuilder;
    use scholarnet_common::models::{PaperAuthorRecord, PaperRecord};

    fn paper(
        n: u128,
        year: Option<i32>,
        citation_count: i64,
        authors: &[(u128, u32)],
    ) -> PaperRecord {
        PaperRecord {
            id: Uuid::from_u128(n),
            year,
            citation_count,
            authors: authors
                .iter()
                .map(|&(id, position)| {
                    PaperAuthorRecord::new(Uuid::from_u128(id), format!("author-{id}"), position)
                })
                .collect(),
        }
    }

    #[test]
    fn test_top_n_truncates_ranking() {
        let mut builder = GraphBuilder::new();
        // Five authors with sharply different profiles
        builder.ingest_paper(&paper(1, Some(2019), 400, &[(1, 1), (2, 2)])).unwrap();
        builder.ingest_paper(&paper(2, Some(2020), 100, &[(1, 1), (3, 2)])).unwrap();
        builder.ingest_paper(&paper(3, Some(2021), 10, &[(4, 1), (5, 2)])).unwrap();
        let graph = builder.build();
        let report = CentralityEngine::new().compute(&graph);

        let selector = KeyPersonSelector::new(20.0);
        let top = selector.identify_key_people(&graph, &report, 3);

        assert_eq!(top.len(), 3);
        for window in top.windows(2) {
            assert!(window[0].influence_score >= window[1].influence_score);
        }
        // Author 1 is on both high-citation papers and first-authors them
        assert_eq!(top[0].author_id, Uuid::from_u128(1));
    }

    #[test]
    fn test_tie_breaks_citations_then_year() {
        // Two isolated single-paper first authors: identical influence
        // unless citations differ
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&paper(1, Some(2015), 200, &[(1, 1)])).unwrap();
        builder.ingest_paper(&paper(2, Some(2010), 100, &[(2, 1)])).unwrap();
        builder.ingest_paper(&paper(3, Some(2005), 100, &[(3, 1)])).unwrap();
        let graph = builder.build();
        let report = CentralityEngine::new().compute(&graph);

        let ranked = KeyPersonSelector::new(20.0).rank(&graph, &report);
        // Author 1: 2 + 2.0 + 10 = 14; authors 2 and 3: 2 + 1.0 + 10 = 13
        assert_eq!(ranked[0].author_id, Uuid::from_u128(1));
        // 2 and 3 tie on influence and citations; earlier debut wins
        assert_eq!(ranked[1].author_id, Uuid::from_u128(3));
        assert_eq!(ranked[2].author_id, Uuid::from_u128(2));
    }

    #[test]
    fn test_unknown_year_sorts_after_known() {
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&paper(1, None, 100, &[(1, 1)])).unwrap();
        builder.ingest_paper(&paper(2, Some(2018), 100, &[(2, 1)])).unwrap();
        let graph = builder.build();
        let report = CentralityEngine::new().compute(&graph);

        let ranked = KeyPersonSelector::new(20.0).rank(&graph, &report);
        assert_eq!(ranked[0].author_id, Uuid::from_u128(2));
    }

    #[test]
    fn test_threshold_flags_key_people() {
        let mut builder = GraphBuilder::new();
        // High-output author far over the default threshold
        for i in 0..12u128 {
            builder
                .ingest_paper(&paper(i + 1, Some(2020), 100, &[(1, 1), (i + 2, 2)]))
                .unwrap();
        }
        let graph = builder.build();
        let report = CentralityEngine::new().compute(&graph);

        let ranked = KeyPersonSelector::new(20.0).rank(&graph, &report);
        assert!(ranked[0].is_key_person);
        // Single-paper coauthors stay under the threshold
        assert!(!ranked.last().unwrap().is_key_person);
    }

    #[test]
    fn test_empty_graph_ranks_nobody() {
        let graph = GraphBuilder::new().build();
        let report = CentralityEngine::new().compute(&graph);
        let ranked = KeyPersonSelector::new(20.0).identify_key_people(&graph, &report, 10);
        assert!(ranked.is_empty());
    }
}
