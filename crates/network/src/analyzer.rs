//! Analysis orchestration
//!
//! One `NetworkAnalyzer` run is a synchronous batch computation scoped to
//! a single project: ingest validated paper records, seal the snapshot,
//! run every component, and hand the caller one `AnalysisReport` to
//! commit. There are no partial results; a run either completes fully or
//! fails, and an expired deadline is a retryable failure.
//!
//! Runs for the same project must not interleave their durable upserts,
//! so `ProjectLocks` hands out per-project permits; unrelated projects
//! analyze concurrently.

use crate::centrality::{CentralityEngine, CentralityReport};
use crate::community::{CommunityAssignment, CommunityDetector};
use crate::export::NetworkExport;
use crate::graph::GraphBuilder;
use crate::keyperson::{KeyPerson, KeyPersonSelector};
use crate::ledger::CollaborationLedger;
use crate::stats::NetworkStats;
use scholarnet_common::errors::{AppError, Result};
use scholarnet_common::models::{AuthorProfile, CollaborationRecord, PaperRecord};
use scholarnet_common::{metrics, AppConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use uuid::Uuid;

/// Everything one analysis run produced
///
/// The caller owns committing the pieces it wants durable: author
/// profiles onto stored author records, the upsert batch into the
/// collaboration table, the rest wherever its API layer needs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_id: Uuid,

    /// Per-author statistics with network metrics written in
    pub profiles: Vec<AuthorProfile>,

    pub centrality: CentralityReport,

    /// Top authors by influence, per the configured top-N
    pub key_people: Vec<KeyPerson>,

    pub communities: CommunityAssignment,

    /// Collaboration upserts in canonical pair order
    pub collaboration_upserts: Vec<CollaborationRecord>,

    pub stats: NetworkStats,

    pub export: NetworkExport,
}

/// Builds and analyzes the coauthorship graph for one project
#[derive(Debug)]
pub struct NetworkAnalyzer {
    project_id: Uuid,
    config: AppConfig,
    builder: GraphBuilder,
    papers_ingested: usize,
}

impl NetworkAnalyzer {
    /// Create an analyzer with default configuration
    pub fn new(project_id: Uuid) -> Self {
        Self::with_config(project_id, AppConfig::default())
    }

    pub fn with_config(project_id: Uuid, config: AppConfig) -> Self {
        Self {
            project_id,
            config,
            builder: GraphBuilder::new(),
            papers_ingested: 0,
        }
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    /// Fold one validated paper record into the run
    pub fn ingest_paper(&mut self, record: &PaperRecord) -> Result<()> {
        self.builder.ingest_paper(record)?;
        self.papers_ingested += 1;
        Ok(())
    }

    /// Run the full analysis under the configured deadline
    pub fn analyze(self, ledger: &mut CollaborationLedger) -> Result<AnalysisReport> {
        let deadline = self
            .config
            .analysis_timeout()
            .map(|timeout| Instant::now() + timeout);
        self.analyze_with_deadline(ledger, deadline)
    }

    /// Run the full analysis, checking the deadline between stages
    pub fn analyze_with_deadline(
        self,
        ledger: &mut CollaborationLedger,
        deadline: Option<Instant>,
    ) -> Result<AnalysisReport> {
        if ledger.project_id() != self.project_id {
            return Err(AppError::Validation {
                message: format!(
                    "collaboration ledger belongs to project {}, expected {}",
                    ledger.project_id(),
                    self.project_id
                ),
                field: None,
            });
        }

        let started = Instant::now();
        let project_id = self.project_id;
        let config = self.config;
        let papers_ingested = self.papers_ingested;

        let graph = self.builder.build();
        check_deadline(started, deadline)?;

        let centrality = CentralityEngine::new().compute(&graph);
        check_deadline(started, deadline)?;

        let selector = KeyPersonSelector::from_config(&config.analysis);
        let key_people =
            selector.identify_key_people(&graph, &centrality, config.analysis.key_people_top_n);

        let communities = CommunityDetector::from_config(&config.community).detect(&graph);
        check_deadline(started, deadline)?;

        let collaboration_upserts = ledger.apply(&graph);

        let profiles: Vec<AuthorProfile> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                // Every node has an entry; the report was computed from
                // this very snapshot
                let m = centrality.get(&node.id).cloned().unwrap_or_default();
                AuthorProfile {
                    id: node.id,
                    name: node.name.clone(),
                    total_papers: node.paper_count(),
                    total_citations: node.citation_sum,
                    first_author_count: node.first_author_count,
                    corresponding_author_count: node.corresponding_count,
                    first_publication_year: node.first_publication_year,
                    last_publication_year: node.last_publication_year,
                    degree: graph.degree(idx),
                    degree_centrality: m.degree_centrality,
                    betweenness_centrality: m.betweenness_centrality,
                    closeness_centrality: m.closeness_centrality,
                    pagerank: m.pagerank,
                    influence_score: m.influence_score,
                    is_key_person: selector.is_key_person(m.influence_score),
                }
            })
            .collect();

        let stats = NetworkStats::from_graph(&graph);
        let export = NetworkExport::from_graph(&graph);

        let duration = started.elapsed();
        metrics::record_papers_ingested(papers_ingested, &project_id.to_string());
        metrics::record_analysis(
            duration.as_secs_f64(),
            stats.total_authors,
            stats.total_collaborations,
            true,
        );
        tracing::info!(
            project_id = %project_id,
            papers = papers_ingested,
            authors = stats.total_authors,
            collaborations = stats.total_collaborations,
            communities = communities.community_count(),
            duration_ms = duration.as_millis() as u64,
            "network analysis complete"
        );

        Ok(AnalysisReport {
            project_id,
            profiles,
            centrality,
            key_people,
            communities,
            collaboration_upserts,
            stats,
            export,
        })
    }
}

fn check_deadline(started: Instant, deadline: Option<Instant>) -> Result<()> {
    if let Some(deadline) = deadline {
        if Instant::now() > deadline {
            let timeout_ms = deadline.saturating_duration_since(started).as_millis() as u64;
            return Err(AppError::AnalysisTimeout { timeout_ms });
        }
    }
    Ok(())
}

/// Per-project analysis permits
///
/// Two runs racing the same project's collaboration upserts would lose
/// updates; a second acquisition for an active project fails with a
/// retryable error instead of blocking.
#[derive(Debug, Default)]
pub struct ProjectLocks {
    active: Mutex<HashSet<Uuid>>,
}

impl ProjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the permit for a project
    pub fn try_acquire(&self, project_id: Uuid) -> Result<ProjectPermit<'_>> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(project_id) {
            return Err(AppError::AnalysisInProgress {
                project_id: project_id.to_string(),
            });
        }
        Ok(ProjectPermit {
            locks: self,
            project_id,
        })
    }
}

/// Held for the duration of one project's analysis run
#[derive(Debug)]
pub struct ProjectPermit<'a> {
    locks: &'a ProjectLocks,
    project_id: Uuid,
}

impl Drop for ProjectPermit<'_> {
    fn drop(&mut self) {
        let mut active = self
            .locks
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        active.remove(&self.project_id);
    }
}
