//! ScholarNet Network Engine
//!
//! Builds a weighted coauthorship graph from one project's papers and
//! computes everything the platform shows about its author network:
//! centrality metrics and a composite influence score, the ranked
//! key-person list, research communities, durable pairwise collaboration
//! aggregates, graph-level statistics, and a visualization payload.
//!
//! The engine is a synchronous batch computation. It consumes validated
//! records from the caller and returns computed batches; persistence,
//! transport, and auth live elsewhere.
//!
//! ```
//! use scholarnet_network::{CollaborationLedger, NetworkAnalyzer};
//! use scholarnet_common::models::{PaperAuthorRecord, PaperRecord};
//! use uuid::Uuid;
//!
//! let project_id = Uuid::new_v4();
//! let mut analyzer = NetworkAnalyzer::new(project_id);
//! analyzer.ingest_paper(&PaperRecord {
//!     id: Uuid::new_v4(),
//!     year: Some(2021),
//!     citation_count: 42,
//!     authors: vec![
//!         PaperAuthorRecord::new(Uuid::new_v4(), "Grace Hopper", 1).corresponding(),
//!         PaperAuthorRecord::new(Uuid::new_v4(), "Alan Turing", 2),
//!     ],
//! })?;
//!
//! let mut ledger = CollaborationLedger::new(project_id);
//! let report = analyzer.analyze(&mut ledger)?;
//! assert_eq!(report.stats.total_authors, 2);
//! # Ok::<(), scholarnet_common::AppError>(())
//! ```

pub mod analyzer;
pub mod centrality;
pub mod community;
pub mod export;
pub mod graph;
pub mod keyperson;
pub mod ledger;
pub mod stats;

pub use analyzer::{AnalysisReport, NetworkAnalyzer, ProjectLocks};
pub use centrality::{CentralityEngine, CentralityMetrics, CentralityReport, PageRankConfig};
pub use community::{CommunityAssignment, CommunityDetector};
pub use export::NetworkExport;
pub use graph::{AuthorNode, CollaborationEdge, CollaborationSummary, GraphBuilder, NetworkGraph};
pub use keyperson::{KeyPerson, KeyPersonSelector};
pub use ledger::CollaborationLedger;
pub use stats::NetworkStats;
