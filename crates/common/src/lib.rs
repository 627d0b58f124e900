//! ScholarNet Common Library
//!
//! Shared code for the ScholarNet analysis engine including:
//! - Domain record types exchanged with the persistence layer
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use models::{AuthorProfile, CollaborationRecord, PaperAuthorRecord, PaperRecord};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
