//! Paper ingestion records
//!
//! One `PaperRecord` per paper in the analyzed project, in any order.
//! Validation is declarative; the graph builder maps failures to
//! `AppError::Validation` before any part of the paper is counted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A paper to be folded into the coauthorship graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PaperRecord {
    pub id: Uuid,

    /// Publication year, if known
    pub year: Option<i32>,

    #[validate(range(min = 0))]
    pub citation_count: i64,

    /// Author byline in paper order
    #[validate(nested)]
    pub authors: Vec<PaperAuthorRecord>,
}

/// One author's appearance on a paper byline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PaperAuthorRecord {
    pub author_id: Uuid,

    #[validate(length(min = 1))]
    pub name: String,

    /// Byline position, 1 = first author
    #[validate(range(min = 1))]
    pub position: u32,

    #[serde(default)]
    pub is_corresponding: bool,
}

impl PaperAuthorRecord {
    /// Shorthand used by fixtures and ingestion adapters
    pub fn new(author_id: Uuid, name: impl Into<String>, position: u32) -> Self {
        Self {
            author_id,
            name: name.into(),
            position,
            is_corresponding: false,
        }
    }

    /// Mark this author as the corresponding author
    pub fn corresponding(mut self) -> Self {
        self.is_corresponding = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(citation_count: i64, authors: Vec<PaperAuthorRecord>) -> PaperRecord {
        PaperRecord {
            id: Uuid::from_u128(1),
            year: Some(2021),
            citation_count,
            authors,
        }
    }

    #[test]
    fn test_valid_record() {
        let record = paper(
            12,
            vec![PaperAuthorRecord::new(Uuid::from_u128(10), "Ada Lovelace", 1)],
        );
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_negative_citations_rejected() {
        let record = paper(
            -1,
            vec![PaperAuthorRecord::new(Uuid::from_u128(10), "Ada Lovelace", 1)],
        );
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_nested_author_validation() {
        // Empty name and zero position both violate the nested rules
        let record = paper(0, vec![PaperAuthorRecord::new(Uuid::from_u128(10), "", 0)]);
        assert!(record.validate().is_err());
    }
}
