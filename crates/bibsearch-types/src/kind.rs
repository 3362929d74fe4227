//! Document kinds and record identifiers.
//!
//! Every indexed entity belongs to one of three kinds. Records are the
//! parents; fulltext and collection-membership documents are children that
//! carry the parent's record id both as their own document id and as the
//! parent reference.

use serde::{Deserialize, Serialize};

/// Stable identifier of a bibliographic record.
///
/// Globally unique; doubles as the engine document id for all three kinds.
pub type RecordId = u64;

/// The three document kinds stored in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    /// A bibliographic record (parent document).
    Record,
    /// Extracted full text of a record (child document).
    Fulltext,
    /// One collection membership of a record (child document).
    Collection,
}

impl DocKind {
    /// Engine-facing document type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Record => "record",
            DocKind::Fulltext => "fulltext",
            DocKind::Collection => "collection",
        }
    }

    /// Parse from string, returning None for unknown kinds.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "record" => Some(DocKind::Record),
            "fulltext" => Some(DocKind::Fulltext),
            "collection" => Some(DocKind::Collection),
            _ => None,
        }
    }

    /// The parent kind, if this kind is a child in the parent/child scheme.
    pub fn parent(&self) -> Option<DocKind> {
        match self {
            DocKind::Record => None,
            DocKind::Fulltext | DocKind::Collection => Some(DocKind::Record),
        }
    }

    /// All kinds, parents first (the order mappings are installed in).
    pub fn all() -> [DocKind; 3] {
        [DocKind::Record, DocKind::Fulltext, DocKind::Collection]
    }
}

impl std::str::FromStr for DocKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown doc kind: {}", s))
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-document failure reported inside an otherwise successful bulk
/// write. The batch as a whole does not fail because of one bad document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingFailure {
    /// Identifier of the document that failed.
    pub id: RecordId,
    /// Error description as reported by the engine or the document source.
    pub error: String,
}

impl IndexingFailure {
    pub fn new(id: RecordId, error: impl Into<String>) -> Self {
        Self {
            id,
            error: error.into(),
        }
    }
}

impl std::fmt::Display for IndexingFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: {}", self.id, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in DocKind::all() {
            assert_eq!(DocKind::parse(kind.as_str()), Some(kind));
            assert_eq!(kind.as_str().parse::<DocKind>().unwrap(), kind);
        }
        assert_eq!(DocKind::parse("bibdoc"), None);
        assert!("bibdoc".parse::<DocKind>().is_err());
    }

    #[test]
    fn test_parent_relationships() {
        assert_eq!(DocKind::Record.parent(), None);
        assert_eq!(DocKind::Fulltext.parent(), Some(DocKind::Record));
        assert_eq!(DocKind::Collection.parent(), Some(DocKind::Record));
    }

    #[test]
    fn test_failure_display() {
        let failure = IndexingFailure::new(42, "mapping conflict");
        assert_eq!(failure.to_string(), "record 42: mapping conflict");
    }
}
