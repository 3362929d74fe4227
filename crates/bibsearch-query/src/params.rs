//! Caller-facing search parameters.

/// Sort direction. Descending unless explicitly requested otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One sort clause.
///
/// `field` is the indexed field path (e.g. `title.title`); the translator
/// sorts on its exact-match sort representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }
}

/// A simplified search request: free text plus structured filters.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Free-text query.
    pub text: String,
    /// Equality filters, each a (field, value) pair AND'd in after scoring.
    pub filters: Vec<(String, String)>,
    /// Collection names the matching records must belong to.
    pub collections: Vec<String>,
    /// Optional sort clause; engine relevance order when absent.
    pub sort: Option<SortSpec>,
    /// Result window offset.
    pub offset: usize,
    /// Result window size.
    pub size: usize,
}

impl SearchParams {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 10,
            ..Default::default()
        }
    }

    /// Add an equality filter on a field.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Restrict results to members of this collection.
    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collections.push(name.into());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, offset: usize, size: usize) -> Self {
        self.offset = offset;
        self.size = size;
        self
    }

    /// Whether any post-scoring filter is present.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty() || !self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let params = SearchParams::new("higgs boson")
            .with_filter("authors.full_name.facet", "Ellis, J.")
            .with_collection("Preprints")
            .with_sort(SortSpec::ascending("title.title"))
            .with_page(20, 50);

        assert_eq!(params.text, "higgs boson");
        assert_eq!(params.filters.len(), 1);
        assert_eq!(params.collections, ["Preprints"]);
        assert_eq!(params.sort.as_ref().unwrap().order, SortOrder::Asc);
        assert_eq!((params.offset, params.size), (20, 50));
        assert!(params.has_filters());
    }

    #[test]
    fn test_defaults() {
        let params = SearchParams::new("*");
        assert!(!params.has_filters());
        assert_eq!(params.offset, 0);
        assert_eq!(params.size, 10);
        assert!(params.sort.is_none());
    }

    #[test]
    fn test_default_sort_order_is_descending() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!(SortSpec::descending("title.title").order.as_str(), "desc");
    }
}
