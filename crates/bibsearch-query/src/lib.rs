//! # bibsearch-query
//!
//! Search side of bibsearch: translates a free-text query plus structured
//! filters into one composite engine-native query, and adapts the raw
//! engine response into three stable read views (hits, facets,
//! highlights).
//!
//! Both directions are strategy interfaces ([`QueryTranslator`],
//! [`ResponseAdapter`]) with default implementations, substitutable at
//! construction time for testing.

pub mod params;
pub mod response;
pub mod translator;

pub use params::{SearchParams, SortOrder, SortSpec};
pub use response::{Hits, PassthroughAdapter, ResponseAdapter, SearchResponse};
pub use translator::{BoolQueryTranslator, QueryTranslator};
