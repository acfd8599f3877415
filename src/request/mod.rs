//! Request construction.
//!
//! - `payload`: raw body and query-param builders per endpoint
//! - `search`: concept-type filters and their validation
//! - `options`: per-call headers, params and body overrides

pub mod options;
pub mod payload;
pub mod search;

pub use options::RequestOptions;
pub use payload::*;
pub use search::{
    ClosedEnum, ConceptFilter, ConceptQuery, ConceptType, FilterValue, SearchConceptType,
    SearchFilter, SearchQuery, validate_concept_types, validate_search_types,
};
