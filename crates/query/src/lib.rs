//! Catalogue Query Engine
//!
//! This crate compiles normalized catalogue requests into search-engine
//! queries. It covers geo, text, attribute and tag searches, relationship
//! traversal over the catalogue's item-type graph, and tag/item listings.
//! It performs no I/O: every operation is a pure function from a request to
//! a query or an error.
//!
//! # Architecture
//!
//! - [`search`] - Search compiler, clause builders and bool assembler
//! - [`relationship`] - Relationship resolver over the item-type graph
//! - [`listing`] - Listing queries backed by terms aggregations
//! - [`dsl`] - Typed query, shape and aggregation model
//! - [`types`] - Request and item-type models
//! - [`error`] - Error kinds and the client-facing envelope
//! - [`config`] - Compiler tunables
//!
//! # Quick Start
//!
//! ```
//! use catalogue_query::{QueryCompiler, QueryConfig, SearchRequest};
//! use serde_json::json;
//!
//! let compiler = QueryCompiler::new(QueryConfig::default());
//! let request = SearchRequest::from_json(json!({
//!     "searchType": "attributeSearch_",
//!     "property": ["tags"],
//!     "value": [["flood", "rain"]]
//! }))
//! .unwrap();
//!
//! let body = compiler.compile_body(&request).unwrap();
//! println!("{}", body.to_json());
//! ```
//!
//! Relationship lookups go through [`RelationshipResolver`]:
//!
//! ```
//! use catalogue_query::{RelationshipRequest, RelationshipResolver};
//! use serde_json::json;
//!
//! let request = RelationshipRequest::from_json(json!({
//!     "id": "rs-1",
//!     "relationship": "provider",
//!     "itemType": "iudx:ResourceServer"
//! }))
//! .unwrap();
//!
//! let query = RelationshipResolver::new().resolve_checked(&request).unwrap();
//! assert!(query.as_bool().is_some());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dsl;
pub mod error;
pub mod listing;
pub mod relationship;
pub mod search;
pub mod types;

pub use config::QueryConfig;
pub use dsl::{Aggregation, Query};
pub use error::{ErrorEnvelope, ErrorKind, QueryError, QueryResult};
pub use listing::{ListingQuery, ListingRequest, build_listing};
pub use relationship::RelationshipResolver;
pub use search::{FilterType, QueryCompiler, SearchBody};
pub use types::{ItemType, Relationship, RelationshipRequest, SearchRequest};
