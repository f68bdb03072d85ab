//! Request and catalogue model types.
//!
//! - [`SearchRequest`]: a normalized search request
//! - [`Geometry`] / [`GeoRelation`]: geo search vocabulary
//! - [`ItemType`]: the six catalogue item kinds and their ownership graph
//! - [`RelationshipRequest`]: a relationship traversal request

mod geo;
mod item_type;
mod relationship;
mod request;

pub use geo::{GeoRelation, Geometry};
pub use item_type::ItemType;
pub use relationship::{Ancestors, Relationship, RelationshipRequest};
pub use request::SearchRequest;
