//! Search request compilation.
//!
//! A request flows through four stages:
//!
//! 1. [`SearchKind::classify`] picks the builders named by the marker
//! 2. each builder in [`handlers`] appends one clause to a [`ClauseBuckets`]
//! 3. the compiler adds the tenancy filter
//! 4. [`assemble`] turns the buckets into a single bool query

mod assembler;
mod compiler;
mod filter_type;
pub mod handlers;

pub use assembler::assemble;
pub use compiler::{PARENT_OBJECT_MARKER, QueryCompiler, SearchBody, SearchKind};
pub use filter_type::{ClauseBuckets, FilterType};
