//! Scoped store client contract.
//!
//! The list engine talks to storage only through [`DatabaseClient`]. A query names a
//! root scope, a resource type and whether descendant scopes match; the client answers
//! with one page of opaque [`Object`]s and an optional continuation token that callers
//! must thread back verbatim.
//!
//! Two implementations ship with the crate:
//! - [`inmemory::InMemoryDatabaseClient`], a keyset-paged fake used by the server and tests
//! - [`testing::RecordingDatabaseClient`], a call-recording stub with scripted answers
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod cursor;
pub mod inmemory;
pub mod object;
pub mod query;
pub mod testing;

pub use client::{DatabaseClient, DatabaseError};
pub use inmemory::InMemoryDatabaseClient;
pub use object::{Metadata, Object, ObjectQueryResult};
pub use query::{Query, QueryOptions};
