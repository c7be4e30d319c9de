//! ormdata - query-protocol provider over ORM entity metadata.
//!
//! This crate adapts an object-relational data model to a query-oriented
//! remote collection protocol:
//!
//! - the [`metadata`] module inspects backing entity definitions and builds
//!   an immutable, queryable resource graph (entity and complex types,
//!   polymorphic hierarchies, key properties, associations);
//! - the [`query`] module translates protocol query intents (filter,
//!   ordering, top/skip, cursor token, keyed lookup, navigation) into calls
//!   against the backing data source and returns a uniform result envelope;
//! - the [`backend`] module holds the traits the backing mapper implements;
//! - the [`service`] module composes graph and translator behind one facade.
//!
//! The protocol engine (URI parsing, expression parsing, wire format) and
//! the backing store's execution engine are external collaborators.

pub mod accessor;
pub mod backend;
pub mod metadata;
pub mod query;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::PropertyAccessor;
pub use metadata::{MetadataBuilder, MetadataError, ResourceGraph};
pub use query::{QueryError, QueryProvider, QueryResult, QueryType};
pub use service::{Service, ServiceConfig};
