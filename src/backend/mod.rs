//! Contracts for the backing entity-relationship mapper.
//!
//! The backing data source owns entity storage and class definitions. This
//! module defines the three capabilities the provider consumes from it:
//!
//! - [`meta`] — structural metadata per entity class (fields, identity
//!   columns, declared subclasses, associations)
//! - [`entity`] — reflective access to materialized entity instances
//! - [`query`] — a query builder with WHERE/ORDER/LIMIT/OFFSET/COUNT
//!   composition
//!
//! Everything behind these traits is opaque: connection pooling, sessions,
//! and the execution engine belong to the backend.

pub mod entity;
pub mod meta;
pub mod query;

pub use entity::{AccessValue, BackingEntity, EntityRef};
pub use meta::{AssociationKind, AssociationMeta, BackingType, EntityMeta, FieldMapping, MetadataSource};
pub use query::{BackendError, BackendQuery, DataSource};
