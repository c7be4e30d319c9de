//! Metadata graph: resource types, sets, and associations derived from the
//! backing mapper's entity metadata.
//!
//! Construction is two-phase: register every entity first
//! ([`MetadataBuilder::register_entity`]), then link associations in one
//! pass ([`MetadataBuilder::resolve_associations`]) so forward references
//! always resolve. The finished [`ResourceGraph`] is immutable and safe for
//! concurrent reads.

pub mod builder;
pub mod errors;
pub mod graph;
pub mod resource;
pub mod type_code;


pub use builder::MetadataBuilder;
pub use errors::MetadataError;
pub use graph::{ResourceGraph, SkippedAssociation};
pub use resource::{
    AssociationCardinality, ResourceAssociation, ResourceProperty, ResourcePropertyKind,
    ResourceSet, ResourceType, ResourceTypeKind,
};
pub use type_code::{map_type, PrimitiveCode};
