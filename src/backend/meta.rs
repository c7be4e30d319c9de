//! Structural entity metadata as reported by the backing mapper.

use serde::{Deserialize, Serialize};

use super::query::BackendError;

/// Storage-level type of a mapped field, as the backing mapper declares it.
///
/// `Custom` carries backend-specific or user-defined type names that have no
/// protocol mapping; they are rejected during classification rather than
/// silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackingType {
    Array,
    SimpleArray,
    JsonArray,
    Object,
    String,
    Text,
    Blob,
    Guid,
    Decimal,
    Float,
    SmallInt,
    Integer,
    BigInt,
    Boolean,
    DateTime,
    DateTimeTz,
    Date,
    Time,
    Custom(String),
}

impl std::fmt::Display for BackingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackingType::Custom(name) => write!(f, "{}", name),
            other => write!(f, "{:?}", other),
        }
    }
}

/// One mapped column of an entity class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMapping {
    pub field_name: String,
    pub backing_type: BackingType,
    /// True when the field is part of the identity (primary key).
    pub is_identity: bool,
}

/// Cardinality of a declared association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssociationKind {
    OneToOne,
    OneToMany,
}

/// A declared association from one entity class to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationMeta {
    /// Navigation field on the owning class.
    pub field_name: String,
    /// Fully qualified target entity class.
    pub target_entity: String,
    pub kind: AssociationKind,
    /// For OneToMany: the field on the target class holding the back
    /// reference to the owning side.
    pub mapped_by: Option<String>,
}

/// Everything the graph builder needs to know about one entity class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Fully qualified class name (`ns::sub::Member`).
    pub class_name: String,
    pub field_mappings: Vec<FieldMapping>,
    pub associations: Vec<AssociationMeta>,
    /// Declared subclasses (fully qualified) for polymorphic families.
    pub subclasses: Vec<String>,
}

/// Source of structural metadata, implemented by the backing mapper.
pub trait MetadataSource {
    /// Fetch the metadata for a fully qualified entity class.
    fn metadata_for(&self, class: &str) -> Result<EntityMeta, BackendError>;
}
