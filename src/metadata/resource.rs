//! Resource types, properties, sets, and associations of the exposed graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::type_code::PrimitiveCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceTypeKind {
    Entity,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourcePropertyKind {
    Key,
    Primitive,
    /// Scalar navigation to a single related entity.
    ResourceReference,
    /// Collection navigation to a related set.
    ResourceSetReference,
}

/// One property of a resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceProperty {
    pub name: String,
    pub kind: ResourcePropertyKind,
    /// Set for Key and Primitive properties.
    pub type_code: Option<PrimitiveCode>,
    /// Set for reference properties: name of the target resource set.
    pub target_set: Option<String>,
}

impl ResourceProperty {
    pub fn key(name: impl Into<String>, code: PrimitiveCode) -> Self {
        ResourceProperty {
            name: name.into(),
            kind: ResourcePropertyKind::Key,
            type_code: Some(code),
            target_set: None,
        }
    }

    pub fn primitive(name: impl Into<String>, code: PrimitiveCode) -> Self {
        ResourceProperty {
            name: name.into(),
            kind: ResourcePropertyKind::Primitive,
            type_code: Some(code),
            target_set: None,
        }
    }

    pub fn reference(name: impl Into<String>, target_set: impl Into<String>) -> Self {
        ResourceProperty {
            name: name.into(),
            kind: ResourcePropertyKind::ResourceReference,
            type_code: None,
            target_set: Some(target_set.into()),
        }
    }

    pub fn set_reference(name: impl Into<String>, target_set: impl Into<String>) -> Self {
        ResourceProperty {
            name: name.into(),
            kind: ResourcePropertyKind::ResourceSetReference,
            type_code: None,
            target_set: Some(target_set.into()),
        }
    }
}

/// A typed shape in the exposed graph, analogous to a table schema.
///
/// Polymorphic hierarchies are modelled with explicit parent references
/// (`base_type` names another registered type) rather than nested
/// structures, so lookup stays a flat registry scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceType {
    /// Unique within the whole graph.
    pub name: String,
    pub namespace: String,
    pub kind: ResourceTypeKind,
    pub is_abstract: bool,
    /// Name of the abstract base type, for members of a polymorphic family.
    pub base_type: Option<String>,
    /// Fully qualified backing class.
    pub backing_class: String,
    /// Key properties in declaration order.
    pub key_properties: Vec<(String, PrimitiveCode)>,
    /// Non-key properties by name.
    pub properties: HashMap<String, ResourceProperty>,
}

impl ResourceType {
    /// Name of the single key column, when exactly one is declared.
    pub fn single_key(&self) -> Option<&str> {
        match self.key_properties.as_slice() {
            [(name, _)] => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn has_composite_key(&self) -> bool {
        self.key_properties.len() > 1
    }
}

/// An addressable, named collection of instances of one concrete type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSet {
    pub name: String,
    /// Name of the owning concrete resource type.
    pub resource_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssociationCardinality {
    OneToOne,
    OneToMany,
}

/// A resolved relationship between two resource sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAssociation {
    /// Set whose type declares the association (owns the navigation).
    pub source_set: String,
    pub target_set: String,
    pub cardinality: AssociationCardinality,
    /// Navigation property added on the owning type.
    pub owning_property: String,
    /// For OneToMany: back-reference property added on the many side.
    pub inverse_property: Option<String>,
}
