//! The immutable resource graph handed to the query provider.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::resource::{ResourceAssociation, ResourceSet, ResourceType};

/// An association dropped during resolution because its target set was
/// never registered. Kept queryable so partial graphs are visible instead
/// of silently missing navigation properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAssociation {
    /// Set whose type declared the association.
    pub source_set: String,
    /// Navigation field that could not be linked.
    pub field_name: String,
    /// Unqualified target entity name that had no registered set.
    pub target: String,
}

/// The finished metadata graph.
///
/// Built once through [`super::MetadataBuilder`], never mutated afterwards;
/// concurrent reads need no locking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceGraph {
    pub(super) types: HashMap<String, ResourceType>,
    pub(super) sets: HashMap<String, ResourceSet>,
    /// Set names in registration order; association resolution and
    /// enumeration follow this order.
    pub(super) set_order: Vec<String>,
    pub(super) associations: Vec<ResourceAssociation>,
    pub(super) skipped: Vec<SkippedAssociation>,
}

impl ResourceGraph {
    pub fn resolve_type(&self, name: &str) -> Option<&ResourceType> {
        self.types.get(name)
    }

    pub fn resolve_set(&self, name: &str) -> Option<&ResourceSet> {
        self.sets.get(name)
    }

    /// Owning resource type of a set.
    pub fn type_of_set(&self, set: &ResourceSet) -> Option<&ResourceType> {
        self.types.get(&set.resource_type)
    }

    /// All registered sets, in registration order.
    pub fn sets(&self) -> impl Iterator<Item = &ResourceSet> {
        self.set_order.iter().filter_map(|name| self.sets.get(name))
    }

    /// All registered types, in arbitrary order.
    pub fn types(&self) -> impl Iterator<Item = &ResourceType> {
        self.types.values()
    }

    /// Associations that were resolved during the linking pass.
    pub fn associations(&self) -> &[ResourceAssociation] {
        &self.associations
    }

    /// Associations dropped because their target set was not registered.
    pub fn skipped_associations(&self) -> &[SkippedAssociation] {
        &self.skipped
    }
}
