//! Two-phase construction of the resource graph.
//!
//! Phase one registers every entity ([`MetadataBuilder::register_entity`]);
//! phase two links associations ([`MetadataBuilder::resolve_associations`]).
//! Associations may reference entities registered later in phase one, so
//! linking only after all registrations makes forward references resolve
//! deterministically, in set registration order.

use log::debug;

use crate::backend::{AssociationKind, EntityMeta, FieldMapping, MetadataSource};

use super::errors::MetadataError;
use super::graph::{ResourceGraph, SkippedAssociation};
use super::resource::{
    AssociationCardinality, ResourceAssociation, ResourceProperty, ResourceSet, ResourceType,
    ResourceTypeKind,
};
use super::type_code::map_type;

/// Builds a [`ResourceGraph`] from backing entity metadata.
pub struct MetadataBuilder<'a> {
    source: &'a dyn MetadataSource,
    graph: ResourceGraph,
}

impl<'a> MetadataBuilder<'a> {
    pub fn new(source: &'a dyn MetadataSource) -> Self {
        MetadataBuilder {
            source,
            graph: ResourceGraph::default(),
        }
    }

    /// Register one backing entity class under a namespace.
    ///
    /// A class with declared subclasses becomes an abstract complex base
    /// type (no resource set); each subclass becomes a concrete complex
    /// type carrying the base reference, with its own field classification
    /// and resource set. A class without subclasses becomes one concrete
    /// entity type with a set.
    pub fn register_entity(&mut self, class: &str, namespace: &str) -> Result<(), MetadataError> {
        let meta = self.source.metadata_for(class)?;
        let name = unqualified(&meta.class_name);

        if meta.subclasses.is_empty() {
            self.add_concrete(&meta, name, namespace, ResourceTypeKind::Entity, None)?;
            return Ok(());
        }

        self.add_abstract(&meta, name, namespace)?;
        for subclass in &meta.subclasses {
            let sub_meta = self.source.metadata_for(subclass)?;
            let sub_name = unqualified(&sub_meta.class_name);
            self.add_concrete(
                &sub_meta,
                sub_name,
                namespace,
                ResourceTypeKind::Complex,
                Some(name.to_string()),
            )?;
        }

        Ok(())
    }

    /// Link associations across all registered sets. Run once, after every
    /// entity is registered.
    ///
    /// Associations whose target set was never registered are skipped, the
    /// graph stays partial by design; each skip is recorded and queryable
    /// through [`ResourceGraph::skipped_associations`].
    pub fn resolve_associations(&mut self) -> Result<(), MetadataError> {
        for set_name in self.graph.set_order.clone() {
            let (type_name, backing_class) = {
                let set = &self.graph.sets[&set_name];
                let resource_type = &self.graph.types[&set.resource_type];
                (resource_type.name.clone(), resource_type.backing_class.clone())
            };
            let meta = self.source.metadata_for(&backing_class)?;

            for association in &meta.associations {
                let target = unqualified(&association.target_entity);
                let Some(target_set) = self.graph.sets.get(target).cloned() else {
                    debug!(
                        "skipping association `{}`.`{}`: no set registered for `{}`",
                        set_name, association.field_name, target
                    );
                    self.graph.skipped.push(SkippedAssociation {
                        source_set: set_name.clone(),
                        field_name: association.field_name.clone(),
                        target: target.to_string(),
                    });
                    continue;
                };

                match association.kind {
                    AssociationKind::OneToOne => {
                        self.add_property(
                            &type_name,
                            ResourceProperty::reference(&association.field_name, &target_set.name),
                        );
                        self.graph.associations.push(ResourceAssociation {
                            source_set: set_name.clone(),
                            target_set: target_set.name.clone(),
                            cardinality: AssociationCardinality::OneToOne,
                            owning_property: association.field_name.clone(),
                            inverse_property: None,
                        });
                    }
                    AssociationKind::OneToMany => {
                        if let Some(mapped_by) = &association.mapped_by {
                            let target_type = target_set.resource_type.clone();
                            self.add_property(
                                &target_type,
                                ResourceProperty::reference(mapped_by, &set_name),
                            );
                        }
                        self.add_property(
                            &type_name,
                            ResourceProperty::set_reference(
                                &association.field_name,
                                &target_set.name,
                            ),
                        );
                        self.graph.associations.push(ResourceAssociation {
                            source_set: set_name.clone(),
                            target_set: target_set.name.clone(),
                            cardinality: AssociationCardinality::OneToMany,
                            owning_property: association.field_name.clone(),
                            inverse_property: association.mapped_by.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Finish construction; the graph is immutable from here on.
    pub fn build(self) -> ResourceGraph {
        self.graph
    }

    fn add_abstract(
        &mut self,
        meta: &EntityMeta,
        name: &str,
        namespace: &str,
    ) -> Result<(), MetadataError> {
        self.add_type(ResourceType {
            name: name.to_string(),
            namespace: namespace.to_string(),
            kind: ResourceTypeKind::Complex,
            is_abstract: true,
            base_type: None,
            backing_class: meta.class_name.clone(),
            key_properties: Vec::new(),
            properties: Default::default(),
        })
    }

    fn add_concrete(
        &mut self,
        meta: &EntityMeta,
        name: &str,
        namespace: &str,
        kind: ResourceTypeKind,
        base_type: Option<String>,
    ) -> Result<(), MetadataError> {
        let mut resource_type = ResourceType {
            name: name.to_string(),
            namespace: namespace.to_string(),
            kind,
            is_abstract: false,
            base_type,
            backing_class: meta.class_name.clone(),
            key_properties: Vec::new(),
            properties: Default::default(),
        };
        classify_fields(&meta.field_mappings, &mut resource_type)?;

        self.add_type(resource_type)?;
        self.add_set(name);
        debug!("registered resource set `{}`", name);
        Ok(())
    }

    fn add_type(&mut self, resource_type: ResourceType) -> Result<(), MetadataError> {
        if self.graph.types.contains_key(&resource_type.name) {
            return Err(MetadataError::DuplicateType {
                name: resource_type.name,
            });
        }
        self.graph
            .types
            .insert(resource_type.name.clone(), resource_type);
        Ok(())
    }

    fn add_set(&mut self, name: &str) {
        self.graph.sets.insert(
            name.to_string(),
            ResourceSet {
                name: name.to_string(),
                resource_type: name.to_string(),
            },
        );
        self.graph.set_order.push(name.to_string());
    }

    fn add_property(&mut self, type_name: &str, property: ResourceProperty) {
        if let Some(resource_type) = self.graph.types.get_mut(type_name) {
            resource_type
                .properties
                .insert(property.name.clone(), property);
        }
    }
}

/// Classify mapped fields: identity fields become key properties, the rest
/// become primitives. Both go through the type-code table, so an unmapped
/// storage type aborts registration.
fn classify_fields(
    fields: &[FieldMapping],
    resource_type: &mut ResourceType,
) -> Result<(), MetadataError> {
    for field in fields {
        let code = map_type(&field.backing_type, &field.field_name)?;
        if field.is_identity {
            resource_type
                .key_properties
                .push((field.field_name.clone(), code));
        } else {
            resource_type.properties.insert(
                field.field_name.clone(),
                ResourceProperty::primitive(&field.field_name, code),
            );
        }
    }
    Ok(())
}

/// Unqualified class identifier: text after the last `::`.
fn unqualified(class: &str) -> &str {
    class.rsplit("::").next().unwrap_or(class)
}
