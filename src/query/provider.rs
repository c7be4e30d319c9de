//! The query provider: translates protocol query intents into backend
//! query calls and wraps the outcome in a [`QueryResult`].

use std::sync::{Arc, OnceLock};

use log::debug;

use crate::accessor::PropertyAccessor;
use crate::backend::{AccessValue, BackingEntity, DataSource, EntityRef};
use crate::metadata::{ResourceGraph, ResourceProperty, ResourceSet, ResourceType};

use super::errors::QueryError;
use super::expression::ExpressionTranslator;
use super::options::{FilterInfo, KeyDescriptor, OrderByInfo, QueryType, SkipTokenInfo};
use super::result::QueryResult;

/// Alias every backend query is rooted under.
const QUERY_ALIAS: &str = "r";

/// Stateless per-request translator over one resource graph and one data
/// source. Safe to share across concurrent requests: the graph is
/// immutable and the only interior state is the accessor's strategy cache
/// and the lazily built expression translator.
pub struct QueryProvider {
    graph: Arc<ResourceGraph>,
    source: Arc<dyn DataSource>,
    accessor: PropertyAccessor,
    expression: OnceLock<ExpressionTranslator>,
}

impl QueryProvider {
    pub fn new(graph: Arc<ResourceGraph>, source: Arc<dyn DataSource>) -> Self {
        QueryProvider {
            graph,
            source,
            accessor: PropertyAccessor::new(),
            expression: OnceLock::new(),
        }
    }

    /// Cursor-based key ordering is enforced here, not by the caller.
    pub fn handles_ordered_paging(&self) -> bool {
        true
    }

    /// Backend-specific filter-expression translator, built on first use
    /// and reused for the provider's lifetime.
    pub fn expression_translator(&self) -> &ExpressionTranslator {
        self.expression
            .get_or_init(|| ExpressionTranslator::new(QUERY_ALIAS))
    }

    /// Query a whole resource set: `/Members?$filter=...&$top=...`.
    ///
    /// `order_by` is accepted for contract completeness but not translated;
    /// the entities path always orders ascending by the key column, which
    /// is what backs [`Self::handles_ordered_paging`].
    #[allow(clippy::too_many_arguments)]
    pub fn get_resource_set(
        &self,
        query_type: QueryType,
        resource_set: &ResourceSet,
        filter: Option<&FilterInfo>,
        _order_by: Option<&OrderByInfo>,
        top: Option<u64>,
        skip: Option<u64>,
        skip_token: Option<&SkipTokenInfo>,
    ) -> Result<QueryResult, QueryError> {
        let resource_type = self.type_of(resource_set)?;
        let key = self.single_key(resource_set, resource_type)?;

        debug!(
            "querying set `{}` ({:?}, top={:?}, skip={:?}, token={})",
            resource_set.name,
            query_type,
            top,
            skip,
            skip_token.is_some()
        );

        let mut query = self.source.create_query(&resource_set.name, QUERY_ALIAS)?;

        if let Some(filter) = filter {
            query.where_fragment(filter.expression())?;
        }

        if let Some(token) = skip_token {
            // Single-key assumption: only the first ordering pair matters.
            if let Some((_, last_seen)) = token.order_by_keys_in_token().first() {
                query.where_gt(key, last_seen)?;
            }
        }

        let mut result = QueryResult::default();

        if query_type.wants_count() {
            let raw = query.count(key)?;
            result.count = Some(match query_type {
                QueryType::Count => QueryResult::adjust_count_for_paging(raw, top, skip),
                _ => raw,
            });
        }

        if query_type.wants_entities() {
            query.order_by_asc(key)?;
            if let Some(top) = top {
                query.limit(top);
            }
            if let Some(skip) = skip {
                query.offset(skip);
            }
            result.results = Some(query.fetch()?);
        }

        Ok(result)
    }

    /// Fetch one entity by key: `/Members(3)`. Absence is `Ok(None)`, never
    /// an error.
    pub fn get_resource_from_resource_set(
        &self,
        resource_set: &ResourceSet,
        key_descriptor: &KeyDescriptor,
    ) -> Result<Option<EntityRef>, QueryError> {
        let resource_type = self.type_of(resource_set)?;
        self.single_key(resource_set, resource_type)?;

        let mut query = self.source.create_query(&resource_set.name, QUERY_ALIAS)?;
        for (name, value) in key_descriptor.validated_named_values() {
            query.where_eq(name, value)?;
        }
        query.limit(1);

        let mut rows = query.fetch()?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Materialize a collection navigation:
    /// `/Members(3)/addresses` or `$expand=addresses`.
    ///
    /// Known limitation, carried as an explicit contract: `filter`,
    /// `order_by`, `top`, and `skip` are not applied on this path. The
    /// backend materializes the whole related collection; callers must
    /// restrict it client-side or extend this before relying on it.
    #[allow(clippy::too_many_arguments)]
    pub fn get_related_resource_set(
        &self,
        source_set: &ResourceSet,
        source_instance: &dyn BackingEntity,
        _target_set: &ResourceSet,
        target_property: &ResourceProperty,
        _filter: Option<&FilterInfo>,
        _order_by: Option<&OrderByInfo>,
        _top: Option<u64>,
        _skip: Option<u64>,
    ) -> Result<QueryResult, QueryError> {
        debug!(
            "navigating `{}`.`{}` (collection)",
            source_set.name, target_property.name
        );

        let rows = self.related_collection(source_instance, target_property)?;
        Ok(QueryResult::entities(rows))
    }

    /// Resolve a scalar navigation: `/Orders(7)/customer`.
    pub fn get_related_resource_reference(
        &self,
        source_set: &ResourceSet,
        source_instance: &dyn BackingEntity,
        _target_set: &ResourceSet,
        target_property: &ResourceProperty,
    ) -> Result<Option<EntityRef>, QueryError> {
        debug!(
            "navigating `{}`.`{}` (reference)",
            source_set.name, target_property.name
        );

        match self.accessor.get(source_instance, &target_property.name)? {
            AccessValue::Entity(entity) => Ok(Some(entity)),
            AccessValue::Null => Ok(None),
            AccessValue::Scalar(value) if value.is_null() => Ok(None),
            _ => Err(QueryError::NotNavigable {
                class: source_instance.class_name().to_string(),
                property: target_property.name.clone(),
            }),
        }
    }

    /// Fetch one keyed item out of a related collection:
    /// `/Members(3)/addresses(12)`. Matches the key descriptor against the
    /// materialized items; absence is `Ok(None)`.
    pub fn get_resource_from_related_resource_set(
        &self,
        _source_set: &ResourceSet,
        source_instance: &dyn BackingEntity,
        _target_set: &ResourceSet,
        target_property: &ResourceProperty,
        key_descriptor: &KeyDescriptor,
    ) -> Result<Option<EntityRef>, QueryError> {
        let rows = self.related_collection(source_instance, target_property)?;

        for row in rows {
            let mut matches = true;
            for (name, expected) in key_descriptor.validated_named_values() {
                let actual = self.accessor.get(row.as_ref(), name)?;
                match actual.as_scalar() {
                    Some(value) if value == expected => {}
                    _ => {
                        matches = false;
                        break;
                    }
                }
            }
            if matches {
                return Ok(Some(row));
            }
        }

        Ok(None)
    }

    fn related_collection(
        &self,
        source_instance: &dyn BackingEntity,
        target_property: &ResourceProperty,
    ) -> Result<Vec<EntityRef>, QueryError> {
        match self.accessor.get(source_instance, &target_property.name)? {
            AccessValue::Collection(rows) => Ok(rows),
            AccessValue::Null => Ok(Vec::new()),
            _ => Err(QueryError::NotNavigable {
                class: source_instance.class_name().to_string(),
                property: target_property.name.clone(),
            }),
        }
    }

    fn type_of<'a>(&'a self, set: &ResourceSet) -> Result<&'a ResourceType, QueryError> {
        self.graph
            .type_of_set(set)
            .ok_or_else(|| QueryError::InvalidResourceSet {
                set: set.name.clone(),
                reason: format!("type `{}` is not registered", set.resource_type),
            })
    }

    /// The one key column keyed operations run against. Composite keys are
    /// rejected here, before any backend call.
    fn single_key<'a>(
        &self,
        set: &ResourceSet,
        resource_type: &'a ResourceType,
    ) -> Result<&'a str, QueryError> {
        if resource_type.has_composite_key() {
            return Err(QueryError::UnsupportedCompositeKey {
                set: set.name.clone(),
                key_count: resource_type.key_properties.len(),
            });
        }

        resource_type
            .single_key()
            .ok_or_else(|| QueryError::InvalidResourceSet {
                set: set.name.clone(),
                reason: "no key property declared".to_string(),
            })
    }
}
