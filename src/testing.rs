//! In-memory backing-mapper fixtures shared by the unit tests.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::backend::{
    AccessValue, AssociationKind, AssociationMeta, BackendError, BackendQuery, BackingEntity,
    BackingType, DataSource, EntityMeta, EntityRef, FieldMapping, MetadataSource,
};

// ---------------------------------------------------------------------------
// metadata fixtures
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryMetadataSource {
    entities: HashMap<String, EntityMeta>,
}

impl MemoryMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, meta: EntityMeta) -> Self {
        self.entities.insert(meta.class_name.clone(), meta);
        self
    }
}

impl MetadataSource for MemoryMetadataSource {
    fn metadata_for(&self, class: &str) -> Result<EntityMeta, BackendError> {
        self.entities
            .get(class)
            .cloned()
            .ok_or_else(|| BackendError::new(format!("unknown entity class `{}`", class)))
    }
}

pub fn field(name: &str, backing: BackingType, is_identity: bool) -> FieldMapping {
    FieldMapping {
        field_name: name.to_string(),
        backing_type: backing,
        is_identity,
    }
}

pub fn one_to_many(field_name: &str, target: &str, mapped_by: &str) -> AssociationMeta {
    AssociationMeta {
        field_name: field_name.to_string(),
        target_entity: target.to_string(),
        kind: AssociationKind::OneToMany,
        mapped_by: Some(mapped_by.to_string()),
    }
}

pub fn one_to_one(field_name: &str, target: &str) -> AssociationMeta {
    AssociationMeta {
        field_name: field_name.to_string(),
        target_entity: target.to_string(),
        kind: AssociationKind::OneToOne,
        mapped_by: None,
    }
}

pub fn entity_meta(
    class_name: &str,
    fields: Vec<FieldMapping>,
    associations: Vec<AssociationMeta>,
) -> EntityMeta {
    EntityMeta {
        class_name: class_name.to_string(),
        field_mappings: fields,
        associations,
        subclasses: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// entity instances
// ---------------------------------------------------------------------------

/// Reflective test entity: scalar fields plus navigation values, with an
/// explicit set of "exposed" accessor/mutator method names so both access
/// strategies can be exercised.
pub struct MemoryEntity {
    class: String,
    values: RwLock<HashMap<String, AccessValue>>,
    methods: HashSet<String>,
    /// How many times an accessor or mutator was probed.
    pub probes: AtomicUsize,
}

impl MemoryEntity {
    pub fn new(class: &str) -> Self {
        MemoryEntity {
            class: class.to_string(),
            values: RwLock::new(HashMap::new()),
            methods: HashSet::new(),
            probes: AtomicUsize::new(0),
        }
    }

    pub fn with_scalar(self, name: &str, value: Value) -> Self {
        self.values
            .write()
            .unwrap()
            .insert(name.to_string(), AccessValue::Scalar(value));
        self
    }

    pub fn with_value(self, name: &str, value: AccessValue) -> Self {
        self.values
            .write()
            .unwrap()
            .insert(name.to_string(), value);
        self
    }

    /// Declare a conventionally named accessor/mutator pair for `property`.
    pub fn with_methods_for(mut self, property: &str) -> Self {
        self.methods.insert(crate::accessor::accessor_name(property));
        self.methods.insert(crate::accessor::mutator_name(property));
        self
    }

    pub fn into_ref(self) -> EntityRef {
        Arc::new(self)
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(AtomicOrdering::SeqCst)
    }

    fn property_of(method: &str) -> String {
        decamelize(&method[3..])
    }
}

impl BackingEntity for MemoryEntity {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn invoke_accessor(&self, method: &str) -> Option<AccessValue> {
        self.probes.fetch_add(1, AtomicOrdering::SeqCst);
        if !self.methods.contains(method) {
            return None;
        }
        self.values
            .read()
            .unwrap()
            .get(&Self::property_of(method))
            .cloned()
    }

    fn invoke_mutator(&self, method: &str, value: AccessValue) -> bool {
        self.probes.fetch_add(1, AtomicOrdering::SeqCst);
        if !self.methods.contains(method) {
            return false;
        }
        self.values
            .write()
            .unwrap()
            .insert(Self::property_of(method), value);
        true
    }

    fn read_field(&self, field: &str) -> Option<AccessValue> {
        self.values.read().unwrap().get(field).cloned()
    }

    fn write_field(&self, field: &str, value: AccessValue) -> bool {
        let mut values = self.values.write().unwrap();
        if !values.contains_key(field) {
            return false;
        }
        values.insert(field.to_string(), value);
        true
    }
}

/// `HomeAddress` -> `home_address`.
fn decamelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// data source
// ---------------------------------------------------------------------------

/// In-memory data source. Evaluates `where_gt`/`where_eq` against entity
/// fields; opaque WHERE fragments are accepted but not evaluated.
#[derive(Default)]
pub struct MemoryDataSource {
    collections: HashMap<String, Vec<EntityRef>>,
    fail_message: Option<String>,
    pub queries_created: AtomicUsize,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, name: &str, rows: Vec<EntityRef>) -> Self {
        self.collections.insert(name.to_string(), rows);
        self
    }

    /// Make every query creation fail with the given backend message.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_message = Some(message.to_string());
        self
    }

    pub fn queries_created(&self) -> usize {
        self.queries_created.load(AtomicOrdering::SeqCst)
    }
}

impl DataSource for MemoryDataSource {
    fn create_query(&self, collection: &str, _alias: &str) -> Result<Box<dyn BackendQuery>, BackendError> {
        self.queries_created.fetch_add(1, AtomicOrdering::SeqCst);
        if let Some(message) = &self.fail_message {
            return Err(BackendError::new(message.clone()));
        }
        Ok(Box::new(MemoryQuery {
            rows: self.collections.get(collection).cloned().unwrap_or_default(),
            gt: Vec::new(),
            eq: Vec::new(),
            order: None,
            limit: None,
            offset: None,
        }))
    }
}

struct MemoryQuery {
    rows: Vec<EntityRef>,
    gt: Vec<(String, Value)>,
    eq: Vec<(String, Value)>,
    order: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl MemoryQuery {
    fn scalar_of(row: &EntityRef, column: &str) -> Option<Value> {
        match row.read_field(column) {
            Some(AccessValue::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    fn matches(&self, row: &EntityRef) -> bool {
        for (column, bound) in &self.gt {
            match Self::scalar_of(row, column) {
                Some(value) if compare(&value, bound) == Some(Ordering::Greater) => {}
                _ => return false,
            }
        }
        for (column, expected) in &self.eq {
            match Self::scalar_of(row, column) {
                Some(value) if compare(&value, expected) == Some(Ordering::Equal) => {}
                _ => return false,
            }
        }
        true
    }

    fn filtered(&self) -> Vec<EntityRef> {
        self.rows
            .iter()
            .filter(|row| self.matches(row))
            .cloned()
            .collect()
    }
}

impl BackendQuery for MemoryQuery {
    fn where_fragment(&mut self, _predicate: &str) -> Result<(), BackendError> {
        // Opaque fragments are the real backend's dialect; nothing to
        // evaluate in memory.
        Ok(())
    }

    fn where_gt(&mut self, column: &str, value: &Value) -> Result<(), BackendError> {
        self.gt.push((column.to_string(), value.clone()));
        Ok(())
    }

    fn where_eq(&mut self, column: &str, value: &Value) -> Result<(), BackendError> {
        self.eq.push((column.to_string(), value.clone()));
        Ok(())
    }

    fn order_by_asc(&mut self, column: &str) -> Result<(), BackendError> {
        self.order = Some(column.to_string());
        Ok(())
    }

    fn limit(&mut self, max_results: u64) {
        self.limit = Some(max_results);
    }

    fn offset(&mut self, first_result: u64) {
        self.offset = Some(first_result);
    }

    fn count(&self, _column: &str) -> Result<u64, BackendError> {
        Ok(self.filtered().len() as u64)
    }

    fn fetch(&self) -> Result<Vec<EntityRef>, BackendError> {
        let mut rows = self.filtered();
        if let Some(column) = &self.order {
            rows.sort_by(|a, b| {
                let left = MemoryQuery::scalar_of(a, column);
                let right = MemoryQuery::scalar_of(b, column);
                match (left, right) {
                    (Some(l), Some(r)) => compare(&l, &r).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                }
            });
        }
        let skip = self.offset.unwrap_or(0) as usize;
        let rows = rows.into_iter().skip(skip);
        Ok(match self.limit {
            Some(limit) => rows.take(limit as usize).collect(),
            None => rows.collect(),
        })
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Rows keyed `id` = 1..=n for the given class.
pub fn keyed_rows(class: &str, n: u64) -> Vec<EntityRef> {
    (1..=n)
        .map(|id| {
            MemoryEntity::new(class)
                .with_scalar("id", Value::from(id))
                .into_ref()
        })
        .collect()
}

/// Read the `id` scalar off each row, in order.
pub fn ids_of(rows: &[EntityRef]) -> Vec<u64> {
    rows.iter()
        .filter_map(|row| MemoryQuery::scalar_of(row, "id"))
        .filter_map(|value| value.as_u64())
        .collect()
}
