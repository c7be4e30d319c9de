//! Reflective access to materialized entity instances.
//!
//! Backing entity classes are generated or foreign code whose accessor
//! conventions vary. Instances therefore surface through a reflection-style
//! trait rather than concrete types: the provider probes for a
//! conventionally named accessor first and falls back to direct field
//! access (see [`crate::accessor::PropertyAccessor`]).

use std::sync::Arc;

use serde_json::Value;

/// Shared handle to a materialized entity instance.
pub type EntityRef = Arc<dyn BackingEntity>;

/// Value produced by reading a property off an entity instance.
///
/// Scalar columns carry JSON values; navigation properties carry other
/// entities or whole collections of them.
#[derive(Clone)]
pub enum AccessValue {
    Null,
    Scalar(Value),
    Entity(EntityRef),
    Collection(Vec<EntityRef>),
}

impl AccessValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            AccessValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AccessValue::Null)
    }
}

impl std::fmt::Debug for AccessValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessValue::Null => write!(f, "Null"),
            AccessValue::Scalar(v) => write!(f, "Scalar({})", v),
            AccessValue::Entity(e) => write!(f, "Entity({})", e.class_name()),
            AccessValue::Collection(es) => write!(f, "Collection(len={})", es.len()),
        }
    }
}

impl std::fmt::Debug for dyn BackingEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BackingEntity({})", self.class_name())
    }
}

/// Reflection capability over one entity instance.
///
/// Mutation takes `&self`: reflective writes bypass visibility the same way
/// the read path does, so implementations use interior mutability.
pub trait BackingEntity: Send + Sync {
    /// Unqualified class name of the instance.
    fn class_name(&self) -> &str;

    /// Invoke a conventionally named accessor method, e.g. `getHomeAddress`.
    /// `None` when the class does not expose that method.
    fn invoke_accessor(&self, method: &str) -> Option<AccessValue>;

    /// Invoke a conventionally named mutator method. `false` when the class
    /// does not expose it.
    fn invoke_mutator(&self, method: &str, value: AccessValue) -> bool;

    /// Read a field directly, ignoring visibility. `None` when no such
    /// field exists.
    fn read_field(&self, field: &str) -> Option<AccessValue>;

    /// Write a field directly, ignoring visibility. `false` when no such
    /// field exists.
    fn write_field(&self, field: &str, value: AccessValue) -> bool;
}
