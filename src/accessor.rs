//! Dual-path property access over backing entity instances.
//!
//! Resolution order is fixed: probe for a conventionally named accessor or
//! mutator method first, fall back to direct field access second. The
//! winning strategy is recorded once per (class, property) pair and reused.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::backend::{AccessValue, BackingEntity};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    #[error("no accessor or field for property `{property}` on `{class}`")]
    UnknownProperty { class: String, property: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Method,
    Field,
}

/// Resolves named properties on backing entities, method-first.
///
/// Thread safe; the strategy cache uses interior mutability so a shared
/// accessor can serve concurrent requests.
#[derive(Default)]
pub struct PropertyAccessor {
    strategies: RwLock<HashMap<(String, String), Strategy>>,
}

impl PropertyAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `property` off `entity`.
    pub fn get(&self, entity: &dyn BackingEntity, property: &str) -> Result<AccessValue, AccessError> {
        match self.cached_strategy(entity.class_name(), property) {
            Some(Strategy::Method) => {
                if let Some(value) = entity.invoke_accessor(&accessor_name(property)) {
                    return Ok(value);
                }
            }
            Some(Strategy::Field) => {
                if let Some(value) = entity.read_field(property) {
                    return Ok(value);
                }
            }
            None => {}
        }

        if let Some(value) = entity.invoke_accessor(&accessor_name(property)) {
            self.remember(entity.class_name(), property, Strategy::Method);
            return Ok(value);
        }

        if let Some(value) = entity.read_field(property) {
            self.remember(entity.class_name(), property, Strategy::Field);
            return Ok(value);
        }

        Err(AccessError::UnknownProperty {
            class: entity.class_name().to_string(),
            property: property.to_string(),
        })
    }

    /// Write `property` on `entity`.
    pub fn set(
        &self,
        entity: &dyn BackingEntity,
        property: &str,
        value: AccessValue,
    ) -> Result<(), AccessError> {
        if entity.invoke_mutator(&mutator_name(property), value.clone()) {
            self.remember(entity.class_name(), property, Strategy::Method);
            return Ok(());
        }

        if entity.write_field(property, value) {
            self.remember(entity.class_name(), property, Strategy::Field);
            return Ok(());
        }

        Err(AccessError::UnknownProperty {
            class: entity.class_name().to_string(),
            property: property.to_string(),
        })
    }

    fn cached_strategy(&self, class: &str, property: &str) -> Option<Strategy> {
        self.strategies
            .read()
            .ok()?
            .get(&(class.to_string(), property.to_string()))
            .copied()
    }

    fn remember(&self, class: &str, property: &str, strategy: Strategy) {
        if let Ok(mut map) = self.strategies.write() {
            map.insert((class.to_string(), property.to_string()), strategy);
        }
    }
}

/// Conventional accessor name: `home_address` -> `getHomeAddress`.
pub fn accessor_name(property: &str) -> String {
    format!("get{}", camelize(property))
}

/// Conventional mutator name: `home_address` -> `setHomeAddress`.
pub fn mutator_name(property: &str) -> String {
    format!("set{}", camelize(property))
}

/// Upper-camel-case a snake_case property name.
fn camelize(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper_next = true;
    for ch in property.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
