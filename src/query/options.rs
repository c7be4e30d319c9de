//! Query intents and the protocol engine's option structures.
//!
//! `FilterInfo`, `SkipTokenInfo`, and `KeyDescriptor` are produced by the
//! protocol engine's parsers; the translator consumes them through their
//! accessors only and never constructs them itself.

use serde_json::Value;

/// What a collection query should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// Scalar count only.
    Count,
    /// Entity rows only.
    Entities,
    /// Rows plus the count of the filtered query.
    EntitiesWithCount,
}

impl QueryType {
    pub fn wants_count(self) -> bool {
        matches!(self, QueryType::Count | QueryType::EntitiesWithCount)
    }

    pub fn wants_entities(self) -> bool {
        matches!(self, QueryType::Entities | QueryType::EntitiesWithCount)
    }
}

/// Parsed filter option: an opaque predicate usable directly as a backend
/// WHERE clause fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInfo {
    expression: String,
}

impl FilterInfo {
    pub fn new(expression: impl Into<String>) -> Self {
        FilterInfo {
            expression: expression.into(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// Parsed ordering option.
///
/// Carried through for contract completeness only: this provider declares
/// server-side ordered paging and always orders by the key column itself,
/// so no ordering contract is consumed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderByInfo {
    _private: (),
}

impl OrderByInfo {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cursor token: the last-seen position of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipTokenInfo {
    keys: Vec<(String, Value)>,
}

impl SkipTokenInfo {
    pub fn new(keys: Vec<(String, Value)>) -> Self {
        SkipTokenInfo { keys }
    }

    /// Ordered (key, value) pairs encoded in the token. This provider uses
    /// only the first pair (single-key assumption).
    pub fn order_by_keys_in_token(&self) -> &[(String, Value)] {
        &self.keys
    }
}

/// Key segment of a single-entity URI, already validated and type-checked
/// by the protocol engine.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDescriptor {
    named_values: Vec<(String, Value)>,
}

impl KeyDescriptor {
    pub fn new(named_values: Vec<(String, Value)>) -> Self {
        KeyDescriptor { named_values }
    }

    pub fn validated_named_values(&self) -> &[(String, Value)] {
        &self.named_values
    }
}
