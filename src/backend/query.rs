//! Query-builder capability of the backing data source.

use serde_json::Value;
use thiserror::Error;

use super::entity::EntityRef;

/// Failure reported by the backend while fetching metadata, building a
/// query, or executing one. The provider rewraps these at its boundary and
/// never retries.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError {
            message: message.into(),
        }
    }
}

/// Entry point into the backend's query engine.
///
/// A fresh query is opened per request; the provider holds no backend state
/// between calls. Session and pool discipline belong to the implementation.
pub trait DataSource: Send + Sync {
    /// Start a query rooted at the named backing collection, aliased for
    /// predicate composition.
    fn create_query(&self, collection: &str, alias: &str) -> Result<Box<dyn BackendQuery>, BackendError>;
}

/// One composable backend query.
///
/// Predicates accumulate conjunctively; `count` and `fetch` execute the
/// query as currently composed.
pub trait BackendQuery {
    /// Attach an opaque predicate fragment, consumed verbatim as WHERE.
    fn where_fragment(&mut self, predicate: &str) -> Result<(), BackendError>;

    /// Attach `column > value` on the aliased root.
    fn where_gt(&mut self, column: &str, value: &Value) -> Result<(), BackendError>;

    /// Attach `column = value` on the aliased root.
    fn where_eq(&mut self, column: &str, value: &Value) -> Result<(), BackendError>;

    /// Order results ascending by the given column.
    fn order_by_asc(&mut self, column: &str) -> Result<(), BackendError>;

    fn limit(&mut self, max_results: u64);

    fn offset(&mut self, first_result: u64);

    /// Execute a COUNT aggregate over the given column.
    fn count(&self, column: &str) -> Result<u64, BackendError>;

    /// Execute and collect rows.
    fn fetch(&self) -> Result<Vec<EntityRef>, BackendError>;
}
