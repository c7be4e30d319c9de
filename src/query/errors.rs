//! Request-time errors surfaced through the protocol engine's error channel.

use thiserror::Error;

use crate::accessor::AccessError;
use crate::backend::BackendError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// Keyed operations require exactly one key property. Raised before any
    /// backend call; a client-visible "not supported", not an internal
    /// failure.
    #[error("composite keys are not supported: resource set `{set}` declares {key_count} key properties")]
    UnsupportedCompositeKey { set: String, key_count: usize },

    /// Backend failure during build or execute, rewrapped with the original
    /// message. Never retried; an EntitiesWithCount request that fails
    /// yields neither count nor rows.
    #[error("internal server error: {message}")]
    Backend { message: String },

    #[error(transparent)]
    Access(#[from] AccessError),

    /// Navigating a property that does not resolve to an entity or a
    /// collection on the given instance.
    #[error("`{property}` is not a navigation property of `{class}`")]
    NotNavigable { class: String, property: String },

    /// The graph handed to the provider does not contain the set's owning
    /// type, or the type declares no key. Configuration defect.
    #[error("resource set `{set}` has no usable resource type: {reason}")]
    InvalidResourceSet { set: String, reason: String },
}

impl From<BackendError> for QueryError {
    fn from(err: BackendError) -> Self {
        QueryError::Backend {
            message: err.message,
        }
    }
}
