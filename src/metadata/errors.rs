//! Metadata graph construction errors.
//!
//! All of these are initialization-time defects: a service must not start
//! with a broken graph, so construction aborts rather than degrading.

use thiserror::Error;

use crate::backend::{BackendError, BackingType};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetadataError {
    #[error("type with same name already added: `{name}`")]
    DuplicateType { name: String },

    #[error("no primitive type mapping for backing type `{backing}` (field `{field}`)")]
    UnmappableType { backing: BackingType, field: String },

    #[error("failed to fetch entity metadata: {0}")]
    Source(#[from] BackendError),
}
