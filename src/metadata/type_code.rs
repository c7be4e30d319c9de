//! Backing storage type -> protocol primitive type code.

use serde::{Deserialize, Serialize};

use super::errors::MetadataError;
use crate::backend::BackingType;

/// Primitive type codes of the exposed protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveCode {
    String,
    Binary,
    Guid,
    Decimal,
    Single,
    Int16,
    Int32,
    Int64,
    Boolean,
    DateTime,
}

/// Map a backing storage type to its protocol primitive code.
///
/// Total over the enumerated domain; anything outside it fails with
/// [`MetadataError::UnmappableType`]. There is deliberately no default
/// fallback, so new backing types must be added to this table explicitly.
/// `field` names the mapped column for error context.
pub fn map_type(backing: &BackingType, field: &str) -> Result<PrimitiveCode, MetadataError> {
    let code = match backing {
        BackingType::Array
        | BackingType::SimpleArray
        | BackingType::JsonArray
        | BackingType::Object
        | BackingType::String
        | BackingType::Text => PrimitiveCode::String,
        BackingType::Blob => PrimitiveCode::Binary,
        BackingType::Guid => PrimitiveCode::Guid,
        BackingType::Decimal => PrimitiveCode::Decimal,
        BackingType::Float => PrimitiveCode::Single,
        BackingType::SmallInt => PrimitiveCode::Int16,
        BackingType::Integer => PrimitiveCode::Int32,
        BackingType::BigInt => PrimitiveCode::Int64,
        BackingType::Boolean => PrimitiveCode::Boolean,
        BackingType::DateTime | BackingType::DateTimeTz | BackingType::Date | BackingType::Time => {
            PrimitiveCode::DateTime
        }
        BackingType::Custom(_) => {
            return Err(MetadataError::UnmappableType {
                backing: backing.clone(),
                field: field.to_string(),
            })
        }
    };

    Ok(code)
}
