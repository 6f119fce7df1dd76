//! Domain DTOs for the Kanka API.
//!
//! # Design
//! A full record is composed, not inherited: it flattens the writable
//! payload (`SimpleCharacter`, `SimpleLocation`) next to the server-assigned
//! `EntityMeta` and the nested `EntityChildren` collections. Payloads are
//! checked by `Payload::validate` before `Payload::to_json` encodes them, so
//! validation is testable on its own and never depends on the encoder.

mod character;
mod entity;
mod location;

pub use character::{Character, SimpleCharacter, Trait};
pub use entity::{
    Attribute, EntityChildren, EntityEvent, EntityFile, EntityMeta, EntityNote, Envelope,
    InventoryItem, Relation,
};
pub use location::{Location, SimpleLocation};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// A create/update request body.
pub trait Payload: Serialize {
    /// Type name used in error messages.
    const KIND: &'static str;

    /// The required `name` field.
    fn name(&self) -> &str;

    fn validate(&self) -> Result<(), ApiError> {
        if self.name().trim().is_empty() {
            return Err(ApiError::MissingField {
                resource: Self::KIND,
                field: "Name",
            });
        }
        Ok(())
    }

    /// Validate, then encode the payload as a JSON request body.
    fn to_json(&self) -> Result<String, ApiError> {
        self.validate()?;
        serde_json::to_string(self).map_err(ApiError::Serialization)
    }
}

/// Decode `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
