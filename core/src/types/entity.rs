//! Fields and sub-collections shared by every Kanka entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// The `{"data": ...}` wrapper used by every response and nested collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Server-assigned identity and audit fields. Never sent on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_id: i64,
    pub image_full: Option<String>,
    pub image_thumb: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_custom_image: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
}

/// Nested collections returned alongside an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityChildren {
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Envelope<Vec<Attribute>>,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_events: Envelope<Vec<EntityEvent>>,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_files: Envelope<Vec<EntityFile>>,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_notes: Envelope<Vec<EntityNote>>,
    #[serde(deserialize_with = "null_as_default")]
    pub relations: Envelope<Vec<Relation>>,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory: Envelope<Vec<InventoryItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub value: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub default_order: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_star: bool,
}

/// A reminder tying the entity to a calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    pub calendar_id: Option<i64>,
    pub date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub length: i64,
    pub comment: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_recurring: bool,
    pub recurring_until: Option<i64>,
    pub colour: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFile {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityNote {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub entry: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
}

/// A directed link from this entity (`owner_id`) to another (`target_id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relation {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub target_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub relation: String,
    pub attitude: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_id: i64,
    pub item_id: Option<i64>,
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
    pub position: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_equipped: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
}
