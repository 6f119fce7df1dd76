use serde::{Deserialize, Serialize};

use super::{null_as_default, EntityChildren, EntityMeta, Envelope, Payload};

/// A character returned by the API.
///
/// See <https://kanka.io/en-US/docs/1.0/characters>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(flatten)]
    pub meta: EntityMeta,
    #[serde(flatten)]
    pub fields: SimpleCharacter,
    #[serde(default, deserialize_with = "null_as_default")]
    pub traits: Envelope<Vec<Trait>>,
    #[serde(flatten)]
    pub children: EntityChildren,
}

/// Writable character fields, sent as the body of create and update calls.
///
/// Only `name` is required. Unset fields are omitted from the encoded body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleCharacter {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub tags: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dead: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub personality_name: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub personality_entry: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub appearance_name: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub appearance_entry: Vec<String>,
}

impl SimpleCharacter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Payload for SimpleCharacter {
    const KIND: &'static str = "SimpleCharacter";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A personality or appearance detail attached to a character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trait {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub entry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub section: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub default_order: i64,
}

#[cfg(test)]
mod tests {
    use crate::error::ApiError;

    use super::*;

    const CHARACTER_JSON: &str = r#"{
        "id": 9,
        "entity_id": 90,
        "name": "Irwie Gemstone",
        "entry": "<p>Lorem ipsum</p>",
        "title": "Queen",
        "age": "42",
        "sex": null,
        "type": "NPC",
        "family_id": 4,
        "location_id": null,
        "race_id": 2,
        "tags": [1, 3],
        "is_dead": false,
        "is_private": true,
        "image_full": "https://kanka.io/full.png",
        "image_thumb": "https://kanka.io/thumb.png",
        "has_custom_image": true,
        "created_at": "2019-01-28T21:18:16.000000Z",
        "created_by": 1,
        "updated_at": "2019-08-29T13:48:54.000000Z",
        "updated_by": 2,
        "traits": {"data": [
            {"id": 1, "name": "Goals", "entry": "Rule", "section": "personality", "is_private": false, "default_order": 0}
        ]},
        "relations": {"data": [
            {"id": 5, "owner_id": 90, "target_id": 91, "relation": "Mother", "attitude": 1, "is_private": false}
        ]}
    }"#;

    #[test]
    fn character_decodes_composed_fields() {
        let ch: Character = serde_json::from_str(CHARACTER_JSON).unwrap();
        assert_eq!(ch.meta.id, 9);
        assert_eq!(ch.meta.entity_id, 90);
        assert_eq!(ch.fields.name, "Irwie Gemstone");
        assert_eq!(ch.fields.kind.as_deref(), Some("NPC"));
        assert_eq!(ch.fields.sex, None);
        assert_eq!(ch.fields.location_id, None);
        assert_eq!(ch.fields.tags, vec![1, 3]);
        assert_eq!(ch.fields.is_private, Some(true));
        assert_eq!(ch.traits.data.len(), 1);
        assert_eq!(ch.traits.data[0].section, "personality");
        assert_eq!(ch.children.relations.data[0].relation, "Mother");
        assert!(ch.children.inventory.data.is_empty());
        assert_eq!(ch.meta.updated_by, Some(2));
    }

    #[test]
    fn null_scalars_in_nested_rows_decode_as_empty() {
        let ch: Character = serde_json::from_str(
            r#"{"id":9,"entity_id":null,"name":null,
                "created_at":"2024-01-01T00:00:00.000000Z","updated_at":"2024-01-01T00:00:00.000000Z",
                "traits":{"data":[{"id":1,"name":"Goals","entry":null,"section":null,"is_private":null,"default_order":null}]},
                "attributes":{"data":[{"id":2,"name":null,"value":null,"default_order":null,"is_private":null,"is_star":null}]},
                "relations":{"data":[{"id":3,"owner_id":90,"target_id":null,"relation":null,"is_private":null}]}}"#,
        )
        .unwrap();
        assert_eq!(ch.meta.entity_id, 0);
        assert_eq!(ch.fields.name, "");
        assert_eq!(ch.traits.data[0].name, "Goals");
        assert_eq!(ch.traits.data[0].entry, "");
        assert!(!ch.traits.data[0].is_private);
        assert!(!ch.children.attributes.data[0].is_star);
        assert_eq!(ch.children.relations.data[0].relation, "");
        assert_eq!(ch.children.relations.data[0].target_id, 0);
    }

    #[test]
    fn blank_name_fails_validation() {
        for name in ["", "   ", "\t\n"] {
            let mut sc = SimpleCharacter::new(name);
            sc.title = Some("Queen".to_string());
            sc.tags = vec![1, 2];
            sc.is_dead = Some(true);
            let err = sc.validate().unwrap_err();
            assert!(matches!(err, ApiError::MissingField { field: "Name", .. }));
            assert!(sc.to_json().is_err());
        }
    }

    #[test]
    fn to_json_omits_unset_fields() {
        let body = SimpleCharacter::new("Irwie").to_json().unwrap();
        assert_eq!(body, r#"{"name":"Irwie"}"#);
    }

    #[test]
    fn to_json_keeps_explicit_false_flags() {
        let mut sc = SimpleCharacter::new("Irwie");
        sc.is_dead = Some(false);
        sc.kind = Some("PC".to_string());
        let value: serde_json::Value = serde_json::from_str(&sc.to_json().unwrap()).unwrap();
        assert_eq!(value["is_dead"], false);
        assert_eq!(value["type"], "PC");
        assert!(value.get("is_private").is_none());
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn payload_survives_encode_decode() {
        let sc = SimpleCharacter {
            name: "Irwie".to_string(),
            entry: Some("Entry".to_string()),
            family_id: Some(4),
            tags: vec![7],
            is_private: Some(false),
            personality_name: vec!["Goals".to_string()],
            personality_entry: vec!["Rule".to_string()],
            ..SimpleCharacter::default()
        };
        let back: SimpleCharacter = serde_json::from_str(&sc.to_json().unwrap()).unwrap();
        assert_eq!(back, sc);
    }
}
