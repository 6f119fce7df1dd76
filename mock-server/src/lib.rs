//! In-memory stand-in for the Kanka API, used by integration tests.
//!
//! Serves `/campaigns/{campaign_id}/{characters,locations}[/{id}]` with
//! `{"data": ...}` envelopes, integer IDs assigned on create, a `lastSync`
//! filter on listings, and bearer-token checks on every route.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Collections the server knows about.
pub const KINDS: [&str; 2] = ["characters", "locations"];

/// Keys the server owns; they are dropped from write payloads.
const SERVER_KEYS: [&str; 8] = [
    "id",
    "entity_id",
    "created_at",
    "created_by",
    "updated_at",
    "updated_by",
    "traits",
    "has_custom_image",
];

const TRAIT_SECTIONS: [&str; 2] = ["personality", "appearance"];

/// User ID recorded as the author of every change.
pub const ACTOR_ID: i64 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub id: i64,
    pub name: String,
    pub entry: String,
    pub section: String,
    pub is_private: bool,
    pub default_order: i64,
}

#[derive(Clone, Debug)]
pub struct Record {
    pub id: i64,
    pub entity_id: i64,
    pub campaign_id: i64,
    pub kind: String,
    pub fields: Map<String, Value>,
    pub traits: Vec<Trait>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// The record as the API renders it.
    pub fn to_json(&self) -> Value {
        let mut out = self.fields.clone();
        out.insert("id".into(), json!(self.id));
        out.insert("entity_id".into(), json!(self.entity_id));
        out.insert("image_full".into(), Value::Null);
        out.insert("image_thumb".into(), Value::Null);
        out.insert("has_custom_image".into(), json!(false));
        out.insert("created_at".into(), json!(self.created_at));
        out.insert("created_by".into(), json!(ACTOR_ID));
        out.insert("updated_at".into(), json!(self.updated_at));
        out.insert("updated_by".into(), json!(ACTOR_ID));
        if self.kind == "characters" {
            out.insert("traits".into(), json!({ "data": self.traits }));
        }
        for child in [
            "attributes",
            "entity_events",
            "entity_files",
            "entity_notes",
            "relations",
            "inventory",
        ] {
            out.insert(child.into(), json!({ "data": [] }));
        }
        Value::Object(out)
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    records: BTreeMap<i64, Record>,
}

impl Store {
    fn find(&self, campaign_id: i64, kind: &str, id: i64) -> Option<&Record> {
        self.records
            .get(&id)
            .filter(|r| r.campaign_id == campaign_id && r.kind == kind)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct SyncQuery {
    #[serde(rename = "lastSync")]
    pub last_sync: Option<DateTime<Utc>>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/campaigns/{campaign_id}/{kind}",
            get(list_records).post(create_record),
        )
        .route(
            "/campaigns/{campaign_id}/{kind}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(middleware::from_fn(require_token))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_token(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." }))).into_response();
    }
    next.run(request).await
}

fn known_kind(kind: &str) -> Result<(), StatusCode> {
    if KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Reject payloads without a usable `name`, mirroring the API's 422 body.
fn validate(fields: &Map<String, Value>) -> Result<(), Response> {
    let named = fields
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if named {
        return Ok(());
    }
    let body = json!({
        "message": "The given data was invalid.",
        "errors": { "name": ["The name field is required."] },
    });
    Err((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response())
}

/// Turn paired `{section}_name` / `{section}_entry` arrays into trait rows,
/// removing them from `fields`. Returns `None` when no arrays were sent.
pub fn take_traits(fields: &mut Map<String, Value>, first_id: i64) -> Option<Vec<Trait>> {
    let mut traits = Vec::new();
    let mut seen = false;
    for section in TRAIT_SECTIONS {
        let names = fields.remove(&format!("{section}_name"));
        let entries = fields.remove(&format!("{section}_entry"));
        seen |= names.is_some() || entries.is_some();

        let names = string_list(names);
        let entries = string_list(entries);
        for (order, name) in names.into_iter().enumerate() {
            traits.push(Trait {
                id: first_id + traits.len() as i64,
                name,
                entry: entries.get(order).cloned().unwrap_or_default(),
                section: section.to_string(),
                is_private: false,
                default_order: order as i64,
            });
        }
    }
    seen.then_some(traits)
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn strip_server_keys(fields: &mut Map<String, Value>) {
    for key in SERVER_KEYS {
        fields.remove(key);
    }
}

async fn list_records(
    State(db): State<Db>,
    Path((campaign_id, kind)): Path<(i64, String)>,
    Query(sync): Query<SyncQuery>,
) -> Result<Json<Value>, StatusCode> {
    known_kind(&kind)?;
    let store = db.read().await;
    let data: Vec<Value> = store
        .records
        .values()
        .filter(|r| r.campaign_id == campaign_id && r.kind == kind)
        .filter(|r| sync.last_sync.map_or(true, |since| r.updated_at > since))
        .map(Record::to_json)
        .collect();
    Ok(Json(json!({ "data": data })))
}

async fn create_record(
    State(db): State<Db>,
    Path((campaign_id, kind)): Path<(i64, String)>,
    Json(mut fields): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), Response> {
    known_kind(&kind).map_err(IntoResponse::into_response)?;
    validate(&fields)?;
    strip_server_keys(&mut fields);

    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    let traits = take_traits(&mut fields, id * 100).unwrap_or_default();
    let now = Utc::now();
    let record = Record {
        id,
        entity_id: 1000 + id,
        campaign_id,
        kind,
        fields,
        traits,
        created_at: now,
        updated_at: now,
    };
    tracing::info!(campaign_id, kind = %record.kind, id, "created record");
    let body = json!({ "data": record.to_json() });
    store.records.insert(id, record);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn get_record(
    State(db): State<Db>,
    Path((campaign_id, kind, id)): Path<(i64, String, i64)>,
) -> Result<Json<Value>, StatusCode> {
    known_kind(&kind)?;
    let store = db.read().await;
    store
        .find(campaign_id, &kind, id)
        .map(|r| Json(json!({ "data": r.to_json() })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_record(
    State(db): State<Db>,
    Path((campaign_id, kind, id)): Path<(i64, String, i64)>,
    Json(mut fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, Response> {
    known_kind(&kind).map_err(IntoResponse::into_response)?;
    validate(&fields)?;
    strip_server_keys(&mut fields);

    let mut store = db.write().await;
    if store.find(campaign_id, &kind, id).is_none() {
        return Err(StatusCode::NOT_FOUND.into_response());
    }
    let record = store
        .records
        .get_mut(&id)
        .ok_or_else(|| StatusCode::NOT_FOUND.into_response())?;
    if let Some(traits) = take_traits(&mut fields, id * 100) {
        record.traits = traits;
    }
    record.fields.extend(fields);
    record.updated_at = Utc::now();
    Ok(Json(json!({ "data": record.to_json() })))
}

async fn delete_record(
    State(db): State<Db>,
    Path((campaign_id, kind, id)): Path<(i64, String, i64)>,
) -> Result<StatusCode, StatusCode> {
    known_kind(&kind)?;
    let mut store = db.write().await;
    if store.find(campaign_id, &kind, id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    store.records.remove(&id);
    tracing::info!(campaign_id, %kind, id, "deleted record");
    Ok(StatusCode::NO_CONTENT)
}
