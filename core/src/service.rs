//! Typed CRUD services for campaign-scoped resources.
//!
//! # Design
//! `Service<R>` implements Index/Get/Create/Update/Delete once. A resource
//! only has to name its collection path and its payload type through
//! `Resource`. All IDs are validated before the request is built, so a bad
//! ID or a blank payload never reaches the transport.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::types::{null_as_default, Character, Envelope, Location, Payload, SimpleCharacter, SimpleLocation};

/// A resource living under `/campaigns/{id}/`.
pub trait Resource: DeserializeOwned {
    /// Display name used in error context, e.g. `Character`.
    const NAME: &'static str;
    /// Collection path segment, e.g. `characters`.
    const PATH: &'static str;

    type Payload: Payload;
}

impl Resource for Character {
    const NAME: &'static str = "Character";
    const PATH: &'static str = "characters";

    type Payload = SimpleCharacter;
}

impl Resource for Location {
    const NAME: &'static str = "Location";
    const PATH: &'static str = "locations";

    type Payload = SimpleLocation;
}

#[derive(Deserialize)]
#[serde(bound = "R: DeserializeOwned")]
struct ListEnvelope<R> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    data: Vec<R>,
}

/// Handles communication with one resource's endpoints.
pub struct Service<'c, R> {
    client: &'c Client,
    _resource: PhantomData<fn() -> R>,
}

impl<'c, R: Resource> Service<'c, R> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// `/campaigns/{camp_id}/{PATH}`
    pub fn collection(&self, camp_id: i64) -> Result<Endpoint, ApiError> {
        let end = Endpoint::CAMPAIGNS
            .id(camp_id)
            .map_err(|e| e.context("invalid Campaign ID"))?;
        Ok(end.concat(R::PATH))
    }

    /// `/campaigns/{camp_id}/{PATH}/{id}`
    pub fn member(&self, camp_id: i64, id: i64) -> Result<Endpoint, ApiError> {
        self.collection(camp_id)?
            .id(id)
            .map_err(|e| e.context(format!("invalid {} ID", R::NAME)))
    }

    /// Every record in the campaign. With `sync`, only records changed
    /// since that time.
    pub fn index(&self, camp_id: i64, sync: Option<DateTime<Utc>>) -> Result<Vec<R>, ApiError> {
        let mut end = self.collection(camp_id)?;
        if let Some(since) = sync {
            end = end.sync(since);
        }

        let wrap: ListEnvelope<R> = self.client.get(&end).map_err(|e| {
            e.context(format!(
                "cannot get {} Index from Campaign (ID: {camp_id})",
                R::NAME
            ))
        })?;
        Ok(wrap.data)
    }

    pub fn get(&self, camp_id: i64, id: i64) -> Result<R, ApiError> {
        let end = self.member(camp_id, id)?;

        let wrap: Envelope<R> = self.client.get(&end).map_err(|e| {
            e.context(format!(
                "cannot get {} (ID: {id}) from Campaign (ID: {camp_id})",
                R::NAME
            ))
        })?;
        Ok(wrap.data)
    }

    /// Create a record and return it with its server-assigned IDs. Not
    /// idempotent.
    pub fn create(&self, camp_id: i64, payload: &R::Payload) -> Result<R, ApiError> {
        let end = self.collection(camp_id)?;
        let body = encode(payload)?;

        let wrap: Envelope<R> = self.client.post(&end, body).map_err(|e| {
            e.context(format!(
                "cannot create {} (Name: {}) for Campaign (ID: {camp_id})",
                R::NAME,
                payload.name()
            ))
        })?;
        Ok(wrap.data)
    }

    pub fn update(&self, camp_id: i64, id: i64, payload: &R::Payload) -> Result<R, ApiError> {
        let end = self.member(camp_id, id)?;
        let body = encode(payload)?;

        let wrap: Envelope<R> = self.client.put(&end, body).map_err(|e| {
            e.context(format!(
                "cannot update {} (ID: {id}, Name: {}) for Campaign (ID: {camp_id})",
                R::NAME,
                payload.name()
            ))
        })?;
        Ok(wrap.data)
    }

    /// Permanently remove a record.
    pub fn delete(&self, camp_id: i64, id: i64) -> Result<(), ApiError> {
        let end = self.member(camp_id, id)?;

        self.client.delete(&end).map_err(|e| {
            e.context(format!(
                "cannot delete {} (ID: {id}) for Campaign (ID: {camp_id})",
                R::NAME
            ))
        })
    }
}

fn encode<P: Payload>(payload: &P) -> Result<String, ApiError> {
    payload
        .to_json()
        .map_err(|e| e.context(format!("cannot marshal {} (Name: {})", P::KIND, payload.name())))
}
