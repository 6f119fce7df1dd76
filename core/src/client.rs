//! Authenticated request execution for the Kanka API.
//!
//! # Design
//! `Client` holds the configuration and a shared `Transport` and carries no
//! mutable state between calls. Every primitive builds one `HttpRequest`,
//! executes it once, and maps the `HttpResponse` through `check_status`.
//! There are no retries; a `Transport` may add them.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::service::{Resource, Service};
use crate::types::{Character, Location};

/// Blocking client for the Kanka API.
///
/// Safe to share across threads; concurrent calls are as safe as the
/// underlying `Transport`.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn characters(&self) -> Service<'_, Character> {
        self.service()
    }

    pub fn locations(&self) -> Service<'_, Location> {
        self.service()
    }

    pub fn service<R: Resource>(&self) -> Service<'_, R> {
        Service::new(self)
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        end: &Endpoint,
        body: Option<String>,
    ) -> HttpRequest {
        let mut headers = vec![
            (
                "authorization".to_string(),
                format!("Bearer {}", self.config.token()),
            ),
            ("accept".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: end.url(self.config.base_url()),
            headers,
            body,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, end: &Endpoint) -> Result<T, ApiError> {
        let response = self.send(self.build_request(HttpMethod::Get, end, None))?;
        decode(&response)
    }

    pub fn post<T: DeserializeOwned>(&self, end: &Endpoint, body: String) -> Result<T, ApiError> {
        let response = self.send(self.build_request(HttpMethod::Post, end, Some(body)))?;
        decode(&response)
    }

    pub fn put<T: DeserializeOwned>(&self, end: &Endpoint, body: String) -> Result<T, ApiError> {
        let response = self.send(self.build_request(HttpMethod::Put, end, Some(body)))?;
        decode(&response)
    }

    pub fn delete(&self, end: &Endpoint) -> Result<(), ApiError> {
        self.send(self.build_request(HttpMethod::Delete, end, None))?;
        Ok(())
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.transport.execute(request).map_err(ApiError::Transport)?;
        if let Err(err) = check_status(&response) {
            tracing::warn!(%method, %url, status = response.status, "request failed");
            return Err(err);
        }
        Ok(response)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        401 | 403 => Err(ApiError::Unauthorized {
            status: response.status,
        }),
        429 => Err(ApiError::RateLimited {
            retry_after: response
                .header("retry-after")
                .and_then(|v| v.trim().parse().ok()),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
