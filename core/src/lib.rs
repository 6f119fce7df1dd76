//! Blocking client for the Kanka campaign-management API.
//!
//! # Overview
//! Maps campaign-scoped resources (characters, locations) to typed CRUD
//! calls. Each call validates its IDs and payload locally, composes an
//! `Endpoint`, performs exactly one HTTP round-trip through a `Transport`,
//! and decodes the `{"data": ...}` envelope into a typed record.
//!
//! # Design
//! - `Client` is stateless apart from its configuration and transport.
//! - `Service<R>` carries the five CRUD operations for every `Resource`.
//! - Errors keep their cause chain; service methods wrap the transport error
//!   with the resource name and the IDs involved.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use kanka_core::{Client, ClientConfig, SimpleCharacter};
//!
//! let client = Client::new(ClientConfig::from_env()?);
//! let created = client.characters().create(5, &SimpleCharacter::new("Irwie"))?;
//! println!("created character {}", created.meta.id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod service;
pub mod types;

pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use endpoint::Endpoint;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use service::{Resource, Service};
pub use types::{
    Character, EntityChildren, EntityMeta, Envelope, Location, Payload, SimpleCharacter,
    SimpleLocation, Trait,
};
