//! Nautobot REST API Client
//!
//! A small read-only client for the Nautobot DCIM API. It fetches locations,
//! rack groups, racks and devices and maps them into typed records, keeping
//! every field it does not model in a per-record extras map.
//!
//! # Example
//!
//! ```no_run
//! use nautobot_client::{NautobotClient, NautobotConfig, Rack, Resource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads NAUTOBOT_API_BASE_URL / NAUTOBOT_API_TOKEN
//! let config = NautobotConfig::from_env();
//! let client = NautobotClient::new(&config)?;
//!
//! // All racks on the first page, keyed by id in server order
//! let racks = client.list::<Rack>(&[("location", "DC1")]).await?;
//! for (id, rack) in racks.iter() {
//!     println!("{id}: {:?} ({:?} devices)", rack.name, rack.device_count);
//! }
//!
//! // A single rack, with its nested location normalized
//! let rack: Rack = client.get("7c6f5a3e-0000-4000-8000-000000000001", &[]).await?;
//! if let Some(location) = &rack.location {
//!     println!("{} is in {}", rack.id(), location.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Typed records**: `Location`, `RackGroup`, `Rack`, `Device`
//! - **Extras**: unknown and mistyped fields are preserved, never dropped
//! - **Generic access**: `GenericObject` for any other endpoint
//! - **Mocking**: `MockNautobotClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;
#[path = "trait.rs"]
pub mod nautobot_trait;
pub mod resource;

pub use client::NautobotClient;
pub use common::HttpClient;
pub use common::query::{get_object, get_resource, list_objects, list_resources};
pub use config::NautobotConfig;
pub use error::NautobotError;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockNautobotClient;
pub use models::*;
pub use nautobot_trait::NautobotClientTrait;
pub use resource::{Collection, Extras, FieldShape, Resource, ResourceMap};
