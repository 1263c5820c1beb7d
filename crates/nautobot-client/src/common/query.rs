//! Query utilities for Nautobot API
//!
//! Generic get/list over any [`NautobotClientTrait`]: fetch raw JSON, then
//! convert it with the record type's own mapping.

use crate::error::NautobotError;
use crate::models::GenericObject;
use crate::nautobot_trait::NautobotClientTrait;
use crate::resource::{json_type_name, Collection, Resource, ResourceMap};
use serde_json::Value;
use tracing::debug;

/// Fetch one object by id and convert it.
///
/// A blank id is rejected with [`NautobotError::InvalidRequest`] before any
/// request is made; use [`list_resources`] to read the collection.
pub async fn get_resource<R: Collection>(
    client: &(impl NautobotClientTrait + ?Sized),
    id: &str,
    params: &[(&str, &str)],
) -> Result<R, NautobotError> {
    let raw = client.fetch(R::ENDPOINT, Some(require_id(id)?), params).await?;
    R::from_json(raw)
}

/// Fetch the first page of a collection and convert every item, keyed by id
pub async fn list_resources<R: Collection>(
    client: &(impl NautobotClientTrait + ?Sized),
    params: &[(&str, &str)],
) -> Result<ResourceMap<R>, NautobotError> {
    let raw = client.fetch(R::ENDPOINT, None, params).await?;
    let records = collect_results(raw, R::from_json)?;
    debug!("Decoded {} {} records from {}", records.len(), R::KIND, R::ENDPOINT);
    Ok(records)
}

/// Fetch one object of any endpoint with the default mapping
pub async fn get_object(
    client: &(impl NautobotClientTrait + ?Sized),
    endpoint: &str,
    id: &str,
    params: &[(&str, &str)],
) -> Result<GenericObject, NautobotError> {
    let raw = client.fetch(endpoint, Some(require_id(id)?), params).await?;
    generic_from_json(endpoint, raw)
}

/// List objects of any endpoint with the default mapping
pub async fn list_objects(
    client: &(impl NautobotClientTrait + ?Sized),
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<ResourceMap<GenericObject>, NautobotError> {
    let raw = client.fetch(endpoint, None, params).await?;
    let records = collect_results(raw, |item| generic_from_json(endpoint, item))?;
    debug!("Decoded {} objects from {}", records.len(), endpoint);
    Ok(records)
}

/// Convert the `results` list of a collection response.
///
/// A missing or `null` `results` key yields an empty map; anything other
/// than an array is an error. Later duplicates of an id replace earlier ones.
/// Items are converted with `convert`; for [`Resource::from_json`] only an
/// item without a usable `id` fails the whole list.
pub fn collect_results<R, F>(raw: Value, convert: F) -> Result<ResourceMap<R>, NautobotError>
where
    R: Resource,
    F: Fn(Value) -> Result<R, NautobotError>,
{
    let Value::Object(mut body) = raw else {
        return Err(NautobotError::InvalidResponse(format!(
            "expected a collection object, got {}",
            json_type_name(&raw)
        )));
    };

    match body.remove("results") {
        None | Some(Value::Null) => Ok(ResourceMap::new()),
        Some(Value::Array(items)) => items.into_iter().map(convert).collect(),
        Some(other) => Err(NautobotError::InvalidResponse(format!(
            "expected `results` to be an array, got {}",
            json_type_name(&other)
        ))),
    }
}

fn generic_from_json(endpoint: &str, raw: Value) -> Result<GenericObject, NautobotError> {
    let mut object = GenericObject::from_json(raw)?;
    object.endpoint = endpoint.trim_matches('/').to_string();
    Ok(object)
}

fn require_id(id: &str) -> Result<&str, NautobotError> {
    if id.trim().is_empty() {
        return Err(NautobotError::InvalidRequest(
            "object id must not be empty".to_string(),
        ));
    }
    Ok(id)
}
