//! Resource contract shared by every Nautobot record type
//!
//! A [`Resource`] knows its collection endpoint and how to turn a raw JSON
//! object into itself. Conversion is serde-driven: each record derives
//! `Deserialize`, pulls out the fields it models and collects everything else
//! into an extras map via `#[serde(flatten)]`. A modeled field whose value has
//! the wrong JSON type is not an error: it is left unset and its raw value is
//! kept in the extras map under the same key.

use crate::error::NautobotError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Unmodeled fields preserved verbatim from a raw response
pub type Extras = Map<String, Value>;

/// A remote entity exposed by the inventory API
pub trait Resource: DeserializeOwned + Send + Sync + Sized + 'static {
    /// Human-readable type name used in log lines and reports
    const KIND: &'static str;

    /// Modeled fields (by JSON key) and the shape each one must have.
    /// `id` is not listed: it is always required.
    const FIELDS: &'static [(&'static str, FieldShape)] = &[];

    /// Identifier, never empty once the record exists
    fn id(&self) -> &str;

    /// Fields present in the raw object that the record does not model
    fn extra(&self) -> &Extras;

    /// Mutable access to the unmodeled fields
    fn extra_mut(&mut self) -> &mut Extras;

    /// Collection endpoint this record was read from
    fn endpoint(&self) -> &str;

    /// Look up a single unmodeled field
    fn get_extra(&self, key: &str) -> Option<&Value> {
        self.extra().get(key)
    }

    /// Convert a raw JSON object into a record.
    ///
    /// Missing optional fields become `None`/empty and mistyped ones are
    /// moved to the extras. Only a missing or invalid `id` is an error.
    fn from_json(raw: Value) -> Result<Self, NautobotError> {
        let Value::Object(mut object) = raw else {
            return Err(NautobotError::InvalidResponse(format!(
                "expected a JSON object for {}, got {}",
                Self::KIND,
                json_type_name(&raw)
            )));
        };
        let mistyped = split_mistyped(&mut object, Self::FIELDS);
        let mut record: Self =
            serde_json::from_value(Value::Object(object)).map_err(NautobotError::Serialization)?;
        record.extra_mut().extend(mistyped);
        Ok(record)
    }
}

/// A resource type bound to a fixed collection endpoint
pub trait Collection: Resource {
    /// Collection path segment, relative to the base URL (e.g. `dcim/racks`)
    const ENDPOINT: &'static str;
}

/// JSON shape a modeled field must have; `null` always counts as absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A string
    Text,
    /// A non-negative integer
    Count,
    /// An object of arbitrary values
    Map,
    /// An identifier, or an object carrying one
    Reference,
    /// An object carrying an identifier
    Nested,
}

impl FieldShape {
    /// Whether `value` can be stored in a field of this shape
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Self::Text, Value::String(_)) => true,
            (Self::Count, Value::Number(n)) => n.is_u64(),
            (Self::Map, Value::Object(_)) => true,
            (Self::Reference, Value::String(_) | Value::Number(_)) => is_identifier(value),
            (Self::Reference | Self::Nested, Value::Object(object)) => {
                object.get("id").is_some_and(is_identifier)
            }
            _ => false,
        }
    }
}

fn is_identifier(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
        _ => false,
    }
}

/// Remove every listed field whose value does not fit its shape from
/// `object` and return them, keyed as in the raw object.
pub(crate) fn split_mistyped(object: &mut Extras, fields: &[(&str, FieldShape)]) -> Extras {
    let mut mistyped = Extras::new();
    for &(key, shape) in fields {
        if object.get(key).is_some_and(|value| !shape.accepts(value)) {
            if let Some(value) = object.remove(key) {
                debug!("Keeping `{}` ({}) as an extra field", key, json_type_name(&value));
                mistyped.insert(key.to_string(), value);
            }
        }
    }
    mistyped
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Records keyed by id, iterating in the order the server returned them.
///
/// Inserting an id that is already present replaces the record in place,
/// keeping its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMap<R> {
    records: Vec<R>,
    index: HashMap<String, usize>,
}

impl<R: Resource> ResourceMap<R> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a record, returning the one it replaced (same id), if any
    pub fn insert(&mut self, record: R) -> Option<R> {
        if let Some(&slot) = self.index.get(record.id()) {
            return Some(std::mem::replace(&mut self.records[slot], record));
        }
        self.index.insert(record.id().to_string(), self.records.len());
        self.records.push(record);
        None
    }

    /// Record with the given id
    pub fn get(&self, id: &str) -> Option<&R> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    /// Whether a record with this id is present
    pub fn contains_key(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the map holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids in response order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(R::id)
    }

    /// Records in response order
    pub fn values(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// `(id, record)` pairs in response order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.records.iter().map(|r| (r.id(), r))
    }

    /// Consume the map, keeping the records in response order
    pub fn into_values(self) -> Vec<R> {
        self.records
    }
}

impl<R: Resource> Default for ResourceMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> FromIterator<R> for ResourceMap<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

impl<R: Resource> IntoIterator for ResourceMap<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R: Resource> IntoIterator for &'a ResourceMap<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use serde_json::json;

    fn location(id: &str, object_type: &str) -> Location {
        Location::from_json(json!({"id": id, "object_type": object_type}))
            .expect("valid location")
    }

    #[test]
    fn test_resource_map_preserves_insertion_order() {
        let map: ResourceMap<Location> = ["c", "a", "b"]
            .into_iter()
            .map(|id| location(id, "site"))
            .collect();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let mut map = ResourceMap::new();
        assert!(map.insert(location("1", "site")).is_none());
        assert!(map.insert(location("2", "site")).is_none());
        let replaced = map.insert(location("1", "building"));

        assert_eq!(replaced.map(|l| l.object_type), Some(Some("site".to_string())));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(
            map.get("1").and_then(|l| l.object_type.as_deref()),
            Some("building")
        );
    }

    #[test]
    fn test_field_shapes() {
        assert!(FieldShape::Count.accepts(&json!(3)));
        assert!(FieldShape::Count.accepts(&Value::Null));
        assert!(!FieldShape::Count.accepts(&json!(-1)));
        assert!(!FieldShape::Count.accepts(&json!("3")));
        assert!(!FieldShape::Text.accepts(&json!(5)));
        assert!(!FieldShape::Map.accepts(&json!([])));
        assert!(FieldShape::Reference.accepts(&json!(7)));
        assert!(FieldShape::Reference.accepts(&json!({"id": "rg-1"})));
        assert!(!FieldShape::Reference.accepts(&json!("")));
        assert!(!FieldShape::Reference.accepts(&json!(true)));
        assert!(!FieldShape::Nested.accepts(&json!("loc-1")));
        assert!(!FieldShape::Nested.accepts(&json!({"name": "nowhere"})));
    }

    #[test]
    fn test_split_mistyped_leaves_valid_fields() {
        let mut object: Extras =
            serde_json::from_value(json!({"id": "1", "name": "ok", "count": "seven", "other": 1}))
                .expect("object");
        let fields = [("name", FieldShape::Text), ("count", FieldShape::Count)];

        let mistyped = split_mistyped(&mut object, &fields);

        assert_eq!(mistyped.get("count"), Some(&json!("seven")));
        assert_eq!(mistyped.len(), 1);
        assert!(object.contains_key("name"));
        assert!(object.contains_key("other"));
        assert!(!object.contains_key("count"));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Location::from_json(json!(["not", "an", "object"])).expect_err("array");
        assert!(matches!(err, NautobotError::InvalidResponse(_)));
    }
}
