//! Nautobot DCIM models
//!
//! Records mirror the subset of the Nautobot v2 serializers this client
//! cares about. Only a handful of fields are typed; every other key of the
//! raw object lands in the record's `extra` map so nothing the server sends
//! is lost. That includes typed fields the server sent with an unexpected
//! JSON type: the field stays unset and the raw value is kept in `extra`.

use crate::error::NautobotError;
use crate::resource::{json_type_name, split_mistyped, Collection, Extras, FieldShape, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Arbitrary per-object custom fields
pub type CustomFields = Extras;

/// Location model (from DCIM API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    /// Type tag, e.g. `dcim.location` on nested references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(flatten)]
    pub extra: Extras,
}

impl Location {
    /// Build a location record directly
    pub fn new(id: impl Into<String>, object_type: Option<String>) -> Self {
        Self {
            id: id.into(),
            object_type,
            extra: Extras::new(),
        }
    }
}

/// Rack group model (from DCIM API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackGroup {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub rack_count: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::reference")]
    pub parent: Option<Reference>,
    #[serde(default, deserialize_with = "de::location")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub custom_fields: CustomFields,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Rack model (from DCIM API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub device_count: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::reference")]
    pub parent: Option<Reference>,
    #[serde(default, deserialize_with = "de::location")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub custom_fields: CustomFields,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Device model (from DCIM API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub display: Option<String>,
    /// Read from the payload's `rack_count` key, not `module_count`.
    /// A `module_count` key, when present, is kept in `extra`.
    #[serde(default, rename = "rack_count")]
    pub module_count: Option<u64>,
    #[serde(default)]
    pub interface_count: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::reference")]
    pub parent: Option<Reference>,
    #[serde(default, deserialize_with = "de::location")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub custom_fields: CustomFields,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Object of any endpoint, converted with the default mapping: only `id`
/// is typed, everything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericObject {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    /// Set by the client after conversion
    #[serde(skip)]
    pub endpoint: String,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Unresolved pointer to another object (e.g. a rack group's parent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    /// Bare identifier
    Id(#[serde(deserialize_with = "de::id")] String),
    /// Nested reference object as rendered by Nautobot (`?depth=0`)
    Object(ObjectRef),
}

impl Reference {
    /// Identifier of the referenced object
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Object(object) => &object.id,
        }
    }
}

/// Nested reference object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extras,
}

impl ObjectRef {
    const FIELDS: &'static [(&'static str, FieldShape)] =
        &[("object_type", FieldShape::Text), ("url", FieldShape::Text)];
}

/// Value accepted wherever a record takes a location: either a raw JSON
/// object straight from a response or an already built [`Location`].
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Raw JSON, converted with [`Location::from_json`]
    Raw(Value),
    /// Already converted, used as is
    Record(Location),
}

impl LocationInput {
    /// Normalize into a [`Location`] record.
    ///
    /// `null` and non-object raw values yield `None`; an object without an
    /// `id` is an error.
    pub fn normalize(self) -> Result<Option<Location>, NautobotError> {
        match self {
            Self::Record(location) => Ok(Some(location)),
            Self::Raw(Value::Null) => Ok(None),
            Self::Raw(raw @ Value::Object(_)) => Location::from_json(raw).map(Some),
            Self::Raw(other) => {
                debug!("Ignoring location given as {}", json_type_name(&other));
                Ok(None)
            }
        }
    }
}

impl From<Location> for LocationInput {
    fn from(location: Location) -> Self {
        Self::Record(location)
    }
}

impl From<Value> for LocationInput {
    fn from(raw: Value) -> Self {
        Self::Raw(raw)
    }
}

const LOCATION_FIELDS: &[(&str, FieldShape)] = &[("object_type", FieldShape::Text)];

const RACK_GROUP_FIELDS: &[(&str, FieldShape)] = &[
    ("display", FieldShape::Text),
    ("rack_count", FieldShape::Count),
    ("name", FieldShape::Text),
    ("description", FieldShape::Text),
    ("parent", FieldShape::Reference),
    ("location", FieldShape::Nested),
    ("custom_fields", FieldShape::Map),
];

const RACK_FIELDS: &[(&str, FieldShape)] = &[
    ("display", FieldShape::Text),
    ("device_count", FieldShape::Count),
    ("name", FieldShape::Text),
    ("description", FieldShape::Text),
    ("parent", FieldShape::Reference),
    ("location", FieldShape::Nested),
    ("custom_fields", FieldShape::Map),
];

// Keyed by JSON name: `module_count` is read from `rack_count`
const DEVICE_FIELDS: &[(&str, FieldShape)] = &[
    ("display", FieldShape::Text),
    ("rack_count", FieldShape::Count),
    ("interface_count", FieldShape::Count),
    ("name", FieldShape::Text),
    ("description", FieldShape::Text),
    ("parent", FieldShape::Reference),
    ("location", FieldShape::Nested),
    ("custom_fields", FieldShape::Map),
];

macro_rules! impl_resource {
    ($ty:ty, $kind:literal, $fields:expr) => {
        impl Resource for $ty {
            const KIND: &'static str = $kind;
            const FIELDS: &'static [(&'static str, FieldShape)] = $fields;

            fn id(&self) -> &str {
                &self.id
            }

            fn extra(&self) -> &Extras {
                &self.extra
            }

            fn extra_mut(&mut self) -> &mut Extras {
                &mut self.extra
            }

            fn endpoint(&self) -> &str {
                <Self as Collection>::ENDPOINT
            }
        }
    };
}

macro_rules! impl_located {
    ($($ty:ty),+) => {$(
        impl $ty {
            /// Replace the nested location, normalizing raw JSON into a [`Location`]
            pub fn with_location(
                mut self,
                location: impl Into<LocationInput>,
            ) -> Result<Self, NautobotError> {
                self.location = location.into().normalize()?;
                Ok(self)
            }
        }
    )+};
}

impl_resource!(Location, "Location", LOCATION_FIELDS);
impl_resource!(RackGroup, "RackGroup", RACK_GROUP_FIELDS);
impl_resource!(Rack, "Rack", RACK_FIELDS);
impl_resource!(Device, "Device", DEVICE_FIELDS);
impl_located!(RackGroup, Rack, Device);

impl Collection for Location {
    const ENDPOINT: &'static str = "dcim/locations";
}

impl Collection for RackGroup {
    const ENDPOINT: &'static str = "dcim/rack-groups";
}

impl Collection for Rack {
    const ENDPOINT: &'static str = "dcim/racks";
}

impl Collection for Device {
    const ENDPOINT: &'static str = "dcim/devices";
}

impl Resource for GenericObject {
    const KIND: &'static str = "Object";

    fn id(&self) -> &str {
        &self.id
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }

    fn extra_mut(&mut self) -> &mut Extras {
        &mut self.extra
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Field-level deserializers
mod de {
    use super::{
        json_type_name, split_mistyped, CustomFields, Location, LocationInput, ObjectRef,
        Reference,
    };
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_json::Value;

    /// Accept string or integer identifiers; reject null and empty strings
    pub(super) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(_) => Err(D::Error::custom("id must not be empty")),
            other => Err(D::Error::custom(format!(
                "id must be a string or an integer, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub(super) fn location<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Location>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        LocationInput::Raw(raw).normalize().map_err(D::Error::custom)
    }

    /// Bare identifier or nested reference object
    pub(super) fn reference<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Reference>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Object(mut object) => {
                let mistyped = split_mistyped(&mut object, ObjectRef::FIELDS);
                let mut reference: ObjectRef =
                    serde_json::from_value(Value::Object(object)).map_err(D::Error::custom)?;
                reference.extra.extend(mistyped);
                Ok(Some(Reference::Object(reference)))
            }
            other => serde_json::from_value(other)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }

    pub(super) fn null_as_empty<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<CustomFields, D::Error> {
        Ok(Option::<CustomFields>::deserialize(deserializer)?.unwrap_or_default())
    }
}
