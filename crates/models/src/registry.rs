//! Static table of every known type tag.
//!
//! Resolving a tag is a lookup in [`DESCRIPTORS`]; nothing is evaluated.
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::base_model::BaseModel;
use crate::errors::ModelError;
use crate::object::Object;
use crate::{amenity, city, place, review, state, user};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

/// How to recognise and rebuild one stored type.
pub struct Descriptor {
    pub class: Class,
    pub name: &'static str,
    /// Backing table, `None` for types that only live in the file store.
    pub table: Option<&'static str>,
    construct: fn(Value) -> serde_json::Result<Object>,
}

impl Descriptor {
    pub fn is_persistable(&self) -> bool {
        self.table.is_some()
    }

    /// Build a typed object from its attributes (type tag already removed).
    pub fn construct(&self, attributes: serde_json::Map<String, Value>) -> Result<Object, ModelError> {
        (self.construct)(Value::Object(attributes))
            .map_err(|e| ModelError::MalformedRecord(format!("{}: {e}", self.name)))
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor").field("name", &self.name).field("table", &self.table).finish()
    }
}

fn construct<T>(value: Value) -> serde_json::Result<Object>
where
    T: DeserializeOwned + Into<Object>,
{
    serde_json::from_value::<T>(value).map(Into::into)
}

/// Indexed by `Class as usize`.
static DESCRIPTORS: [Descriptor; 7] = [
    Descriptor { class: Class::BaseModel, name: "BaseModel", table: None, construct: construct::<BaseModel> },
    Descriptor { class: Class::User, name: "User", table: Some("users"), construct: construct::<user::Model> },
    Descriptor { class: Class::State, name: "State", table: Some("states"), construct: construct::<state::Model> },
    Descriptor { class: Class::City, name: "City", table: Some("cities"), construct: construct::<city::Model> },
    Descriptor { class: Class::Amenity, name: "Amenity", table: Some("amenities"), construct: construct::<amenity::Model> },
    Descriptor { class: Class::Place, name: "Place", table: Some("places"), construct: construct::<place::Model> },
    Descriptor { class: Class::Review, name: "Review", table: Some("reviews"), construct: construct::<review::Model> },
];

/// Look up the descriptor registered under `name`.
pub fn resolve(name: &str) -> Result<&'static Descriptor, ModelError> {
    DESCRIPTORS
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| ModelError::UnknownType(name.to_string()))
}

/// Whether `name` is a known type with a backing table.
pub fn is_persistable(name: &str) -> bool {
    resolve(name).map(Descriptor::is_persistable).unwrap_or(false)
}

pub fn descriptors() -> &'static [Descriptor] {
    &DESCRIPTORS
}

/// Every class that has a table, in registry order.
pub fn persistable() -> impl Iterator<Item = Class> {
    DESCRIPTORS.iter().filter(|d| d.is_persistable()).map(|d| d.class)
}

impl Class {
    pub fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.descriptor().name
    }

    pub fn table(self) -> Option<&'static str> {
        self.descriptor().table
    }

    pub fn is_persistable(self) -> bool {
        self.descriptor().is_persistable()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Class {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s).map(|d| d.class)
    }
}
