//! Live entities as the stores hold them.
use chrono::{DateTime, Utc};

use crate::base_model::{self, BaseModel};
use crate::registry::Class;
use crate::{amenity, city, place, review, state, user};

/// Build the identity key `"<class>.<id>"` used to address the object cache.
pub fn identity_key(class: &str, id: &str) -> String {
    format!("{class}.{id}")
}

/// Any entity the store can hold, tagged by its type.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    BaseModel(BaseModel),
    User(user::Model),
    State(state::Model),
    City(city::Model),
    Amenity(amenity::Model),
    Place(place::Model),
    Review(review::Model),
}

/// Evaluate `$body` with `$m` bound to the inner model, whatever the variant.
macro_rules! with_model {
    ($obj:expr, $m:ident => $body:expr) => {
        match $obj {
            Object::BaseModel($m) => $body,
            Object::User($m) => $body,
            Object::State($m) => $body,
            Object::City($m) => $body,
            Object::Amenity($m) => $body,
            Object::Place($m) => $body,
            Object::Review($m) => $body,
        }
    };
}
pub(crate) use with_model;

impl Object {
    pub fn class(&self) -> Class {
        match self {
            Object::BaseModel(_) => Class::BaseModel,
            Object::User(_) => Class::User,
            Object::State(_) => Class::State,
            Object::City(_) => Class::City,
            Object::Amenity(_) => Class::Amenity,
            Object::Place(_) => Class::Place,
            Object::Review(_) => Class::Review,
        }
    }

    pub fn id(&self) -> &str {
        with_model!(self, m => m.id.as_str())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        with_model!(self, m => m.created_at)
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        with_model!(self, m => m.updated_at)
    }

    /// Identity key of this object.
    pub fn key(&self) -> String {
        identity_key(self.class().as_str(), self.id())
    }

    /// Refresh `updated_at`; call before staging a modified object again.
    pub fn touch(&mut self) {
        let at = base_model::now();
        with_model!(self, m => m.updated_at = at)
    }
}

impl From<BaseModel> for Object {
    fn from(m: BaseModel) -> Self { Object::BaseModel(m) }
}

impl From<user::Model> for Object {
    fn from(m: user::Model) -> Self { Object::User(m) }
}

impl From<state::Model> for Object {
    fn from(m: state::Model) -> Self { Object::State(m) }
}

impl From<city::Model> for Object {
    fn from(m: city::Model) -> Self { Object::City(m) }
}

impl From<amenity::Model> for Object {
    fn from(m: amenity::Model) -> Self { Object::Amenity(m) }
}

impl From<place::Model> for Object {
    fn from(m: place::Model) -> Self { Object::Place(m) }
}

impl From<review::Model> for Object {
    fn from(m: review::Model) -> Self { Object::Review(m) }
}
