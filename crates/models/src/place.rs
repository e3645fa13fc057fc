use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::base_model::{fresh, required};
use crate::errors::ModelError;
use crate::{city, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: i32,
    #[serde(default)]
    pub number_bathrooms: i32,
    #[serde(default)]
    pub max_guest: i32,
    #[serde(default)]
    pub price_by_night: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    City,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::City => Entity::belongs_to(city::Entity).from(Column::CityId).to(city::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A place with zeroed counters and no description or coordinates.
    pub fn new(city_id: &str, user_id: &str, name: &str) -> Result<Self, ModelError> {
        let city_id = required("city_id", city_id)?;
        let user_id = required("user_id", user_id)?;
        let name = required("name", name)?;
        let (id, at) = fresh();
        Ok(Self {
            id,
            created_at: at,
            updated_at: at,
            city_id,
            user_id,
            name,
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
        })
    }
}
