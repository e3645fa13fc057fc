use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::base_model::{fresh, required};
use crate::errors::ModelError;
use crate::{place, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Place,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Place => Entity::belongs_to(place::Entity).from(Column::PlaceId).to(place::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(place_id: &str, user_id: &str, text: &str) -> Result<Self, ModelError> {
        let place_id = required("place_id", place_id)?;
        let user_id = required("user_id", user_id)?;
        let text = required("text", text)?;
        let (id, at) = fresh();
        Ok(Self { id, created_at: at, updated_at: at, place_id, user_id, text })
    }
}
