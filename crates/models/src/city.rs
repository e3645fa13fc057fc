use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::base_model::{fresh, required};
use crate::errors::ModelError;
use crate::state;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub state_id: String,
    pub name: String,
}

/// `state_id` is a weak reference; the schema declares no constraint for it.
#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    State,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::State => Entity::belongs_to(state::Entity).from(Column::StateId).to(state::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(state_id: &str, name: &str) -> Result<Self, ModelError> {
        let state_id = required("state_id", state_id)?;
        let name = required("name", name)?;
        let (id, at) = fresh();
        Ok(Self { id, created_at: at, updated_at: at, state_id, name })
    }
}
