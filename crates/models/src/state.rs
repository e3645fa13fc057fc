use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::base_model::{fresh, required};
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "states")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(name: &str) -> Result<Self, ModelError> {
        let name = required("name", name)?;
        let (id, at) = fresh();
        Ok(Self { id, created_at: at, updated_at: at, name })
    }
}
