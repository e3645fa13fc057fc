use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::base_model::{fresh, required};
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(email: &str, password: &str) -> Result<Self, ModelError> {
        if !email.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
        let password = required("password", password)?;
        let (id, at) = fresh();
        Ok(Self {
            id,
            created_at: at,
            updated_at: at,
            email: email.to_string(),
            password,
            first_name: None,
            last_name: None,
        })
    }
}
