use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::rating;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Rating,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Rating => Entity::has_many(rating::Entity).into() }
    }
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rating.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
    if email.len() > 255 { return Err(ModelError::Validation("email too long (<=255)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, email: &str) -> Result<Model, ModelError> {
    validate_email(email)?;
    let am = ActiveModel { email: Set(email.to_string()), ..Default::default() };
    Ok(am.insert(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}
