use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::movie;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "genre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Movie,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Movie => Entity::has_many(movie::Entity).into() }
    }
}

impl Related<movie::Entity> for Entity {
    fn to() -> RelationDef { Relation::Movie.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("genre name required".into())); }
    if name.len() > 128 { return Err(ModelError::Validation("genre name too long (<=128)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    let am = ActiveModel { name: Set(name.trim().to_string()), ..Default::default() };
    Ok(am.insert(db).await?)
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
