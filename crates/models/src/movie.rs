use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{genre, rating};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub release_date: Date,
    pub director_name: String,
    pub genre_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Genre,
    Rating,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Genre => Entity::belongs_to(genre::Entity)
                .from(Column::GenreId)
                .to(genre::Column::Id)
                .into(),
            Relation::Rating => Entity::has_many(rating::Entity).into(),
        }
    }
}

impl Related<genre::Entity> for Entity {
    fn to() -> RelationDef { Relation::Genre.def() }
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rating.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    title: &str,
    release_date: Date,
    director_name: &str,
    genre_id: i32,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        title: Set(title.to_string()),
        release_date: Set(release_date),
        director_name: Set(director_name.to_string()),
        genre_id: Set(genre_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_title<C: ConnectionTrait>(db: &C, title: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Title.eq(title)).one(db).await?)
}
