use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{movie, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movie_id: i32,
    pub user_id: i32,
    pub score: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Movie,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Movie => Entity::belongs_to(movie::Entity)
                .from(Column::MovieId)
                .to(movie::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<movie::Entity> for Entity {
    fn to() -> RelationDef { Relation::Movie.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, movie_id: i32, user_id: i32, score: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        movie_id: Set(movie_id),
        user_id: Set(user_id),
        score: Set(score),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
