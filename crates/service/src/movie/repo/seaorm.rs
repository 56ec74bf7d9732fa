use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use models::{genre, movie, rating, user};

use crate::errors::ServiceError;
use crate::movie::domain::{Genre, Movie, NewMovie, Rating, User};
use crate::movie::repository::{CatalogStore, CatalogTx, GenreStore, MovieStore, UserStore};

pub struct SeaOrmCatalog {
    pub db: DatabaseConnection,
}

impl SeaOrmCatalog {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Every query of one service call runs on this transaction.
pub struct SeaOrmTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl CatalogStore for SeaOrmCatalog {
    type Tx = SeaOrmTx;

    async fn begin(&self) -> Result<SeaOrmTx, ServiceError> {
        let txn = self.db.begin().await?;
        Ok(SeaOrmTx { txn })
    }
}

#[async_trait]
impl CatalogTx for SeaOrmTx {
    async fn commit(self) -> Result<(), ServiceError> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), ServiceError> {
        self.txn.rollback().await?;
        Ok(())
    }
}

impl SeaOrmTx {
    /// Attach genre and ratings (with rater emails) to movie rows, keeping row order.
    async fn load_movies(&self, rows: Vec<movie::Model>) -> Result<Vec<Movie>, ServiceError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let genre_ids: Vec<i32> = rows.iter().map(|m| m.genre_id).collect();
        let movie_ids: Vec<i32> = rows.iter().map(|m| m.id).collect();

        let genres: HashMap<i32, genre::Model> = genre::Entity::find()
            .filter(genre::Column::Id.is_in(genre_ids))
            .all(&self.txn)
            .await?
            .into_iter()
            .map(|g| (g.id, g))
            .collect();

        let rated = rating::Entity::find()
            .filter(rating::Column::MovieId.is_in(movie_ids))
            .find_also_related(user::Entity)
            .order_by_asc(rating::Column::Id)
            .all(&self.txn)
            .await?;

        let mut ratings: HashMap<i32, Vec<Rating>> = HashMap::new();
        for (r, u) in rated {
            let u = u.ok_or_else(|| ServiceError::Db(format!("rating {} references missing user {}", r.id, r.user_id)))?;
            ratings.entry(r.movie_id).or_default().push(Rating {
                id: Some(r.id),
                movie_id: r.movie_id,
                user_id: u.id,
                user_email: u.email,
                score: r.score,
            });
        }

        rows.into_iter()
            .map(|m| {
                let genre = genres
                    .get(&m.genre_id)
                    .cloned()
                    .ok_or_else(|| ServiceError::Db(format!("movie {} references missing genre {}", m.id, m.genre_id)))?;
                Ok(Movie {
                    id: m.id,
                    title: m.title,
                    release_date: m.release_date,
                    director_name: m.director_name,
                    genre: genre.into(),
                    ratings: ratings.remove(&m.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn load_one(&self, row: Option<movie::Model>) -> Result<Option<Movie>, ServiceError> {
        match row {
            Some(m) => Ok(self.load_movies(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl GenreStore for SeaOrmTx {
    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, ServiceError> {
        Ok(genre::find_by_name(&self.txn, name).await?.map(Genre::from))
    }

    async fn find_all_genres(&self) -> Result<Vec<Genre>, ServiceError> {
        Ok(genre::list(&self.txn).await?.into_iter().map(Genre::from).collect())
    }

    async fn insert_genre(&self, name: &str) -> Result<Genre, ServiceError> {
        Ok(genre::create(&self.txn, name).await?.into())
    }
}

#[async_trait]
impl UserStore for SeaOrmTx {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(user::find_by_email(&self.txn, email).await?.map(User::from))
    }

    async fn insert_user(&self, email: &str) -> Result<User, ServiceError> {
        Ok(user::create(&self.txn, email).await?.into())
    }
}

#[async_trait]
impl MovieStore for SeaOrmTx {
    async fn find_movie_by_id(&self, id: i32) -> Result<Option<Movie>, ServiceError> {
        let row = movie::Entity::find_by_id(id).one(&self.txn).await?;
        self.load_one(row).await
    }

    async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>, ServiceError> {
        let row = movie::find_by_title(&self.txn, title).await?;
        self.load_one(row).await
    }

    async fn find_all_movies(&self) -> Result<Vec<Movie>, ServiceError> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.txn).await?;
        self.load_movies(rows).await
    }

    async fn insert_movie(&self, new: NewMovie) -> Result<Movie, ServiceError> {
        let row = movie::create(&self.txn, &new.title, new.release_date, &new.director_name, new.genre.id).await?;
        Ok(Movie {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
            director_name: row.director_name,
            genre: new.genre,
            ratings: Vec::new(),
        })
    }

    async fn save_movie(&self, m: &Movie) -> Result<Movie, ServiceError> {
        let am = movie::ActiveModel {
            id: Set(m.id),
            title: Set(m.title.clone()),
            release_date: Set(m.release_date),
            director_name: Set(m.director_name.clone()),
            genre_id: Set(m.genre.id),
        };
        am.update(&self.txn).await?;
        for r in m.pending_ratings() {
            let stored = rating::create(&self.txn, m.id, r.user_id, r.score).await?;
            debug!(rating_id = stored.id, movie_id = m.id, "rating_inserted");
        }
        self.find_movie_by_id(m.id)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("movie {} vanished during save", m.id)))
    }

    async fn delete_movie_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let res = movie::Entity::delete_by_id(id).exec(&self.txn).await?;
        debug!(movie_id = id, rows = res.rows_affected, "movie_delete");
        Ok(())
    }

    async fn delete_all_movies(&self) -> Result<(), ServiceError> {
        let res = movie::Entity::delete_many().exec(&self.txn).await?;
        debug!(rows = res.rows_affected, "movie_delete_all");
        Ok(())
    }
}
