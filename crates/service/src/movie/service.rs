use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{MovieData, NewMovie, RatingData};
use super::mapping::to_movie_data;
use super::repository::{finish, CatalogStore, GenreStore, MovieStore, UserStore};
use crate::errors::ServiceError;

/// Movie catalog business service independent of web framework.
///
/// Every public operation runs inside one transaction from the store.
pub struct MovieService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> MovieService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Create a movie from its transfer shape and write the generated id back into `data`.
    ///
    /// The genre is looked up by name and must already exist.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::genre_service::GenreService;
    /// use service::movie::{MovieService, domain::MovieData, repository::mock::InMemoryCatalog};
    /// let store = Arc::new(InMemoryCatalog::new());
    /// tokio_test::block_on(GenreService::new(store.clone()).create("Sci-Fi")).unwrap();
    /// let svc = MovieService::new(store);
    /// let mut data = MovieData {
    ///     id: None,
    ///     title: "Dune".into(),
    ///     release_date: chrono::NaiveDate::from_ymd_opt(2021, 10, 21).unwrap(),
    ///     director_name: "D".into(),
    ///     genre: "Sci-Fi".into(),
    ///     ratings: vec![],
    /// };
    /// let id = tokio_test::block_on(svc.save(&mut data)).unwrap();
    /// assert_eq!(data.id, Some(id));
    /// ```
    #[instrument(skip(self, data), fields(title = %data.title, genre = %data.genre))]
    pub async fn save(&self, data: &mut MovieData) -> Result<i32, ServiceError> {
        let tx = self.store.begin().await?;
        let result = insert_from(&tx, data).await;
        let id = finish(tx, result).await?;
        data.id = Some(id);
        info!(movie_id = id, "movie_saved");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<MovieData, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.find_movie_by_id(id).await.and_then(|found| {
            found.map(|m| to_movie_data(&m)).ok_or_else(|| ServiceError::not_found("Movie"))
        });
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<MovieData>, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx
            .find_all_movies()
            .await
            .map(|movies| movies.iter().map(to_movie_data).collect::<Vec<_>>());
        let all = finish(tx, result).await?;
        debug!(count = all.len(), "movies_listed");
        Ok(all)
    }

    /// Delete a movie and its ratings; deleting an unknown id succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.delete_movie_by_id(id).await;
        finish(tx, result).await?;
        info!(movie_id = id, "movie_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.delete_all_movies().await;
        finish(tx, result).await?;
        info!("movies_deleted");
        Ok(())
    }

    /// Persist `data` as a new movie and overwrite `data.id` with the new id.
    ///
    /// The record `data.id` pointed at is left untouched, so an update with an
    /// unchanged title fails on the unique title constraint.
    #[instrument(skip(self, data), fields(previous_id = ?data.id, title = %data.title))]
    pub async fn update(&self, data: &mut MovieData) -> Result<i32, ServiceError> {
        let previous = data.id;
        let tx = self.store.begin().await?;
        let result = insert_from(&tx, data).await;
        let id = finish(tx, result).await?;
        data.id = Some(id);
        if previous.is_some_and(|p| p != id) {
            warn!(?previous, movie_id = id, "update stored a new movie instead of modifying the existing one");
        }
        Ok(id)
    }

    /// Append a rating to a movie.
    ///
    /// An unknown movie id is ignored. With a known movie, the user email must
    /// belong to an existing user.
    #[instrument(skip(self, rating), fields(movie_id = rating.movie_id, user = %rating.user_email))]
    pub async fn add_rating(&self, rating: &RatingData) -> Result<(), ServiceError> {
        let tx = self.store.begin().await?;
        let result = append_rating(&tx, rating).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_title(&self, title: &str) -> Result<MovieData, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.find_movie_by_title(title).await.and_then(|found| {
            found
                .map(|m| to_movie_data(&m))
                .ok_or_else(|| ServiceError::NotFound("Movie not found!".into()))
        });
        finish(tx, result).await
    }
}

async fn insert_from<T: GenreStore + MovieStore>(tx: &T, data: &MovieData) -> Result<i32, ServiceError> {
    let genre = tx
        .find_genre_by_name(&data.genre)
        .await?
        .ok_or_else(|| ServiceError::precondition(format!("genre '{}' does not exist", data.genre)))?;
    let movie = tx
        .insert_movie(NewMovie {
            title: data.title.clone(),
            release_date: data.release_date,
            director_name: data.director_name.clone(),
            genre,
        })
        .await?;
    Ok(movie.id)
}

async fn append_rating<T: UserStore + MovieStore>(tx: &T, rating: &RatingData) -> Result<(), ServiceError> {
    let movie = tx.find_movie_by_id(rating.movie_id).await?;
    let user = tx.find_user_by_email(&rating.user_email).await?;
    let Some(mut movie) = movie else {
        debug!(movie_id = rating.movie_id, "no such movie, rating ignored");
        return Ok(());
    };
    let user = user.ok_or_else(|| ServiceError::precondition(format!("user '{}' does not exist", rating.user_email)))?;
    movie.add_rating(&user, rating.score);
    let saved = tx.save_movie(&movie).await?;
    info!(movie_id = saved.id, ratings = saved.ratings.len(), "rating_added");
    Ok(())
}
