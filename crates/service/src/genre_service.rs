use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::movie::domain::Genre;
use crate::movie::repository::{finish, CatalogStore, GenreStore};

/// Genres are the lookup key movies are filed under.
pub struct GenreService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> GenreService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Genre, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.insert_genre(name).await;
        let genre = finish(tx, result).await?;
        info!(genre_id = genre.id, "genre_created");
        Ok(genre)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Genre, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx
            .find_genre_by_name(name)
            .await
            .and_then(|g| g.ok_or_else(|| ServiceError::not_found("Genre")));
        finish(tx, result).await
    }

    pub async fn list(&self) -> Result<Vec<Genre>, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.find_all_genres().await;
        finish(tx, result).await
    }
}
