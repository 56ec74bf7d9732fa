use std::sync::Arc;

use service::movie::repository::CatalogStore;
use service::{GenreService, MovieService, UserService};

/// Shared handler state; one set of services over one store.
pub struct AppState<S: CatalogStore> {
    pub movies: Arc<MovieService<S>>,
    pub genres: Arc<GenreService<S>>,
    pub users: Arc<UserService<S>>,
}

impl<S: CatalogStore> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            movies: Arc::new(MovieService::new(Arc::clone(&store))),
            genres: Arc::new(GenreService::new(Arc::clone(&store))),
            users: Arc::new(UserService::new(store)),
        }
    }
}

// derive(Clone) would require S: Clone
impl<S: CatalogStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            movies: Arc::clone(&self.movies),
            genres: Arc::clone(&self.genres),
            users: Arc::clone(&self.users),
        }
    }
}
