use async_trait::async_trait;
use tracing::warn;

use super::domain::{Genre, Movie, NewMovie, User};
use crate::errors::ServiceError;

#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, ServiceError>;
    async fn find_all_genres(&self) -> Result<Vec<Genre>, ServiceError>;
    async fn insert_genre(&self, name: &str) -> Result<Genre, ServiceError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn insert_user(&self, email: &str) -> Result<User, ServiceError>;
}

#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn find_movie_by_id(&self, id: i32) -> Result<Option<Movie>, ServiceError>;
    async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>, ServiceError>;
    /// All movies in id order.
    async fn find_all_movies(&self) -> Result<Vec<Movie>, ServiceError>;
    /// Insert and return the movie with its generated id.
    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, ServiceError>;
    /// Write the movie's columns and any ratings without an id; returns the stored aggregate.
    async fn save_movie(&self, movie: &Movie) -> Result<Movie, ServiceError>;
    /// Removing an unknown id is not an error.
    async fn delete_movie_by_id(&self, id: i32) -> Result<(), ServiceError>;
    async fn delete_all_movies(&self) -> Result<(), ServiceError>;
}

/// One open unit of work over all catalog stores.
#[async_trait]
pub trait CatalogTx: GenreStore + UserStore + MovieStore + Sized {
    async fn commit(self) -> Result<(), ServiceError>;
    async fn rollback(self) -> Result<(), ServiceError>;
}

/// Persistence backend handing out scoped transactions.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    type Tx: CatalogTx;

    async fn begin(&self) -> Result<Self::Tx, ServiceError>;
}

/// Commit on success, roll back on error. The original error wins over a failed rollback.
pub async fn finish<T, Tx: CatalogTx>(tx: Tx, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                warn!(error = %rb, "rollback failed");
            }
            Err(e)
        }
    }
}

/// In-memory store for tests and doc examples.
///
/// A transaction holds the store lock for its whole lifetime and works on a
/// copy of the state; commit writes the copy back, anything else discards it.
pub mod mock {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use tokio::sync::{Mutex, OwnedMutexGuard};

    use super::*;
    use models::errors::ModelError;

    #[derive(Debug, Clone, Default)]
    struct State {
        genres: BTreeMap<i32, Genre>,
        users: BTreeMap<i32, User>,
        movies: BTreeMap<i32, Movie>,
        genre_seq: i32,
        user_seq: i32,
        movie_seq: i32,
        rating_seq: i32,
    }

    fn next(seq: &mut i32) -> i32 {
        *seq += 1;
        *seq
    }

    #[derive(Clone, Default)]
    pub struct InMemoryCatalog {
        state: Arc<Mutex<State>>,
    }

    impl InMemoryCatalog {
        pub fn new() -> Self { Self::default() }

        pub async fn movie_count(&self) -> usize { self.state.lock().await.movies.len() }
    }

    pub struct InMemoryTx {
        shared: OwnedMutexGuard<State>,
        working: Mutex<State>,
    }

    #[async_trait]
    impl CatalogStore for InMemoryCatalog {
        type Tx = InMemoryTx;

        async fn begin(&self) -> Result<InMemoryTx, ServiceError> {
            let shared = Arc::clone(&self.state).lock_owned().await;
            let working = Mutex::new(shared.clone());
            Ok(InMemoryTx { shared, working })
        }
    }

    #[async_trait]
    impl CatalogTx for InMemoryTx {
        async fn commit(self) -> Result<(), ServiceError> {
            let InMemoryTx { mut shared, working } = self;
            *shared = working.into_inner();
            Ok(())
        }

        async fn rollback(self) -> Result<(), ServiceError> { Ok(()) }
    }

    #[async_trait]
    impl GenreStore for InMemoryTx {
        async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, ServiceError> {
            let s = self.working.lock().await;
            Ok(s.genres.values().find(|g| g.name == name).cloned())
        }

        async fn find_all_genres(&self) -> Result<Vec<Genre>, ServiceError> {
            Ok(self.working.lock().await.genres.values().cloned().collect())
        }

        async fn insert_genre(&self, name: &str) -> Result<Genre, ServiceError> {
            models::genre::validate_name(name)?;
            let name = name.trim();
            let mut s = self.working.lock().await;
            if s.genres.values().any(|g| g.name == name) {
                return Err(ModelError::Conflict(format!("genre '{}' already exists", name)).into());
            }
            let genre = Genre { id: next(&mut s.genre_seq), name: name.to_string() };
            s.genres.insert(genre.id, genre.clone());
            Ok(genre)
        }
    }

    #[async_trait]
    impl UserStore for InMemoryTx {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
            let s = self.working.lock().await;
            Ok(s.users.values().find(|u| u.email == email).cloned())
        }

        async fn insert_user(&self, email: &str) -> Result<User, ServiceError> {
            models::user::validate_email(email)?;
            let mut s = self.working.lock().await;
            if s.users.values().any(|u| u.email == email) {
                return Err(ModelError::Conflict(format!("user '{}' already exists", email)).into());
            }
            let user = User { id: next(&mut s.user_seq), email: email.to_string() };
            s.users.insert(user.id, user.clone());
            Ok(user)
        }
    }

    #[async_trait]
    impl MovieStore for InMemoryTx {
        async fn find_movie_by_id(&self, id: i32) -> Result<Option<Movie>, ServiceError> {
            Ok(self.working.lock().await.movies.get(&id).cloned())
        }

        async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>, ServiceError> {
            let s = self.working.lock().await;
            Ok(s.movies.values().find(|m| m.title == title).cloned())
        }

        async fn find_all_movies(&self) -> Result<Vec<Movie>, ServiceError> {
            Ok(self.working.lock().await.movies.values().cloned().collect())
        }

        async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, ServiceError> {
            let mut s = self.working.lock().await;
            if s.movies.values().any(|m| m.title == movie.title) {
                return Err(ModelError::Conflict(format!("movie title '{}' already exists", movie.title)).into());
            }
            let stored = Movie {
                id: next(&mut s.movie_seq),
                title: movie.title,
                release_date: movie.release_date,
                director_name: movie.director_name,
                genre: movie.genre,
                ratings: Vec::new(),
            };
            s.movies.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn save_movie(&self, movie: &Movie) -> Result<Movie, ServiceError> {
            let mut s = self.working.lock().await;
            if !s.movies.contains_key(&movie.id) {
                return Err(ServiceError::Db(format!("movie {} does not exist", movie.id)));
            }
            let mut stored = movie.clone();
            for rating in stored.ratings.iter_mut().filter(|r| r.id.is_none()) {
                rating.id = Some(next(&mut s.rating_seq));
            }
            s.movies.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn delete_movie_by_id(&self, id: i32) -> Result<(), ServiceError> {
            self.working.lock().await.movies.remove(&id);
            Ok(())
        }

        async fn delete_all_movies(&self) -> Result<(), ServiceError> {
            self.working.lock().await.movies.clear();
            Ok(())
        }
    }
}
