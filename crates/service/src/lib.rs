//! Service layer for the movie catalog.
//! - Maps between transfer shapes and domain entities.
//! - Reaches persistence only through the store traits in `movie::repository`.
//! - Runs each public operation in one scoped transaction.

pub mod errors;
pub mod movie;
pub mod genre_service;
pub mod user_service;
#[cfg(test)]
pub mod test_support;

pub use movie::MovieService;
pub use genre_service::GenreService;
pub use user_service::UserService;
