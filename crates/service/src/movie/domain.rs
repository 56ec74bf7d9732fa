use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Genre entity; `name` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// User entity; `email` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
}

/// A score given by a user to a movie.
///
/// Both back-references are plain identifiers. `user_email` is carried along
/// so the rating can be mapped without another lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    /// `None` until the owning movie is saved.
    pub id: Option<i32>,
    pub movie_id: i32,
    pub user_id: i32,
    pub user_email: String,
    pub score: i32,
}

impl Rating {
    pub fn is_persisted(&self) -> bool { self.id.is_some() }
}

/// Movie aggregate: owns its ratings, references exactly one genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
    pub director_name: String,
    pub genre: Genre,
    pub ratings: Vec<Rating>,
}

impl Movie {
    /// Append an unsaved rating; it is stored the next time the movie is saved.
    pub fn add_rating(&mut self, user: &User, score: i32) {
        self.ratings.push(Rating {
            id: None,
            movie_id: self.id,
            user_id: user.id,
            user_email: user.email.clone(),
            score,
        });
    }

    pub fn pending_ratings(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.iter().filter(|r| !r.is_persisted())
    }
}

/// Movie that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub release_date: NaiveDate,
    pub director_name: String,
    pub genre: Genre,
}

/// Transfer shape of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieData {
    #[serde(default)]
    pub id: Option<i32>,
    pub title: String,
    pub release_date: NaiveDate,
    pub director_name: String,
    /// Genre name, not the entity.
    pub genre: String,
    #[serde(default)]
    pub ratings: Vec<RatingData>,
}

/// Transfer shape of a rating; also the input of `MovieService::add_rating`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingData {
    #[serde(default)]
    pub id: Option<i32>,
    pub movie_id: i32,
    pub user_email: String,
    pub score: i32,
}

impl From<models::genre::Model> for Genre {
    fn from(m: models::genre::Model) -> Self { Self { id: m.id, name: m.name } }
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self { Self { id: m.id, email: m.email } }
}
