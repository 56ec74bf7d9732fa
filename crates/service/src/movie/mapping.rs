//! Entity to transfer-shape mapping.

use super::domain::{Movie, MovieData, Rating, RatingData};

pub fn to_movie_data(movie: &Movie) -> MovieData {
    MovieData {
        id: Some(movie.id),
        title: movie.title.clone(),
        release_date: movie.release_date,
        director_name: movie.director_name.clone(),
        genre: movie.genre.name.clone(),
        ratings: movie.ratings.iter().map(|r| to_rating_data(movie.id, r)).collect(),
    }
}

/// `movie_id` is the owning movie's id.
pub fn to_rating_data(movie_id: i32, rating: &Rating) -> RatingData {
    RatingData {
        id: rating.id,
        movie_id,
        user_email: rating.user_email.clone(),
        score: rating.score,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::movie::domain::Genre;

    #[test]
    fn maps_genre_by_name_and_ratings_by_email() {
        let movie = Movie {
            id: 1,
            title: "Dune".into(),
            release_date: NaiveDate::from_ymd_opt(2021, 10, 21).unwrap(),
            director_name: "D".into(),
            genre: Genre { id: 4, name: "Sci-Fi".into() },
            ratings: vec![
                Rating { id: Some(10), movie_id: 1, user_id: 2, user_email: "a@x.io".into(), score: 9 },
                Rating { id: Some(11), movie_id: 1, user_id: 3, user_email: "b@x.io".into(), score: 4 },
            ],
        };

        let data = to_movie_data(&movie);
        assert_eq!(data.id, Some(1));
        assert_eq!(data.genre, "Sci-Fi");
        assert_eq!(data.ratings.len(), 2);
        assert_eq!(data.ratings[0], RatingData { id: Some(10), movie_id: 1, user_email: "a@x.io".into(), score: 9 });
        assert_eq!(data.ratings[1].user_email, "b@x.io");
    }
}
