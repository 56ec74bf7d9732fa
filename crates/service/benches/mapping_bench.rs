use criterion::{criterion_group, criterion_main, Criterion};
use chrono::NaiveDate;

use service::movie::domain::{Genre, Movie, Rating};
use service::movie::mapping::to_movie_data;

fn rated_movie(ratings: i32) -> Movie {
    Movie {
        id: 1,
        title: "Bench".into(),
        release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        director_name: "Bench Director".into(),
        genre: Genre { id: 1, name: "Drama".into() },
        ratings: (0..ratings)
            .map(|i| Rating { id: Some(i), movie_id: 1, user_id: i, user_email: format!("user{}@example.com", i), score: i % 10 })
            .collect(),
    }
}

fn bench_mapping(c: &mut Criterion) {
    let movie = rated_movie(1_000);
    c.bench_function("movie_to_transfer_1000_ratings", |b| {
        b.iter(|| to_movie_data(std::hint::black_box(&movie)));
    });
}

criterion_group!(benches, bench_mapping);
criterion_main!(benches);
