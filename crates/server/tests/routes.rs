use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;
use service::movie::repository::mock::InMemoryCatalog;

fn app() -> Router {
    let state = AppState::new(Arc::new(InMemoryCatalog::new()));
    routes::build_router(state, CorsLayer::very_permissive())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(b.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn seeded() -> Router {
    let app = app();
    let (status, _) = send(&app, "POST", "/genres", Some(json!({"name": "Sci-Fi"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/users", Some(json!({"email": "ana@example.com"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    app
}

fn dune() -> Value {
    json!({"title": "Dune", "release_date": "2021-10-21", "director_name": "D", "genre": "Sci-Fi"})
}

#[tokio::test]
async fn health_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_and_fetch_movie() {
    let app = seeded().await;

    let (status, created) = send(&app, "POST", "/movies", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let (status, found) = send(&app, "GET", "/movies/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        found,
        json!({"id": 1, "title": "Dune", "release_date": "2021-10-21", "director_name": "D", "genre": "Sci-Fi", "ratings": []})
    );

    let (status, by_title) = send(&app, "GET", "/movies/title/Dune", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_title["id"], 1);
}

#[tokio::test]
async fn missing_movie_is_404() {
    let app = seeded().await;

    let (status, body) = send(&app, "GET", "/movies/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Movie not found");

    let (status, body) = send(&app, "GET", "/movies/title/Nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Movie not found!");
}

#[tokio::test]
async fn unknown_genre_is_server_error() {
    let app = seeded().await;
    let mut body = dune();
    body["genre"] = json!("Nonexistent");

    let (status, err) = send(&app, "POST", "/movies", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Precondition Violated");

    let (_, all) = send(&app, "GET", "/movies", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn rating_flow() {
    let app = seeded().await;
    send(&app, "POST", "/movies", Some(dune())).await;

    let rating = json!({"movie_id": 1, "user_email": "ana@example.com", "score": 9});
    let (status, _) = send(&app, "POST", "/movies/ratings", Some(rating)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // unknown movie: accepted, nothing stored
    let stray = json!({"movie_id": 99, "user_email": "ana@example.com", "score": 1});
    let (status, _) = send(&app, "POST", "/movies/ratings", Some(stray)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, movie) = send(&app, "GET", "/movies/1", None).await;
    let ratings = movie["ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["movie_id"], 1);
    assert_eq!(ratings[0]["user_email"], "ana@example.com");
    assert_eq!(ratings[0]["score"], 9);
}

#[tokio::test]
async fn rating_by_unknown_user_is_server_error() {
    let app = seeded().await;
    send(&app, "POST", "/movies", Some(dune())).await;

    let rating = json!({"movie_id": 1, "user_email": "ghost@example.com", "score": 3});
    let (status, err) = send(&app, "POST", "/movies/ratings", Some(rating)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Precondition Violated");

    let (_, movie) = send(&app, "GET", "/movies/1", None).await;
    assert_eq!(movie["ratings"], json!([]));
}

#[tokio::test]
async fn update_then_delete() {
    let app = seeded().await;
    send(&app, "POST", "/movies", Some(dune())).await;

    let mut changed = dune();
    changed["id"] = json!(1);
    changed["title"] = json!("Dune: Part One");
    let (status, updated) = send(&app, "PUT", "/movies", Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 2);

    let (status, _) = send(&app, "DELETE", "/movies/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/movies/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, all) = send(&app, "GET", "/movies", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", "/movies", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, all) = send(&app, "GET", "/movies", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn genre_and_user_errors() {
    let app = seeded().await;

    let (status, _) = send(&app, "POST", "/genres", Some(json!({"name": "Sci-Fi"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "POST", "/users", Some(json!({"email": "nope"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, user) = send(&app, "GET", "/users/ana@example.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "ana@example.com");

    let (status, genres) = send(&app, "GET", "/genres", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(genres, json!([{"id": 1, "name": "Sci-Fi"}]));
}
