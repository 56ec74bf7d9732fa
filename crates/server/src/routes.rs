use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::movie::repository::CatalogStore;

use crate::state::AppState;

pub mod genres;
pub mod movies;
pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router<S: CatalogStore>(state: AppState<S>, cors: CorsLayer) -> Router {
    let movie_routes = Router::new()
        .route(
            "/movies",
            get(movies::list::<S>)
                .post(movies::create::<S>)
                .put(movies::update::<S>)
                .delete(movies::delete_all::<S>),
        )
        .route("/movies/ratings", post(movies::add_rating::<S>))
        .route("/movies/title/:title", get(movies::get_by_title::<S>))
        .route("/movies/:id", get(movies::get_by_id::<S>).delete(movies::delete_one::<S>));

    let catalog_routes = Router::new()
        .route("/genres", get(genres::list::<S>).post(genres::create::<S>))
        .route("/users", post(users::create::<S>))
        .route("/users/:email", get(users::get_by_email::<S>));

    Router::new()
        .route("/health", get(health))
        .merge(movie_routes)
        .merge(catalog_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
