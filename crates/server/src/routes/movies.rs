use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::info;

use service::movie::domain::{MovieData, RatingData};
use service::movie::repository::CatalogStore;

use crate::{errors::JsonApiError, state::AppState};

pub async fn list<S: CatalogStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<MovieData>>, JsonApiError> {
    let all = state.movies.find_all().await?;
    info!(count = all.len(), "list movies");
    Ok(Json(all))
}

/// Returns the submitted movie with its generated id.
pub async fn create<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Json(mut data): Json<MovieData>,
) -> Result<(StatusCode, Json<MovieData>), JsonApiError> {
    state.movies.save(&mut data).await?;
    Ok((StatusCode::CREATED, Json(data)))
}

pub async fn update<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Json(mut data): Json<MovieData>,
) -> Result<Json<MovieData>, JsonApiError> {
    state.movies.update(&mut data).await?;
    Ok(Json(data))
}

pub async fn delete_all<S: CatalogStore>(State(state): State<AppState<S>>) -> Result<StatusCode, JsonApiError> {
    state.movies.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_by_id<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i32>,
) -> Result<Json<MovieData>, JsonApiError> {
    Ok(Json(state.movies.find_by_id(id).await?))
}

pub async fn delete_one<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.movies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_by_title<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Path(title): Path<String>,
) -> Result<Json<MovieData>, JsonApiError> {
    Ok(Json(state.movies.find_by_title(&title).await?))
}

pub async fn add_rating<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Json(rating): Json<RatingData>,
) -> Result<StatusCode, JsonApiError> {
    state.movies.add_rating(&rating).await?;
    Ok(StatusCode::NO_CONTENT)
}
