use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use service::movie::domain::Genre;
use service::movie::repository::CatalogStore;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateGenreInput {
    pub name: String,
}

pub async fn list<S: CatalogStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<Genre>>, JsonApiError> {
    Ok(Json(state.genres.list().await?))
}

pub async fn create<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Json(input): Json<CreateGenreInput>,
) -> Result<(StatusCode, Json<Genre>), JsonApiError> {
    let genre = state.genres.create(&input.name).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}
