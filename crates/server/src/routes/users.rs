use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Deserialize;

use service::movie::domain::User;
use service::movie::repository::CatalogStore;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
}

pub async fn create<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<User>), JsonApiError> {
    let user = state.users.create(&input.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_by_email<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Path(email): Path<String>,
) -> Result<Json<User>, JsonApiError> {
    Ok(Json(state.users.find_by_email(&email).await?))
}
