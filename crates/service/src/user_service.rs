use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::movie::domain::User;
use crate::movie::repository::{finish, CatalogStore, UserStore};

/// Users are identified by email when they rate movies.
pub struct UserService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> UserService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn create(&self, email: &str) -> Result<User, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx.insert_user(email).await;
        let user = finish(tx, result).await?;
        info!(user_id = user.id, "user_created");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, ServiceError> {
        let tx = self.store.begin().await?;
        let result = tx
            .find_user_by_email(email)
            .await
            .and_then(|u| u.ok_or_else(|| ServiceError::not_found("User")));
        finish(tx, result).await
    }
}
