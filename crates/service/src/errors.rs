use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    /// A value the caller guaranteed to exist was absent.
    #[error("precondition violated: {0}")]
    Precondition(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn precondition(msg: impl Into<String>) -> Self { Self::Precondition(msg.into()) }

    /// Business errors the caller can act on; contract violations and storage failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ServiceError::NotFound(_) | ServiceError::Model(_))
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn not_found_message() {
        let e = ServiceError::not_found("Movie");
        assert!(matches!(&e, ServiceError::NotFound(m) if m == "Movie not found"));
        assert_eq!(e.to_string(), "not found: Movie not found");
    }

    #[test]
    fn recoverability() {
        assert!(ServiceError::not_found("Movie").is_recoverable());
        assert!(ServiceError::Model(ModelError::Conflict("dup".into())).is_recoverable());
        assert!(!ServiceError::precondition("genre 'x' does not exist").is_recoverable());
        assert!(!ServiceError::Db("connection reset".into()).is_recoverable());
    }
}
