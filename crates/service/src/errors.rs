use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-level failures as `field: message` entries.
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("email already exists: {0}")]
    EmailExists(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{} not found with id: {}", entity, id))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(vec![msg]),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}
