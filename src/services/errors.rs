use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::{domain::dice::DiceError, infrastructure::store::StoreError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("no message exists with id {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Machine-readable code placed under `extensions.code` in GraphQL errors.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Validation(_) => "BAD_USER_INPUT",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
        }
    }
}

impl From<DiceError> for ServiceError {
    fn from(err: DiceError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, ext| ext.set("code", self.code()))
    }
}
