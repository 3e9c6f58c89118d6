use thiserror::Error;

use scentwise_core::errors::ApplicationError;

pub mod memory;

pub use memory::{InMemoryPreferenceStore, InMemoryScentCatalog};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}
