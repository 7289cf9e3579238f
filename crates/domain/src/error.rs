use crate::NameError;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error("conflicting create could not be resolved")]
    UnresolvedConflict,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => CreateError::Storage(StorageError::new("not found")),
            ReadError::Storage(storage) => CreateError::Storage(storage),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rejected before any mutation; distinct from system errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Name(#[from] NameError),
}

/// Failure reported by the persistence collaborator.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct StorageError(Box<dyn std::error::Error + Send + Sync>);

impl StorageError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(error.into())
    }
}
