use thiserror::Error;

/// Errors from repository operations (used by trait definitions in menubot-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to menu item operations.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("menu item not found")]
    NotFound,

    #[error("invalid menu item: {0}")]
    Invalid(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors related to category and subcategory operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("{0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors related to file uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File type not allowed")]
    DisallowedType,

    #[error("filesystem error: {0}")]
    FileSystem(String),
}

/// Failures of a single recommendation chat request.
///
/// `Validation` and `ServiceUnavailable` are detected before any side effect
/// and carry messages safe to show callers. `Upstream` and `Internal` carry
/// diagnostic detail for the server log only.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("{0}")]
    Validation(String),

    #[error("generation provider is not configured")]
    ServiceUnavailable,

    #[error("generation provider failed: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}
