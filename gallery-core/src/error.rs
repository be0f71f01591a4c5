use thiserror::Error;

/// Failures reported by the storage adapters behind the repository and
/// session ports.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The store refused the record it was handed (constraint or argument
    /// violation). Retrying with the same input fails the same way.
    #[error("invalid argument: {0}")]
    ArgumentRejected(String),

    /// No record exists under the given identity.
    #[error("not found: {0}")]
    NotFound(String),

    /// The record is still referenced and cannot be removed.
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    /// The session store could not be reached or returned garbage.
    #[error("session store error: {0}")]
    Session(String),

    /// A stored value could not be encoded or decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other adapter failure, such as a lost connection.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used by the storage ports and adapters.
pub type Result<T> = std::result::Result<T, GalleryError>;
