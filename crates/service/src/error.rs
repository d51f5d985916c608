use thiserror::Error;

use taproom_core::DomainError;

use crate::store::StoreError;

/// Operation-level failure for the service layer.
///
/// "Not found" for an operation's own target is *not* an error here: those
/// are absent-value results (`Option` / `bool`), translated to 404 by the
/// HTTP layer. Errors cover everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// One or more request fields violated validation; all are listed.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A lifecycle or aggregate invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Stale version, or a state-based conflict such as deleting a record
    /// that is still referenced.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced record (customer, beer) does not exist.
    #[error("{0}")]
    MissingReference(String),

    /// Storage failure outside domain control.
    #[error("store failure: {0}")]
    Store(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(violations) => Self::Validation(violations),
            DomainError::InvariantViolation(msg) => Self::InvariantViolation(msg),
            DomainError::InvalidId(msg) => Self::Validation(vec![msg]),
            DomainError::NotFound => Self::MissingReference("not found".to_string()),
            DomainError::Conflict(msg) => Self::Conflict(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StaleVersion { .. } => Self::Conflict(err.to_string()),
            StoreError::Domain(e) => Self::from(e),
            StoreError::Poisoned => Self::Store(err.to_string()),
        }
    }
}
