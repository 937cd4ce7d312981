//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No user is signed in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Insufficient permissions.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Durable session storage failed.
    #[error("cache error: {0}")]
    Cache(#[from] terroa_cache::CacheError),
}

impl AuthError {
    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(
            self,
            AuthError::InsufficientPermissions | AuthError::NotAuthenticated
        )
    }
}
