//! Storefront errors.

use terroa_auth::AuthError;
use terroa_cache::CacheError;
use terroa_commerce::CommerceError;
use thiserror::Error;

/// Errors returned by [`crate::Storefront`] operations.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Company settings failed validation.
    #[error("invalid company settings: {0}")]
    InvalidSettings(String),
}

impl StorefrontError {
    /// User-facing validation failure; nothing changed.
    pub fn is_validation(&self) -> bool {
        match self {
            StorefrontError::Commerce(e) => e.is_validation(),
            StorefrontError::InvalidSettings(_) => true,
            _ => false,
        }
    }

    /// The operation was not available in the current state.
    pub fn is_precondition(&self) -> bool {
        matches!(self, StorefrontError::Commerce(e) if e.is_precondition())
    }

    pub fn is_permission_error(&self) -> bool {
        matches!(self, StorefrontError::Auth(e) if e.is_permission_error())
    }
}
