//! Sign-in for the Terroa storefront.
//!
//! Provides the user model, the demo login policy, and the session store
//! that keeps the signed-in user across restarts.

mod error;
mod policy;
mod session;
mod user;

pub use error::AuthError;
pub use policy::{LoginPolicy, ADMIN_USER_ID, DEFAULT_ADMIN_EMAIL};
pub use session::{SessionStore, SESSION_KEY};
pub use user::{Credentials, Role, User};
