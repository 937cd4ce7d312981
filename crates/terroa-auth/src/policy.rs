//! Demo login policy.
//!
//! Every login succeeds. The policy only decides which user the form
//! produces: the configured admin address signs in as the store
//! administrator, anything else as a business customer. The role is
//! self-asserted and must not be treated as an authorization boundary.

use crate::user::{Credentials, Role, User};
use rand::Rng;
use terroa_commerce::ids::UserId;

/// Default administrator email.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@terroa.com";

/// Fixed id of the administrator account.
pub const ADMIN_USER_ID: &str = "admin-001";

const DEFAULT_TAX_ID: &str = "12.345.678/0001-90";

/// Decides who a set of credentials signs in as.
#[derive(Debug, Clone)]
pub struct LoginPolicy {
    admin_email: String,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAIL)
    }
}

impl LoginPolicy {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Check whether an email belongs to the administrator (case-insensitive).
    pub fn is_admin_email(&self, email: &str) -> bool {
        email.trim().eq_ignore_ascii_case(&self.admin_email)
    }

    /// Build the user for a login attempt. Blank fields get demo defaults.
    pub fn sign_in<R: Rng + ?Sized>(&self, credentials: &Credentials, rng: &mut R) -> User {
        let email = credentials.email.trim();
        let business_name = credentials.business_name.trim();

        if self.is_admin_email(email) {
            return User {
                id: UserId::new(ADMIN_USER_ID),
                name: "Admin Terroá".to_string(),
                email: email.to_string(),
                business_name: non_blank(business_name, "Terroá Matriz"),
                tax_id: Some(DEFAULT_TAX_ID.to_string()),
                role: Role::Admin,
            };
        }

        User {
            id: UserId::generate_customer(rng),
            name: "João Silva".to_string(),
            email: non_blank(email, "contato@terroa.com"),
            business_name: non_blank(business_name, "Restaurante Raiz"),
            tax_id: Some(DEFAULT_TAX_ID.to_string()),
            role: Role::User,
        }
    }

    /// The administrator account, as produced by the one-click admin login.
    pub fn admin(&self) -> User {
        User {
            id: UserId::new(ADMIN_USER_ID),
            name: "Admin Terroá".to_string(),
            email: self.admin_email.clone(),
            business_name: "Terroá Matriz".to_string(),
            tax_id: Some(DEFAULT_TAX_ID.to_string()),
            role: Role::Admin,
        }
    }
}

fn non_blank(value: &str, default: &str) -> String {
    if value.is_empty() { default } else { value }.to_string()
}
