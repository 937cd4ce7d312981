//! User types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use terroa_commerce::checkout::OrderCustomer;
use terroa_commerce::ids::UserId;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Business customer.
    #[default]
    User,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// A signed-in business customer or administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Contact person.
    pub name: String,
    pub email: String,
    pub business_name: String,
    /// CNPJ of the business.
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Snapshot of this user for an order.
    pub fn as_customer(&self) -> OrderCustomer {
        OrderCustomer {
            user_id: self.id.clone(),
            name: self.name.clone(),
            business_name: self.business_name.clone(),
            tax_id: self.tax_id.clone(),
        }
    }
}

/// What the login form submits.
#[derive(Clone, Default)]
pub struct Credentials {
    pub email: String,
    /// Accepted but never checked.
    pub password: String,
    pub business_name: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            business_name: String::new(),
        }
    }

    pub fn with_business_name(mut self, business_name: impl Into<String>) -> Self {
        self.business_name = business_name.into();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("business_name", &self.business_name)
            .finish()
    }
}
