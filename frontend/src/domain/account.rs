//! Accounts, roles and the credentials forwarded to the backend.
//!
//! Keep form parsing outside the domain by exposing constructors that
//! validate string inputs before a handler talks to the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use zeroize::Zeroizing;

/// Kind of account a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer browsing shows and booking seats.
    User,
    /// An operator managing theatres, movies and shows.
    Admin,
}

impl Role {
    /// Lowercase tag stored in the session and used in backend paths.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Display name used when the backend omits one.
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Who is signed in, as stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Email the account signed in with.
    pub email: String,
    /// Display name reported by the backend.
    pub name: String,
    /// Backend account id in text form; empty when the backend sent none.
    pub id: String,
    /// Role that was granted.
    pub role: Role,
}

impl SessionIdentity {
    /// Build an identity from the account object of a login response.
    ///
    /// A missing or non-string `name` falls back to the role's default name;
    /// numeric ids are kept in their decimal text form.
    pub fn from_account(email: &str, role: Role, account: Option<&Value>) -> Self {
        let name = account
            .and_then(|a| a.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_else(|| role.default_name())
            .to_owned();
        let id = match account.and_then(|a| a.get("id")) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        };
        Self {
            email: email.to_owned(),
            name,
            id,
            role,
        }
    }
}

/// Login validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("Email is required")]
    EmptyEmail,
    /// Password was blank.
    #[error("Password is required")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use frontend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@b.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "a@b.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email to sign in with.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Body for `POST /api/{role}/login`.
    pub fn payload(&self) -> Value {
        json!({ "email": self.email, "password": self.password.as_str() })
    }
}

/// Registration validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration, rejecting mismatched passwords.
    ///
    /// Other fields are forwarded as submitted; the backend owns the rest of
    /// the account rules.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        if password != confirm_password {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Body for `POST /api/{role}/register`.
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "password": self.password.as_str(),
        })
    }
}
