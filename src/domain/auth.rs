//! Request/response shapes for the external auth service, plus the
//! client-side credential validation performed before calling it.
//!
//! The core ships no transport: [`AuthClient`] is the seam an application
//! wires to its HTTP stack.

use serde::{Deserialize, Serialize};

use crate::errors::{MoniError, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub usuario_id: i64,
    pub nombre: String,
}

/// 4xx payload returned by every auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthFailure {
    pub detail: String,
}

/// The three consumed endpoints. Implementations live outside the core and
/// surface connectivity problems as [`MoniError::Network`].
pub trait AuthClient {
    fn login(&self, request: &LoginRequest) -> Result<AuthSession>;
    fn register(&self, request: &RegisterRequest) -> Result<()>;
    fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<()>;
}

/// Accepts `local@domain.tld` shapes: one `@`, no whitespace, and a dot in
/// the domain with non-empty parts.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|segment| !segment.is_empty())
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(MoniError::InvalidInput(format!("invalid email: {email}")))
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(MoniError::InvalidInput("password is required".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(MoniError::InvalidInput(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(MoniError::InvalidInput("password is required".into()));
    }
    Ok(LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

pub fn validate_registration(
    nombre: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterRequest> {
    if nombre.trim().is_empty() {
        return Err(MoniError::InvalidInput("name is required".into()));
    }
    validate_email(email)?;
    validate_password(password)?;
    if password != confirm_password {
        return Err(MoniError::InvalidInput("passwords do not match".into()));
    }
    Ok(RegisterRequest {
        nombre: nombre.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}
