//! User account registration and login.

use chrono::Local;

use crate::domain::User;
use crate::storage::{Filter, Storage, StorageError};

use super::password::{hash_password, verify_password};

/// Account errors. The first three are ordinary user-facing outcomes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username already exists")]
    UsernameTaken,

    #[error("email already registered")]
    EmailTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("failed to hash password: {0}")]
    Hash(pbkdf2::password_hash::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Register a new user.
///
/// Username and email must both be unused; the checks are separate so
/// the caller can show which one collided.
pub fn register(
    storage: &Storage,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    if storage
        .find_one("users", &Filter::eq("username", username))?
        .is_some()
    {
        return Err(AuthError::UsernameTaken);
    }
    if storage
        .find_one("users", &Filter::eq("email", email))?
        .is_some()
    {
        return Err(AuthError::EmailTaken);
    }

    let user = User {
        username: username.to_string(),
        email: email.to_string(),
        password: hash_password(password).map_err(AuthError::Hash)?,
        created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    storage.insert_one("users", &user)?;
    Ok(user)
}

/// Verify a username/password pair.
///
/// Unknown usernames and wrong passwords both collapse to
/// [`AuthError::InvalidCredentials`]; login must not reveal which.
pub fn login(storage: &Storage, username: &str, password: &str) -> Result<User, AuthError> {
    let user: User = storage
        .find_one_as("users", &Filter::eq("username", username))?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &user.password) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
