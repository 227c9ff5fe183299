//! Local credential store: argon2id hashing over the `users` table. Login
//! hands back a [`User`] with the hash stripped; a wrong password and an
//! unknown username are both `Ok(None)`, indistinguishable to the caller.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::debug;

use arena_db::{Database, StorageError};
use arena_types::User;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already taken")]
    UsernameTaken,
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Registers a new user and returns the generated id. The duplicate check
/// runs before hashing so a taken name fails fast.
pub fn create_user(db: &Database, username: &str, password: &str) -> Result<i64, AuthError> {
    if db.get_user_by_username(username)?.is_some() {
        return Err(AuthError::UsernameTaken);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(AuthError::Hash)?
        .to_string();

    let id = db.create_user(username, &password_hash)?;
    debug!(username, "user created");
    Ok(id)
}

/// Verifies credentials. `Ok(None)` covers both "no such user" and "wrong
/// password"; only storage or hash-parse trouble is an error.
pub fn verify_user(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<Option<User>, AuthError> {
    let Some(row) = db.get_user_by_username(username)? else {
        return Ok(None);
    };

    let parsed_hash = PasswordHash::new(&row.password).map_err(AuthError::Hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(Some(User {
            id: row.id,
            username: row.username,
        })),
        Err(_) => Ok(None),
    }
}
