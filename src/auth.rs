//! Accounts and the session pointer.
//!
//! Passwords are stored in plaintext alongside the user records; this is a
//! demo-grade credential store, not a security design.

use crate::store::{LocalStore, User};
use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User with this email already exists")]
    EmailExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Create an account and sign it in.
///
/// Email uniqueness is enforced only here, by exact match (no case folding).
pub fn sign_up(
    store: &LocalStore,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<User, AuthError> {
    let mut users = store.users();

    if users.iter().any(|user| user.email == email) {
        return Err(AuthError::EmailExists);
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.to_string(),
        full_name: full_name.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    let mut passwords = store.passwords();
    passwords.insert(user.id.clone(), password.to_string());

    users.push(user.clone());
    store.save_users(&users)?;
    store.save_passwords(&passwords)?;
    store.set_current_user(Some(&user))?;

    Ok(user)
}

/// Sign an existing account in and set the session pointer.
pub fn sign_in(store: &LocalStore, email: &str, password: &str) -> Result<User, AuthError> {
    let users = store.users();
    let user = users
        .iter()
        .find(|user| user.email == email)
        .ok_or(AuthError::UserNotFound)?;

    let passwords = store.passwords();
    if passwords.get(&user.id).map(String::as_str) != Some(password) {
        return Err(AuthError::InvalidPassword);
    }

    store.set_current_user(Some(user))?;
    Ok(user.clone())
}

/// Clear the session pointer.
pub fn sign_out(store: &LocalStore) -> Result<(), AuthError> {
    store.set_current_user(None)?;
    Ok(())
}

/// Delete the current account. Clears the whole store rather than scoping to
/// the one user, matching the app's behavior.
pub fn delete_account(store: &LocalStore) -> Result<(), AuthError> {
    store.clear_all()?;
    Ok(())
}
