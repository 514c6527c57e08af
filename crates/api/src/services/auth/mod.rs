//! Authentication service.
//!
//! Demo-grade email/password signup and login. There are no sessions or
//! tokens: a successful login only returns the user's identity.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use partshop_core::{Email, UserId};

use crate::db::{DataSource, RepositoryError};
use crate::models::{NewUser, User};

/// Result of a signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Demo mode: acknowledged, nothing persisted.
    Demo { name: String, email: Email },
    /// A user was created.
    Created(UserId),
}

/// Result of a login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Demo mode: any credentials are accepted.
    Demo { email: Email },
    /// Credentials matched a stored user.
    Authenticated(User),
}

/// Authentication service.
pub struct AuthService<'a> {
    source: &'a DataSource,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(source: &'a DataSource) -> Self {
        Self { source }
    }

    /// Register a new user with name, email, and password.
    ///
    /// The email is checked for an existing account first; the store's own
    /// uniqueness guarantee covers a concurrent signup racing past that check.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    /// Returns `AuthError::Repository` if the store fails.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupOutcome, AuthError> {
        let email = Email::parse(email)?;

        let store = match self.source {
            DataSource::Demo => {
                tracing::info!(email = %email, "signup accepted in demo mode");
                return Ok(SignupOutcome::Demo {
                    name: name.to_owned(),
                    email,
                });
            }
            DataSource::Store(store) => store,
        };

        if store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let user = store
            .insert_user(NewUser {
                name: name.to_owned(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(SignupOutcome::Created(user.id))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::Repository` if the store fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let email = Email::parse(email)?;

        let store = match self.source {
            DataSource::Demo => return Ok(LoginOutcome::Demo { email }),
            DataSource::Store(store) => store,
        };

        let (user, password_hash) = store
            .find_credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome::Authenticated(user))
    }
}

/// Hash a password using Argon2id with a random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
