//! Session and identity use-case service.
//!
//! # Responsibility
//! - Manage durable user identities and the single active session.
//! - Derive session tokens and strip secrets from session payloads.
//!
//! # Invariants
//! - Email uniqueness is checked by case-sensitive exact match.
//! - Credentials are compared by plain equality; this toy scheme is the
//!   contract and must not be strengthened here.
//! - Register and login replace any prior session wholesale.
//! - Tokens are derived once from the user id and never re-validated.

use crate::caps::{IdGenerator, UuidGenerator};
use crate::model::user::{Session, UserId, UserRecord};
use crate::repo::slot_repo::{
    read_collection, read_value, write_collection, write_value, Slot, SlotRepository, StoreError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity/session error taxonomy.
#[derive(Debug)]
pub enum AuthError {
    /// A user with the same email is already registered.
    DuplicateUser,
    /// No stored user matches both email and secret.
    InvalidCredentials,
    /// Substrate failure.
    Store(StoreError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateUser => write!(f, "user already exists"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session and identity store over a slot repository.
///
/// The session state machine is re-entrant: register/login move
/// `NoSession -> Authenticated` (or replace an existing session), and
/// logout moves back to `NoSession`.
pub struct AuthService<R, G = UuidGenerator> {
    repo: R,
    ids: G,
}

impl<R: SlotRepository> AuthService<R> {
    /// Creates a service with the production id generator.
    pub fn new(repo: R) -> Self {
        Self::with_ids(repo, UuidGenerator)
    }
}

impl<R: SlotRepository, G: IdGenerator> AuthService<R, G> {
    /// Creates a service with a caller-provided id generator.
    pub fn with_ids(repo: R, ids: G) -> Self {
        Self { repo, ids }
    }

    /// Registers a new user and opens a session for it.
    ///
    /// # Contract
    /// - Fails with `DuplicateUser` when any stored user has the same
    ///   email; the user collection is left unchanged.
    /// - On success the new user is appended and persisted, and the
    ///   returned session replaces any prior one.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password_secret: &str,
    ) -> Result<Session, AuthError> {
        let mut users: Vec<UserRecord> = read_collection(&self.repo, Slot::Users)?;
        if users.iter().any(|user| user.email == email) {
            return Err(AuthError::DuplicateUser);
        }

        let record = UserRecord::new(self.ids.next_id(), name, email, password_secret);
        users.push(record.clone());
        write_collection(&mut self.repo, Slot::Users, &users)?;

        self.open_session(&record)
    }

    /// Logs an existing user in, replacing any prior session.
    ///
    /// # Contract
    /// - Fails with `InvalidCredentials` unless a stored user matches
    ///   both email and secret exactly.
    pub fn login(&mut self, email: &str, password_secret: &str) -> Result<Session, AuthError> {
        let users: Vec<UserRecord> = read_collection(&self.repo, Slot::Users)?;
        let record = users
            .iter()
            .find(|user| user.email == email && user.password_secret == password_secret)
            .ok_or(AuthError::InvalidCredentials)?;

        self.open_session(record)
    }

    /// Clears the current session. Succeeds when none exists.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.repo.clear(Slot::Session)?;
        Ok(())
    }

    /// Returns the current session without validating its token.
    pub fn session(&self) -> Result<Option<Session>, AuthError> {
        Ok(read_value(&self.repo, Slot::Session)?)
    }

    fn open_session(&mut self, record: &UserRecord) -> Result<Session, AuthError> {
        let session = Session {
            user: record.public(),
            token: session_token(record.id),
        };
        write_value(&mut self.repo, Slot::Session, &session)?;
        Ok(session)
    }
}

/// Derives the opaque bearer token for a user id.
///
/// Deterministic by contract: the token is never checked again after
/// creation, so its only job is to be stable and non-empty.
pub fn session_token(user_id: UserId) -> String {
    format!("fake-jwt-{user_id}")
}
