//! User identity and session records.
//!
//! # Responsibility
//! - Define the durable user record and its secret-free projection.
//! - Define the single client-held session shape.
//!
//! # Invariants
//! - `UserRecord.id` is stable and never reused for another user.
//! - `Session` never carries the password secret.
//! - Session tokens are derived from the user id once and never
//!   re-validated afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a registered user.
pub type UserId = Uuid;

/// Durable identity record as stored in the users slot.
///
/// The secret is kept as plain text by contract. This core implements a
/// toy credential scheme and must not silently strengthen it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable global id used for session tokens and note ownership.
    pub id: UserId,
    pub name: String,
    /// Unique across all users at registration time (case-sensitive).
    pub email: String,
    /// Plain-text credential, compared by exact equality on login.
    pub password_secret: String,
}

impl UserRecord {
    /// Creates a record from registration input and a caller-provided id.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_secret: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_secret: password_secret.into(),
        }
    }

    /// Returns the secret-free projection embedded in sessions.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Secret-free user projection returned to callers and held in sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// The single resident session: public identity plus an opaque token.
///
/// At most one session exists at a time; register/login replace it and
/// logout destroys it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: PublicUser,
    pub token: String,
}
