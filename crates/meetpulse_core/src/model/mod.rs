//! Domain model for MeetPulse identities, sessions and meeting notes.
//!
//! # Responsibility
//! - Define the canonical records persisted by the slot substrate.
//! - Own creation defaults and merge-update semantics for notes.
//!
//! # Invariants
//! - Every record is identified by a stable `Uuid`-backed id.
//! - `Note::created_at` is immutable once set; updates only move
//!   `updated_at` forward.

pub mod note;
pub mod user;
