//! Core persistence and session logic for MeetPulse.
//! This crate is the single source of truth for store invariants.

pub mod caps;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use caps::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, Patch, UNTITLED_NOTE_TITLE};
pub use model::user::{PublicUser, Session, UserId, UserRecord};
pub use repo::slot_repo::{
    MemorySlotRepository, Slot, SlotRepository, SqliteSlotRepository, StoreError, StoreResult,
};
pub use service::auth_service::{session_token, AuthError, AuthService};
pub use service::note_service::{NoteError, NoteService};
pub use service::summary_service::{
    SimulatedSummarizer, Summarizer, SummaryError, SummaryResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
