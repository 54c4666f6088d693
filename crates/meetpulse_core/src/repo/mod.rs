//! Persistence layer: the named-slot substrate and its backends.
//!
//! # Responsibility
//! - Define the whole-value slot access contract shared by all backends.
//! - Isolate SQLite details from service/business orchestration.
//!
//! # Invariants
//! - Slots are read entire and rewritten entire; there is no incremental
//!   access path.
//! - Read paths reject undecodable persisted state instead of masking it.

pub mod slot_repo;
