//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate slot reads/rewrites into use-case level APIs.
//! - Keep callers decoupled from the substrate and payload codec.

pub mod auth_service;
pub mod note_service;
pub mod summary_service;
