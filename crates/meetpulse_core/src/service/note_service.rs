//! Note store use-case service.
//!
//! # Responsibility
//! - Provide owner-scoped list/search and last-write-wins save/delete.
//! - Apply create defaults and merge-update semantics from the model.
//!
//! # Invariants
//! - Listings are sorted by `updated_at` descending; ties keep original
//!   storage order (stable sort).
//! - Every mutation rewrites the whole note collection.
//! - Update lookups match on note id alone; a note never changes owner
//!   or creation time through this path.

use crate::caps::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::user::UserId;
use crate::repo::slot_repo::{
    read_collection, write_collection, Slot, SlotRepository, StoreError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Note store error taxonomy.
#[derive(Debug)]
pub enum NoteError {
    /// An update targeted an id with no stored note.
    NotFound(NoteId),
    /// Substrate failure.
    Store(StoreError),
}

impl Display for NoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for NoteError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owner-scoped note CRUD over a slot repository.
pub struct NoteService<R, C = SystemClock, G = UuidGenerator> {
    repo: R,
    clock: C,
    ids: G,
}

impl<R: SlotRepository> NoteService<R> {
    /// Creates a service with the production clock and id generator.
    pub fn new(repo: R) -> Self {
        Self::with_caps(repo, SystemClock, UuidGenerator)
    }
}

impl<R: SlotRepository, C: Clock, G: IdGenerator> NoteService<R, C, G> {
    /// Creates a service with caller-provided capabilities.
    pub fn with_caps(repo: R, clock: C, ids: G) -> Self {
        Self { repo, clock, ids }
    }

    /// Lists every note owned by `owner_id`, most recently saved first.
    ///
    /// Ties on `updated_at` keep their original storage order. An empty
    /// store yields an empty vec, never an error.
    pub fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Note>, NoteError> {
        let mut notes: Vec<Note> = read_collection(&self.repo, Slot::Notes)?;
        notes.retain(|note| note.owner_id == owner_id);
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    /// Lists the owner's notes matching a case-insensitive substring
    /// query against title, content or any tag, in listing order.
    ///
    /// An empty query matches every note.
    pub fn search(&self, owner_id: UserId, query: &str) -> Result<Vec<Note>, NoteError> {
        let mut notes = self.list_by_owner(owner_id)?;
        notes.retain(|note| note.matches_query(query));
        Ok(notes)
    }

    /// Saves a draft, creating or merging depending on `draft.id`.
    ///
    /// # Contract
    /// - Update: fails with `NotFound` when no stored note has the id;
    ///   otherwise `Set` fields overwrite, `Keep` fields stay, and
    ///   `updated_at` is refreshed unconditionally.
    /// - Create: fresh id, creation defaults for kept fields, and
    ///   `created_at == updated_at == now`.
    /// - Both branches rewrite the whole collection.
    pub fn save(&mut self, draft: NoteDraft) -> Result<Note, NoteError> {
        let mut notes: Vec<Note> = read_collection(&self.repo, Slot::Notes)?;
        let now = self.clock.now_epoch_ms();

        let saved = match draft.id {
            Some(id) => {
                let note = notes
                    .iter_mut()
                    .find(|note| note.id == id)
                    .ok_or(NoteError::NotFound(id))?;
                note.merge(draft, now);
                note.clone()
            }
            None => {
                let note = Note::from_draft(self.ids.next_id(), draft, now);
                notes.push(note.clone());
                note
            }
        };

        write_collection(&mut self.repo, Slot::Notes, &notes)?;
        Ok(saved)
    }

    /// Removes the note with `note_id` when present.
    ///
    /// Idempotent: deleting an absent id succeeds and changes nothing.
    pub fn delete(&mut self, note_id: NoteId) -> Result<(), NoteError> {
        let mut notes: Vec<Note> = read_collection(&self.repo, Slot::Notes)?;
        notes.retain(|note| note.id != note_id);
        write_collection(&mut self.repo, Slot::Notes, &notes)?;
        Ok(())
    }
}
