//! Meeting note record and sparse save payload.
//!
//! # Responsibility
//! - Define the canonical note record stored in the notes slot.
//! - Define `NoteDraft`, the sparse field-update payload used by save.
//! - Own create-default and merge-update semantics.
//!
//! # Invariants
//! - `created_at` is set once at creation and never changes.
//! - `updated_at` is refreshed on every successful save.
//! - `id`, `owner_id` and `created_at` are not patchable: the draft type
//!   has no fields for them.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a meeting note.
pub type NoteId = Uuid;

/// Title given to notes created without one.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Meeting";

/// Canonical meeting note record.
///
/// `owner_id` is an equality filter only; it is never checked against the
/// user collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global id.
    pub id: NoteId,
    /// Owning user. A note belongs to exactly one owner for its lifetime.
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub participants: Vec<String>,
    pub tags: Vec<String>,
    /// Creation time in epoch milliseconds. Immutable once set.
    pub created_at: i64,
    /// Last save time in epoch milliseconds. Always >= `created_at`.
    pub updated_at: i64,
    /// AI-produced summary, when one has been attached.
    pub summary: Option<String>,
    /// AI-extracted action items, when attached.
    pub action_items: Option<Vec<String>>,
}

/// One field update inside a [`NoteDraft`].
///
/// `Keep` leaves the stored value untouched on update (and falls back to
/// the creation default on create); `Set` overwrites it. This keeps
/// "field absent" and "field present with an empty value" distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Keep,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    /// Overwrites `field` when this patch carries a value.
    pub fn apply_to(self, field: &mut T) {
        if let Patch::Set(value) = self {
            *field = value;
        }
    }

    /// Consumes the patch, falling back to `default` when kept.
    pub fn into_value(self, default: T) -> T {
        match self {
            Patch::Keep => default,
            Patch::Set(value) => value,
        }
    }
}

/// Sparse save payload for [`Note`].
///
/// `id` absent selects the create branch; `id` present selects update.
/// `owner_id` is required for creation and deliberately ignored on
/// update, preserving the store's owner-immutability contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<NoteId>,
    pub owner_id: UserId,
    pub title: Patch<String>,
    pub content: Patch<String>,
    pub participants: Patch<Vec<String>>,
    pub tags: Patch<Vec<String>>,
    pub summary: Patch<Option<String>>,
    pub action_items: Patch<Option<Vec<String>>>,
}

impl NoteDraft {
    /// Starts a creation draft for `owner_id` with every field kept at
    /// its creation default.
    pub fn create(owner_id: UserId) -> Self {
        Self {
            id: None,
            owner_id,
            title: Patch::Keep,
            content: Patch::Keep,
            participants: Patch::Keep,
            tags: Patch::Keep,
            summary: Patch::Keep,
            action_items: Patch::Keep,
        }
    }

    /// Starts an update draft targeting the note with `id`.
    pub fn update(owner_id: UserId, id: NoteId) -> Self {
        Self {
            id: Some(id),
            ..Self::create(owner_id)
        }
    }
}

impl Note {
    /// Materializes a new note from a creation draft.
    ///
    /// # Contract
    /// - `title` defaults to [`UNTITLED_NOTE_TITLE`].
    /// - `content`, `participants` and `tags` default to empty.
    /// - `summary` and `action_items` default to `None`.
    /// - `created_at == updated_at == now`.
    pub fn from_draft(id: NoteId, draft: NoteDraft, now: i64) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            title: draft.title.into_value(UNTITLED_NOTE_TITLE.to_string()),
            content: draft.content.into_value(String::new()),
            participants: draft.participants.into_value(Vec::new()),
            tags: draft.tags.into_value(Vec::new()),
            created_at: now,
            updated_at: now,
            summary: draft.summary.into_value(None),
            action_items: draft.action_items.into_value(None),
        }
    }

    /// Merges an update draft into this note.
    ///
    /// # Contract
    /// - Only `Set` fields overwrite stored values.
    /// - `updated_at` becomes `now` regardless of what changed.
    /// - `id`, `owner_id` and `created_at` are untouched.
    pub fn merge(&mut self, draft: NoteDraft, now: i64) {
        draft.title.apply_to(&mut self.title);
        draft.content.apply_to(&mut self.content);
        draft.participants.apply_to(&mut self.participants);
        draft.tags.apply_to(&mut self.tags);
        draft.summary.apply_to(&mut self.summary);
        draft.action_items.apply_to(&mut self.action_items);
        self.updated_at = now;
    }

    /// Returns whether this note matches a case-insensitive substring
    /// query against title, content or any tag.
    ///
    /// An empty query matches every note.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteDraft, Patch, UNTITLED_NOTE_TITLE};
    use uuid::Uuid;

    fn sample_note(now: i64) -> Note {
        let draft = NoteDraft {
            title: Patch::Set("Sprint review".to_string()),
            content: Patch::Set("Velocity discussion".to_string()),
            tags: Patch::Set(vec!["Sprint".to_string(), "review".to_string()]),
            ..NoteDraft::create(Uuid::new_v4())
        };
        Note::from_draft(Uuid::new_v4(), draft, now)
    }

    #[test]
    fn creation_applies_defaults() {
        let note = Note::from_draft(Uuid::new_v4(), NoteDraft::create(Uuid::new_v4()), 100);

        assert_eq!(note.title, UNTITLED_NOTE_TITLE);
        assert!(note.content.is_empty());
        assert!(note.participants.is_empty());
        assert!(note.tags.is_empty());
        assert_eq!(note.created_at, 100);
        assert_eq!(note.updated_at, 100);
        assert_eq!(note.summary, None);
        assert_eq!(note.action_items, None);
    }

    #[test]
    fn merge_keeps_untouched_fields_and_refreshes_updated_at() {
        let mut note = sample_note(100);
        let created_at = note.created_at;

        let mut draft = NoteDraft::update(note.owner_id, note.id);
        draft.title = Patch::Set("Renamed".to_string());
        note.merge(draft, 250);

        assert_eq!(note.title, "Renamed");
        assert_eq!(note.content, "Velocity discussion");
        assert_eq!(note.created_at, created_at);
        assert_eq!(note.updated_at, 250);
    }

    #[test]
    fn merge_can_clear_optional_fields() {
        let mut note = sample_note(100);
        note.summary = Some("stale".to_string());

        let mut draft = NoteDraft::update(note.owner_id, note.id);
        draft.summary = Patch::Set(None);
        note.merge(draft, 200);

        assert_eq!(note.summary, None);
    }

    #[test]
    fn query_matching_covers_title_content_and_tags() {
        let note = sample_note(100);

        assert!(note.matches_query("SPRINT"));
        assert!(note.matches_query("velocity"));
        assert!(note.matches_query("REVIEW"));
        assert!(note.matches_query(""));
        assert!(!note.matches_query("retrospective"));
    }
}
