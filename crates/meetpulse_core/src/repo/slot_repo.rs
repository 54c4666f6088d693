//! Named-slot repository contract, backends and payload codec.
//!
//! # Responsibility
//! - Provide whole-value read/write/clear over the three named slots.
//! - Provide the SQLite and in-memory backend implementations.
//! - Encode/decode slot payloads as JSON collections.
//!
//! # Invariants
//! - A write replaces the entire slot payload atomically.
//! - Mutating operations take `&mut self`: one writer per store instance.
//!   The read-modify-write pattern above this layer is not safe under
//!   concurrent writers; callers needing that must add their own
//!   single-writer queue or a transactional backing store.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// One named unit of the persistence substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// All registered users, serialized as one JSON array.
    Users,
    /// All notes across all owners, serialized as one JSON array.
    Notes,
    /// The single current session, serialized as one JSON object.
    Session,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Users, Slot::Notes, Slot::Session];

    /// Stable storage name of this slot.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Users => "users",
            Slot::Notes => "notes",
            Slot::Session => "session",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Substrate-level error for slot persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// The backing storage could not be reached or failed mid-operation.
    Unavailable(DbError),
    /// The connection has not been migrated to the supported schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A required table is missing from the connection's schema.
    MissingRequiredTable(&'static str),
    /// A slot payload could not be decoded (or a record encoded).
    Corrupt { slot: Slot, detail: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::Corrupt { slot, detail } => {
                write!(f, "corrupt payload in slot `{slot}`: {detail}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Unavailable(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Unavailable(DbError::Sqlite(value))
    }
}

/// Whole-value access to the named slots.
///
/// Every backend reads a slot entire and replaces it entire; partial
/// updates do not exist at this layer.
pub trait SlotRepository {
    /// Returns the raw payload of `slot`, or `None` when never written.
    fn read(&self, slot: Slot) -> StoreResult<Option<String>>;
    /// Replaces the entire payload of `slot`.
    fn write(&mut self, slot: Slot, payload: &str) -> StoreResult<()>;
    /// Removes the payload of `slot`. Succeeds when already absent.
    fn clear(&mut self, slot: Slot) -> StoreResult<()>;
}

impl<R: SlotRepository + ?Sized> SlotRepository for &mut R {
    fn read(&self, slot: Slot) -> StoreResult<Option<String>> {
        (**self).read(slot)
    }

    fn write(&mut self, slot: Slot, payload: &str) -> StoreResult<()> {
        (**self).write(slot, payload)
    }

    fn clear(&mut self, slot: Slot) -> StoreResult<()> {
        (**self).clear(slot)
    }
}

/// SQLite-backed slot repository.
///
/// Writes rely on SQLite's atomic row replacement, which gives the slot
/// substrate its whole-value write guarantee.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable` when the slots table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(conn, "slots")? {
            return Err(StoreError::MissingRequiredTable("slots"));
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read(&self, slot: Slot) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [slot.name()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, slot: Slot, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO slots (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload;",
            params![slot.name(), payload],
        )?;
        Ok(())
    }

    fn clear(&mut self, slot: Slot) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE name = ?1;", [slot.name()])?;
        Ok(())
    }
}

/// In-memory slot repository for tests and smoke tooling.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: HashMap<Slot, String>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read(&self, slot: Slot) -> StoreResult<Option<String>> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn write(&mut self, slot: Slot, payload: &str) -> StoreResult<()> {
        self.slots.insert(slot, payload.to_string());
        Ok(())
    }

    fn clear(&mut self, slot: Slot) -> StoreResult<()> {
        self.slots.remove(&slot);
        Ok(())
    }
}

/// Decodes a slot holding a JSON array of records.
///
/// A never-written slot decodes as the empty collection.
pub fn read_collection<T, R>(repo: &R, slot: Slot) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    R: SlotRepository + ?Sized,
{
    match repo.read(slot)? {
        Some(payload) => decode(slot, &payload),
        None => Ok(Vec::new()),
    }
}

/// Replaces a slot with a JSON array of records.
pub fn write_collection<T, R>(repo: &mut R, slot: Slot, items: &[T]) -> StoreResult<()>
where
    T: Serialize,
    R: SlotRepository + ?Sized,
{
    let payload = encode(slot, &items)?;
    repo.write(slot, &payload)
}

/// Decodes a slot holding a single JSON record.
pub fn read_value<T, R>(repo: &R, slot: Slot) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    R: SlotRepository + ?Sized,
{
    match repo.read(slot)? {
        Some(payload) => decode(slot, &payload).map(Some),
        None => Ok(None),
    }
}

/// Replaces a slot with a single JSON record.
pub fn write_value<T, R>(repo: &mut R, slot: Slot, value: &T) -> StoreResult<()>
where
    T: Serialize,
    R: SlotRepository + ?Sized,
{
    let payload = encode(slot, value)?;
    repo.write(slot, &payload)
}

fn decode<T: DeserializeOwned>(slot: Slot, payload: &str) -> StoreResult<T> {
    serde_json::from_str(payload).map_err(|err| StoreError::Corrupt {
        slot,
        detail: err.to_string(),
    })
}

fn encode<T: Serialize + ?Sized>(slot: Slot, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|err| StoreError::Corrupt {
        slot,
        detail: err.to_string(),
    })
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
