//! Ambient capability providers: clock and id generation.
//!
//! # Responsibility
//! - Keep "current time" and "fresh id" behind injectable seams so store
//!   behavior is a pure function of its inputs.
//! - Provide deterministic providers for tests and smoke tooling.
//!
//! # Invariants
//! - `IdGenerator::next_id` never returns the same id twice within one
//!   generator instance.

use std::cell::Cell;
use uuid::Uuid;

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

impl<C: Clock> Clock for &C {
    fn now_epoch_ms(&self) -> i64 {
        (**self).now_epoch_ms()
    }
}

/// Source of fresh globally-unique ids.
pub trait IdGenerator {
    fn next_id(&self) -> Uuid;
}

impl<G: IdGenerator> IdGenerator for &G {
    fn next_id(&self) -> Uuid {
        (**self).next_id()
    }
}

/// Wall-clock provider used by production callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Random v4 uuid provider used by production callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Manually-advanced clock for deterministic tests and smoke runs.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    pub fn new(start_epoch_ms: i64) -> Self {
        Self {
            now: Cell::new(start_epoch_ms),
        }
    }

    /// Moves the reported time forward by `delta_ms`.
    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Counter-backed id provider yielding a predictable id sequence.
#[derive(Debug)]
pub struct SequentialIds {
    next: Cell<u128>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let value = self.next.get();
        self.next.set(value + 1);
        Uuid::from_u128(value)
    }
}
