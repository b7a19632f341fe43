//! Key-value persistence for the wizard mirror.
//!
//! This module defines the `KvStore` trait that abstracts the string
//! key-value store the wizard persists into. Implementations can provide
//! different backends (in-memory, SQLite, ...). The trait is synchronous:
//! the mirror is tiny and every operation is a single fast read or write.

mod memory;
mod sqlite;

pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

use anyhow::Result;

/// Key holding the serialized draft (JSON object of all fields).
pub const DRAFT_KEY: &str = "draft-data";

/// Key holding the current step as a decimal string.
pub const STEP_KEY: &str = "draft-step";

/// Flag key whose presence means the prior session completed submission.
/// Consumed and cleared on the next `initialize()`.
pub const SUBMITTED_KEY: &str = "submitted-flag";

/// Synchronous string key-value store.
///
/// The wizard is the only writer within a session; there is no cross-session
/// coordination, so concurrent sessions sharing a backend race with
/// last-write-wins semantics.
pub trait KvStore: Send + Sync {
    /// Get the value for a key, returning `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key (upsert semantics).
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
