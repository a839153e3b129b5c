//! Alias store backends.
//!
//! [`InMemoryStore`] keeps mappings for the lifetime of the process,
//! [`PostgresStore`] persists them in a single `urls` table.

pub mod memory;
pub mod postgres;

pub use linkstash_core::{AliasStore, SaveOutcome, StorageError};
pub use memory::InMemoryStore;
pub use postgres::{PostgresConfig, PostgresStore};

/// Default ceiling on code generation attempts per `save` call.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 16;
