//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Repositories call store methods; they never execute SQL directly.

use crate::error::{RaffleError, RaffleResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

mod custom_raffle;
mod preferences;
mod quick_decision;

pub struct RafflerStore {
    pub(crate) conn: Connection,
}

/// A store shared between repositories. Access is serialised by the mutex.
pub type SharedStore = Arc<Mutex<RafflerStore>>;

impl RafflerStore {
    pub fn open(path: &str) -> RaffleResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        log::debug!("store: opened {path}");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> RaffleResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> RaffleResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_preferences.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_quick_decisions.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_custom_raffles.sql"))?;
        Ok(())
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }
}

/// Lock a shared store, mapping a poisoned mutex to a storage-side error.
pub fn lock(store: &SharedStore) -> RaffleResult<MutexGuard<'_, RafflerStore>> {
    store.lock().map_err(|_| RaffleError::LockPoisoned)
}
