// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the rota bot.
//!
//! Rota records are stored one row per `(channel_id, rota_name)` in `SQLite`
//! via Diesel. The schema is provisioned by embedded migrations every time a
//! connection is opened, so starting against an existing database is safe.
//!
//! ## Column ownership
//!
//! - `put_rota` writes the configuration columns (`members_json`,
//!   `duration_weeks`) and nothing else.
//! - `update_shift` and `update_shift_if` write the three shift columns
//!   (`on_call_member`, `shift_start`, `shift_end`) and nothing else.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rota_domain::{RotaRecord, Shift};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for rota records.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Retrieves a rota by key. Returns `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn get_rota(
        &mut self,
        channel_id: &str,
        rota_name: &str,
    ) -> Result<Option<RotaRecord>, PersistenceError> {
        queries::get_rota(&mut self.conn, channel_id, rota_name)
    }

    /// Lists the rota names of a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rota_names(&mut self, channel_id: &str) -> Result<Vec<String>, PersistenceError> {
        queries::list_rota_names(&mut self.conn, channel_id)
    }

    /// Returns every rota whose shift end is at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a matching row is corrupt.
    pub fn scan_expired_shifts(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<Vec<RotaRecord>, PersistenceError> {
        queries::scan_expired_shifts(&mut self.conn, now)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Upserts the configuration fields of a rota, leaving its shift alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_rota(
        &mut self,
        channel_id: &str,
        rota_name: &str,
        members: &[String],
        duration_weeks: u32,
    ) -> Result<(), PersistenceError> {
        mutations::put_rota(
            &mut self.conn,
            channel_id,
            rota_name,
            members,
            duration_weeks,
        )
    }

    /// Overwrites the shift fields of a rota. `None` clears them.
    ///
    /// # Errors
    ///
    /// Returns an error if the rota does not exist or the write fails.
    pub fn update_shift(
        &mut self,
        channel_id: &str,
        rota_name: &str,
        shift: Option<&Shift>,
    ) -> Result<(), PersistenceError> {
        mutations::update_shift(&mut self.conn, channel_id, rota_name, shift)
    }

    /// Overwrites the shift fields only if the stored shift equals `expected`.
    ///
    /// Returns whether the write was applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn update_shift_if(
        &mut self,
        channel_id: &str,
        rota_name: &str,
        expected: Option<&Shift>,
        new_shift: Option<&Shift>,
    ) -> Result<bool, PersistenceError> {
        mutations::update_shift_if(&mut self.conn, channel_id, rota_name, expected, new_shift)
    }

    /// Deletes every rota. Test-only reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn delete_all_rotas(&mut self) -> Result<usize, PersistenceError> {
        mutations::delete_all_rotas(&mut self.conn)
    }
}
