// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Blockout conflict engine.
//!
//! This crate provides `SQLite` persistence for the scheduling registry
//! (organizations, teams, facilities, seasons), events, blockers, and the
//! override ledger. It is built on Diesel with embedded migrations.
//!
//! `SQLite` is the only backend: in-memory databases back the unit and
//! integration tests, file-based databases (with WAL enabled) back real
//! deployments. Conflict detection itself never lives here; this crate
//! loads state and the `blockout` crate computes over it.

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

use blockout::ScopedEvent;
use blockout_domain::{Blocker, EventKind, Facility, Game, Practice};
use blockout_ledger::{Actor, Override, OverrideRequest};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::OrganizationRecord;
pub use error::PersistenceError;
pub use mutations::{GameImport, ImportOutcome, PracticeImport};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the scheduling registry, blockers, events, and
/// the override ledger.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

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

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_organization(
        &mut self,
        name: &str,
        timezone: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::registry::create_organization(&mut self.conn, name, timezone)
    }

    /// Loads one organization.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the organization does not exist.
    pub fn get_organization(
        &mut self,
        org_id: i64,
    ) -> Result<OrganizationRecord, PersistenceError> {
        queries::registry::get_organization(&mut self.conn, org_id)
    }

    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization does not exist.
    pub fn create_team(&mut self, org_id: i64, name: &str) -> Result<i64, PersistenceError> {
        mutations::registry::create_team(&mut self.conn, org_id, name)
    }

    /// Looks up the organization a team belongs to.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn team_org(&mut self, team_id: i64) -> Result<i64, PersistenceError> {
        queries::registry::team_org(&mut self.conn, team_id)
    }

    /// Creates a facility.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization does not exist.
    pub fn create_facility(&mut self, org_id: i64, name: &str) -> Result<i64, PersistenceError> {
        mutations::registry::create_facility(&mut self.conn, org_id, name)
    }

    /// Looks up the organization a facility belongs to.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the facility does not exist.
    pub fn facility_org(&mut self, facility_id: i64) -> Result<i64, PersistenceError> {
        queries::registry::facility_org(&mut self.conn, facility_id)
    }

    /// Lists an organization's facility registry in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_facilities(&mut self, org_id: i64) -> Result<Vec<Facility>, PersistenceError> {
        queries::registry::list_facilities(&mut self.conn, org_id)
    }

    /// Creates a season.
    ///
    /// # Errors
    ///
    /// Returns an error if the team does not exist.
    pub fn create_season(&mut self, team_id: i64, name: &str) -> Result<i64, PersistenceError> {
        mutations::registry::create_season(&mut self.conn, team_id, name)
    }

    /// Resolves a season to its `(team_id, org_id)` pair.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist.
    pub fn season_scope(&mut self, season_id: i64) -> Result<(i64, i64), PersistenceError> {
        queries::registry::season_scope(&mut self.conn, season_id)
    }

    // ========================================================================
    // Blockers
    // ========================================================================

    /// Inserts a new blocker and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_blocker(&mut self, blocker: &Blocker) -> Result<i64, PersistenceError> {
        mutations::blockers::insert_blocker(&mut self.conn, blocker)
    }

    /// Replaces a stored blocker with new values.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the blocker does not exist.
    pub fn update_blocker(&mut self, blocker: &Blocker) -> Result<(), PersistenceError> {
        mutations::blockers::update_blocker(&mut self.conn, blocker)
    }

    /// Hard-deletes a blocker.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the blocker does not exist.
    pub fn delete_blocker(&mut self, blocker_id: i64) -> Result<(), PersistenceError> {
        mutations::blockers::delete_blocker(&mut self.conn, blocker_id)
    }

    /// Loads one blocker.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the blocker does not exist.
    pub fn get_blocker(&mut self, blocker_id: i64) -> Result<Blocker, PersistenceError> {
        queries::blockers::get_blocker(&mut self.conn, blocker_id)
    }

    /// Loads every blocker in an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_blockers_for_org(&mut self, org_id: i64) -> Result<Vec<Blocker>, PersistenceError> {
        queries::blockers::list_blockers_for_org(&mut self.conn, org_id)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Inserts a new game and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_game(&mut self, game: &Game) -> Result<i64, PersistenceError> {
        mutations::events::insert_game(&mut self.conn, game)
    }

    /// Replaces a stored game with new values.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the game does not exist.
    pub fn update_game(&mut self, game: &Game) -> Result<(), PersistenceError> {
        mutations::events::update_game(&mut self.conn, game)
    }

    /// Hard-deletes a game.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the game does not exist.
    pub fn delete_game(&mut self, game_id: i64) -> Result<(), PersistenceError> {
        mutations::events::delete_game(&mut self.conn, game_id)
    }

    /// Loads one game.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the game does not exist.
    pub fn get_game(&mut self, game_id: i64) -> Result<Game, PersistenceError> {
        queries::events::get_game(&mut self.conn, game_id)
    }

    /// Inserts a new practice and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_practice(&mut self, practice: &Practice) -> Result<i64, PersistenceError> {
        mutations::events::insert_practice(&mut self.conn, practice)
    }

    /// Replaces a stored practice with new values.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the practice does not exist.
    pub fn update_practice(&mut self, practice: &Practice) -> Result<(), PersistenceError> {
        mutations::events::update_practice(&mut self.conn, practice)
    }

    /// Hard-deletes a practice.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the practice does not exist.
    pub fn delete_practice(&mut self, practice_id: i64) -> Result<(), PersistenceError> {
        mutations::events::delete_practice(&mut self.conn, practice_id)
    }

    /// Loads one practice.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the practice does not exist.
    pub fn get_practice(&mut self, practice_id: i64) -> Result<Practice, PersistenceError> {
        queries::events::get_practice(&mut self.conn, practice_id)
    }

    /// Loads a season's games in start order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_games_for_season(&mut self, season_id: i64) -> Result<Vec<Game>, PersistenceError> {
        queries::events::list_games_for_season(&mut self.conn, season_id)
    }

    /// Loads a season's practices in start order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_practices_for_season(
        &mut self,
        season_id: i64,
    ) -> Result<Vec<Practice>, PersistenceError> {
        queries::events::list_practices_for_season(&mut self.conn, season_id)
    }

    /// Loads every event in one season, paired with its resolved scope.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist.
    pub fn list_season_events(
        &mut self,
        season_id: i64,
    ) -> Result<Vec<ScopedEvent>, PersistenceError> {
        queries::events::list_season_events(&mut self.conn, season_id)
    }

    /// Loads every event in an organization, paired with its resolved scope.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn list_org_events(&mut self, org_id: i64) -> Result<Vec<ScopedEvent>, PersistenceError> {
        queries::events::list_org_events(&mut self.conn, org_id)
    }

    // ========================================================================
    // Override ledger
    // ========================================================================

    /// Appends one override entry and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_override(
        &mut self,
        org_id: i64,
        request: &OverrideRequest,
        actor: &Actor,
        recorded_at: DateTime<Utc>,
    ) -> Result<i64, PersistenceError> {
        mutations::overrides::insert_override(&mut self.conn, org_id, request, actor, recorded_at)
    }

    /// Lists every override recorded for one event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_overrides_for_event(
        &mut self,
        event_type: EventKind,
        event_id: i64,
    ) -> Result<Vec<Override>, PersistenceError> {
        queries::overrides::list_overrides_for_event(&mut self.conn, event_type, event_id)
    }

    // ========================================================================
    // Import
    // ========================================================================

    /// Writes a batch of games atomically, recording one override per
    /// acknowledged conflict.
    ///
    /// # Errors
    ///
    /// Returns the first row's error after rolling back the whole batch.
    pub fn execute_games_import(
        &mut self,
        org_id: i64,
        rows: &[GameImport],
        actor: &Actor,
        override_reason: &str,
        recorded_at: DateTime<Utc>,
    ) -> Result<ImportOutcome, PersistenceError> {
        mutations::import::execute_games_import(
            &mut self.conn,
            org_id,
            rows,
            actor,
            override_reason,
            recorded_at,
        )
    }

    /// Writes a batch of practices atomically, recording one override per
    /// acknowledged conflict.
    ///
    /// # Errors
    ///
    /// Returns the first row's error after rolling back the whole batch.
    pub fn execute_practices_import(
        &mut self,
        org_id: i64,
        rows: &[PracticeImport],
        actor: &Actor,
        override_reason: &str,
        recorded_at: DateTime<Utc>,
    ) -> Result<ImportOutcome, PersistenceError> {
        mutations::import::execute_practices_import(
            &mut self.conn,
            org_id,
            rows,
            actor,
            override_reason,
            recorded_at,
        )
    }
}
