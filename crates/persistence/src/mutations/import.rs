// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic bulk import transactions.
//!
//! The import pipeline hands this module fully prepared rows; everything
//! here happens inside one Diesel transaction so a failure on any row rolls
//! back every event and override written before it.

use blockout_domain::{EventKind, Game, Practice};
use blockout_ledger::{Actor, EventRef, OverrideRequest};
use chrono::{DateTime, Utc};
use diesel::Connection;
use diesel::SqliteConnection;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::{events, overrides};

/// One game ready to be written, with the conflicts being overridden.
///
/// `conflicting_blocker_ids` is empty when the row was clear or the caller
/// chose to override nothing; one ledger entry is written per id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameImport {
    /// The game to create.
    pub game: Game,
    /// Blockers whose conflicts are acknowledged for this row.
    pub conflicting_blocker_ids: Vec<i64>,
}

/// One practice ready to be written, with the conflicts being overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeImport {
    /// The practice to create.
    pub practice: Practice,
    /// Blockers whose conflicts are acknowledged for this row.
    pub conflicting_blocker_ids: Vec<i64>,
}

/// What an import transaction wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Ids of the created events, in row order.
    pub created_event_ids: Vec<i64>,
    /// How many override ledger entries were recorded.
    pub overrides_recorded: usize,
}

/// Writes a batch of games atomically.
///
/// Any failure (including a foreign key violation on a facility id) rolls
/// back the entire batch, leaving no partial events and no ledger entries.
///
/// # Errors
///
/// Returns the first row's error after rolling back.
pub fn execute_games_import(
    conn: &mut SqliteConnection,
    org_id: i64,
    rows: &[GameImport],
    actor: &Actor,
    override_reason: &str,
    recorded_at: DateTime<Utc>,
) -> Result<ImportOutcome, PersistenceError> {
    let outcome: ImportOutcome = conn.transaction::<ImportOutcome, PersistenceError, _>(|conn| {
        let mut created_event_ids: Vec<i64> = Vec::with_capacity(rows.len());
        let mut overrides_recorded: usize = 0;
        for row in rows {
            let game_id: i64 = events::insert_game(conn, &row.game)?;
            created_event_ids.push(game_id);
            overrides_recorded += record_row_overrides(
                conn,
                org_id,
                EventRef::new(EventKind::Game, game_id),
                &row.conflicting_blocker_ids,
                actor,
                override_reason,
                recorded_at,
            )?;
        }
        Ok(ImportOutcome {
            created_event_ids,
            overrides_recorded,
        })
    })?;
    info!(
        org_id,
        created = outcome.created_event_ids.len(),
        overrides = outcome.overrides_recorded,
        "Committed game import"
    );
    Ok(outcome)
}

/// Writes a batch of practices atomically.
///
/// # Errors
///
/// Returns the first row's error after rolling back.
pub fn execute_practices_import(
    conn: &mut SqliteConnection,
    org_id: i64,
    rows: &[PracticeImport],
    actor: &Actor,
    override_reason: &str,
    recorded_at: DateTime<Utc>,
) -> Result<ImportOutcome, PersistenceError> {
    let outcome: ImportOutcome = conn.transaction::<ImportOutcome, PersistenceError, _>(|conn| {
        let mut created_event_ids: Vec<i64> = Vec::with_capacity(rows.len());
        let mut overrides_recorded: usize = 0;
        for row in rows {
            let practice_id: i64 = events::insert_practice(conn, &row.practice)?;
            created_event_ids.push(practice_id);
            overrides_recorded += record_row_overrides(
                conn,
                org_id,
                EventRef::new(EventKind::Practice, practice_id),
                &row.conflicting_blocker_ids,
                actor,
                override_reason,
                recorded_at,
            )?;
        }
        Ok(ImportOutcome {
            created_event_ids,
            overrides_recorded,
        })
    })?;
    info!(
        org_id,
        created = outcome.created_event_ids.len(),
        overrides = outcome.overrides_recorded,
        "Committed practice import"
    );
    Ok(outcome)
}

fn record_row_overrides(
    conn: &mut SqliteConnection,
    org_id: i64,
    event: EventRef,
    blocker_ids: &[i64],
    actor: &Actor,
    reason: &str,
    recorded_at: DateTime<Utc>,
) -> Result<usize, PersistenceError> {
    for blocker_id in blocker_ids {
        let request: OverrideRequest =
            OverrideRequest::new(event, *blocker_id, Some(reason.to_string()));
        overrides::insert_override(conn, org_id, &request, actor, recorded_at)?;
    }
    Ok(blocker_ids.len())
}
