// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Blocker insert, full-replace update, and hard delete.

use blockout_domain::Blocker;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::format_instant;
use crate::diesel_schema::blockers;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new blocker and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_blocker(
    conn: &mut SqliteConnection,
    blocker: &Blocker,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(blockers::table)
        .values((
            blockers::org_id.eq(blocker.org_id()),
            blockers::kind.eq(blocker.kind().as_str()),
            blockers::applicability.eq(blocker.applicability().as_str()),
            blockers::team_id.eq(blocker.scope().team_id()),
            blockers::facility_id.eq(blocker.scope().facility_id()),
            blockers::name.eq(blocker.name()),
            blockers::description.eq(blocker.description()),
            blockers::start_instant.eq(format_instant(blocker.window().start())),
            blockers::end_instant.eq(format_instant(blocker.window().end())),
            blockers::created_at.eq(format_instant(blocker.created_at())),
        ))
        .execute(conn)?;
    let blocker_id: i64 = get_last_insert_rowid(conn)?;
    debug!(blocker_id, org_id = blocker.org_id(), "Inserted blocker");
    Ok(blocker_id)
}

/// Replaces a stored blocker with new values.
///
/// The scope columns are re-derived in full from the blocker's scope, so a
/// scope change from TEAM to FACILITY nulls the stale team id in the same
/// statement that sets the facility id.
///
/// # Errors
///
/// Returns `NotFound` if the blocker does not exist.
pub fn update_blocker(
    conn: &mut SqliteConnection,
    blocker: &Blocker,
) -> Result<(), PersistenceError> {
    let blocker_id: i64 = blocker
        .id()
        .ok_or_else(|| PersistenceError::Other(String::from("Blocker has no id")))?;

    let updated: usize = diesel::update(blockers::table)
        .filter(blockers::blocker_id.eq(blocker_id))
        .filter(blockers::org_id.eq(blocker.org_id()))
        .set((
            blockers::kind.eq(blocker.kind().as_str()),
            blockers::applicability.eq(blocker.applicability().as_str()),
            blockers::team_id.eq(blocker.scope().team_id()),
            blockers::facility_id.eq(blocker.scope().facility_id()),
            blockers::name.eq(blocker.name()),
            blockers::description.eq(blocker.description()),
            blockers::start_instant.eq(format_instant(blocker.window().start())),
            blockers::end_instant.eq(format_instant(blocker.window().end())),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Blocker {blocker_id} does not exist"
        )));
    }
    debug!(blocker_id, "Updated blocker");
    Ok(())
}

/// Hard-deletes a blocker.
///
/// Override ledger entries that reference it are left in place; derived
/// conflicts disappear on the next query.
///
/// # Errors
///
/// Returns `NotFound` if the blocker does not exist.
pub fn delete_blocker(
    conn: &mut SqliteConnection,
    blocker_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(blockers::table)
        .filter(blockers::blocker_id.eq(blocker_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Blocker {blocker_id} does not exist"
        )));
    }
    debug!(blocker_id, "Deleted blocker");
    Ok(())
}
