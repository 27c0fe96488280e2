// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Blocker loads.

use diesel::prelude::*;
use diesel::SqliteConnection;
use blockout_domain::Blocker;

use crate::data_models::{BlockerRow, blocker_from_row};
use crate::diesel_schema::blockers;
use crate::error::PersistenceError;

type AllColumns = (
    blockers::blocker_id,
    blockers::org_id,
    blockers::kind,
    blockers::applicability,
    blockers::team_id,
    blockers::facility_id,
    blockers::name,
    blockers::description,
    blockers::start_instant,
    blockers::end_instant,
    blockers::created_at,
);

const ALL_COLUMNS: AllColumns = (
    blockers::blocker_id,
    blockers::org_id,
    blockers::kind,
    blockers::applicability,
    blockers::team_id,
    blockers::facility_id,
    blockers::name,
    blockers::description,
    blockers::start_instant,
    blockers::end_instant,
    blockers::created_at,
);

/// Loads one blocker.
///
/// # Errors
///
/// Returns `NotFound` if the blocker does not exist.
pub fn get_blocker(
    conn: &mut SqliteConnection,
    blocker_id: i64,
) -> Result<Blocker, PersistenceError> {
    let result = blockers::table
        .select(ALL_COLUMNS)
        .filter(blockers::blocker_id.eq(blocker_id))
        .first::<BlockerRow>(conn);

    match result {
        Ok(row) => blocker_from_row(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Blocker {blocker_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Loads every blocker in an organization, in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_blockers_for_org(
    conn: &mut SqliteConnection,
    org_id: i64,
) -> Result<Vec<Blocker>, PersistenceError> {
    let rows: Vec<BlockerRow> = blockers::table
        .select(ALL_COLUMNS)
        .filter(blockers::org_id.eq(org_id))
        .order(blockers::blocker_id.asc())
        .load::<BlockerRow>(conn)?;

    rows.into_iter().map(blocker_from_row).collect()
}
