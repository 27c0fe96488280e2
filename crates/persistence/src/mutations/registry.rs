// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organization, team, facility, and season creation.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{facilities, organizations, seasons, teams};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates an organization and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_organization(
    conn: &mut SqliteConnection,
    name: &str,
    timezone: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(organizations::table)
        .values((
            organizations::name.eq(name),
            organizations::timezone.eq(timezone),
        ))
        .execute(conn)?;
    let org_id: i64 = get_last_insert_rowid(conn)?;
    debug!(org_id, name, "Created organization");
    Ok(org_id)
}

/// Creates a team and returns its id.
///
/// # Errors
///
/// Returns an error if the organization does not exist or the insert fails.
pub fn create_team(
    conn: &mut SqliteConnection,
    org_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table)
        .values((teams::org_id.eq(org_id), teams::name.eq(name)))
        .execute(conn)?;
    let team_id: i64 = get_last_insert_rowid(conn)?;
    debug!(team_id, org_id, name, "Created team");
    Ok(team_id)
}

/// Creates a facility and returns its id.
///
/// Facility ids are monotonically increasing, so id order doubles as
/// registration order for the fuzzy resolver's tie-break.
///
/// # Errors
///
/// Returns an error if the organization does not exist or the insert fails.
pub fn create_facility(
    conn: &mut SqliteConnection,
    org_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(facilities::table)
        .values((facilities::org_id.eq(org_id), facilities::name.eq(name)))
        .execute(conn)?;
    let facility_id: i64 = get_last_insert_rowid(conn)?;
    debug!(facility_id, org_id, name, "Created facility");
    Ok(facility_id)
}

/// Creates a season and returns its id.
///
/// # Errors
///
/// Returns an error if the team does not exist or the insert fails.
pub fn create_season(
    conn: &mut SqliteConnection,
    team_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(seasons::table)
        .values((seasons::team_id.eq(team_id), seasons::name.eq(name)))
        .execute(conn)?;
    let season_id: i64 = get_last_insert_rowid(conn)?;
    debug!(season_id, team_id, name, "Created season");
    Ok(season_id)
}
