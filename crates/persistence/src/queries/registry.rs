// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organization, team, facility, and season lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use blockout_domain::Facility;

use crate::data_models::OrganizationRecord;
use crate::diesel_schema::{facilities, organizations, seasons, teams};
use crate::error::PersistenceError;

/// Loads one organization.
///
/// # Errors
///
/// Returns `NotFound` if the organization does not exist.
pub fn get_organization(
    conn: &mut SqliteConnection,
    org_id: i64,
) -> Result<OrganizationRecord, PersistenceError> {
    let result = organizations::table
        .select((
            organizations::org_id,
            organizations::name,
            organizations::timezone,
        ))
        .filter(organizations::org_id.eq(org_id))
        .first::<(i64, String, String)>(conn);

    match result {
        Ok((org_id, name, timezone)) => Ok(OrganizationRecord {
            org_id,
            name,
            timezone,
        }),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Organization {org_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Looks up the organization a team belongs to.
///
/// # Errors
///
/// Returns `NotFound` if the team does not exist.
pub fn team_org(conn: &mut SqliteConnection, team_id: i64) -> Result<i64, PersistenceError> {
    let result = teams::table
        .select(teams::org_id)
        .filter(teams::team_id.eq(team_id))
        .first::<i64>(conn);

    match result {
        Ok(org_id) => Ok(org_id),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Team {team_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Resolves a season to its `(team_id, org_id)` pair.
///
/// # Errors
///
/// Returns `NotFound` if the season or its team does not exist.
pub fn season_scope(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<(i64, i64), PersistenceError> {
    let result = seasons::table
        .select(seasons::team_id)
        .filter(seasons::season_id.eq(season_id))
        .first::<i64>(conn);

    let team_id: i64 = match result {
        Ok(team_id) => team_id,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Season {season_id} does not exist"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let org_id: i64 = team_org(conn, team_id)?;
    Ok((team_id, org_id))
}

/// Lists every team id in an organization.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_team_ids(
    conn: &mut SqliteConnection,
    org_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(teams::table
        .select(teams::team_id)
        .filter(teams::org_id.eq(org_id))
        .order(teams::team_id.asc())
        .load::<i64>(conn)?)
}

/// Lists an organization's facility registry in registration order.
///
/// Registration order is the fuzzy resolver's tie-break, so the ordering
/// here is load-bearing.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_facilities(
    conn: &mut SqliteConnection,
    org_id: i64,
) -> Result<Vec<Facility>, PersistenceError> {
    let rows: Vec<(i64, String)> = facilities::table
        .select((facilities::facility_id, facilities::name))
        .filter(facilities::org_id.eq(org_id))
        .order(facilities::facility_id.asc())
        .load::<(i64, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(facility_id, name)| Facility::new(facility_id, name))
        .collect())
}

/// Looks up the organization a facility belongs to.
///
/// # Errors
///
/// Returns `NotFound` if the facility does not exist.
pub fn facility_org(
    conn: &mut SqliteConnection,
    facility_id: i64,
) -> Result<i64, PersistenceError> {
    let result = facilities::table
        .select(facilities::org_id)
        .filter(facilities::facility_id.eq(facility_id))
        .first::<i64>(conn);

    match result {
        Ok(org_id) => Ok(org_id),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Facility {facility_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
