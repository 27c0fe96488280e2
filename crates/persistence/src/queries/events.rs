// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Game and practice loads.
//!
//! Summary queries load events already paired with the organization and team
//! resolved from their season, ready for the conflict engine.

use blockout::ScopedEvent;
use blockout_domain::{Event, Game, Practice};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::HashMap;

use crate::data_models::{GameRow, PracticeRow, game_from_row, practice_from_row, scoped};
use crate::diesel_schema::{games, practices, seasons};
use crate::error::PersistenceError;
use crate::queries::registry;

type GameColumns = (
    games::game_id,
    games::season_id,
    games::opponent,
    games::start_instant,
    games::duration_minutes,
    games::facility_id,
    games::home_away,
    games::notes,
);

const GAME_COLUMNS: GameColumns = (
    games::game_id,
    games::season_id,
    games::opponent,
    games::start_instant,
    games::duration_minutes,
    games::facility_id,
    games::home_away,
    games::notes,
);

type PracticeColumns = (
    practices::practice_id,
    practices::season_id,
    practices::start_instant,
    practices::duration_minutes,
    practices::facility_id,
    practices::notes,
);

const PRACTICE_COLUMNS: PracticeColumns = (
    practices::practice_id,
    practices::season_id,
    practices::start_instant,
    practices::duration_minutes,
    practices::facility_id,
    practices::notes,
);

/// Loads one game.
///
/// # Errors
///
/// Returns `NotFound` if the game does not exist.
pub fn get_game(conn: &mut SqliteConnection, game_id: i64) -> Result<Game, PersistenceError> {
    let result = games::table
        .select(GAME_COLUMNS)
        .filter(games::game_id.eq(game_id))
        .first::<GameRow>(conn);

    match result {
        Ok(row) => game_from_row(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Game {game_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Loads one practice.
///
/// # Errors
///
/// Returns `NotFound` if the practice does not exist.
pub fn get_practice(
    conn: &mut SqliteConnection,
    practice_id: i64,
) -> Result<Practice, PersistenceError> {
    let result = practices::table
        .select(PRACTICE_COLUMNS)
        .filter(practices::practice_id.eq(practice_id))
        .first::<PracticeRow>(conn);

    match result {
        Ok(row) => practice_from_row(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Practice {practice_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Loads a season's games in start order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_games_for_season(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<Game>, PersistenceError> {
    let rows: Vec<GameRow> = games::table
        .select(GAME_COLUMNS)
        .filter(games::season_id.eq(season_id))
        .order(games::start_instant.asc())
        .load::<GameRow>(conn)?;
    rows.into_iter().map(game_from_row).collect()
}

/// Loads a season's practices in start order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_practices_for_season(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<Practice>, PersistenceError> {
    let rows: Vec<PracticeRow> = practices::table
        .select(PRACTICE_COLUMNS)
        .filter(practices::season_id.eq(season_id))
        .order(practices::start_instant.asc())
        .load::<PracticeRow>(conn)?;
    rows.into_iter().map(practice_from_row).collect()
}

/// Loads every event in one season, paired with the season's resolved scope.
///
/// # Errors
///
/// Returns `NotFound` if the season does not exist.
pub fn list_season_events(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<ScopedEvent>, PersistenceError> {
    let (team_id, org_id) = registry::season_scope(conn, season_id)?;

    let mut events: Vec<ScopedEvent> = Vec::new();
    for game in list_games_for_season(conn, season_id)? {
        events.push(scoped(Event::Game(game), org_id, team_id));
    }
    for practice in list_practices_for_season(conn, season_id)? {
        events.push(scoped(Event::Practice(practice), org_id, team_id));
    }
    Ok(events)
}

/// Loads every event in an organization, paired with its resolved scope.
///
/// # Errors
///
/// Returns an error if any query fails or a stored row is corrupt.
pub fn list_org_events(
    conn: &mut SqliteConnection,
    org_id: i64,
) -> Result<Vec<ScopedEvent>, PersistenceError> {
    let team_ids: Vec<i64> = registry::list_team_ids(conn, org_id)?;
    let season_rows: Vec<(i64, i64)> = seasons::table
        .select((seasons::season_id, seasons::team_id))
        .filter(seasons::team_id.eq_any(&team_ids))
        .load::<(i64, i64)>(conn)?;

    let season_teams: HashMap<i64, i64> = season_rows.into_iter().collect();
    let season_ids: Vec<i64> = season_teams.keys().copied().collect();

    let game_rows: Vec<GameRow> = games::table
        .select(GAME_COLUMNS)
        .filter(games::season_id.eq_any(&season_ids))
        .order(games::game_id.asc())
        .load::<GameRow>(conn)?;
    let practice_rows: Vec<PracticeRow> = practices::table
        .select(PRACTICE_COLUMNS)
        .filter(practices::season_id.eq_any(&season_ids))
        .order(practices::practice_id.asc())
        .load::<PracticeRow>(conn)?;

    let mut events: Vec<ScopedEvent> = Vec::new();
    for row in game_rows {
        let game: Game = game_from_row(row)?;
        let team_id: i64 = *season_teams.get(&game.season_id).ok_or_else(|| {
            PersistenceError::CorruptRow {
                table: String::from("games"),
                detail: format!("season {} missing from scope map", game.season_id),
            }
        })?;
        events.push(scoped(Event::Game(game), org_id, team_id));
    }
    for row in practice_rows {
        let practice: Practice = practice_from_row(row)?;
        let team_id: i64 = *season_teams.get(&practice.season_id).ok_or_else(|| {
            PersistenceError::CorruptRow {
                table: String::from("practices"),
                detail: format!("season {} missing from scope map", practice.season_id),
            }
        })?;
        events.push(scoped(Event::Practice(practice), org_id, team_id));
    }
    Ok(events)
}
