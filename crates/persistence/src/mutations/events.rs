// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Game and practice insert, update, and delete.

use blockout_domain::{Game, Practice};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::format_instant;
use crate::diesel_schema::{games, practices};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

fn duration_column(duration_minutes: Option<u32>) -> Result<Option<i32>, PersistenceError> {
    duration_minutes
        .map(|minutes| {
            i32::try_from(minutes)
                .map_err(|_| PersistenceError::Other(format!("Duration out of range: {minutes}")))
        })
        .transpose()
}

/// Inserts a new game and returns its id.
///
/// # Errors
///
/// Returns an error if the season or facility does not exist or the insert
/// fails.
pub fn insert_game(conn: &mut SqliteConnection, game: &Game) -> Result<i64, PersistenceError> {
    diesel::insert_into(games::table)
        .values((
            games::season_id.eq(game.season_id),
            games::opponent.eq(&game.opponent),
            games::start_instant.eq(format_instant(game.start_instant)),
            games::duration_minutes.eq(duration_column(game.duration_minutes)?),
            games::facility_id.eq(game.facility_id),
            games::home_away.eq(game.home_away.as_str()),
            games::notes.eq(game.notes.as_deref()),
        ))
        .execute(conn)?;
    let game_id: i64 = get_last_insert_rowid(conn)?;
    debug!(game_id, season_id = game.season_id, "Inserted game");
    Ok(game_id)
}

/// Replaces a stored game with new values.
///
/// # Errors
///
/// Returns `NotFound` if the game does not exist.
pub fn update_game(conn: &mut SqliteConnection, game: &Game) -> Result<(), PersistenceError> {
    let game_id: i64 = game
        .game_id
        .ok_or_else(|| PersistenceError::Other(String::from("Game has no id")))?;

    let updated: usize = diesel::update(games::table)
        .filter(games::game_id.eq(game_id))
        .set((
            games::opponent.eq(&game.opponent),
            games::start_instant.eq(format_instant(game.start_instant)),
            games::duration_minutes.eq(duration_column(game.duration_minutes)?),
            games::facility_id.eq(game.facility_id),
            games::home_away.eq(game.home_away.as_str()),
            games::notes.eq(game.notes.as_deref()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Game {game_id} does not exist"
        )));
    }
    debug!(game_id, "Updated game");
    Ok(())
}

/// Hard-deletes a game.
///
/// # Errors
///
/// Returns `NotFound` if the game does not exist.
pub fn delete_game(conn: &mut SqliteConnection, game_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(games::table)
        .filter(games::game_id.eq(game_id))
        .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Game {game_id} does not exist"
        )));
    }
    debug!(game_id, "Deleted game");
    Ok(())
}

/// Inserts a new practice and returns its id.
///
/// # Errors
///
/// Returns an error if the season or facility does not exist or the insert
/// fails.
pub fn insert_practice(
    conn: &mut SqliteConnection,
    practice: &Practice,
) -> Result<i64, PersistenceError> {
    let duration: i32 = i32::try_from(practice.duration_minutes).map_err(|_| {
        PersistenceError::Other(format!(
            "Duration out of range: {}",
            practice.duration_minutes
        ))
    })?;
    diesel::insert_into(practices::table)
        .values((
            practices::season_id.eq(practice.season_id),
            practices::start_instant.eq(format_instant(practice.start_instant)),
            practices::duration_minutes.eq(duration),
            practices::facility_id.eq(practice.facility_id),
            practices::notes.eq(practice.notes.as_deref()),
        ))
        .execute(conn)?;
    let practice_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        practice_id,
        season_id = practice.season_id,
        "Inserted practice"
    );
    Ok(practice_id)
}

/// Replaces a stored practice with new values.
///
/// # Errors
///
/// Returns `NotFound` if the practice does not exist.
pub fn update_practice(
    conn: &mut SqliteConnection,
    practice: &Practice,
) -> Result<(), PersistenceError> {
    let practice_id: i64 = practice
        .practice_id
        .ok_or_else(|| PersistenceError::Other(String::from("Practice has no id")))?;
    let duration: i32 = i32::try_from(practice.duration_minutes).map_err(|_| {
        PersistenceError::Other(format!(
            "Duration out of range: {}",
            practice.duration_minutes
        ))
    })?;

    let updated: usize = diesel::update(practices::table)
        .filter(practices::practice_id.eq(practice_id))
        .set((
            practices::start_instant.eq(format_instant(practice.start_instant)),
            practices::duration_minutes.eq(duration),
            practices::facility_id.eq(practice.facility_id),
            practices::notes.eq(practice.notes.as_deref()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Practice {practice_id} does not exist"
        )));
    }
    debug!(practice_id, "Updated practice");
    Ok(())
}

/// Hard-deletes a practice.
///
/// # Errors
///
/// Returns `NotFound` if the practice does not exist.
pub fn delete_practice(
    conn: &mut SqliteConnection,
    practice_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(practices::table)
        .filter(practices::practice_id.eq(practice_id))
        .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Practice {practice_id} does not exist"
        )));
    }
    debug!(practice_id, "Deleted practice");
    Ok(())
}
