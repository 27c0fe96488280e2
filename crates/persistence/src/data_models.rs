// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and row-to-domain conversions.
//!
//! Instants are stored as RFC 3339 text in UTC. All conversions back into
//! domain values go through this module so a malformed row surfaces as a
//! `CorruptRow` error instead of a panic.

use crate::error::PersistenceError;
use blockout_domain::{
    Applicability, Blocker, BlockerKind, Event, Game, HomeAway, Practice, Scope, TimeWindow,
};
use blockout_ledger::{Actor, EventRef, Override};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// An organization as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRecord {
    pub org_id: i64,
    pub name: String,
    /// IANA timezone name used to localize import rows.
    pub timezone: String,
}

/// Blocker row: `(blocker_id, org_id, kind, applicability, team_id,
/// facility_id, name, description, start_instant, end_instant, created_at)`.
pub type BlockerRow = (
    i64,
    i64,
    String,
    String,
    Option<i64>,
    Option<i64>,
    String,
    Option<String>,
    String,
    String,
    String,
);

/// Game row: `(game_id, season_id, opponent, start_instant, duration_minutes,
/// facility_id, home_away, notes)`.
pub type GameRow = (
    i64,
    i64,
    String,
    String,
    Option<i32>,
    Option<i64>,
    String,
    Option<String>,
);

/// Practice row: `(practice_id, season_id, start_instant, duration_minutes,
/// facility_id, notes)`.
pub type PracticeRow = (i64, i64, String, i32, Option<i64>, Option<String>);

/// Override row: `(override_id, org_id, event_type, event_id, blocker_id,
/// actor_id, actor_type, reason, recorded_at)`.
pub type OverrideRow = (
    i64,
    i64,
    String,
    i64,
    i64,
    String,
    String,
    Option<String>,
    String,
);

/// Formats an instant for storage.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339()
}

/// Parses a stored instant.
///
/// # Errors
///
/// Returns a `CorruptRow` error if the text is not valid RFC 3339.
pub fn parse_instant(table: &str, value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| PersistenceError::CorruptRow {
            table: table.to_string(),
            detail: format!("bad instant '{value}': {e}"),
        })
}

fn corrupt(table: &str, detail: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::CorruptRow {
        table: table.to_string(),
        detail: detail.to_string(),
    }
}

/// Converts a stored blocker row back into a domain `Blocker`.
///
/// # Errors
///
/// Returns a `CorruptRow` error if any stored field fails domain validation.
pub fn blocker_from_row(row: BlockerRow) -> Result<Blocker, PersistenceError> {
    let (
        blocker_id,
        org_id,
        kind,
        applicability,
        team_id,
        facility_id,
        name,
        description,
        start_instant,
        end_instant,
        created_at,
    ) = row;

    let kind: BlockerKind = BlockerKind::from_str(&kind).map_err(|e| corrupt("blockers", e))?;
    let applicability: Applicability =
        Applicability::from_str(&applicability).map_err(|e| corrupt("blockers", e))?;
    let scope: Scope = Scope::from_parts(applicability, team_id, facility_id)
        .map_err(|e| corrupt("blockers", e))?;
    let window: TimeWindow = TimeWindow::new(
        parse_instant("blockers", &start_instant)?,
        parse_instant("blockers", &end_instant)?,
    )
    .map_err(|e| corrupt("blockers", e))?;
    let created_at: DateTime<Utc> = parse_instant("blockers", &created_at)?;

    Blocker::with_id(
        blocker_id,
        org_id,
        kind,
        scope,
        &name,
        description,
        window,
        created_at,
    )
    .map_err(|e| corrupt("blockers", e))
}

/// Converts a stored game row back into a domain `Game`.
///
/// # Errors
///
/// Returns a `CorruptRow` error if any stored field fails domain validation.
pub fn game_from_row(row: GameRow) -> Result<Game, PersistenceError> {
    let (game_id, season_id, opponent, start_instant, duration_minutes, facility_id, home_away, notes) =
        row;
    let duration_minutes: Option<u32> = duration_minutes
        .map(|minutes| {
            u32::try_from(minutes).map_err(|_| corrupt("games", format!("bad duration {minutes}")))
        })
        .transpose()?;
    Ok(Game {
        game_id: Some(game_id),
        season_id,
        opponent,
        start_instant: parse_instant("games", &start_instant)?,
        duration_minutes,
        facility_id,
        home_away: HomeAway::from_str(&home_away).map_err(|e| corrupt("games", e))?,
        notes,
    })
}

/// Converts a stored practice row back into a domain `Practice`.
///
/// # Errors
///
/// Returns a `CorruptRow` error if any stored field fails domain validation.
pub fn practice_from_row(row: PracticeRow) -> Result<Practice, PersistenceError> {
    let (practice_id, season_id, start_instant, duration_minutes, facility_id, notes) = row;
    let duration_minutes: u32 = u32::try_from(duration_minutes)
        .map_err(|_| corrupt("practices", format!("bad duration {duration_minutes}")))?;
    Ok(Practice {
        practice_id: Some(practice_id),
        season_id,
        start_instant: parse_instant("practices", &start_instant)?,
        duration_minutes,
        facility_id,
        notes,
    })
}

/// Converts a stored override row back into a ledger `Override`.
///
/// # Errors
///
/// Returns a `CorruptRow` error if any stored field fails validation.
pub fn override_from_row(row: OverrideRow) -> Result<Override, PersistenceError> {
    let (override_id, org_id, event_type, event_id, blocker_id, actor_id, actor_type, reason, recorded_at) =
        row;
    let kind = blockout_domain::EventKind::from_str(&event_type)
        .map_err(|e| corrupt("overrides", e))?;
    Ok(Override::new(
        override_id,
        org_id,
        EventRef::new(kind, event_id),
        blocker_id,
        Actor::new(actor_id, actor_type),
        reason,
        parse_instant("overrides", &recorded_at)?,
    ))
}

/// Pairs an event with the scope resolved from its season.
#[must_use]
pub const fn scoped(event: Event, org_id: i64, team_id: i64) -> blockout::ScopedEvent {
    blockout::ScopedEvent {
        event,
        org_id,
        team_id,
    }
}
