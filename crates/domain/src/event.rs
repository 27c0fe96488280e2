// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Games and practices, unified behind one [`Event`] abstraction.
//!
//! Games and practices are structurally similar but separately stored. The
//! conflict engine never cares which is which beyond the discriminant, so
//! both are carried as one tagged union with shared accessors for the fields
//! the matcher reads.

use crate::error::DomainError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Assumed game length when no explicit duration is recorded.
pub const GAME_DEFAULT_DURATION_MINUTES: u32 = 120;

/// Default practice length applied by the import pipeline when a row omits
/// the duration column.
pub const PRACTICE_DEFAULT_DURATION_MINUTES: u32 = 90;

/// Discriminant for the two concrete event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A game against an opponent.
    Game,
    /// A team practice.
    Practice,
}

impl EventKind {
    /// Converts this kind to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "GAME",
            Self::Practice => "PRACTICE",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GAME" => Ok(Self::Game),
            "PRACTICE" => Ok(Self::Practice),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a game is played at home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeAway {
    /// Home game.
    Home,
    /// Away game.
    Away,
}

impl HomeAway {
    /// Converts this value to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Away => "AWAY",
        }
    }
}

impl FromStr for HomeAway {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOME" | "H" => Ok(Self::Home),
            "AWAY" | "A" => Ok(Self::Away),
            _ => Err(DomainError::InvalidHomeAway(s.to_string())),
        }
    }
}

/// A scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// The canonical numeric identifier; `None` until persisted.
    pub game_id: Option<i64>,
    /// The owning season.
    pub season_id: i64,
    /// The opposing team's name.
    pub opponent: String,
    /// The absolute start instant.
    pub start_instant: DateTime<Utc>,
    /// Explicit duration, if recorded. Absent means the 120-minute default.
    pub duration_minutes: Option<u32>,
    /// The facility, if assigned.
    pub facility_id: Option<i64>,
    /// Home or away.
    pub home_away: HomeAway,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A scheduled practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practice {
    /// The canonical numeric identifier; `None` until persisted.
    pub practice_id: Option<i64>,
    /// The owning season.
    pub season_id: i64,
    /// The absolute start instant.
    pub start_instant: DateTime<Utc>,
    /// Explicit duration in minutes (always recorded for practices).
    pub duration_minutes: u32,
    /// The facility, if assigned.
    pub facility_id: Option<i64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A game or practice, viewed uniformly for conflict purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A game.
    Game(Game),
    /// A practice.
    Practice(Practice),
}

impl Event {
    /// Returns the discriminant for this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Game(_) => EventKind::Game,
            Self::Practice(_) => EventKind::Practice,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Game(game) => game.game_id,
            Self::Practice(practice) => practice.practice_id,
        }
    }

    /// Returns the owning season id.
    #[must_use]
    pub const fn season_id(&self) -> i64 {
        match self {
            Self::Game(game) => game.season_id,
            Self::Practice(practice) => practice.season_id,
        }
    }

    /// Returns the absolute start instant.
    #[must_use]
    pub const fn start_instant(&self) -> DateTime<Utc> {
        match self {
            Self::Game(game) => game.start_instant,
            Self::Practice(practice) => practice.start_instant,
        }
    }

    /// Returns the effective duration in minutes.
    ///
    /// Games with no recorded duration use the fixed 120-minute default.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        match self {
            Self::Game(game) => match game.duration_minutes {
                Some(minutes) => minutes,
                None => GAME_DEFAULT_DURATION_MINUTES,
            },
            Self::Practice(practice) => practice.duration_minutes,
        }
    }

    /// Returns the exclusive end instant (`start + duration`).
    #[must_use]
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.start_instant() + Duration::minutes(i64::from(self.duration_minutes()))
    }

    /// Returns the facility id, if assigned.
    #[must_use]
    pub const fn facility_id(&self) -> Option<i64> {
        match self {
            Self::Game(game) => game.facility_id,
            Self::Practice(practice) => practice.facility_id,
        }
    }

    /// Builds the matcher input for this event within its resolved scope.
    ///
    /// The caller supplies the team and organization derived from the
    /// event's season; the event itself only knows its season id.
    #[must_use]
    pub const fn context(&self, org_id: i64, team_id: i64) -> EventContext {
        EventContext {
            org_id,
            team_id,
            start: self.start_instant(),
            duration_minutes: self.duration_minutes(),
            facility_id: self.facility_id(),
        }
    }
}

/// The slice of an event the matcher reads, plus its resolved scope.
///
/// Built either from a persisted [`Event`] or from a prospective import row
/// that has not been written yet; the matcher cannot tell the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    /// The organization the event belongs to (via season and team).
    pub org_id: i64,
    /// The team the event belongs to (via season).
    pub team_id: i64,
    /// The absolute start instant.
    pub start: DateTime<Utc>,
    /// The effective duration in minutes.
    pub duration_minutes: u32,
    /// The facility, if assigned.
    pub facility_id: Option<i64>,
}

impl EventContext {
    /// Returns the exclusive end instant (`start + duration`).
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }
}
