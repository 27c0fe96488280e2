// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response payloads for the API surface.
//!
//! Requests carry raw caller input (kinds and applicabilities as strings)
//! and are validated by the handlers; responses carry domain types and
//! serialize directly.

use blockout::ConflictCheck;
use blockout_domain::Blocker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to create or replace a blocker.
///
/// `kind` and `applicability` arrive as their storage strings (`EXAM`,
/// `ORG_WIDE`, ...); the handler parses and rejects unknown values. The
/// scope id fields must agree with the applicability: `TEAM` requires
/// `team_id`, `FACILITY` requires `facility_id`, `ORG_WIDE` requires
/// neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerRequest {
    /// The blocker kind, e.g. `EXAM`.
    pub kind: String,
    /// The applicability, e.g. `ORG_WIDE`.
    pub applicability: String,
    /// The team for a `TEAM` applicability.
    pub team_id: Option<i64>,
    /// The facility for a `FACILITY` applicability.
    pub facility_id: Option<i64>,
    /// The blocker name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Inclusive start of the blocked window.
    pub start_instant: DateTime<Utc>,
    /// Exclusive end of the blocked window.
    pub end_instant: DateTime<Utc>,
}

/// How many existing events a blocker conflicts with, by event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedCounts {
    /// Affected games.
    pub games: usize,
    /// Affected practices.
    pub practices: usize,
    /// Total affected events.
    pub total: usize,
}

/// The response to a blocker create or update.
///
/// Carries the stored blocker plus the impact it has on the schedule as it
/// exists right now, so the caller can warn about retroactive conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockerResponse {
    /// The blocker as stored.
    pub blocker: Blocker,
    /// How many existing events now conflict with it.
    pub affected: AffectedCounts,
}

/// A request to create or replace a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRequest {
    /// The owning season.
    pub season_id: i64,
    /// The opposing team's name.
    pub opponent: String,
    /// The absolute start instant.
    pub start_instant: DateTime<Utc>,
    /// Explicit duration; absent means the 120-minute default applies.
    pub duration_minutes: Option<u32>,
    /// The facility, if assigned.
    pub facility_id: Option<i64>,
    /// `HOME` or `AWAY` (also accepts `H`/`A`, case-insensitive).
    pub home_away: String,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A request to create or replace a practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRequest {
    /// The owning season.
    pub season_id: i64,
    /// The absolute start instant.
    pub start_instant: DateTime<Utc>,
    /// Duration in minutes (always explicit for practices).
    pub duration_minutes: u32,
    /// The facility, if assigned.
    pub facility_id: Option<i64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// The response to an event create or update.
///
/// Conflicts never block the write; they are reported alongside it so the
/// caller decides what to do about them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventWriteResponse {
    /// The persisted event's id.
    pub event_id: i64,
    /// The conflict check run against the written event.
    pub check: ConflictCheck,
}
