// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ScopedEvent;
use blockout_domain::{
    Blocker, BlockerKind, Event, Game, HomeAway, Practice, Scope, TimeWindow,
};
use chrono::{DateTime, TimeZone, Utc};

pub const ORG: i64 = 1;
pub const TEAM: i64 = 4;
pub const SEASON: i64 = 2;

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn blocker(
    blocker_id: i64,
    kind: BlockerKind,
    scope: Scope,
    name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> Blocker {
    Blocker::with_id(
        blocker_id,
        ORG,
        kind,
        scope,
        name,
        None,
        TimeWindow::new(start, end).unwrap(),
        created_at,
    )
    .unwrap()
}

pub fn game(game_id: i64, start: DateTime<Utc>, facility_id: Option<i64>) -> ScopedEvent {
    ScopedEvent {
        event: Event::Game(Game {
            game_id: Some(game_id),
            season_id: SEASON,
            opponent: String::from("Rival High"),
            start_instant: start,
            duration_minutes: None,
            facility_id,
            home_away: HomeAway::Home,
            notes: None,
        }),
        org_id: ORG,
        team_id: TEAM,
    }
}

pub fn practice(
    practice_id: i64,
    start: DateTime<Utc>,
    duration_minutes: u32,
    facility_id: Option<i64>,
) -> ScopedEvent {
    ScopedEvent {
        event: Event::Practice(Practice {
            practice_id: Some(practice_id),
            season_id: SEASON,
            start_instant: start,
            duration_minutes,
            facility_id,
            notes: None,
        }),
        org_id: ORG,
        team_id: TEAM,
    }
}
