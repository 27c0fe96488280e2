// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use blockout_domain::{Blocker, BlockerKind, Scope, TimeWindow};
use blockout_ledger::Actor;
use chrono::{DateTime, TimeZone, Utc};

/// Ids of the rows seeded by [`seeded_persistence`].
pub struct Fixture {
    pub org_id: i64,
    pub team_id: i64,
    pub season_id: i64,
    pub gym_id: i64,
    pub field_id: i64,
}

pub fn seeded_persistence() -> (Persistence, Fixture) {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let org_id = persistence
        .create_organization("Jefferson High", "America/New_York")
        .expect("Failed to create organization");
    let team_id = persistence
        .create_team(org_id, "Varsity Soccer")
        .expect("Failed to create team");
    let season_id = persistence
        .create_season(team_id, "Fall 2026")
        .expect("Failed to create season");
    let gym_id = persistence
        .create_facility(org_id, "Main Gym")
        .expect("Failed to create facility");
    let field_id = persistence
        .create_facility(org_id, "West Field")
        .expect("Failed to create facility");
    (
        persistence,
        Fixture {
            org_id,
            team_id,
            season_id,
            gym_id,
            field_id,
        },
    )
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn test_blocker(org_id: i64, kind: BlockerKind, scope: Scope, name: &str) -> Blocker {
    Blocker::new(
        org_id,
        kind,
        scope,
        name,
        Some(String::from("seeded by tests")),
        TimeWindow::new(utc(2026, 5, 15, 8, 0), utc(2026, 5, 22, 17, 0)).unwrap(),
        utc(2026, 5, 1, 9, 0),
    )
    .unwrap()
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("coach-17"), String::from("user"))
}
