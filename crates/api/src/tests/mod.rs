// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod blocker_tests;
mod override_tests;

use crate::handlers;
use crate::request_response::BlockerRequest;
use blockout_ledger::Actor;
use blockout_persistence::Persistence;
use chrono::{DateTime, TimeZone, Utc};

/// Ids of the rows seeded by [`seeded`].
pub struct Fixture {
    pub org_id: i64,
    pub team_id: i64,
    pub season_id: i64,
    pub gym_id: i64,
    pub field_id: i64,
}

/// One organization in New York time with a team, a season, and two
/// facilities, built through the public handlers.
pub fn seeded() -> (Persistence, Fixture) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let org_id =
        handlers::create_organization(&mut persistence, "Jefferson High", "America/New_York")
            .unwrap();
    let team_id = handlers::create_team(&mut persistence, org_id, "Varsity Soccer").unwrap();
    let season_id = handlers::create_season(&mut persistence, team_id, "Fall 2026").unwrap();
    let gym_id = handlers::create_facility(&mut persistence, org_id, "Main Gym").unwrap();
    let field_id = handlers::create_facility(&mut persistence, org_id, "West Field").unwrap();
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

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn blocker_request(
    kind: &str,
    applicability: &str,
    name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BlockerRequest {
    BlockerRequest {
        kind: kind.to_string(),
        applicability: applicability.to_string(),
        team_id: None,
        facility_id: None,
        name: name.to_string(),
        description: None,
        start_instant: start,
        end_instant: end,
    }
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("coach-17"), String::from("user"))
}
