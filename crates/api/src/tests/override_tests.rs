// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::GameRequest;
use crate::tests::{blocker_request, seeded, test_actor, utc};
use blockout_domain::EventKind;
use blockout_ledger::{EventRef, OverrideRequest};

fn seeded_conflict(
    persistence: &mut blockout_persistence::Persistence,
    org_id: i64,
    season_id: i64,
) -> (i64, i64) {
    let blocker_id = handlers::create_blocker(
        persistence,
        org_id,
        &blocker_request(
            "EXAM",
            "ORG_WIDE",
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    )
    .unwrap()
    .blocker
    .id()
    .unwrap();
    let game_id = handlers::create_game(
        persistence,
        &GameRequest {
            season_id,
            opponent: String::from("Riverside High"),
            start_instant: utc(2026, 5, 18, 14, 0),
            duration_minutes: None,
            facility_id: None,
            home_away: String::from("HOME"),
            notes: None,
        },
    )
    .unwrap()
    .event_id;
    (blocker_id, game_id)
}

#[test]
fn test_record_and_list_override() {
    let (mut persistence, fixture) = seeded();
    let (blocker_id, game_id) =
        seeded_conflict(&mut persistence, fixture.org_id, fixture.season_id);

    let override_id = handlers::record_override(
        &mut persistence,
        fixture.org_id,
        &OverrideRequest::new(
            EventRef::new(EventKind::Game, game_id),
            blocker_id,
            Some(String::from("Championship game")),
        ),
        &test_actor(),
        utc(2026, 5, 10, 9, 0),
    )
    .unwrap();

    let listed = handlers::list_overrides(&mut persistence, EventKind::Game, game_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].override_id, override_id);
    assert_eq!(listed[0].blocker_id, blocker_id);
    assert_eq!(listed[0].actor.id, "coach-17");
    assert_eq!(listed[0].reason.as_deref(), Some("Championship game"));
}

#[test]
fn test_override_does_not_silence_the_conflict() {
    let (mut persistence, fixture) = seeded();
    let (blocker_id, game_id) =
        seeded_conflict(&mut persistence, fixture.org_id, fixture.season_id);
    handlers::record_override(
        &mut persistence,
        fixture.org_id,
        &OverrideRequest::new(EventRef::new(EventKind::Game, game_id), blocker_id, None),
        &test_actor(),
        utc(2026, 5, 10, 9, 0),
    )
    .unwrap();

    // The ledger records the acknowledgement; the conflict itself is still
    // derived and still reported.
    let check = handlers::check_stored_event(&mut persistence, EventKind::Game, game_id).unwrap();
    assert!(check.has_conflicts);
}

#[test]
fn test_repeated_overrides_accumulate() {
    let (mut persistence, fixture) = seeded();
    let (blocker_id, game_id) =
        seeded_conflict(&mut persistence, fixture.org_id, fixture.season_id);
    let request = OverrideRequest::new(EventRef::new(EventKind::Game, game_id), blocker_id, None);

    for _ in 0..2 {
        handlers::record_override(
            &mut persistence,
            fixture.org_id,
            &request,
            &test_actor(),
            utc(2026, 5, 10, 9, 0),
        )
        .unwrap();
    }

    let listed = handlers::list_overrides(&mut persistence, EventKind::Game, game_id).unwrap();
    assert_eq!(listed.len(), 2);
}

#[test]
fn test_override_requires_existing_blocker() {
    let (mut persistence, fixture) = seeded();
    let (_, game_id) = seeded_conflict(&mut persistence, fixture.org_id, fixture.season_id);
    let result = handlers::record_override(
        &mut persistence,
        fixture.org_id,
        &OverrideRequest::new(EventRef::new(EventKind::Game, game_id), 999, None),
        &test_actor(),
        utc(2026, 5, 10, 9, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Blocker"
    ));
}

#[test]
fn test_override_requires_event_in_same_org() {
    let (mut persistence, fixture) = seeded();
    let (blocker_id, _) = seeded_conflict(&mut persistence, fixture.org_id, fixture.season_id);
    let other_org =
        handlers::create_organization(&mut persistence, "Lincoln High", "America/Chicago").unwrap();
    let other_team = handlers::create_team(&mut persistence, other_org, "Varsity Golf").unwrap();
    let other_season = handlers::create_season(&mut persistence, other_team, "Fall 2026").unwrap();
    let other_game = handlers::create_game(
        &mut persistence,
        &GameRequest {
            season_id: other_season,
            opponent: String::from("Jefferson High"),
            start_instant: utc(2026, 9, 12, 18, 0),
            duration_minutes: None,
            facility_id: None,
            home_away: String::from("HOME"),
            notes: None,
        },
    )
    .unwrap()
    .event_id;

    let result = handlers::record_override(
        &mut persistence,
        fixture.org_id,
        &OverrideRequest::new(EventRef::new(EventKind::Game, other_game), blocker_id, None),
        &test_actor(),
        utc(2026, 5, 10, 9, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Event"
    ));
}

#[test]
fn test_overrides_outlive_the_blocker() {
    let (mut persistence, fixture) = seeded();
    let (blocker_id, game_id) =
        seeded_conflict(&mut persistence, fixture.org_id, fixture.season_id);
    handlers::record_override(
        &mut persistence,
        fixture.org_id,
        &OverrideRequest::new(EventRef::new(EventKind::Game, game_id), blocker_id, None),
        &test_actor(),
        utc(2026, 5, 10, 9, 0),
    )
    .unwrap();

    handlers::delete_blocker(&mut persistence, fixture.org_id, blocker_id).unwrap();

    let listed = handlers::list_overrides(&mut persistence, EventKind::Game, game_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].blocker_id, blocker_id);
}
