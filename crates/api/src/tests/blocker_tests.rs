// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{BlockerResponse, GameRequest, PracticeRequest};
use crate::tests::{blocker_request, seeded, utc};

fn game_request(season_id: i64, start: chrono::DateTime<chrono::Utc>) -> GameRequest {
    GameRequest {
        season_id,
        opponent: String::from("Riverside High"),
        start_instant: start,
        duration_minutes: None,
        facility_id: None,
        home_away: String::from("HOME"),
        notes: None,
    }
}

#[test]
fn test_create_organization_rejects_unknown_timezone() {
    let mut persistence = blockout_persistence::Persistence::new_in_memory().unwrap();
    let result = handlers::create_organization(&mut persistence, "Jefferson High", "Mars/Olympus");
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "timezone"
    ));
}

#[test]
fn test_create_blocker_reports_affected_events() {
    let (mut persistence, fixture) = seeded();
    handlers::create_game(&mut persistence, &game_request(fixture.season_id, utc(2026, 5, 18, 14, 0)))
        .unwrap();
    handlers::create_practice(
        &mut persistence,
        &PracticeRequest {
            season_id: fixture.season_id,
            start_instant: utc(2026, 9, 10, 16, 0),
            duration_minutes: 90,
            facility_id: None,
            notes: None,
        },
    )
    .unwrap();

    let response: BlockerResponse = handlers::create_blocker(
        &mut persistence,
        fixture.org_id,
        &blocker_request(
            "EXAM",
            "ORG_WIDE",
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    )
    .unwrap();

    assert_eq!(response.affected.games, 1);
    assert_eq!(response.affected.practices, 0);
    assert_eq!(response.affected.total, 1);
    assert_eq!(response.blocker.name(), "Finals");
}

#[test]
fn test_create_blocker_unknown_kind_rejected() {
    let (mut persistence, fixture) = seeded();
    let result = handlers::create_blocker(
        &mut persistence,
        fixture.org_id,
        &blocker_request(
            "RECESS",
            "ORG_WIDE",
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "kind"
    ));
}

#[test]
fn test_create_blocker_scope_fields_must_agree() {
    let (mut persistence, fixture) = seeded();
    // TEAM applicability with no team id.
    let result = handlers::create_blocker(
        &mut persistence,
        fixture.org_id,
        &blocker_request(
            "TRAVEL",
            "TEAM",
            "Away weekend",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "scope"
    ));
}

#[test]
fn test_create_blocker_window_must_be_nonempty() {
    let (mut persistence, fixture) = seeded();
    let result = handlers::create_blocker(
        &mut persistence,
        fixture.org_id,
        &blocker_request(
            "EXAM",
            "ORG_WIDE",
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 15, 8, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "end_instant"
    ));
}

#[test]
fn test_team_scope_from_other_org_reported_not_found() {
    let (mut persistence, fixture) = seeded();
    let other_org =
        handlers::create_organization(&mut persistence, "Lincoln High", "America/Chicago").unwrap();
    let other_team = handlers::create_team(&mut persistence, other_org, "Varsity Golf").unwrap();

    let mut request = blocker_request(
        "TRAVEL",
        "TEAM",
        "Away weekend",
        utc(2026, 5, 15, 8, 0),
        utc(2026, 5, 22, 17, 0),
    );
    request.team_id = Some(other_team);
    let result =
        handlers::create_blocker(&mut persistence, fixture.org_id, &request, utc(2026, 5, 1, 9, 0));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Team"
    ));
}

#[test]
fn test_update_blocker_replaces_window_and_keeps_created_at() {
    let (mut persistence, fixture) = seeded();
    let created = handlers::create_blocker(
        &mut persistence,
        fixture.org_id,
        &blocker_request(
            "EXAM",
            "ORG_WIDE",
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    )
    .unwrap();
    let blocker_id = created.blocker.id().unwrap();

    let updated = handlers::update_blocker(
        &mut persistence,
        fixture.org_id,
        blocker_id,
        &blocker_request(
            "EXAM",
            "ORG_WIDE",
            "Finals (extended)",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 25, 17, 0),
        ),
    )
    .unwrap();

    assert_eq!(updated.blocker.name(), "Finals (extended)");
    assert_eq!(updated.blocker.window().end(), utc(2026, 5, 25, 17, 0));
    assert_eq!(updated.blocker.created_at(), utc(2026, 5, 1, 9, 0));
}

#[test]
fn test_delete_blocker_clears_derived_conflicts() {
    let (mut persistence, fixture) = seeded();
    let created = handlers::create_blocker(
        &mut persistence,
        fixture.org_id,
        &blocker_request(
            "EXAM",
            "ORG_WIDE",
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
        ),
        utc(2026, 5, 1, 9, 0),
    )
    .unwrap();
    let write = handlers::create_game(
        &mut persistence,
        &game_request(fixture.season_id, utc(2026, 5, 18, 14, 0)),
    )
    .unwrap();
    assert!(write.check.has_conflicts);

    handlers::delete_blocker(&mut persistence, fixture.org_id, created.blocker.id().unwrap())
        .unwrap();

    let recheck = handlers::check_stored_event(
        &mut persistence,
        blockout_domain::EventKind::Game,
        write.event_id,
    )
    .unwrap();
    assert!(!recheck.has_conflicts);
}

#[test]
fn test_blocker_from_other_org_is_hidden() {
    let (mut persistence, fixture) = seeded();
    let other_org =
        handlers::create_organization(&mut persistence, "Lincoln High", "America/Chicago").unwrap();
    let created = handlers::create_blocker(
        &mut persistence,
        other_org,
        &blocker_request(
            "HOLIDAY",
            "ORG_WIDE",
            "Spring break",
            utc(2026, 3, 15, 0, 0),
            utc(2026, 3, 22, 0, 0),
        ),
        utc(2026, 3, 1, 9, 0),
    )
    .unwrap();

    let result = handlers::get_blocker(
        &mut persistence,
        fixture.org_id,
        created.blocker.id().unwrap(),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    // Deleting across tenants is equally invisible.
    let result = handlers::delete_blocker(
        &mut persistence,
        fixture.org_id,
        created.blocker.id().unwrap(),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_blockers_scoped_to_org() {
    let (mut persistence, fixture) = seeded();
    let other_org =
        handlers::create_organization(&mut persistence, "Lincoln High", "America/Chicago").unwrap();
    for (org, name) in [(fixture.org_id, "Finals"), (other_org, "Their finals")] {
        handlers::create_blocker(
            &mut persistence,
            org,
            &blocker_request(
                "EXAM",
                "ORG_WIDE",
                name,
                utc(2026, 5, 15, 8, 0),
                utc(2026, 5, 22, 17, 0),
            ),
            utc(2026, 5, 1, 9, 0),
        )
        .unwrap();
    }

    let listed = handlers::list_blockers(&mut persistence, fixture.org_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), "Finals");
}
