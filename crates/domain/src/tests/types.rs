// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Applicability, Blocker, BlockerKind, DomainError, Event, EventKind, Game, HomeAway, Practice,
    Scope, TimeWindow,
};
use chrono::{DateTime, TimeZone, Utc};
use std::str::FromStr;

fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn test_blocker_kind_round_trip() {
    for kind in [
        BlockerKind::Exam,
        BlockerKind::Maintenance,
        BlockerKind::Event,
        BlockerKind::Travel,
        BlockerKind::Holiday,
        BlockerKind::Weather,
        BlockerKind::Custom,
    ] {
        let parsed: BlockerKind = BlockerKind::from_str(kind.as_str()).unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_blocker_kind_rejects_unknown() {
    let result = BlockerKind::from_str("VACATION");
    assert_eq!(result, Err(DomainError::InvalidKind(String::from("VACATION"))));
}

#[test]
fn test_blocker_kind_labels() {
    assert_eq!(BlockerKind::Exam.label(), "exam period");
    assert_eq!(BlockerKind::Maintenance.label(), "facility maintenance");
    assert_eq!(BlockerKind::Event.label(), "school event");
    assert_eq!(BlockerKind::Travel.label(), "travel blackout");
    assert_eq!(BlockerKind::Holiday.label(), "school holiday");
    assert_eq!(BlockerKind::Weather.label(), "weather closure");
    assert_eq!(BlockerKind::Custom.label(), "blocked period");
}

#[test]
fn test_applicability_scope_labels() {
    assert_eq!(Applicability::OrgWide.scope_label(), "School-wide");
    assert_eq!(Applicability::Team.scope_label(), "Team");
    assert_eq!(Applicability::Facility.scope_label(), "Facility");
}

#[test]
fn test_scope_from_parts_org_wide() {
    let scope: Scope = Scope::from_parts(Applicability::OrgWide, None, None).unwrap();
    assert_eq!(scope, Scope::OrgWide);
    assert_eq!(scope.team_id(), None);
    assert_eq!(scope.facility_id(), None);
}

#[test]
fn test_scope_from_parts_team() {
    let scope: Scope = Scope::from_parts(Applicability::Team, Some(7), None).unwrap();
    assert_eq!(scope, Scope::Team(7));
    assert_eq!(scope.team_id(), Some(7));
    assert_eq!(scope.applicability(), Applicability::Team);
}

#[test]
fn test_scope_from_parts_facility() {
    let scope: Scope = Scope::from_parts(Applicability::Facility, None, Some(3)).unwrap();
    assert_eq!(scope, Scope::Facility(3));
    assert_eq!(scope.facility_id(), Some(3));
}

#[test]
fn test_scope_from_parts_rejects_team_without_id() {
    let result = Scope::from_parts(Applicability::Team, None, None);
    assert!(matches!(result, Err(DomainError::ScopeFieldMismatch { .. })));
}

#[test]
fn test_scope_from_parts_rejects_org_wide_with_facility() {
    let result = Scope::from_parts(Applicability::OrgWide, None, Some(3));
    assert!(matches!(result, Err(DomainError::ScopeFieldMismatch { .. })));
}

#[test]
fn test_scope_from_parts_rejects_both_ids() {
    let result = Scope::from_parts(Applicability::Team, Some(7), Some(3));
    assert!(matches!(result, Err(DomainError::ScopeFieldMismatch { .. })));
}

#[test]
fn test_time_window_rejects_inverted() {
    let start: DateTime<Utc> = instant(2026, 3, 10, 12, 0);
    let end: DateTime<Utc> = instant(2026, 3, 10, 9, 0);
    let result = TimeWindow::new(start, end);
    assert!(matches!(result, Err(DomainError::InvalidWindow { .. })));
}

#[test]
fn test_time_window_rejects_zero_length() {
    let start: DateTime<Utc> = instant(2026, 3, 10, 12, 0);
    let result = TimeWindow::new(start, start);
    assert!(matches!(result, Err(DomainError::InvalidWindow { .. })));
}

#[test]
fn test_blocker_trims_name() {
    let window: TimeWindow =
        TimeWindow::new(instant(2026, 5, 1, 0, 0), instant(2026, 5, 8, 0, 0)).unwrap();
    let blocker: Blocker = Blocker::new(
        1,
        BlockerKind::Exam,
        Scope::OrgWide,
        "  Spring Finals  ",
        None,
        window,
        instant(2026, 4, 1, 9, 0),
    )
    .unwrap();
    assert_eq!(blocker.name(), "Spring Finals");
    assert_eq!(blocker.id(), None);
}

#[test]
fn test_blocker_rejects_blank_name() {
    let window: TimeWindow =
        TimeWindow::new(instant(2026, 5, 1, 0, 0), instant(2026, 5, 8, 0, 0)).unwrap();
    let result = Blocker::new(
        1,
        BlockerKind::Exam,
        Scope::OrgWide,
        "   ",
        None,
        window,
        instant(2026, 4, 1, 9, 0),
    );
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_blocker_with_id_sets_id() {
    let window: TimeWindow =
        TimeWindow::new(instant(2026, 5, 1, 0, 0), instant(2026, 5, 8, 0, 0)).unwrap();
    let blocker: Blocker = Blocker::with_id(
        42,
        1,
        BlockerKind::Weather,
        Scope::Facility(3),
        "Ice storm",
        Some(String::from("Campus closed")),
        window,
        instant(2026, 4, 1, 9, 0),
    )
    .unwrap();
    assert_eq!(blocker.id(), Some(42));
    assert_eq!(blocker.applicability(), Applicability::Facility);
    assert_eq!(blocker.description(), Some("Campus closed"));
}

#[test]
fn test_home_away_parses_abbreviations() {
    assert_eq!(HomeAway::from_str("h").unwrap(), HomeAway::Home);
    assert_eq!(HomeAway::from_str("AWAY").unwrap(), HomeAway::Away);
    assert_eq!(HomeAway::from_str("a").unwrap(), HomeAway::Away);
    assert!(HomeAway::from_str("neutral").is_err());
}

#[test]
fn test_game_duration_defaults_to_120() {
    let game: Event = Event::Game(Game {
        game_id: Some(1),
        season_id: 1,
        opponent: String::from("Rival High"),
        start_instant: instant(2026, 3, 10, 18, 0),
        duration_minutes: None,
        facility_id: None,
        home_away: HomeAway::Home,
        notes: None,
    });
    assert_eq!(game.duration_minutes(), 120);
    assert_eq!(game.end_instant(), instant(2026, 3, 10, 20, 0));
    assert_eq!(game.kind(), EventKind::Game);
}

#[test]
fn test_game_explicit_duration_wins() {
    let game: Event = Event::Game(Game {
        game_id: Some(1),
        season_id: 1,
        opponent: String::from("Rival High"),
        start_instant: instant(2026, 3, 10, 18, 0),
        duration_minutes: Some(90),
        facility_id: Some(2),
        home_away: HomeAway::Away,
        notes: None,
    });
    assert_eq!(game.duration_minutes(), 90);
    assert_eq!(game.end_instant(), instant(2026, 3, 10, 19, 30));
}

#[test]
fn test_practice_duration_is_explicit() {
    let practice: Event = Event::Practice(Practice {
        practice_id: Some(5),
        season_id: 2,
        start_instant: instant(2026, 3, 11, 16, 0),
        duration_minutes: 75,
        facility_id: Some(1),
        notes: Some(String::from("Scrimmage")),
    });
    assert_eq!(practice.kind(), EventKind::Practice);
    assert_eq!(practice.duration_minutes(), 75);
    assert_eq!(practice.end_instant(), instant(2026, 3, 11, 17, 15));
}

#[test]
fn test_event_context_carries_resolved_scope() {
    let practice: Event = Event::Practice(Practice {
        practice_id: Some(5),
        season_id: 2,
        start_instant: instant(2026, 3, 11, 16, 0),
        duration_minutes: 60,
        facility_id: Some(1),
        notes: None,
    });
    let context = practice.context(10, 4);
    assert_eq!(context.org_id, 10);
    assert_eq!(context.team_id, 4);
    assert_eq!(context.facility_id, Some(1));
    assert_eq!(context.end(), instant(2026, 3, 11, 17, 0));
}
