// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Blocker, BlockerKind, EventContext, Scope, TimeWindow, matches, scope_applies};
use chrono::{DateTime, TimeZone, Utc};

fn instant(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, h, mi, 0).unwrap()
}

fn blocker(scope: Scope, start: DateTime<Utc>, end: DateTime<Utc>) -> Blocker {
    Blocker::with_id(
        1,
        1,
        BlockerKind::Exam,
        scope,
        "Finals week",
        None,
        TimeWindow::new(start, end).unwrap(),
        instant(1, 9, 0),
    )
    .unwrap()
}

fn event(team_id: i64, facility_id: Option<i64>, start: DateTime<Utc>, minutes: u32) -> EventContext {
    EventContext {
        org_id: 1,
        team_id,
        start,
        duration_minutes: minutes,
        facility_id,
    }
}

#[test]
fn test_overlapping_org_wide_blocker_conflicts() {
    let b: Blocker = blocker(Scope::OrgWide, instant(10, 8, 0), instant(10, 17, 0));
    let e: EventContext = event(4, None, instant(10, 16, 0), 120);
    assert!(matches(&b, &e));
}

#[test]
fn test_touching_boundary_event_ends_at_blocker_start() {
    let b: Blocker = blocker(Scope::OrgWide, instant(10, 18, 0), instant(10, 20, 0));
    let e: EventContext = event(4, None, instant(10, 16, 0), 120);
    assert!(!matches(&b, &e));
}

#[test]
fn test_touching_boundary_event_starts_at_blocker_end() {
    let b: Blocker = blocker(Scope::OrgWide, instant(10, 14, 0), instant(10, 16, 0));
    let e: EventContext = event(4, None, instant(10, 16, 0), 120);
    assert!(!matches(&b, &e));
}

#[test]
fn test_event_fully_inside_blocker_conflicts() {
    let b: Blocker = blocker(Scope::OrgWide, instant(10, 0, 0), instant(11, 0, 0));
    let e: EventContext = event(4, None, instant(10, 12, 0), 60);
    assert!(matches(&b, &e));
}

#[test]
fn test_blocker_fully_inside_event_conflicts() {
    let b: Blocker = blocker(Scope::OrgWide, instant(10, 12, 30), instant(10, 13, 0));
    let e: EventContext = event(4, None, instant(10, 12, 0), 120);
    assert!(matches(&b, &e));
}

#[test]
fn test_team_blocker_applies_only_to_named_team() {
    let b: Blocker = blocker(Scope::Team(4), instant(10, 0, 0), instant(11, 0, 0));
    let same_team: EventContext = event(4, None, instant(10, 12, 0), 60);
    let other_team: EventContext = event(5, None, instant(10, 12, 0), 60);
    assert!(matches(&b, &same_team));
    assert!(!matches(&b, &other_team));
}

#[test]
fn test_facility_blocker_applies_only_to_named_facility() {
    let b: Blocker = blocker(Scope::Facility(2), instant(10, 0, 0), instant(11, 0, 0));
    let at_facility: EventContext = event(4, Some(2), instant(10, 12, 0), 60);
    let elsewhere: EventContext = event(4, Some(3), instant(10, 12, 0), 60);
    assert!(matches(&b, &at_facility));
    assert!(!matches(&b, &elsewhere));
}

#[test]
fn test_facility_blocker_never_matches_event_without_facility() {
    let b: Blocker = blocker(Scope::Facility(2), instant(10, 0, 0), instant(11, 0, 0));
    let no_facility: EventContext = event(4, None, instant(10, 12, 0), 60);
    assert!(!scope_applies(&b, &no_facility));
}

#[test]
fn test_blocker_from_other_org_never_applies() {
    let b: Blocker = blocker(Scope::OrgWide, instant(10, 0, 0), instant(11, 0, 0));
    let mut e: EventContext = event(4, None, instant(10, 12, 0), 60);
    e.org_id = 2;
    assert!(!matches(&b, &e));
}

#[test]
fn test_scope_can_apply_while_window_misses() {
    let b: Blocker = blocker(Scope::Team(4), instant(20, 0, 0), instant(21, 0, 0));
    let e: EventContext = event(4, None, instant(10, 12, 0), 60);
    assert!(scope_applies(&b, &e));
    assert!(!matches(&b, &e));
}
