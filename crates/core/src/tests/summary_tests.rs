// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{ORG, SEASON, blocker, game, practice, utc};
use crate::{
    AffectedEvents, OrganizationConflictSummary, RECENT_BLOCKER_LIMIT, ScopedEvent,
    SeasonConflictSummary, affected_by_blocker, summarize_organization, summarize_season,
};
use blockout_domain::{Blocker, BlockerKind, EventKind, Scope};

fn fixture() -> (Vec<Blocker>, Vec<ScopedEvent>) {
    let blockers: Vec<Blocker> = vec![
        blocker(
            1,
            BlockerKind::Exam,
            Scope::OrgWide,
            "Finals",
            utc(2026, 5, 15, 8, 0),
            utc(2026, 5, 22, 17, 0),
            utc(2026, 5, 1, 9, 0),
        ),
        blocker(
            2,
            BlockerKind::Maintenance,
            Scope::Facility(7),
            "Gym floor refinish",
            utc(2026, 5, 18, 0, 0),
            utc(2026, 5, 19, 0, 0),
            utc(2026, 5, 2, 9, 0),
        ),
    ];
    let events: Vec<ScopedEvent> = vec![
        // Conflicts with both blockers.
        practice(1, utc(2026, 5, 18, 14, 0), 60, Some(7)),
        // Conflicts with the exam blocker only.
        game(1, utc(2026, 5, 16, 14, 0), None),
        // Clear.
        game(2, utc(2026, 6, 1, 14, 0), None),
    ];
    (blockers, events)
}

#[test]
fn test_season_summary_counts_events_and_pairs() {
    let (blockers, events) = fixture();
    let summary: SeasonConflictSummary = summarize_season(SEASON, &events, &blockers);
    assert_eq!(summary.season_id, SEASON);
    assert_eq!(summary.games_with_conflicts, 1);
    assert_eq!(summary.practices_with_conflicts, 1);
    assert_eq!(summary.total_conflicts, 3);
    assert_eq!(summary.conflicting_events.len(), 2);
}

#[test]
fn test_season_summary_omits_clear_events() {
    let (blockers, events) = fixture();
    let summary: SeasonConflictSummary = summarize_season(SEASON, &events, &blockers);
    assert!(
        summary
            .conflicting_events
            .iter()
            .all(|event| !event.conflicts.is_empty())
    );
    assert!(
        !summary
            .conflicting_events
            .iter()
            .any(|event| event.kind == EventKind::Game && event.event_id == 2)
    );
}

#[test]
fn test_season_summary_with_no_blockers_is_empty() {
    let (_, events) = fixture();
    let summary: SeasonConflictSummary = summarize_season(SEASON, &events, &[]);
    assert_eq!(summary.total_conflicts, 0);
    assert!(summary.conflicting_events.is_empty());
}

#[test]
fn test_affected_by_blocker_groups_by_type() {
    let (blockers, events) = fixture();
    let affected: AffectedEvents = affected_by_blocker(&blockers[0], &events);
    assert_eq!(affected.games.len(), 1);
    assert_eq!(affected.practices.len(), 1);
    assert_eq!(affected.total(), 2);

    let facility_only: AffectedEvents = affected_by_blocker(&blockers[1], &events);
    assert!(facility_only.games.is_empty());
    assert_eq!(facility_only.practices.len(), 1);
}

#[test]
fn test_org_summary_counts_agree_with_per_event_checks() {
    let (blockers, events) = fixture();
    let summary: OrganizationConflictSummary =
        summarize_organization(ORG, &blockers, &events, utc(2026, 5, 20, 0, 0));
    assert_eq!(summary.total_conflicts, 3);
    assert_eq!(summary.by_kind.get(&BlockerKind::Exam), Some(&2));
    assert_eq!(summary.by_kind.get(&BlockerKind::Maintenance), Some(&1));
}

#[test]
fn test_org_summary_recent_blockers_sorted_and_windowed() {
    let (mut blockers, events) = fixture();
    // Created well outside the 30-day window.
    blockers.push(blocker(
        3,
        BlockerKind::Holiday,
        Scope::OrgWide,
        "Winter break",
        utc(2025, 12, 20, 0, 0),
        utc(2026, 1, 2, 0, 0),
        utc(2025, 11, 1, 9, 0),
    ));
    let summary: OrganizationConflictSummary =
        summarize_organization(ORG, &blockers, &events, utc(2026, 5, 20, 0, 0));
    assert_eq!(summary.recently_created.len(), 2);
    // Most recent first.
    assert_eq!(summary.recently_created[0].blocker_id, 2);
    assert_eq!(summary.recently_created[1].blocker_id, 1);
    assert_eq!(summary.recently_created[1].affected_events, 2);
}

#[test]
fn test_org_summary_counts_exclude_old_blockers() {
    let (mut blockers, events) = fixture();
    // Overlaps the same events as the exam blocker, but created months ago.
    blockers.push(blocker(
        3,
        BlockerKind::Holiday,
        Scope::OrgWide,
        "Spring planning",
        utc(2026, 5, 15, 8, 0),
        utc(2026, 5, 22, 17, 0),
        utc(2026, 1, 5, 9, 0),
    ));
    let summary: OrganizationConflictSummary =
        summarize_organization(ORG, &blockers, &events, utc(2026, 5, 20, 0, 0));
    // The old blocker is absent from the recent list and adds nothing to
    // the headline counts.
    assert!(
        summary
            .recently_created
            .iter()
            .all(|impact| impact.blocker_id != 3)
    );
    assert_eq!(summary.total_conflicts, 3);
    assert_eq!(summary.by_kind.get(&BlockerKind::Holiday), None);
}

#[test]
fn test_org_summary_recent_list_capped_at_ten() {
    let events: Vec<ScopedEvent> = Vec::new();
    let blockers: Vec<Blocker> = (1..=15)
        .map(|i| {
            blocker(
                i,
                BlockerKind::Custom,
                Scope::OrgWide,
                "Window",
                utc(2026, 5, 1, 0, 0),
                utc(2026, 5, 2, 0, 0),
                utc(2026, 5, 1, u32::try_from(i).unwrap(), 0),
            )
        })
        .collect();
    let summary: OrganizationConflictSummary =
        summarize_organization(ORG, &blockers, &events, utc(2026, 5, 10, 0, 0));
    assert_eq!(summary.recently_created.len(), RECENT_BLOCKER_LIMIT);
    // Latest creation hour first.
    assert_eq!(summary.recently_created[0].blocker_id, 15);
}
