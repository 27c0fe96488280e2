// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::conflict::{Conflict, ConflictCheck, check_event};
use blockout_domain::{Blocker, BlockerKind, Event, EventContext, EventKind, matches};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How far back a blocker counts as recently created in the organization
/// summary.
pub const RECENT_BLOCKER_WINDOW_DAYS: i64 = 30;

/// How many recently created blockers the organization summary lists.
pub const RECENT_BLOCKER_LIMIT: usize = 10;

/// A persisted event together with the organization and team resolved from
/// its season.
///
/// Events only know their season id; the caller resolves the rest before
/// any summary runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedEvent {
    /// The event itself.
    pub event: Event,
    /// The organization the event belongs to.
    pub org_id: i64,
    /// The team the event belongs to.
    pub team_id: i64,
}

impl ScopedEvent {
    /// Builds the matcher input for this event.
    #[must_use]
    pub const fn context(&self) -> EventContext {
        self.event.context(self.org_id, self.team_id)
    }
}

/// One event with conflicts, as reported by a season summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingEvent {
    /// Whether the event is a game or a practice.
    pub kind: EventKind,
    /// The event's canonical identifier.
    pub event_id: i64,
    /// The event's start instant.
    pub start_instant: DateTime<Utc>,
    /// Every conflict detected for the event.
    pub conflicts: Vec<Conflict>,
}

/// The conflict rollup for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonConflictSummary {
    /// The summarized season.
    pub season_id: i64,
    /// How many of the season's games have at least one conflict.
    pub games_with_conflicts: usize,
    /// How many of the season's practices have at least one conflict.
    pub practices_with_conflicts: usize,
    /// Total event-blocker conflict pairs across the season.
    pub total_conflicts: usize,
    /// Every event with at least one conflict.
    pub conflicting_events: Vec<ConflictingEvent>,
}

/// An event affected by one specific blocker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedEvent {
    /// The event's canonical identifier.
    pub event_id: i64,
    /// The event's start instant.
    pub start_instant: DateTime<Utc>,
}

/// The events one blocker conflicts with, grouped by type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AffectedEvents {
    /// Affected games.
    pub games: Vec<AffectedEvent>,
    /// Affected practices.
    pub practices: Vec<AffectedEvent>,
}

impl AffectedEvents {
    /// Total affected events across both types.
    #[must_use]
    pub fn total(&self) -> usize {
        self.games.len() + self.practices.len()
    }
}

/// One recently created blocker and the damage it retroactively does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockerImpact {
    /// The blocker's identifier.
    pub blocker_id: i64,
    /// The blocker's name.
    pub name: String,
    /// The blocker's kind.
    pub kind: BlockerKind,
    /// When the blocker was created.
    pub created_at: DateTime<Utc>,
    /// How many existing events the blocker conflicts with.
    pub affected_events: usize,
}

/// The conflict rollup for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConflictSummary {
    /// The summarized organization.
    pub org_id: i64,
    /// Total event-blocker conflict pairs caused by recently created
    /// blockers.
    pub total_conflicts: usize,
    /// Those conflict pairs broken down by blocker kind.
    pub by_kind: BTreeMap<BlockerKind, usize>,
    /// Blockers created in the last 30 days, most recent first, capped at
    /// ten entries.
    pub recently_created: Vec<BlockerImpact>,
}

/// Summarizes conflicts for one season.
///
/// The caller supplies the season's events and the organization's blockers.
/// An event contributes to the summary iff it has at least one conflict;
/// `total_conflicts` counts event-blocker pairs, so one event overlapping
/// two blockers adds two.
#[must_use]
pub fn summarize_season(
    season_id: i64,
    events: &[ScopedEvent],
    blockers: &[Blocker],
) -> SeasonConflictSummary {
    let mut games_with_conflicts: usize = 0;
    let mut practices_with_conflicts: usize = 0;
    let mut total_conflicts: usize = 0;
    let mut conflicting_events: Vec<ConflictingEvent> = Vec::new();

    for scoped in events {
        let Some(event_id) = scoped.event.id() else {
            continue;
        };
        let check: ConflictCheck = check_event(&scoped.context(), blockers);
        if !check.has_conflicts {
            continue;
        }
        match scoped.event.kind() {
            EventKind::Game => games_with_conflicts += 1,
            EventKind::Practice => practices_with_conflicts += 1,
        }
        total_conflicts += check.conflicts.len();
        conflicting_events.push(ConflictingEvent {
            kind: scoped.event.kind(),
            event_id,
            start_instant: scoped.event.start_instant(),
            conflicts: check.conflicts,
        });
    }

    SeasonConflictSummary {
        season_id,
        games_with_conflicts,
        practices_with_conflicts,
        total_conflicts,
        conflicting_events,
    }
}

/// Finds every event one blocker conflicts with, grouped by type.
#[must_use]
pub fn affected_by_blocker(blocker: &Blocker, events: &[ScopedEvent]) -> AffectedEvents {
    let mut affected: AffectedEvents = AffectedEvents::default();
    for scoped in events {
        let Some(event_id) = scoped.event.id() else {
            continue;
        };
        if !matches(blocker, &scoped.context()) {
            continue;
        }
        let entry: AffectedEvent = AffectedEvent {
            event_id,
            start_instant: scoped.event.start_instant(),
        };
        match scoped.event.kind() {
            EventKind::Game => affected.games.push(entry),
            EventKind::Practice => affected.practices.push(entry),
        }
    }
    affected
}

/// Summarizes conflicts for one organization.
///
/// The summary answers "what did recent blockers just break": only blockers
/// created within the last 30 days of `now` contribute, both to the headline
/// counts and to the recently-created list. Every count is derived by running
/// the matcher over those blockers and the supplied events; there is no
/// separate counting query to drift out of agreement with the per-event
/// check. The recently-created list is most recent first, capped at ten; the
/// counts cover all recent blockers, including any beyond the cap.
#[must_use]
pub fn summarize_organization(
    org_id: i64,
    blockers: &[Blocker],
    events: &[ScopedEvent],
    now: DateTime<Utc>,
) -> OrganizationConflictSummary {
    let cutoff: DateTime<Utc> = now - Duration::days(RECENT_BLOCKER_WINDOW_DAYS);
    let mut recent: Vec<&Blocker> = blockers
        .iter()
        .filter(|blocker| blocker.created_at() >= cutoff && blocker.created_at() <= now)
        .collect();

    let mut total_conflicts: usize = 0;
    let mut by_kind: BTreeMap<BlockerKind, usize> = BTreeMap::new();

    for scoped in events {
        let context: EventContext = scoped.context();
        for blocker in &recent {
            if matches(blocker, &context) {
                total_conflicts += 1;
                *by_kind.entry(blocker.kind()).or_insert(0) += 1;
            }
        }
    }

    recent.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    recent.truncate(RECENT_BLOCKER_LIMIT);

    let recently_created: Vec<BlockerImpact> = recent
        .into_iter()
        .filter_map(|blocker| {
            blocker.id().map(|blocker_id| BlockerImpact {
                blocker_id,
                name: blocker.name().to_string(),
                kind: blocker.kind(),
                created_at: blocker.created_at(),
                affected_events: affected_by_blocker(blocker, events).total(),
            })
        })
        .collect();

    OrganizationConflictSummary {
        org_id,
        total_conflicts,
        by_kind,
        recently_created,
    }
}
