// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The interval and scope matcher.
//!
//! This is the single source of truth for "does this blocker conflict with
//! this event". Every conflict query in the system (per-event checks,
//! per-blocker impact queries, season and organization rollups) is computed
//! by applying [`matches`] to loaded state. There is deliberately no second,
//! storage-level reimplementation of the overlap or scope rules.

use crate::event::EventContext;
use crate::types::{Blocker, Scope};

/// Decides whether a blocker conflicts with an event.
///
/// True iff the blocker's scope applies to the event and the half-open
/// windows `[blocker.start, blocker.end)` and `[event.start, event.end)`
/// intersect. Pure and deterministic.
#[must_use]
pub fn matches(blocker: &Blocker, event: &EventContext) -> bool {
    scope_applies(blocker, event) && window_overlaps(blocker, event)
}

/// Decides whether a blocker's scope covers an event.
///
/// ORG_WIDE applies to every event in the organization. TEAM applies only to
/// the named team. FACILITY applies only when the event has that facility;
/// an event with no facility never matches a FACILITY blocker.
#[must_use]
pub fn scope_applies(blocker: &Blocker, event: &EventContext) -> bool {
    if blocker.org_id() != event.org_id {
        return false;
    }
    match blocker.scope() {
        Scope::OrgWide => true,
        Scope::Team(team_id) => team_id == event.team_id,
        Scope::Facility(facility_id) => event.facility_id == Some(facility_id),
    }
}

/// Half-open interval overlap between a blocker's window and an event.
///
/// Touching boundaries do not conflict: an event ending exactly when a
/// blocker starts (or starting exactly when it ends) is clear.
#[must_use]
pub fn window_overlaps(blocker: &Blocker, event: &EventContext) -> bool {
    blocker.window().overlaps(event.start, event.end())
}
