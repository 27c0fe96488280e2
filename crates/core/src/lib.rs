// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The conflict query engine.
//!
//! Pure computations over loaded state: the caller (normally
//! `blockout-api`) loads blockers and events from storage and hands them
//! here. Every count and summary in this crate is derived by running the
//! domain matcher over the same inputs the per-event check uses, so a
//! blocker's reported impact and the conflicts reported on its events can
//! never disagree.

mod conflict;
mod summary;

#[cfg(test)]
mod tests;

pub use conflict::{Conflict, ConflictCheck, check_event, conflict_reason};
pub use summary::{
    AffectedEvent, AffectedEvents, BlockerImpact, ConflictingEvent, OrganizationConflictSummary,
    RECENT_BLOCKER_LIMIT, RECENT_BLOCKER_WINDOW_DAYS, ScopedEvent, SeasonConflictSummary,
    affected_by_blocker, summarize_organization, summarize_season,
};
