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

mod error;
mod event;
mod matcher;
mod resolve;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use event::{
    Event, EventContext, EventKind, GAME_DEFAULT_DURATION_MINUTES, Game, HomeAway,
    PRACTICE_DEFAULT_DURATION_MINUTES, Practice,
};
pub use matcher::{matches, scope_applies, window_overlaps};
pub use resolve::{FacilityMatch, MAX_FUZZY_DISTANCE, edit_distance, resolve_facility};
pub use types::{Applicability, Blocker, BlockerKind, Facility, Scope, TimeWindow};
pub use validation::{
    MAX_DURATION_MINUTES, parse_local_instant, validate_blocker_name, validate_duration_minutes,
    validate_timezone,
};
