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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary layer for the Blockout conflict engine.
//!
//! This crate ties the pure conflict engine (`blockout`), the domain types
//! (`blockout-domain`), the override ledger (`blockout-ledger`), and
//! storage (`blockout-persistence`) together behind validated handlers and
//! the two-phase CSV import pipeline. Callers embed it directly; there is
//! no network transport here.

mod error;
mod handlers;
mod import;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, RowConflict, translate_domain_error, translate_persistence_error};
pub use handlers::{
    check_stored_event, create_blocker, create_facility, create_game, create_organization,
    create_practice, create_season, create_team, delete_blocker, delete_game, delete_practice,
    get_blocker, get_organization, list_affected_events, list_blockers, list_overrides,
    organization_summary, record_override, season_summary, update_blocker, update_game,
    update_practice,
};
pub use import::{
    DEFAULT_OVERRIDE_REASON, ExecuteOptions, FacilityResolution, ImportPreview, ImportReport,
    ImportRow, ImportRowResult, ImportRowStatus, ImportType, ImportTypeParseError,
    execute_csv_import, execute_import, parse_rows, preview_csv_import, preview_import,
};
pub use request_response::{
    AffectedCounts, BlockerRequest, BlockerResponse, EventWriteResponse, GameRequest,
    PracticeRequest,
};
