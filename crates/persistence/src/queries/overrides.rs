// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Override ledger reads.

use blockout_domain::EventKind;
use blockout_ledger::Override;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{OverrideRow, override_from_row};
use crate::diesel_schema::overrides;
use crate::error::PersistenceError;

/// Lists every override recorded for one event, oldest first.
///
/// Returns an empty list for an event with no overrides, including events
/// that do not exist; the ledger does not distinguish the two.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_overrides_for_event(
    conn: &mut SqliteConnection,
    event_type: EventKind,
    event_id: i64,
) -> Result<Vec<Override>, PersistenceError> {
    let rows: Vec<OverrideRow> = overrides::table
        .select((
            overrides::override_id,
            overrides::org_id,
            overrides::event_type,
            overrides::event_id,
            overrides::blocker_id,
            overrides::actor_id,
            overrides::actor_type,
            overrides::reason,
            overrides::recorded_at,
        ))
        .filter(overrides::event_type.eq(event_type.as_str()))
        .filter(overrides::event_id.eq(event_id))
        .order(overrides::override_id.asc())
        .load::<OverrideRow>(conn)?;

    rows.into_iter().map(override_from_row).collect()
}
