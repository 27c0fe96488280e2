// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only ledger writes.
//!
//! There is no update or delete here on purpose; the ledger is history.

use blockout_ledger::{Actor, OverrideRequest};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::format_instant;
use crate::diesel_schema::overrides;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Appends one override entry and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_override(
    conn: &mut SqliteConnection,
    org_id: i64,
    request: &OverrideRequest,
    actor: &Actor,
    recorded_at: DateTime<Utc>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(overrides::table)
        .values((
            overrides::org_id.eq(org_id),
            overrides::event_type.eq(request.event.kind.as_str()),
            overrides::event_id.eq(request.event.id),
            overrides::blocker_id.eq(request.blocker_id),
            overrides::actor_id.eq(&actor.id),
            overrides::actor_type.eq(&actor.actor_type),
            overrides::reason.eq(request.reason.as_deref()),
            overrides::recorded_at.eq(format_instant(recorded_at)),
        ))
        .execute(conn)?;
    let override_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        override_id,
        org_id,
        blocker_id = request.blocker_id,
        "Recorded override"
    );
    Ok(override_id)
}
