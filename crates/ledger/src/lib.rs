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

//! Append-only override ledger types.
//!
//! An override records that a person chose to schedule an event despite a
//! known conflict. Overrides are never updated or deleted, and nothing
//! prevents the same (event, blocker) pair from being overridden more than
//! once; each acknowledgement is its own ledger entry.

use blockout_domain::EventKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the person or process acknowledging a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "import").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// A typed reference to the game or practice an override is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    /// Whether the referenced event is a game or a practice.
    pub kind: EventKind,
    /// The referenced event's canonical identifier.
    pub id: i64,
}

impl EventRef {
    /// Creates a new `EventRef`.
    #[must_use]
    pub const fn new(kind: EventKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// A request to record one override, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRequest {
    /// The event being scheduled despite the conflict.
    pub event: EventRef,
    /// The blocker whose conflict is being acknowledged.
    pub blocker_id: i64,
    /// Optional free-text justification.
    pub reason: Option<String>,
}

impl OverrideRequest {
    /// Creates a new `OverrideRequest`.
    #[must_use]
    pub const fn new(event: EventRef, blocker_id: i64, reason: Option<String>) -> Self {
        Self {
            event,
            blocker_id,
            reason,
        }
    }
}

/// A persisted ledger entry.
///
/// Immutable once recorded. The referenced blocker or event may later be
/// deleted; the entry survives as history either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    /// The canonical numeric identifier assigned by the database.
    pub override_id: i64,
    /// The organization the override belongs to.
    pub org_id: i64,
    /// The event being scheduled despite the conflict.
    pub event: EventRef,
    /// The blocker whose conflict was acknowledged.
    pub blocker_id: i64,
    /// Who acknowledged the conflict.
    pub actor: Actor,
    /// Optional free-text justification.
    pub reason: Option<String>,
    /// When the override was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Override {
    /// Creates a new `Override`.
    ///
    /// # Arguments
    ///
    /// * `override_id` - The database-assigned identifier
    /// * `org_id` - The owning organization
    /// * `event` - The event the override is attached to
    /// * `blocker_id` - The acknowledged blocker
    /// * `actor` - Who acknowledged the conflict
    /// * `reason` - Optional justification
    /// * `recorded_at` - When the entry was recorded
    #[must_use]
    pub const fn new(
        override_id: i64,
        org_id: i64,
        event: EventRef,
        blocker_id: i64,
        actor: Actor,
        reason: Option<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            override_id,
            org_id,
            event,
            blocker_id,
            actor,
            reason,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests;
