// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use blockout_domain::{Applicability, Blocker, BlockerKind, EventContext, TimeWindow, matches};
use serde::{Deserialize, Serialize};

/// One detected conflict between an event and a blocker.
///
/// Conflicts are derived on demand and never persisted; deleting the blocker
/// makes the conflict disappear from every subsequent query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The conflicting blocker's identifier.
    pub blocker_id: i64,
    /// The blocker's kind.
    pub kind: BlockerKind,
    /// The blocker's applicability.
    pub applicability: Applicability,
    /// The human-readable explanation of the conflict.
    pub reason: String,
    /// The blocked window the event intersects.
    pub window: TimeWindow,
}

/// The result of checking one event against a set of blockers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheck {
    /// True iff at least one conflict was found.
    pub has_conflicts: bool,
    /// Every detected conflict, in the order the blockers were supplied.
    pub conflicts: Vec<Conflict>,
}

impl ConflictCheck {
    /// A check that found nothing.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            has_conflicts: false,
            conflicts: Vec::new(),
        }
    }
}

/// Builds the reason string for a conflict.
///
/// The format is fixed: `"<scope label> <kind label>: <name>"`, e.g.
/// `"School-wide exam period: Spring Finals"`.
#[must_use]
pub fn conflict_reason(kind: BlockerKind, applicability: Applicability, name: &str) -> String {
    format!("{} {}: {name}", applicability.scope_label(), kind.label())
}

/// Checks one event against a set of blockers.
///
/// The blockers are normally every blocker in the event's organization; the
/// matcher discards the ones whose scope does not apply. The returned
/// conflicts preserve the input order.
#[must_use]
pub fn check_event(event: &EventContext, blockers: &[Blocker]) -> ConflictCheck {
    let conflicts: Vec<Conflict> = blockers
        .iter()
        .filter(|blocker| matches(blocker, event))
        .filter_map(|blocker| {
            blocker.id().map(|blocker_id| Conflict {
                blocker_id,
                kind: blocker.kind(),
                applicability: blocker.applicability(),
                reason: conflict_reason(blocker.kind(), blocker.applicability(), blocker.name()),
                window: blocker.window(),
            })
        })
        .collect();
    ConflictCheck {
        has_conflicts: !conflicts.is_empty(),
        conflicts,
    }
}
