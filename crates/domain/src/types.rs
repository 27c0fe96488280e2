// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::validate_blocker_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The administrative category of a blocked window.
///
/// Kinds are display metadata only; they never affect whether a blocker
/// applies to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BlockerKind {
    /// Exam period.
    Exam,
    /// Facility maintenance.
    Maintenance,
    /// School event.
    Event,
    /// Travel blackout.
    Travel,
    /// School holiday.
    Holiday,
    /// Weather closure.
    Weather,
    /// Anything else.
    Custom,
}

impl BlockerKind {
    /// Converts this kind to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "EXAM",
            Self::Maintenance => "MAINTENANCE",
            Self::Event => "EVENT",
            Self::Travel => "TRAVEL",
            Self::Holiday => "HOLIDAY",
            Self::Weather => "WEATHER",
            Self::Custom => "CUSTOM",
        }
    }

    /// Returns the human-readable label used in conflict reason strings.
    ///
    /// This is a fixed lookup table; the same kind always yields the same
    /// label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exam => "exam period",
            Self::Maintenance => "facility maintenance",
            Self::Event => "school event",
            Self::Travel => "travel blackout",
            Self::Holiday => "school holiday",
            Self::Weather => "weather closure",
            Self::Custom => "blocked period",
        }
    }
}

impl FromStr for BlockerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXAM" => Ok(Self::Exam),
            "MAINTENANCE" => Ok(Self::Maintenance),
            "EVENT" => Ok(Self::Event),
            "TRAVEL" => Ok(Self::Travel),
            "HOLIDAY" => Ok(Self::Holiday),
            "WEATHER" => Ok(Self::Weather),
            "CUSTOM" => Ok(Self::Custom),
            _ => Err(DomainError::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for BlockerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which events a blocker can conflict with.
///
/// This is the discriminant-only projection of [`Scope`], used for display
/// and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Applicability {
    /// Applies to every event in the organization.
    OrgWide,
    /// Applies to events of one team.
    Team,
    /// Applies to events at one facility.
    Facility,
}

impl Applicability {
    /// Converts this applicability to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrgWide => "ORG_WIDE",
            Self::Team => "TEAM",
            Self::Facility => "FACILITY",
        }
    }

    /// Returns the scope label used in conflict reason strings.
    #[must_use]
    pub const fn scope_label(&self) -> &'static str {
        match self {
            Self::OrgWide => "School-wide",
            Self::Team => "Team",
            Self::Facility => "Facility",
        }
    }
}

impl FromStr for Applicability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORG_WIDE" => Ok(Self::OrgWide),
            "TEAM" => Ok(Self::Team),
            "FACILITY" => Ok(Self::Facility),
            _ => Err(DomainError::InvalidApplicability(s.to_string())),
        }
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The applicability of a blocker together with its scope identifier.
///
/// The representation makes the scope invariant unrepresentable rather than
/// checked: a TEAM scope always carries its team id, a FACILITY scope always
/// carries its facility id, and neither can carry the other. Changing a
/// blocker's scope therefore re-derives both stored id columns from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Applies to every event in the organization.
    OrgWide,
    /// Applies to events of the named team.
    Team(i64),
    /// Applies to events at the named facility.
    Facility(i64),
}

impl Scope {
    /// Reconstructs a scope from its stored columns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ScopeFieldMismatch` if the id columns disagree
    /// with the applicability (e.g. a TEAM row with no team id, or an
    /// ORG_WIDE row with a facility id).
    pub fn from_parts(
        applicability: Applicability,
        team_id: Option<i64>,
        facility_id: Option<i64>,
    ) -> Result<Self, DomainError> {
        match (applicability, team_id, facility_id) {
            (Applicability::OrgWide, None, None) => Ok(Self::OrgWide),
            (Applicability::Team, Some(team), None) => Ok(Self::Team(team)),
            (Applicability::Facility, None, Some(facility)) => Ok(Self::Facility(facility)),
            (applicability, team, facility) => Err(DomainError::ScopeFieldMismatch {
                applicability: applicability.as_str().to_string(),
                detail: format!("team_id={team:?}, facility_id={facility:?}"),
            }),
        }
    }

    /// Returns the discriminant-only projection of this scope.
    #[must_use]
    pub const fn applicability(&self) -> Applicability {
        match self {
            Self::OrgWide => Applicability::OrgWide,
            Self::Team(_) => Applicability::Team,
            Self::Facility(_) => Applicability::Facility,
        }
    }

    /// Returns the team id for a TEAM scope.
    #[must_use]
    pub const fn team_id(&self) -> Option<i64> {
        match self {
            Self::Team(team_id) => Some(*team_id),
            Self::OrgWide | Self::Facility(_) => None,
        }
    }

    /// Returns the facility id for a FACILITY scope.
    #[must_use]
    pub const fn facility_id(&self) -> Option<i64> {
        match self {
            Self::Facility(facility_id) => Some(*facility_id),
            Self::OrgWide | Self::Team(_) => None,
        }
    }
}

/// A half-open time window `[start, end)`.
///
/// All instants are absolute (UTC); localization happens before a window is
/// constructed, never inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWindow` if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidWindow {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap test against another half-open range.
    ///
    /// Touching boundaries do not overlap: `[a, b)` and `[b, c)` are
    /// disjoint.
    #[must_use]
    pub fn overlaps(&self, other_start: DateTime<Utc>, other_end: DateTime<Utc>) -> bool {
        self.start < other_end && self.end > other_start
    }
}

/// A declared unavailability window.
///
/// Blockers are scoped to an organization and apply to events per their
/// [`Scope`]. They are mutable (full-replace) and hard-deleted; there is no
/// soft-delete state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the blocker has not been persisted yet.
    blocker_id: Option<i64>,
    org_id: i64,
    kind: BlockerKind,
    scope: Scope,
    name: String,
    description: Option<String>,
    window: TimeWindow,
    created_at: DateTime<Utc>,
}

impl Blocker {
    /// Creates a new `Blocker` without a persisted id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or whitespace-only.
    pub fn new(
        org_id: i64,
        kind: BlockerKind,
        scope: Scope,
        name: &str,
        description: Option<String>,
        window: TimeWindow,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_blocker_name(name)?;
        Ok(Self {
            blocker_id: None,
            org_id,
            kind,
            scope,
            name: name.trim().to_string(),
            description,
            window,
            created_at,
        })
    }

    /// Creates a `Blocker` with an existing persisted id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or whitespace-only.
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        blocker_id: i64,
        org_id: i64,
        kind: BlockerKind,
        scope: Scope,
        name: &str,
        description: Option<String>,
        window: TimeWindow,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let mut blocker: Self =
            Self::new(org_id, kind, scope, name, description, window, created_at)?;
        blocker.blocker_id = Some(blocker_id);
        Ok(blocker)
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.blocker_id
    }

    /// Returns the owning organization id.
    #[must_use]
    pub const fn org_id(&self) -> i64 {
        self.org_id
    }

    /// Returns the blocker kind.
    #[must_use]
    pub const fn kind(&self) -> BlockerKind {
        self.kind
    }

    /// Returns the blocker scope.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the discriminant-only applicability.
    #[must_use]
    pub const fn applicability(&self) -> Applicability {
        self.scope.applicability()
    }

    /// Returns the blocker name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the blocked window.
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        self.window
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A facility in an organization's registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    /// The canonical numeric identifier.
    pub facility_id: i64,
    /// The facility name as registered.
    pub name: String,
}

impl Facility {
    /// Creates a new `Facility`.
    #[must_use]
    pub const fn new(facility_id: i64, name: String) -> Self {
        Self { facility_id, name }
    }
}
