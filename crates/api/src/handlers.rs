// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handlers for the scheduling registry, blockers, events, conflict
//! queries, and the override ledger.
//!
//! Every handler validates input, loads what the conflict engine needs,
//! and translates lower-level errors into [`ApiError`]. Cross-tenant
//! access is reported as not-found rather than forbidden, so callers
//! cannot probe for ids belonging to other organizations.

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AffectedCounts, BlockerRequest, BlockerResponse, EventWriteResponse, GameRequest,
    PracticeRequest,
};
use blockout::{
    AffectedEvents, ConflictCheck, OrganizationConflictSummary, ScopedEvent, SeasonConflictSummary,
    affected_by_blocker, check_event, summarize_organization, summarize_season,
};
use blockout_domain::{
    Blocker, BlockerKind, Event, EventContext, EventKind, Game, HomeAway, Practice, Scope,
    TimeWindow, validate_blocker_name, validate_duration_minutes, validate_timezone,
};
use blockout_ledger::{Actor, Override, OverrideRequest};
use blockout_persistence::{OrganizationRecord, Persistence};
use chrono::{DateTime, Utc};

// ============================================================================
// Registry
// ============================================================================

/// Creates an organization and returns its id.
///
/// # Errors
///
/// Returns an error if the name is empty, the timezone is not a valid IANA
/// name, or the insert fails.
pub fn create_organization(
    persistence: &mut Persistence,
    name: &str,
    timezone: &str,
) -> Result<i64, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("name must not be empty"),
        });
    }
    validate_timezone(timezone).map_err(translate_domain_error)?;
    persistence
        .create_organization(name.trim(), timezone)
        .map_err(|err| translate_persistence_error("Organization", err))
}

/// Loads one organization.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the organization does not exist.
pub fn get_organization(
    persistence: &mut Persistence,
    org_id: i64,
) -> Result<OrganizationRecord, ApiError> {
    persistence
        .get_organization(org_id)
        .map_err(|err| translate_persistence_error("Organization", err))
}

/// Creates a team in an organization and returns its id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the organization does not exist or
/// `InvalidInput` if the name is empty.
pub fn create_team(
    persistence: &mut Persistence,
    org_id: i64,
    name: &str,
) -> Result<i64, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("name must not be empty"),
        });
    }
    get_organization(persistence, org_id)?;
    persistence
        .create_team(org_id, name.trim())
        .map_err(|err| translate_persistence_error("Team", err))
}

/// Registers a facility in an organization and returns its id.
///
/// Registration order matters: fuzzy facility resolution breaks ties in
/// favor of the earliest-registered candidate.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the organization does not exist or
/// `InvalidInput` if the name is empty.
pub fn create_facility(
    persistence: &mut Persistence,
    org_id: i64,
    name: &str,
) -> Result<i64, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("name must not be empty"),
        });
    }
    get_organization(persistence, org_id)?;
    persistence
        .create_facility(org_id, name.trim())
        .map_err(|err| translate_persistence_error("Facility", err))
}

/// Creates a season for a team and returns its id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the team does not exist or `InvalidInput`
/// if the name is empty.
pub fn create_season(
    persistence: &mut Persistence,
    team_id: i64,
    name: &str,
) -> Result<i64, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("name must not be empty"),
        });
    }
    persistence
        .team_org(team_id)
        .map_err(|err| translate_persistence_error("Team", err))?;
    persistence
        .create_season(team_id, name.trim())
        .map_err(|err| translate_persistence_error("Season", err))
}

// ============================================================================
// Blockers
// ============================================================================

/// Creates a blocker and reports its immediate schedule impact.
///
/// The response counts every already-scheduled event the new blocker
/// conflicts with, so a blocker dropped onto a full calendar surfaces the
/// damage at creation time.
///
/// # Errors
///
/// Returns `InvalidInput` for unparseable kind/applicability/scope/window
/// values and `ResourceNotFound` if the organization or a scope target does
/// not exist.
pub fn create_blocker(
    persistence: &mut Persistence,
    org_id: i64,
    request: &BlockerRequest,
    created_at: DateTime<Utc>,
) -> Result<BlockerResponse, ApiError> {
    get_organization(persistence, org_id)?;
    let blocker: Blocker = blocker_from_request(persistence, org_id, request, created_at)?;
    let blocker_id: i64 = persistence
        .insert_blocker(&blocker)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    tracing::info!(org_id, blocker_id, "created blocker");
    blocker_response(persistence, org_id, blocker_id)
}

/// Replaces a blocker's fields and reports its new schedule impact.
///
/// The update is a full replace; the original creation instant is kept.
/// Changing the scope re-derives both scope id columns, so a TEAM blocker
/// turned FACILITY cannot keep a stale team id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the blocker does not exist in this
/// organization; otherwise as [`create_blocker`].
pub fn update_blocker(
    persistence: &mut Persistence,
    org_id: i64,
    blocker_id: i64,
    request: &BlockerRequest,
) -> Result<BlockerResponse, ApiError> {
    let existing: Blocker = get_blocker(persistence, org_id, blocker_id)?;
    let replacement: Blocker =
        blocker_from_request(persistence, org_id, request, existing.created_at())?;
    let kind: BlockerKind = replacement.kind();
    let stored: Blocker = Blocker::with_id(
        blocker_id,
        org_id,
        kind,
        replacement.scope(),
        replacement.name(),
        replacement.description().map(ToString::to_string),
        replacement.window(),
        replacement.created_at(),
    )
    .map_err(translate_domain_error)?;
    persistence
        .update_blocker(&stored)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    blocker_response(persistence, org_id, blocker_id)
}

/// Hard-deletes a blocker.
///
/// Conflicts are derived, never stored, so deleting the blocker silently
/// clears every conflict it caused. Override ledger entries that reference
/// it remain.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the blocker does not exist in this
/// organization.
pub fn delete_blocker(
    persistence: &mut Persistence,
    org_id: i64,
    blocker_id: i64,
) -> Result<(), ApiError> {
    get_blocker(persistence, org_id, blocker_id)?;
    persistence
        .delete_blocker(blocker_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    tracing::debug!(org_id, blocker_id, "deleted blocker");
    Ok(())
}

/// Loads one blocker, scoped to an organization.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the blocker does not exist or belongs to
/// a different organization.
pub fn get_blocker(
    persistence: &mut Persistence,
    org_id: i64,
    blocker_id: i64,
) -> Result<Blocker, ApiError> {
    let blocker: Blocker = persistence
        .get_blocker(blocker_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    if blocker.org_id() != org_id {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Blocker"),
            message: format!("Blocker {blocker_id} not found"),
        });
    }
    Ok(blocker)
}

/// Lists every blocker in an organization.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the organization does not exist.
pub fn list_blockers(
    persistence: &mut Persistence,
    org_id: i64,
) -> Result<Vec<Blocker>, ApiError> {
    get_organization(persistence, org_id)?;
    persistence
        .list_blockers_for_org(org_id)
        .map_err(|err| translate_persistence_error("Blocker", err))
}

/// Lists every scheduled event one blocker conflicts with, grouped by type.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the blocker does not exist in this
/// organization.
pub fn list_affected_events(
    persistence: &mut Persistence,
    org_id: i64,
    blocker_id: i64,
) -> Result<AffectedEvents, ApiError> {
    let blocker: Blocker = get_blocker(persistence, org_id, blocker_id)?;
    let events: Vec<ScopedEvent> = persistence
        .list_org_events(org_id)
        .map_err(|err| translate_persistence_error("Organization", err))?;
    Ok(affected_by_blocker(&blocker, &events))
}

// ============================================================================
// Events
// ============================================================================

/// Creates a game and reports any conflicts it lands on.
///
/// Conflicts never block the write; the caller gets the game id and the
/// conflict check together.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season or facility does not exist and
/// `InvalidInput` for a bad duration, home/away value, or empty opponent.
pub fn create_game(
    persistence: &mut Persistence,
    request: &GameRequest,
) -> Result<EventWriteResponse, ApiError> {
    let (team_id, org_id) = season_scope(persistence, request.season_id)?;
    let game: Game = game_from_request(persistence, org_id, request, None)?;
    let game_id: i64 = persistence
        .insert_game(&game)
        .map_err(|err| translate_persistence_error("Game", err))?;
    let check: ConflictCheck =
        check_context(persistence, org_id, &Event::Game(game).context(org_id, team_id))?;
    Ok(EventWriteResponse {
        event_id: game_id,
        check,
    })
}

/// Replaces a game's fields and re-runs the conflict check.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the game does not exist; otherwise as
/// [`create_game`].
pub fn update_game(
    persistence: &mut Persistence,
    game_id: i64,
    request: &GameRequest,
) -> Result<EventWriteResponse, ApiError> {
    persistence
        .get_game(game_id)
        .map_err(|err| translate_persistence_error("Game", err))?;
    let (team_id, org_id) = season_scope(persistence, request.season_id)?;
    let game: Game = game_from_request(persistence, org_id, request, Some(game_id))?;
    persistence
        .update_game(&game)
        .map_err(|err| translate_persistence_error("Game", err))?;
    let check: ConflictCheck =
        check_context(persistence, org_id, &Event::Game(game).context(org_id, team_id))?;
    Ok(EventWriteResponse {
        event_id: game_id,
        check,
    })
}

/// Hard-deletes a game.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the game does not exist.
pub fn delete_game(persistence: &mut Persistence, game_id: i64) -> Result<(), ApiError> {
    persistence
        .delete_game(game_id)
        .map_err(|err| translate_persistence_error("Game", err))
}

/// Creates a practice and reports any conflicts it lands on.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season or facility does not exist and
/// `InvalidInput` for a bad duration.
pub fn create_practice(
    persistence: &mut Persistence,
    request: &PracticeRequest,
) -> Result<EventWriteResponse, ApiError> {
    let (team_id, org_id) = season_scope(persistence, request.season_id)?;
    let practice: Practice = practice_from_request(persistence, org_id, request, None)?;
    let practice_id: i64 = persistence
        .insert_practice(&practice)
        .map_err(|err| translate_persistence_error("Practice", err))?;
    let check: ConflictCheck = check_context(
        persistence,
        org_id,
        &Event::Practice(practice).context(org_id, team_id),
    )?;
    Ok(EventWriteResponse {
        event_id: practice_id,
        check,
    })
}

/// Replaces a practice's fields and re-runs the conflict check.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the practice does not exist; otherwise as
/// [`create_practice`].
pub fn update_practice(
    persistence: &mut Persistence,
    practice_id: i64,
    request: &PracticeRequest,
) -> Result<EventWriteResponse, ApiError> {
    persistence
        .get_practice(practice_id)
        .map_err(|err| translate_persistence_error("Practice", err))?;
    let (team_id, org_id) = season_scope(persistence, request.season_id)?;
    let practice: Practice =
        practice_from_request(persistence, org_id, request, Some(practice_id))?;
    persistence
        .update_practice(&practice)
        .map_err(|err| translate_persistence_error("Practice", err))?;
    let check: ConflictCheck = check_context(
        persistence,
        org_id,
        &Event::Practice(practice).context(org_id, team_id),
    )?;
    Ok(EventWriteResponse {
        event_id: practice_id,
        check,
    })
}

/// Hard-deletes a practice.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the practice does not exist.
pub fn delete_practice(persistence: &mut Persistence, practice_id: i64) -> Result<(), ApiError> {
    persistence
        .delete_practice(practice_id)
        .map_err(|err| translate_persistence_error("Practice", err))
}

// ============================================================================
// Conflict queries
// ============================================================================

/// Checks one stored event against its organization's blockers.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist.
pub fn check_stored_event(
    persistence: &mut Persistence,
    event_type: EventKind,
    event_id: i64,
) -> Result<ConflictCheck, ApiError> {
    let event: Event = match event_type {
        EventKind::Game => Event::Game(
            persistence
                .get_game(event_id)
                .map_err(|err| translate_persistence_error("Game", err))?,
        ),
        EventKind::Practice => Event::Practice(
            persistence
                .get_practice(event_id)
                .map_err(|err| translate_persistence_error("Practice", err))?,
        ),
    };
    let (team_id, org_id) = season_scope(persistence, event.season_id())?;
    check_context(persistence, org_id, &event.context(org_id, team_id))
}

/// Summarizes conflicts for one season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn season_summary(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<SeasonConflictSummary, ApiError> {
    let (_, org_id) = season_scope(persistence, season_id)?;
    let events: Vec<ScopedEvent> = persistence
        .list_season_events(season_id)
        .map_err(|err| translate_persistence_error("Season", err))?;
    let blockers: Vec<Blocker> = persistence
        .list_blockers_for_org(org_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    Ok(summarize_season(season_id, &events, &blockers))
}

/// Summarizes conflicts for one organization as of `now`.
///
/// `now` anchors the recently-created blocker window; callers pass the
/// current instant, tests pass a fixed one.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the organization does not exist.
pub fn organization_summary(
    persistence: &mut Persistence,
    org_id: i64,
    now: DateTime<Utc>,
) -> Result<OrganizationConflictSummary, ApiError> {
    get_organization(persistence, org_id)?;
    let blockers: Vec<Blocker> = persistence
        .list_blockers_for_org(org_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    let events: Vec<ScopedEvent> = persistence
        .list_org_events(org_id)
        .map_err(|err| translate_persistence_error("Organization", err))?;
    Ok(summarize_organization(org_id, &blockers, &events, now))
}

// ============================================================================
// Override ledger
// ============================================================================

/// Appends an override acknowledging one event-blocker conflict.
///
/// The ledger is append-only; recording the same pair again adds another
/// entry rather than replacing the first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the blocker or event does not exist in
/// this organization.
pub fn record_override(
    persistence: &mut Persistence,
    org_id: i64,
    request: &OverrideRequest,
    actor: &Actor,
    recorded_at: DateTime<Utc>,
) -> Result<i64, ApiError> {
    get_blocker(persistence, org_id, request.blocker_id)?;
    let season_id: i64 = match request.event.kind {
        EventKind::Game => persistence
            .get_game(request.event.id)
            .map_err(|err| translate_persistence_error("Game", err))?
            .season_id,
        EventKind::Practice => persistence
            .get_practice(request.event.id)
            .map_err(|err| translate_persistence_error("Practice", err))?
            .season_id,
    };
    let (_, event_org) = season_scope(persistence, season_id)?;
    if event_org != org_id {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("{} {} not found", request.event.kind, request.event.id),
        });
    }
    let override_id: i64 = persistence
        .insert_override(org_id, request, actor, recorded_at)
        .map_err(|err| translate_persistence_error("Override", err))?;
    tracing::info!(
        org_id,
        override_id,
        blocker_id = request.blocker_id,
        "recorded conflict override"
    );
    Ok(override_id)
}

/// Lists every override recorded for one event, oldest first.
///
/// The list can reference blockers that no longer exist; the ledger
/// outlives its subjects.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_overrides(
    persistence: &mut Persistence,
    event_type: EventKind,
    event_id: i64,
) -> Result<Vec<Override>, ApiError> {
    persistence
        .list_overrides_for_event(event_type, event_id)
        .map_err(|err| translate_persistence_error("Override", err))
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(crate) fn season_scope(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<(i64, i64), ApiError> {
    persistence
        .season_scope(season_id)
        .map_err(|err| translate_persistence_error("Season", err))
}

pub(crate) fn check_context(
    persistence: &mut Persistence,
    org_id: i64,
    context: &EventContext,
) -> Result<ConflictCheck, ApiError> {
    let blockers: Vec<Blocker> = persistence
        .list_blockers_for_org(org_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    Ok(check_event(context, &blockers))
}

fn blocker_from_request(
    persistence: &mut Persistence,
    org_id: i64,
    request: &BlockerRequest,
    created_at: DateTime<Utc>,
) -> Result<Blocker, ApiError> {
    validate_blocker_name(&request.name).map_err(translate_domain_error)?;
    let kind: BlockerKind = request.kind.parse().map_err(translate_domain_error)?;
    let applicability = request
        .applicability
        .parse()
        .map_err(translate_domain_error)?;
    let scope: Scope = Scope::from_parts(applicability, request.team_id, request.facility_id)
        .map_err(translate_domain_error)?;
    verify_scope_targets(persistence, org_id, scope)?;
    let window: TimeWindow = TimeWindow::new(request.start_instant, request.end_instant)
        .map_err(translate_domain_error)?;
    Blocker::new(
        org_id,
        kind,
        scope,
        &request.name,
        request.description.clone(),
        window,
        created_at,
    )
    .map_err(translate_domain_error)
}

fn verify_scope_targets(
    persistence: &mut Persistence,
    org_id: i64,
    scope: Scope,
) -> Result<(), ApiError> {
    match scope {
        Scope::OrgWide => Ok(()),
        Scope::Team(team_id) => {
            let owner: i64 = persistence
                .team_org(team_id)
                .map_err(|err| translate_persistence_error("Team", err))?;
            if owner == org_id {
                Ok(())
            } else {
                Err(ApiError::ResourceNotFound {
                    resource_type: String::from("Team"),
                    message: format!("Team {team_id} not found"),
                })
            }
        }
        Scope::Facility(facility_id) => {
            verify_facility_in_org(persistence, org_id, facility_id)
        }
    }
}

pub(crate) fn verify_facility_in_org(
    persistence: &mut Persistence,
    org_id: i64,
    facility_id: i64,
) -> Result<(), ApiError> {
    let owner: i64 = persistence
        .facility_org(facility_id)
        .map_err(|err| translate_persistence_error("Facility", err))?;
    if owner == org_id {
        Ok(())
    } else {
        Err(ApiError::ResourceNotFound {
            resource_type: String::from("Facility"),
            message: format!("Facility {facility_id} not found"),
        })
    }
}

fn blocker_response(
    persistence: &mut Persistence,
    org_id: i64,
    blocker_id: i64,
) -> Result<BlockerResponse, ApiError> {
    let blocker: Blocker = persistence
        .get_blocker(blocker_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;
    let events: Vec<ScopedEvent> = persistence
        .list_org_events(org_id)
        .map_err(|err| translate_persistence_error("Organization", err))?;
    let affected: AffectedEvents = affected_by_blocker(&blocker, &events);
    Ok(BlockerResponse {
        blocker,
        affected: AffectedCounts {
            games: affected.games.len(),
            practices: affected.practices.len(),
            total: affected.total(),
        },
    })
}

fn game_from_request(
    persistence: &mut Persistence,
    org_id: i64,
    request: &GameRequest,
    game_id: Option<i64>,
) -> Result<Game, ApiError> {
    if request.opponent.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("opponent"),
            message: String::from("opponent must not be empty"),
        });
    }
    if let Some(minutes) = request.duration_minutes {
        validate_duration_minutes(minutes).map_err(translate_domain_error)?;
    }
    let home_away: HomeAway = request.home_away.parse().map_err(translate_domain_error)?;
    if let Some(facility_id) = request.facility_id {
        verify_facility_in_org(persistence, org_id, facility_id)?;
    }
    Ok(Game {
        game_id,
        season_id: request.season_id,
        opponent: request.opponent.trim().to_string(),
        start_instant: request.start_instant,
        duration_minutes: request.duration_minutes,
        facility_id: request.facility_id,
        home_away,
        notes: request.notes.clone(),
    })
}

fn practice_from_request(
    persistence: &mut Persistence,
    org_id: i64,
    request: &PracticeRequest,
    practice_id: Option<i64>,
) -> Result<Practice, ApiError> {
    validate_duration_minutes(request.duration_minutes).map_err(translate_domain_error)?;
    if let Some(facility_id) = request.facility_id {
        verify_facility_in_org(persistence, org_id, facility_id)?;
    }
    Ok(Practice {
        practice_id,
        season_id: request.season_id,
        start_instant: request.start_instant,
        duration_minutes: request.duration_minutes,
        facility_id: request.facility_id,
        notes: request.notes.clone(),
    })
}
