// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Two-phase CSV bulk import: preview, then execute.
//!
//! Preview parses and validates every row, resolves facility names against
//! the registry, and runs the conflict check on each prospective event
//! without writing anything. Execute re-runs the same validation and then
//! commits the whole batch in one transaction; a batch with any invalid row
//! writes nothing, and conflicts block the commit unless the caller
//! explicitly overrides them.
//!
//! Row numbers are spreadsheet row numbers: the header is row 1, so the
//! first data row is row 2.

use crate::error::{ApiError, RowConflict, translate_persistence_error};
use crate::handlers;
use blockout::{Conflict, ConflictCheck, check_event};
use blockout_domain::{
    Blocker, DomainError, EventContext, Facility, FacilityMatch, GAME_DEFAULT_DURATION_MINUTES,
    Game, HomeAway, PRACTICE_DEFAULT_DURATION_MINUTES, Practice, parse_local_instant,
    resolve_facility, validate_duration_minutes,
};
use blockout_ledger::Actor;
use blockout_persistence::{GameImport, ImportOutcome, Persistence, PracticeImport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// The reason written to the ledger when an import overrides conflicts
/// without a caller-supplied justification.
pub const DEFAULT_OVERRIDE_REASON: &str = "Imported with conflicts overridden";

/// Whether a CSV payload contains games or practices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportType {
    /// The rows are games.
    Games,
    /// The rows are practices.
    Practices,
}

impl ImportType {
    /// Converts this type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Practices => "practices",
        }
    }
}

/// Error returned when an import type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown import type '{0}'; expected 'games' or 'practices'")]
pub struct ImportTypeParseError(String);

impl FromStr for ImportType {
    type Err = ImportTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "games" => Ok(Self::Games),
            "practices" => Ok(Self::Practices),
            _ => Err(ImportTypeParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for ImportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw spreadsheet row, before validation.
///
/// All fields are the cell text as found; empty cells are `None`. The date
/// and time are interpreted in the organization's timezone during preview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportRow {
    /// The local date, `YYYY-MM-DD`.
    pub date: String,
    /// The local time, `HH:MM`.
    pub time: String,
    /// The opponent name (games only; required there).
    pub opponent: Option<String>,
    /// Free-text facility name, resolved against the registry.
    pub facility: Option<String>,
    /// Duration in minutes, still unparsed.
    pub duration_minutes: Option<String>,
    /// Home or away (games only; defaults to home).
    pub home_away: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// How a row's facility cell resolved against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FacilityResolution {
    /// The cell matched a registered facility exactly.
    Exact {
        /// The matched facility's id.
        facility_id: i64,
        /// The matched facility's registered name.
        name: String,
    },
    /// The cell was close to a registered facility; the suggestion is used
    /// unless the caller reassigns the row at execute time.
    Fuzzy {
        /// The suggested facility's id.
        facility_id: i64,
        /// The suggested facility's registered name.
        name: String,
        /// The edit distance between cell and registered name.
        distance: usize,
    },
    /// No registered facility was close enough; the event is created with
    /// no facility.
    Unmatched {
        /// The cell text that failed to resolve.
        input: String,
    },
    /// The facility cell was empty or absent.
    NotGiven,
}

impl FacilityResolution {
    /// The facility id this resolution assigns, if any.
    #[must_use]
    pub const fn facility_id(&self) -> Option<i64> {
        match self {
            Self::Exact { facility_id, .. } | Self::Fuzzy { facility_id, .. } => {
                Some(*facility_id)
            }
            Self::Unmatched { .. } | Self::NotGiven => None,
        }
    }
}

/// Whether a previewed row can be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImportRowStatus {
    /// The row parsed and validated.
    Valid,
    /// The row has at least one validation error.
    Invalid,
}

/// The preview result for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowResult {
    /// The spreadsheet row number (header is row 1).
    pub row_number: usize,
    /// Whether the row can be imported.
    pub status: ImportRowStatus,
    /// Every validation error found, as `"field: problem"` strings.
    pub errors: Vec<String>,
    /// The resolved absolute start instant, if the date and time parsed.
    pub start_instant: Option<DateTime<Utc>>,
    /// The explicit duration for games (`None` means the stored default),
    /// or the effective duration for practices.
    pub duration_minutes: Option<u32>,
    /// Parsed home/away for games; `None` for practices.
    pub home_away: Option<HomeAway>,
    /// How the facility cell resolved.
    pub facility: FacilityResolution,
    /// Conflicts the prospective event would land on.
    pub conflicts: Vec<Conflict>,
}

/// The preview result for a whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    /// The target season.
    pub season_id: i64,
    /// Whether the rows are games or practices.
    pub import_type: ImportType,
    /// The per-row results, in payload order.
    pub rows: Vec<ImportRowResult>,
    /// How many rows the payload contained.
    pub total_rows: usize,
    /// How many rows validated.
    pub valid_rows: usize,
    /// How many rows failed validation.
    pub invalid_rows: usize,
    /// How many valid rows have at least one conflict.
    pub rows_with_conflicts: usize,
    /// True iff every row validated.
    pub valid: bool,
    /// True iff the payload can be executed (every row validated).
    /// Conflicts do not block import; they require an explicit override at
    /// execute time.
    pub can_import: bool,
}

/// Caller choices for the execute phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecuteOptions {
    /// Acknowledge every reported conflict and write the batch anyway,
    /// recording one override per conflict.
    pub override_conflicts: bool,
    /// Justification for the recorded overrides; a fixed default is used
    /// when absent.
    pub override_reason: Option<String>,
    /// Per-row facility reassignments, keyed by spreadsheet row number.
    /// An entry replaces whatever the row's facility cell resolved to.
    pub facility_assignments: HashMap<usize, i64>,
}

/// What an executed import wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// The ids of the created events, in payload order.
    pub created_event_ids: Vec<i64>,
    /// How many events were created.
    pub events_imported: usize,
    /// How many override ledger entries were recorded.
    pub overrides_recorded: usize,
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Parses CSV text into raw rows.
///
/// Headers are matched case-insensitively with spaces folded to
/// underscores. `date` and `time` are always required; games additionally
/// require `opponent`. `facility`, `duration_minutes`, `home_away`, and
/// `notes` are optional.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` if the payload cannot be read or a required
/// header is missing. Cell-level problems are not errors here; they
/// surface per row in the preview.
pub fn parse_rows(import_type: ImportType, csv_text: &str) -> Result<Vec<ImportRow>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(|err| ApiError::InvalidCsvFormat {
            reason: format!("could not read headers: {err}"),
        })?
        .clone();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (position, header) in headers.iter().enumerate() {
        index.insert(normalize_header(header), position);
    }

    let mut required: Vec<&str> = vec!["date", "time"];
    if import_type == ImportType::Games {
        required.push("opponent");
    }
    let missing: Vec<&str> = required
        .into_iter()
        .filter(|header| !index.contains_key(*header))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    let mut rows: Vec<ImportRow> = Vec::new();
    for record in reader.records() {
        let record: csv::StringRecord = record.map_err(|err| ApiError::InvalidCsvFormat {
            reason: format!("could not read row: {err}"),
        })?;
        let cell = |name: &str| -> Option<String> {
            index
                .get(name)
                .and_then(|&position| record.get(position))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        };
        rows.push(ImportRow {
            date: cell("date").unwrap_or_default(),
            time: cell("time").unwrap_or_default(),
            opponent: cell("opponent"),
            facility: cell("facility"),
            duration_minutes: cell("duration_minutes"),
            home_away: cell("home_away"),
            notes: cell("notes"),
        });
    }
    Ok(rows)
}

/// Previews an import without writing anything.
///
/// Loads the organization's timezone, facility registry, and blockers
/// once, then validates each row and runs the conflict check on every row
/// that validates.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist. Row-level
/// problems never fail the preview; they are reported per row.
pub fn preview_import(
    persistence: &mut Persistence,
    season_id: i64,
    import_type: ImportType,
    rows: &[ImportRow],
) -> Result<ImportPreview, ApiError> {
    let (team_id, org_id) = handlers::season_scope(persistence, season_id)?;
    let organization = persistence
        .get_organization(org_id)
        .map_err(|err| translate_persistence_error("Organization", err))?;
    let registry = persistence
        .list_facilities(org_id)
        .map_err(|err| translate_persistence_error("Facility", err))?;
    let blockers = persistence
        .list_blockers_for_org(org_id)
        .map_err(|err| translate_persistence_error("Blocker", err))?;

    let results: Vec<ImportRowResult> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            preview_row(
                idx + 2,
                row,
                import_type,
                org_id,
                team_id,
                &organization.timezone,
                &registry,
                &blockers,
            )
        })
        .collect();

    let total_rows: usize = results.len();
    let invalid_rows: usize = results
        .iter()
        .filter(|result| result.status == ImportRowStatus::Invalid)
        .count();
    let rows_with_conflicts: usize = results
        .iter()
        .filter(|result| !result.conflicts.is_empty())
        .count();
    let valid: bool = invalid_rows == 0;

    Ok(ImportPreview {
        season_id,
        import_type,
        rows: results,
        total_rows,
        valid_rows: total_rows - invalid_rows,
        invalid_rows,
        rows_with_conflicts,
        valid,
        can_import: valid,
    })
}

/// Parses CSV text and previews it in one step.
///
/// # Errors
///
/// As [`parse_rows`] and [`preview_import`].
pub fn preview_csv_import(
    persistence: &mut Persistence,
    season_id: i64,
    import_type: ImportType,
    csv_text: &str,
) -> Result<ImportPreview, ApiError> {
    let rows: Vec<ImportRow> = parse_rows(import_type, csv_text)?;
    preview_import(persistence, season_id, import_type, &rows)
}

fn field_error(err: &DomainError) -> String {
    match err {
        DomainError::InvalidDuration { minutes } => {
            format!("duration_minutes: invalid duration: {minutes} minutes")
        }
        DomainError::InvalidHomeAway(value) => {
            format!("home_away: unknown home/away value '{value}'")
        }
        DomainError::DateTimeParse { value, error } => {
            format!("date/time: could not parse '{value}': {error}")
        }
        other => other.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn preview_row(
    row_number: usize,
    row: &ImportRow,
    import_type: ImportType,
    org_id: i64,
    team_id: i64,
    timezone: &str,
    registry: &[Facility],
    blockers: &[Blocker],
) -> ImportRowResult {
    let mut errors: Vec<String> = Vec::new();

    let start_instant: Option<DateTime<Utc>> =
        match parse_local_instant(&row.date, &row.time, timezone) {
            Ok(instant) => Some(instant),
            Err(err) => {
                errors.push(field_error(&err));
                None
            }
        };

    if import_type == ImportType::Games
        && !row.opponent.as_deref().is_some_and(|o| !o.trim().is_empty())
    {
        errors.push(String::from("opponent: required field is missing or empty"));
    }

    let mut explicit_duration: Option<u32> = None;
    if let Some(raw) = row
        .duration_minutes
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        match raw.parse::<u32>() {
            Ok(minutes) => match validate_duration_minutes(minutes) {
                Ok(()) => explicit_duration = Some(minutes),
                Err(err) => errors.push(field_error(&err)),
            },
            Err(_) => errors.push(format!("duration_minutes: not a whole number: '{raw}'")),
        }
    }

    let mut home_away: Option<HomeAway> = None;
    if import_type == ImportType::Games {
        home_away = match row.home_away.as_deref() {
            None => Some(HomeAway::Home),
            Some(raw) => match raw.parse::<HomeAway>() {
                Ok(value) => Some(value),
                Err(err) => {
                    errors.push(field_error(&err));
                    None
                }
            },
        };
    }

    let facility: FacilityResolution = match row
        .facility
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        None => FacilityResolution::NotGiven,
        Some(input) => match resolve_facility(input, registry) {
            FacilityMatch::Exact(matched) => FacilityResolution::Exact {
                facility_id: matched.facility_id,
                name: matched.name,
            },
            FacilityMatch::Fuzzy { facility, distance } => FacilityResolution::Fuzzy {
                facility_id: facility.facility_id,
                name: facility.name,
                distance,
            },
            FacilityMatch::NoMatch => FacilityResolution::Unmatched {
                input: input.to_string(),
            },
        },
    };

    let effective_duration: u32 = match import_type {
        ImportType::Games => explicit_duration.unwrap_or(GAME_DEFAULT_DURATION_MINUTES),
        ImportType::Practices => explicit_duration.unwrap_or(PRACTICE_DEFAULT_DURATION_MINUTES),
    };

    let mut conflicts: Vec<Conflict> = Vec::new();
    if errors.is_empty() {
        if let Some(start) = start_instant {
            let context: EventContext = EventContext {
                org_id,
                team_id,
                start,
                duration_minutes: effective_duration,
                facility_id: facility.facility_id(),
            };
            let check: ConflictCheck = check_event(&context, blockers);
            conflicts = check.conflicts;
        }
    }

    let status: ImportRowStatus = if errors.is_empty() {
        ImportRowStatus::Valid
    } else {
        ImportRowStatus::Invalid
    };
    // Practices carry the effective duration so the stored row is explicit;
    // games keep None and fall back to the fixed default at query time.
    let duration_minutes: Option<u32> = match import_type {
        ImportType::Games => explicit_duration,
        ImportType::Practices => Some(effective_duration),
    };

    ImportRowResult {
        row_number,
        status,
        errors,
        start_instant,
        duration_minutes,
        home_away,
        facility,
        conflicts,
    }
}

/// Executes an import atomically.
///
/// Re-runs the preview from scratch, so the decision to write is always
/// based on the current registry and blocker set rather than a possibly
/// stale earlier preview. Either every row is written or none are.
///
/// # Errors
///
/// Returns `ValidationFailed` (no writes) if any row is invalid,
/// `ConflictsPresent` (no writes) if conflicts exist and
/// `override_conflicts` is not set, `ResourceNotFound` for a bad season or
/// facility assignment, and `Internal` if the transaction fails.
pub fn execute_import(
    persistence: &mut Persistence,
    season_id: i64,
    import_type: ImportType,
    rows: &[ImportRow],
    options: &ExecuteOptions,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<ImportReport, ApiError> {
    let preview: ImportPreview = preview_import(persistence, season_id, import_type, rows)?;
    if !preview.can_import {
        let errors: Vec<String> = preview
            .rows
            .iter()
            .flat_map(|result| {
                result
                    .errors
                    .iter()
                    .map(move |error| format!("row {}: {error}", result.row_number))
            })
            .collect();
        return Err(ApiError::ValidationFailed { errors });
    }
    if preview.rows_with_conflicts > 0 && !options.override_conflicts {
        let conflicts: Vec<RowConflict> = preview
            .rows
            .iter()
            .filter(|result| !result.conflicts.is_empty())
            .map(|result| RowConflict {
                row_number: result.row_number,
                reasons: result
                    .conflicts
                    .iter()
                    .map(|conflict| conflict.reason.clone())
                    .collect(),
            })
            .collect();
        return Err(ApiError::ConflictsPresent { conflicts });
    }

    let (_, org_id) = handlers::season_scope(persistence, season_id)?;
    for &facility_id in options.facility_assignments.values() {
        handlers::verify_facility_in_org(persistence, org_id, facility_id)?;
    }

    let reason: &str = options
        .override_reason
        .as_deref()
        .unwrap_or(DEFAULT_OVERRIDE_REASON);

    let outcome: ImportOutcome = match import_type {
        ImportType::Games => {
            let batch: Vec<GameImport> = build_game_rows(season_id, rows, &preview, options)?;
            persistence
                .execute_games_import(org_id, &batch, actor, reason, now)
                .map_err(|err| translate_persistence_error("Import", err))?
        }
        ImportType::Practices => {
            let batch: Vec<PracticeImport> =
                build_practice_rows(season_id, rows, &preview, options)?;
            persistence
                .execute_practices_import(org_id, &batch, actor, reason, now)
                .map_err(|err| translate_persistence_error("Import", err))?
        }
    };

    tracing::info!(
        org_id,
        season_id,
        import_type = %import_type,
        events = outcome.created_event_ids.len(),
        overrides = outcome.overrides_recorded,
        "executed bulk import"
    );
    Ok(ImportReport {
        events_imported: outcome.created_event_ids.len(),
        overrides_recorded: outcome.overrides_recorded,
        created_event_ids: outcome.created_event_ids,
    })
}

/// Parses CSV text and executes it in one step.
///
/// # Errors
///
/// As [`parse_rows`] and [`execute_import`].
pub fn execute_csv_import(
    persistence: &mut Persistence,
    season_id: i64,
    import_type: ImportType,
    csv_text: &str,
    options: &ExecuteOptions,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<ImportReport, ApiError> {
    let rows: Vec<ImportRow> = parse_rows(import_type, csv_text)?;
    execute_import(persistence, season_id, import_type, &rows, options, actor, now)
}

fn row_start(result: &ImportRowResult) -> Result<DateTime<Utc>, ApiError> {
    result.start_instant.ok_or_else(|| ApiError::Internal {
        message: format!(
            "row {} validated without a parsed start instant",
            result.row_number
        ),
    })
}

fn assigned_facility(result: &ImportRowResult, options: &ExecuteOptions) -> Option<i64> {
    options
        .facility_assignments
        .get(&result.row_number)
        .copied()
        .or_else(|| result.facility.facility_id())
}

fn conflicting_ids(result: &ImportRowResult) -> Vec<i64> {
    result
        .conflicts
        .iter()
        .map(|conflict| conflict.blocker_id)
        .collect()
}

fn build_game_rows(
    season_id: i64,
    rows: &[ImportRow],
    preview: &ImportPreview,
    options: &ExecuteOptions,
) -> Result<Vec<GameImport>, ApiError> {
    rows.iter()
        .zip(&preview.rows)
        .map(|(row, result)| {
            Ok(GameImport {
                game: Game {
                    game_id: None,
                    season_id,
                    opponent: row.opponent.clone().unwrap_or_default(),
                    start_instant: row_start(result)?,
                    duration_minutes: result.duration_minutes,
                    facility_id: assigned_facility(result, options),
                    home_away: result.home_away.unwrap_or(HomeAway::Home),
                    notes: row.notes.clone(),
                },
                conflicting_blocker_ids: conflicting_ids(result),
            })
        })
        .collect()
}

fn build_practice_rows(
    season_id: i64,
    rows: &[ImportRow],
    preview: &ImportPreview,
    options: &ExecuteOptions,
) -> Result<Vec<PracticeImport>, ApiError> {
    rows.iter()
        .zip(&preview.rows)
        .map(|(row, result)| {
            Ok(PracticeImport {
                practice: Practice {
                    practice_id: None,
                    season_id,
                    start_instant: row_start(result)?,
                    duration_minutes: result
                        .duration_minutes
                        .unwrap_or(PRACTICE_DEFAULT_DURATION_MINUTES),
                    facility_id: assigned_facility(result, options),
                    notes: row.notes.clone(),
                },
                conflicting_blocker_ids: conflicting_ids(result),
            })
        })
        .collect()
}
