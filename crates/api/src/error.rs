// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use blockout_domain::DomainError;
use blockout_persistence::PersistenceError;

/// The conflicts detected for one import row, as carried by
/// [`ApiError::ConflictsPresent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowConflict {
    /// The spreadsheet row number.
    pub row_number: usize,
    /// The conflict reason strings for that row.
    pub reasons: Vec<String>,
}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// One or more rows failed validation; nothing was written.
    ///
    /// Carries every offending row and field at once so the caller fixes
    /// the batch in one pass instead of discovering errors serially.
    ValidationFailed {
        /// All validation errors, one string per row/field problem.
        errors: Vec<String>,
    },
    /// Conflicts exist and were not acknowledged; nothing was written.
    ///
    /// Distinct from `ValidationFailed` because the caller can resolve it
    /// by choosing to override rather than by fixing data.
    ConflictsPresent {
        /// The conflicting rows.
        conflicts: Vec<RowConflict>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The CSV payload itself could not be understood.
    InvalidCsvFormat {
        /// Why the CSV was rejected.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            Self::ConflictsPresent { conflicts } => {
                write!(
                    f,
                    "Conflicts present on {} row(s); set override_conflicts to proceed",
                    conflicts.len()
                )
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidCsvFormat { reason } => {
                write!(f, "Invalid CSV format: {reason}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidWindow { start, end } => ApiError::InvalidInput {
            field: String::from("end_instant"),
            message: format!("end ({end}) must be after start ({start})"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidKind(value) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("unknown blocker kind '{value}'"),
        },
        DomainError::InvalidApplicability(value) => ApiError::InvalidInput {
            field: String::from("applicability"),
            message: format!("unknown applicability '{value}'"),
        },
        DomainError::ScopeFieldMismatch {
            applicability,
            detail,
        } => ApiError::InvalidInput {
            field: String::from("scope"),
            message: format!("scope fields inconsistent for '{applicability}': {detail}"),
        },
        DomainError::InvalidEventKind(value) => ApiError::InvalidInput {
            field: String::from("event_type"),
            message: format!("unknown event type '{value}'"),
        },
        DomainError::InvalidHomeAway(value) => ApiError::InvalidInput {
            field: String::from("home_away"),
            message: format!("unknown home/away value '{value}'"),
        },
        DomainError::InvalidDuration { minutes } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: format!("invalid duration: {minutes} minutes"),
        },
        DomainError::DateTimeParse { value, error } => ApiError::InvalidInput {
            field: String::from("date/time"),
            message: format!("could not parse '{value}': {error}"),
        },
        DomainError::InvalidTimezone(value) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("unknown timezone '{value}'"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `NotFound` becomes `ResourceNotFound` with the caller-supplied resource
/// type; everything else is internal.
#[must_use]
pub fn translate_persistence_error(resource_type: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
